//! # Repository Module
//!
//! Database repository implementations for Bontez.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  db.sales().create_sale(input)                                 │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── create_sale(&self, input)       ← one transaction                 │
//! │  ├── record_payment(&self, id, amt)                                    │
//! │  └── get_with_details(&self, id)                                       │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Domain validation runs before any write                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`supplier::SupplierRepository`] - Supplier CRUD
//! - [`client::ClientRepository`] - Client CRUD and pagination
//! - [`product::ProductRepository`] - Product CRUD
//! - [`sale::SaleRepository`] - Atomic sale creation, payments, listings
//! - [`accessory::AccessoryRepository`] - Daily accessory ledger
//! - [`report::ReportRepository`] - Read-only reporting engine

use serde::Serialize;

pub mod accessory;
pub mod client;
pub mod product;
pub mod report;
pub mod sale;
pub mod supplier;

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total rows across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: u32,
    /// Total page count.
    pub pages: u32,
}

impl<T> Page<T> {
    /// Assembles a page from fetched items and the overall row count.
    pub fn new(items: Vec<T>, total: i64, page: u32, limit: u32) -> Self {
        let pages = if total <= 0 {
            0
        } else {
            ((total as u64).div_ceil(limit.max(1) as u64)) as u32
        };
        Page {
            items,
            total,
            page,
            pages,
        }
    }
}

/// Clamps pagination parameters to sane values and returns (page, limit,
/// offset). Page numbers are 1-based; zero or missing values fall back to
/// the defaults the presentation layer expects.
pub(crate) fn page_params(page: u32, limit: u32) -> (u32, u32, i64) {
    let page = page.max(1);
    let limit = limit.clamp(1, 100);
    let offset = (page as i64 - 1) * limit as i64;
    (page, limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_math() {
        let page = Page::new(vec![1, 2, 3], 45, 1, 20);
        assert_eq!(page.pages, 3);

        let page: Page<i32> = Page::new(vec![], 0, 1, 20);
        assert_eq!(page.pages, 0);

        let page = Page::new(vec![1], 20, 1, 20);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn test_page_params_clamping() {
        assert_eq!(page_params(0, 0), (1, 1, 0));
        assert_eq!(page_params(1, 20), (1, 20, 0));
        assert_eq!(page_params(3, 20), (3, 20, 40));
        assert_eq!(page_params(1, 1000), (1, 100, 0));
    }
}
