//! # bontez-core: Pure Business Logic for Bontez
//!
//! This crate is the **heart** of the Bontez gas-cylinder retail system.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bontez Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation Layer (external repo)                 │   │
//! │  │    Dashboard ──► Sales forms ──► Report charts ──► Ledger UI   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bontez-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │   money   │  │installment │  │  report   │ │   │
//! │  │   │  Supplier │  │   Money   │  │ build_plan │  │ breakdown │ │   │
//! │  │   │   Sale    │  │ split_even│  │  schedule  │  │ range rpt │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bontez-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Supplier, Product, Client, Sale, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`installment`] - Installment plan generation
//! - [`report`] - Report shapes and pure aggregation functions
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bontez_core::money::Money;
//! use bontez_core::installment;
//! use chrono::Utc;
//!
//! // Create money from cents (never from floats!)
//! let total = Money::from_cents(470_000); // Ksh 4,700.00
//!
//! // Split into three installments; amounts always sum exactly
//! let plan = installment::build_plan(total, 3, Utc::now()).unwrap();
//! let sum: i64 = plan.iter().map(|p| p.amount.cents()).sum();
//! assert_eq!(sum, 470_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod installment;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bontez_core::Money` instead of
// `use bontez_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of installments for an installment-plan sale.
///
/// ## Business Reason
/// The shop's standard plan is three monthly payments. Callers may pass a
/// different count at sale creation; this is only the fallback.
pub const DEFAULT_INSTALLMENT_COUNT: u32 = 3;

/// Days between consecutive installment due dates.
///
/// Due dates land at 30, 60, 90, ... days after the sale date.
pub const INSTALLMENT_INTERVAL_DAYS: i64 = 30;

/// Maximum number of installments a single sale may be split into.
pub const MAX_INSTALLMENT_COUNT: u32 = 36;

/// Default report window when no start date is supplied (days before end).
pub const DEFAULT_REPORT_WINDOW_DAYS: i64 = 30;

/// Maximum line items allowed in a single sale.
///
/// ## Business Reason
/// Prevents runaway sales and ensures reasonable transaction sizes.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Synthetic supplier bucket for sales with no attributed supplier.
pub const MIXED_GAS_LABEL: &str = "Mixed Gas";

/// Chart color for the synthetic [`MIXED_GAS_LABEL`] bucket.
pub const MIXED_GAS_COLOR: &str = "purple";

/// Chart color for supplier labels with no configured color.
pub const FALLBACK_COLOR: &str = "gray";

/// Number of clients returned by the top-clients report section.
pub const TOP_CLIENTS_LIMIT: usize = 10;
