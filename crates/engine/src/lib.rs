//! Record store and settlement engine for a single-tenant shop bookkeeper.
//!
//! Every operation is keyed by an opaque caller identity. Each identity owns
//! independent collections of daily records, sales, purchases, supplier loans
//! and advance payments, plus one role and one profile.

pub use advance_payments::AdvancePayment;
pub use commands::{PurchaseCmd, SaleCmd};
pub use daily_records::{DailyRecord, RecordKind};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use profiles::UserProfile;
pub use purchases::Purchase;
pub use roles::UserRole;
pub use sales::Sale;
pub use supplier_loans::SupplierLoan;

mod advance_payments;
mod commands;
mod daily_records;
mod error;
mod ops;
mod profiles;
mod purchases;
mod roles;
mod sales;
mod supplier_loans;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
