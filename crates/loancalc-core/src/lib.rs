pub mod error;
pub mod payment;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "balloon")]
pub mod balloon;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan calculations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
