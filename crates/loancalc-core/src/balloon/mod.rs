//! Balloon loan calculations.

pub mod loan;

pub use loan::{calculate_balloon_loan, BalloonLoanInput, BalloonLoanOutput};
