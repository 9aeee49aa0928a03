pub mod balloon;
pub mod loan;
