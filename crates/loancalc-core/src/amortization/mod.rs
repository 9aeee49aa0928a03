//! Level-payment loan amortization: EMI, payoff acceleration, and the
//! full repayment schedule.

pub mod loan;
pub mod schedule;

pub use loan::{calculate_loan, LoanInput, LoanOutput};
pub use schedule::{build_schedule, ScheduleOutput, ScheduleRow};
