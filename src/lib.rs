//! Mortgage Schedule - amortization math for fixed-rate, fixed-term loans
//!
//! This library provides:
//! - Month-by-month amortization schedules via the standard annuity formula
//! - Lazily computed, cached outstanding-balance and interest sequences
//! - Reverse term search bracketing a target monthly payment
//!
//! Everything is pure, synchronous, in-memory f64 arithmetic. Each schedule
//! owns its cached arrays exclusively, so instances can be used from multiple
//! threads without any coordination between them.

pub mod error;
pub mod schedule;
pub mod search;

// Re-export commonly used types
pub use error::ScheduleError;
pub use schedule::{AmortizationSchedule, LoanParameters, ScheduleSummary};
pub use search::{find_term_bracket, TermBracket, TermSearch, DEFAULT_MAX_YEARS};
