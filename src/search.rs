//! Reverse term search against a target monthly payment
//!
//! For a fixed principal and rate, shorter terms require strictly higher
//! monthly payments. Sweeping candidate terms downward from `max_years + 1`
//! therefore produces monotonically non-decreasing payments, so a single
//! linear pass finds the boundary: the first term whose payment exceeds the
//! target, and the last term evaluated before it whose payment did not.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::schedule::{AmortizationSchedule, LoanParameters};

/// Default upper bound on the term sweep, in years
pub const DEFAULT_MAX_YEARS: u32 = 25;

/// Configuration for one term search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermSearch {
    /// Initial loan amount
    pub principal: f64,

    /// Nominal annual interest rate as a percentage
    pub annual_interest_rate_pct: f64,

    /// Payment ceiling the caller can afford per month
    pub target_monthly_payment: f64,

    /// Longest term considered; the sweep starts one year above this
    pub max_years: u32,
}

impl TermSearch {
    /// Create a search with the default term range
    pub fn new(principal: f64, annual_interest_rate_pct: f64, target_monthly_payment: f64) -> Self {
        Self {
            principal,
            annual_interest_rate_pct,
            target_monthly_payment,
            max_years: DEFAULT_MAX_YEARS,
        }
    }

    /// Override the term range upper bound
    pub fn with_max_years(mut self, max_years: u32) -> Self {
        self.max_years = max_years;
        self
    }

    /// Sweep candidate terms from `max_years + 1` down to 1 year
    ///
    /// Each candidate's payment is recorded in evaluation order. The sweep
    /// stops at the first term whose payment strictly exceeds the target;
    /// shorter terms past that point are never evaluated.
    pub fn run(&self) -> Result<TermBracket, ScheduleError> {
        let mut bracket = TermBracket::default();

        for yr in (1..=self.max_years + 1).rev() {
            let sched = AmortizationSchedule::new(LoanParameters::new(
                self.annual_interest_rate_pct,
                yr,
                self.principal,
            ))?;
            let payment = sched.monthly_payment();
            bracket.payments_by_term.push((yr, payment));

            if payment > self.target_monthly_payment {
                bracket.above = Some(yr);
                debug!(
                    "term {}y payment {:.2} exceeds target {:.2}, stopping sweep",
                    yr, payment, self.target_monthly_payment
                );
                break;
            }
            bracket.below = Some(yr);
        }

        Ok(bracket)
    }
}

/// Result of a term search
///
/// `above` and `below` bracket the target payment: `above` is the first
/// (longest) term whose payment exceeds the target, `below` the shortest
/// term tried whose payment stayed at or under it. When both are present
/// they are consecutive years with `above == below - 1`. `above` is `None`
/// when no evaluated term exceeds the target; `below` is `None` when even
/// the longest candidate term's payment exceeds it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermBracket {
    /// Shortest term evaluated whose payment is at or under the target
    pub below: Option<u32>,

    /// First term found whose payment strictly exceeds the target
    pub above: Option<u32>,

    /// Payment for every evaluated term, in evaluation (descending-term) order
    pub payments_by_term: Vec<(u32, f64)>,
}

impl TermBracket {
    /// Payment recorded for a given term, if that term was evaluated
    pub fn payment_for(&self, term_years: u32) -> Option<f64> {
        self.payments_by_term
            .iter()
            .find(|(yr, _)| *yr == term_years)
            .map(|(_, payment)| *payment)
    }
}

/// Sweep terms for the payment closest to (but not exceeding) the target
///
/// Convenience wrapper over [`TermSearch`] taking the four search inputs
/// directly.
pub fn find_term_bracket(
    principal: f64,
    annual_interest_rate_pct: f64,
    target_monthly_payment: f64,
    max_years: u32,
) -> Result<TermBracket, ScheduleError> {
    TermSearch::new(principal, annual_interest_rate_pct, target_monthly_payment)
        .with_max_years(max_years)
        .run()
}
