//! Amortization schedule for a fixed-rate, fixed-term loan
//!
//! The schedule is a strict left-to-right monthly recurrence:
//!
//! - `interest_added[i] = outstanding[i] * monthly_rate`
//! - `outstanding[i+1] = outstanding[i] * (1 + monthly_rate) - monthly_payment`
//!
//! The two sequences are computed on first access and cached for the lifetime
//! of the instance. The terminal balance is not forced to zero; small
//! floating-point drift is expected and left in place.

use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Immutable inputs describing a fixed-rate loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Nominal annual interest rate as a percentage (5.0 means 5%)
    pub annual_interest_rate_pct: f64,

    /// Loan duration in whole years, at least 1
    pub term_years: u32,

    /// Initial loan amount, strictly positive
    pub principal: f64,
}

impl LoanParameters {
    /// Create loan parameters
    pub fn new(annual_interest_rate_pct: f64, term_years: u32, principal: f64) -> Self {
        Self {
            annual_interest_rate_pct,
            term_years,
            principal,
        }
    }
}

/// Cached per-month sequences, built once per schedule instance
#[derive(Debug, Clone)]
struct ScheduleRows {
    /// Balance at the start of each period; index 0 is the principal,
    /// index `term_months` is the terminal balance
    outstanding: Vec<f64>,

    /// Interest accrued during each period, before that period's payment
    interest_added: Vec<f64>,
}

/// Amortization schedule for one loan
///
/// Derived scalars (`monthly_rate`, `term_months`, `monthly_payment`) are
/// cheap pure functions of the parameters. The month-by-month sequences are
/// computed at most once, on first demand, and every subsequent read returns
/// the same cached storage.
#[derive(Debug)]
pub struct AmortizationSchedule {
    params: LoanParameters,
    rows: OnceLock<ScheduleRows>,
}

impl AmortizationSchedule {
    /// Create a schedule, validating that the payment formula is well defined
    ///
    /// Rejects a zero-month term and a non-positive (or NaN) principal, since
    /// either would put a division by zero into `monthly_payment`. All other
    /// inputs are accepted; extreme rates or terms may produce non-finite
    /// values in the sequences, which are propagated as-is.
    pub fn new(params: LoanParameters) -> Result<Self, ScheduleError> {
        if params.term_years == 0 {
            return Err(ScheduleError::invalid(format!(
                "term_years must be at least 1, got {}",
                params.term_years
            )));
        }
        if !(params.principal > 0.0) {
            return Err(ScheduleError::invalid(format!(
                "principal must be positive, got {}",
                params.principal
            )));
        }

        Ok(Self {
            params,
            rows: OnceLock::new(),
        })
    }

    /// The loan parameters this schedule was built from
    pub fn params(&self) -> LoanParameters {
        self.params
    }

    /// Monthly interest rate as a fraction (annual percentage / 1200)
    pub fn monthly_rate(&self) -> f64 {
        self.params.annual_interest_rate_pct / 1200.0
    }

    /// Loan duration in months
    pub fn term_months(&self) -> u32 {
        self.params.term_years * 12
    }

    /// Level monthly payment from the annuity formula
    ///
    /// At zero rate the annuity formula degenerates to 0/0, so the payment
    /// reduces to straight principal / months.
    pub fn monthly_payment(&self) -> f64 {
        let r = self.monthly_rate();
        let n = self.term_months();

        if r == 0.0 {
            return self.params.principal / n as f64;
        }

        let growth = (1.0 + r).powi(n as i32);
        self.params.principal * (r * growth) / (growth - 1.0)
    }

    /// Outstanding balance at the start of each period
    ///
    /// `term_months + 1` entries; entry 0 is the principal and the final
    /// entry is the terminal balance (near zero up to floating-point drift).
    pub fn outstanding_sequence(&self) -> &[f64] {
        &self.rows().outstanding
    }

    /// Interest accrued during each period, `term_months` entries
    pub fn interest_sequence(&self) -> &[f64] {
        &self.rows().interest_added
    }

    /// Total interest paid over the life of the loan
    pub fn total_interest(&self) -> f64 {
        self.interest_sequence().iter().sum()
    }

    /// Total interest as a percentage of the principal
    pub fn total_interest_percent(&self) -> f64 {
        self.total_interest() / self.params.principal * 100.0
    }

    /// Summary scalars for this schedule
    pub fn summary(&self) -> ScheduleSummary {
        let outstanding = self.outstanding_sequence();
        ScheduleSummary {
            term_months: self.term_months(),
            monthly_payment: self.monthly_payment(),
            total_interest: self.total_interest(),
            total_interest_pct: self.total_interest_percent(),
            final_balance: *outstanding.last().unwrap_or(&0.0),
        }
    }

    /// Cached rows, computing them on first access
    fn rows(&self) -> &ScheduleRows {
        self.rows.get_or_init(|| self.compute_rows())
    }

    /// Run the forward recurrence over the full term
    fn compute_rows(&self) -> ScheduleRows {
        let n = self.term_months() as usize;
        let r = self.monthly_rate();
        let payment = self.monthly_payment();

        let mut outstanding = vec![0.0; n + 1];
        outstanding[0] = self.params.principal;
        let mut interest_added = vec![0.0; n];

        for i in 0..n {
            interest_added[i] = outstanding[i] * r;
            outstanding[i + 1] = outstanding[i] * (1.0 + r) - payment;
        }

        debug!(
            "computed {}-month schedule: payment {:.2}, terminal balance {:.6}",
            n,
            payment,
            outstanding[n]
        );

        ScheduleRows {
            outstanding,
            interest_added,
        }
    }
}

/// Summary statistics for one amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_interest_pct: f64,
    /// Balance left after the final payment; near zero, not forced to zero
    pub final_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn schedule(rate_pct: f64, years: u32, principal: f64) -> AmortizationSchedule {
        AmortizationSchedule::new(LoanParameters::new(rate_pct, years, principal)).unwrap()
    }

    #[test]
    fn test_standard_30_year_loan() {
        let sched = schedule(4.5, 30, 200_000.0);

        assert_eq!(sched.term_months(), 360);
        assert_abs_diff_eq!(sched.monthly_payment(), 1013.37, epsilon = 0.01);

        let outstanding = sched.outstanding_sequence();
        assert_eq!(outstanding.len(), 361);
        assert_eq!(outstanding[0], 200_000.0);
        assert_eq!(sched.interest_sequence().len(), 360);
    }

    #[test]
    fn test_terminal_balance_near_zero() {
        for (rate, years, principal) in [
            (4.5, 30, 200_000.0),
            (5.0, 25, 250_000.0),
            (7.25, 15, 80_000.0),
            (1.0, 5, 10_000.0),
        ] {
            let sched = schedule(rate, years, principal);
            let terminal = *sched.outstanding_sequence().last().unwrap();
            assert!(
                terminal.abs() < 1e-6 * principal,
                "terminal balance {} too large for {}% / {}y",
                terminal,
                rate,
                years
            );
        }
    }

    #[test]
    fn test_zero_rate_degenerates_to_straight_line() {
        let sched = schedule(0.0, 10, 120_000.0);

        assert_eq!(sched.monthly_rate(), 0.0);
        assert_eq!(sched.monthly_payment(), 1000.0);

        // No interest accrues and the balance steps down by exactly one payment
        assert!(sched.interest_sequence().iter().all(|&i| i == 0.0));
        assert_eq!(sched.total_interest(), 0.0);

        let outstanding = sched.outstanding_sequence();
        assert_eq!(outstanding[1], 119_000.0);
        assert_eq!(*outstanding.last().unwrap(), 0.0);
    }

    #[test]
    fn test_total_interest_consistency() {
        let sched = schedule(6.0, 20, 150_000.0);

        let summed: f64 = sched.interest_sequence().iter().sum();
        assert_eq!(sched.total_interest(), summed);
        assert_relative_eq!(
            sched.total_interest_percent(),
            summed / 150_000.0 * 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_interest_tracks_outstanding_balance() {
        let sched = schedule(4.5, 30, 200_000.0);
        let r = sched.monthly_rate();

        let outstanding = sched.outstanding_sequence();
        let interest = sched.interest_sequence();
        for i in 0..interest.len() {
            assert_eq!(interest[i], outstanding[i] * r);
        }
    }

    #[test]
    fn test_sequences_are_memoized() {
        let sched = schedule(4.5, 30, 200_000.0);

        let first = sched.outstanding_sequence();
        let second = sched.outstanding_sequence();

        // Same cached storage, not a recomputed copy
        assert_eq!(first.as_ptr(), second.as_ptr());
        assert_eq!(first, second);
        assert_eq!(
            sched.interest_sequence().as_ptr(),
            sched.interest_sequence().as_ptr()
        );
    }

    #[test]
    fn test_summary_matches_sequences() {
        let sched = schedule(5.0, 25, 250_000.0);
        let summary = sched.summary();

        assert_eq!(summary.term_months, 300);
        assert_eq!(summary.monthly_payment, sched.monthly_payment());
        assert_eq!(summary.total_interest, sched.total_interest());
        assert_eq!(
            summary.final_balance,
            *sched.outstanding_sequence().last().unwrap()
        );
    }

    #[test]
    fn test_rejects_zero_term() {
        let err = AmortizationSchedule::new(LoanParameters::new(4.5, 0, 100_000.0)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidParameter { .. }));
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        assert!(AmortizationSchedule::new(LoanParameters::new(4.5, 30, 0.0)).is_err());
        assert!(AmortizationSchedule::new(LoanParameters::new(4.5, 30, -5.0)).is_err());
        assert!(AmortizationSchedule::new(LoanParameters::new(4.5, 30, f64::NAN)).is_err());
    }

    #[test]
    fn test_summary_serializes() {
        let summary = schedule(4.5, 30, 200_000.0).summary();
        let json = serde_json::to_string(&summary).unwrap();
        let back: ScheduleSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
