//! Chi-square test of independence over a contingency table.
//!
//! The test is split into small pure steps so each intermediate table can be
//! reported on its own:
//!
//! 1. [`compute_expected`]: frequencies predicted under independence
//! 2. [`compute_contributions`]: per-cell `(O - E)^2 / E`
//! 3. [`compute_statistic`]: statistic and degrees of freedom
//! 4. [`p_value`]: upper tail of the chi-square distribution
//! 5. [`decide`]: comparison against the significance level
//!
//! [`ChiSquareTest`] runs all of them at once.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::{
    contingency::ContingencyTable,
    rounding::{self, CONTRIBUTION_DECIMALS, EXPECTED_DECIMALS},
    table::Table,
};

/// Conventional significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Expected frequencies below this value make the chi-square approximation unreliable.
pub const MIN_RELIABLE_EXPECTED: f64 = 5.0;

/// Expected frequencies under the independence hypothesis.
pub type ExpectedTable = Table<f64>;

/// Per-cell terms of the chi-square statistic.
pub type ContributionTable = Table<f64>;

/// Computes `row_total * column_total / grand_total` for every cell.
///
/// When the grand total is 0 there are no valid totals and every cell is 0.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn compute_expected(observed: &ContingencyTable) -> ExpectedTable {
    let row_totals = observed.row_totals();
    let column_totals = observed.column_totals();
    let grand_total = observed.grand_total();

    Table::from_fn(
        observed.row_labels().to_vec(),
        observed.column_labels().to_vec(),
        |row, col| {
            if grand_total == 0 {
                return 0.0;
            }
            row_totals[row] as f64 * column_totals[col] as f64 / grand_total as f64
        },
    )
}

/// Computes `(O - E)^2 / E` for every cell.
///
/// A cell whose expected value is 0 contributes 0 whatever its observed
/// count. This under-counts divergence in such cells and is kept as is
/// because it changes the statistic.
///
/// # Panics
///
/// Panics if the two tables do not have the same labels.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn compute_contributions(
    observed: &ContingencyTable,
    expected: &ExpectedTable,
) -> ContributionTable {
    assert!(
        observed.same_shape(expected),
        "observed and expected tables must have the same labels"
    );

    Table::from_fn(
        observed.row_labels().to_vec(),
        observed.column_labels().to_vec(),
        |row, col| {
            let o = observed.row(row)[col] as f64;
            let e = expected.row(row)[col];
            if e == 0.0 { 0.0 } else { (o - e).powi(2) / e }
        },
    )
}

/// Returns the chi-square statistic and the degrees of freedom.
///
/// The statistic is the plain sum of every contribution; the degrees of
/// freedom are `(rows - 1) * (columns - 1)`, or 0 when either dimension has
/// fewer than two labels.
#[must_use]
pub fn compute_statistic(contributions: &ContributionTable) -> (f64, usize) {
    let statistic = contributions.grand_total();
    let degrees_of_freedom = contributions.num_rows().saturating_sub(1)
        * contributions.num_columns().saturating_sub(1);
    (statistic, degrees_of_freedom)
}

/// Upper-tail probability `P(X >= chi_square)` for `X ~ chi2(degrees_of_freedom)`.
///
/// Returns `None` when `degrees_of_freedom` is 0, where the distribution is
/// undefined.
///
/// # Examples
///
/// ```
/// # use crosstab_stats::independence::p_value;
/// // With 2 degrees of freedom the survival function is exp(-x / 2).
/// let p = p_value(2.0, 2).unwrap();
/// assert!((p - (-1.0_f64).exp()).abs() < 1e-12);
/// assert_eq!(p_value(3.0, 0), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn p_value(chi_square: f64, degrees_of_freedom: usize) -> Option<f64> {
    if degrees_of_freedom == 0 {
        return None;
    }
    let distribution = ChiSquared::new(degrees_of_freedom as f64).ok()?;
    Some(distribution.sf(chi_square))
}

/// Outcome of comparing a p-value with a significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Decision {
    /// The null hypothesis of independence is rejected.
    #[display("reject")]
    Reject,
    /// There is no evidence against independence at this level.
    #[display("fail-to-reject")]
    FailToReject,
}

/// Rejects the null hypothesis iff `p_value < alpha`.
///
/// The comparison is strict, so `p_value == alpha` fails to reject.
#[must_use]
pub fn decide(p_value: f64, alpha: f64) -> Decision {
    if p_value < alpha {
        Decision::Reject
    } else {
        Decision::FailToReject
    }
}

/// Final figures of a chi-square test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// Sum of all contributions.
    pub statistic: f64,
    /// `(rows - 1) * (columns - 1)`.
    pub degrees_of_freedom: usize,
    /// Upper-tail probability of the statistic, absent for a degenerate table.
    pub p_value: Option<f64>,
}

impl TestResult {
    /// Builds a result from a statistic and its degrees of freedom.
    #[must_use]
    pub fn new(statistic: f64, degrees_of_freedom: usize) -> Self {
        Self {
            statistic,
            degrees_of_freedom,
            p_value: p_value(statistic, degrees_of_freedom),
        }
    }

    /// A table with a single row or column has no degrees of freedom and the
    /// statistic carries no meaning.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degrees_of_freedom == 0
    }

    /// Decision at significance level `alpha`; a degenerate result never rejects.
    #[must_use]
    pub fn decision(&self, alpha: f64) -> Decision {
        self.p_value
            .map_or(Decision::FailToReject, |p| decide(p, alpha))
    }
}

/// Arithmetic precision used while running the test.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr,
)]
pub enum Precision {
    /// Full `f64` arithmetic; rounding only happens when presenting results.
    #[default]
    Exact,
    /// Rounds expected values to 2 decimals before computing contributions,
    /// each contribution to 4 decimals, and the statistic to 4 decimals
    /// before the p-value lookup.
    Legacy,
}

/// Every table and figure of one chi-square test, computed in a single pass.
#[derive(Debug, Clone)]
pub struct ChiSquareTest {
    pub observed: ContingencyTable,
    pub expected: ExpectedTable,
    pub contributions: ContributionTable,
    pub result: TestResult,
    pub precision: Precision,
}

impl ChiSquareTest {
    /// Runs the whole test on an observed table.
    ///
    /// # Examples
    ///
    /// ```
    /// use crosstab_stats::{independence::{ChiSquareTest, Precision}, table::Table};
    ///
    /// let observed = Table::from_rows(["a", "b"], ["x", "y"], [[5, 5], [5, 5]]);
    /// let test = ChiSquareTest::from_observed(observed, Precision::Exact);
    /// assert_eq!(test.result.statistic, 0.0);
    /// assert_eq!(test.result.p_value, Some(1.0));
    /// ```
    #[must_use]
    pub fn from_observed(observed: ContingencyTable, precision: Precision) -> Self {
        let (expected, contributions, result) = match precision {
            Precision::Exact => {
                let expected = compute_expected(&observed);
                let contributions = compute_contributions(&observed, &expected);
                let (statistic, df) = compute_statistic(&contributions);
                (expected, contributions, TestResult::new(statistic, df))
            }
            Precision::Legacy => {
                let expected = compute_expected(&observed)
                    .map(|v| rounding::round_to(v, EXPECTED_DECIMALS));
                let contributions = compute_contributions(&observed, &expected)
                    .map(|v| rounding::round_to(v, CONTRIBUTION_DECIMALS));
                let (statistic, df) = compute_statistic(&contributions);
                let statistic = rounding::round_to(statistic, CONTRIBUTION_DECIMALS);
                (expected, contributions, TestResult::new(statistic, df))
            }
        };

        Self {
            observed,
            expected,
            contributions,
            result,
            precision,
        }
    }

    /// Number of expected cells below [`MIN_RELIABLE_EXPECTED`].
    #[must_use]
    pub fn sparse_expected_cells(&self) -> usize {
        self.expected.count_below(MIN_RELIABLE_EXPECTED)
    }
}
