//! Command-line front-end for the chi-square test of independence between
//! age groups and favorite genres.
//!
//! The binary reads records from a spreadsheet ([`input`]), cross-tabulates
//! them with the labels of an [`config::AnalysisConfig`], runs the test from
//! `crosstab-stats`, prints the tables ([`report`]) and exports them to a
//! workbook ([`export`]).

use crosstab_stats::{
    contingency,
    independence::{ChiSquareTest, Precision},
    record::Record,
};

use crate::config::AnalysisConfig;

pub mod command;
pub mod config;
pub mod export;
pub mod input;
pub mod report;
pub mod util;

/// Cross-tabulates `records` with the labels of `config` and runs the test.
#[must_use]
pub fn analyze(records: &[Record], config: &AnalysisConfig, precision: Precision) -> ChiSquareTest {
    let observed = contingency::build_observed(records, &config.age_groups, &config.categories);
    ChiSquareTest::from_observed(observed, precision)
}
