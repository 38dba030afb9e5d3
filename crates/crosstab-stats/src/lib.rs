//! Contingency tables and the chi-square test of independence.
//!
//! This crate provides the computational core of the `crosstab` tool:
//!
//! - **Records and categories**: Observations with two categorical fields, and
//!   named categories that group free-form labels through membership lists
//! - **Labeled tables**: Row-major 2-D tables with ordered labels and totals
//! - **Cross-tabulation**: Counting records into a contingency table
//! - **Independence test**: Expected frequencies, per-cell contributions, the
//!   chi-square statistic, degrees of freedom, p-value and decision
//!
//! # Modules
//!
//! - [`record`]: Observations and genre categories
//! - [`table`]: Generic labeled table with row, column and grand totals
//! - [`contingency`]: Building the observed contingency table
//! - [`independence`]: The chi-square test of independence
//! - [`rounding`]: Decimal rounding used for display and legacy arithmetic
//!
//! # Examples
//!
//! ## Building an observed table
//!
//! ```
//! use crosstab_stats::{contingency, record::{Category, Record}};
//!
//! let records = [
//!     Record::new("Adultos", "Terror"),
//!     Record::new("Jóvenes", "Comedia"),
//!     Record::new("Jóvenes", "Terror"),
//! ];
//! let rows = ["Adultos".to_owned(), "Jóvenes".to_owned()];
//! let categories = [Category::singleton("Terror"), Category::singleton("Comedia")];
//!
//! let observed = contingency::build_observed(&records, &rows, &categories);
//! assert_eq!(observed.get_by_label("Jóvenes", "Terror"), Some(1));
//! assert_eq!(observed.grand_total(), 3);
//! ```
//!
//! ## Running the test
//!
//! ```
//! use crosstab_stats::{
//!     independence::{ChiSquareTest, Decision, Precision},
//!     table::Table,
//! };
//!
//! let observed = Table::from_rows(
//!     ["A", "B"],
//!     ["X", "Y"],
//!     [[30, 10], [10, 30]],
//! );
//! let test = ChiSquareTest::from_observed(observed, Precision::Exact);
//! assert_eq!(test.result.degrees_of_freedom, 1);
//! assert_eq!(test.result.decision(0.05), Decision::Reject);
//! ```

pub mod contingency;
pub mod independence;
pub mod record;
pub mod rounding;
pub mod table;
