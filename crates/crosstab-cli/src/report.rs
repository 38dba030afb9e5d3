//! Console report of a chi-square test.
//!
//! Tables are printed with a `Total` column and a `Total` row, followed by a
//! summary block with the statistic, degrees of freedom, p-value and the
//! conclusion at the configured significance level.

use std::iter::Sum;

use crosstab_stats::{
    independence::{ChiSquareTest, Decision, TestResult},
    rounding::{CONTRIBUTION_DECIMALS, EXPECTED_DECIMALS, P_VALUE_DECIMALS},
    table::Table,
};

use crate::export::TOTAL_LABEL;

const VALUE_WIDTH: usize = 12;
const MIN_LABEL_WIDTH: usize = 16;

/// Prints the three tables and the summary block.
pub fn print_report(test: &ChiSquareTest, row_header: &str, alpha: f64) {
    println!();
    println!("Table 1: Observed frequencies (with totals)");
    print!("{}", render_table(row_header, &test.observed, |v| v.to_string()));

    println!();
    println!("Table 2: Expected frequencies under H0 (with totals)");
    print!(
        "{}",
        render_table(row_header, &test.expected, |v| format!(
            "{v:.prec$}",
            prec = decimals(EXPECTED_DECIMALS)
        ))
    );

    println!();
    println!("Table 3: Contributions (O - E)^2 / E (with totals)");
    print!(
        "{}",
        render_table(row_header, &test.contributions, |v| format!(
            "{v:.prec$}",
            prec = decimals(CONTRIBUTION_DECIMALS)
        ))
    );

    println!();
    print!("{}", render_summary(&test.result, alpha));
}

/// Renders a table with row and column totals as aligned text.
///
/// Each line starts with two spaces, like the other tables of the report.
pub fn render_table<T, F>(row_header: &str, table: &Table<T>, format: F) -> String
where
    T: Copy + Sum<T>,
    F: Fn(T) -> String,
{
    let label_width = table
        .row_labels()
        .iter()
        .map(|l| l.chars().count())
        .chain([row_header.chars().count(), TOTAL_LABEL.len()])
        .max()
        .unwrap_or(0)
        .max(MIN_LABEL_WIDTH);
    let value_width = table
        .column_labels()
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(VALUE_WIDTH);

    let mut lines = vec![format_line(
        row_header,
        table
            .column_labels()
            .iter()
            .cloned()
            .chain([TOTAL_LABEL.to_owned()]),
        label_width,
        value_width,
    )];
    let separator_width = label_width + (value_width + 1) * (table.num_columns() + 1);
    lines.push(format!("  {}", "-".repeat(separator_width)));

    let row_totals = table.row_totals();
    for ((label, cells), total) in table.rows().zip(row_totals) {
        lines.push(format_line(
            label,
            cells.iter().copied().chain([total]).map(&format),
            label_width,
            value_width,
        ));
    }

    lines.push(format_line(
        TOTAL_LABEL,
        table
            .column_totals()
            .into_iter()
            .chain([table.grand_total()])
            .map(&format),
        label_width,
        value_width,
    ));

    lines.join("\n") + "\n"
}

/// Renders the summary block of the test.
pub fn render_summary(result: &TestResult, alpha: f64) -> String {
    let p_value = result.p_value.map_or_else(
        || "N/A".to_owned(),
        |p| format!("{p:.prec$}", prec = decimals(P_VALUE_DECIMALS)),
    );
    let conclusion = if result.is_degenerate() {
        "No conclusion: the table needs at least two rows and two columns."
    } else {
        match result.decision(alpha) {
            Decision::Reject => "Reject H0: there is a significant association between the variables.",
            Decision::FailToReject => {
                "Fail to reject H0: there is no evidence of association between the variables."
            }
        }
    };

    let lines = [
        "Chi-square test of independence".to_owned(),
        format!("  {}", "-".repeat(40)),
        format!(
            "  Statistic (chi2)   : {:.prec$}",
            result.statistic,
            prec = decimals(CONTRIBUTION_DECIMALS)
        ),
        format!("  Degrees of freedom : {}", result.degrees_of_freedom),
        format!("  P-value            : {p_value}"),
        format!("  Significance level : {alpha}"),
        String::new(),
        format!("=> {conclusion}"),
    ];
    lines.join("\n") + "\n"
}

fn format_line<I>(label: &str, values: I, label_width: usize, value_width: usize) -> String
where
    I: IntoIterator<Item = String>,
{
    let cells = values
        .into_iter()
        .map(|value| format!(" {value:>value_width$}"))
        .collect::<String>();
    format!("  {label:<label_width$}{cells}")
}

fn decimals(places: i32) -> usize {
    usize::try_from(places).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use crosstab_stats::independence::Precision;

    use super::*;

    fn preferences() -> ChiSquareTest {
        let observed = Table::from_rows(
            ["Adultos", "Adultos mayores", "Jóvenes"],
            ["Terror", "Comedia", "Drama"],
            [[10, 5, 15], [2, 3, 20], [20, 15, 5]],
        );
        ChiSquareTest::from_observed(observed, Precision::Exact)
    }

    #[test]
    fn test_observed_table_has_totals() {
        let test = preferences();
        let text = render_table("Grupo de edad", &test.observed, |v| v.to_string());
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 6, "header, separator, 3 rows, total:\n{text}");
        assert!(lines[0].contains("Terror") && lines[0].ends_with("Total"));
        assert!(lines[1].trim().chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("  Adultos "));
        assert!(lines[2].ends_with(" 30"));
        assert!(lines[5].starts_with("  Total"));
        assert!(lines[5].ends_with(" 95"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let test = preferences();
        let text = render_table("Grupo de edad", &test.expected, |v| format!("{v:.2}"));
        let widths = text
            .lines()
            .filter(|l| !l.trim_start().starts_with('-'))
            .map(|l| l.chars().count())
            .collect::<Vec<_>>();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{text}");
        assert!(text.contains("10.11"));
    }

    #[test]
    fn test_long_and_accented_labels_stay_aligned() {
        let observed = Table::from_rows(
            ["Jóvenes", "Adultos mayores de sesenta años"],
            ["Terror", "Ciencia ficción"],
            [[1, 2], [3, 4]],
        );
        let text = render_table("Grupo de edad", &observed, |v| v.to_string());
        let lines = text.lines().collect::<Vec<_>>();

        let widths = lines.iter().map(|l| l.chars().count()).collect::<Vec<_>>();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{text}");
        assert!(lines[2].starts_with("  Jóvenes    "), "{text}");
        assert!(lines[3].starts_with("  Adultos mayores de sesenta años "));
        assert!(text.ends_with(" 10\n"), "{text}");
    }

    #[test]
    fn test_summary_layout() {
        let result = TestResult::new(1.0, 4);
        let text = render_summary(&result, 0.05);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 8, "{text}");
        assert_eq!(lines[0], "Chi-square test of independence");
        assert_eq!(lines[2], "  Statistic (chi2)   : 1.0000");
        assert_eq!(lines[5], "  Significance level : 0.05");
        assert!(lines[6].is_empty());
        assert!(lines[7].starts_with("=> "));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_summary_formats() {
        let test = preferences();
        let text = render_summary(&test.result, 0.05);

        assert!(text.contains("30.5179"), "{text}");
        assert!(text.contains("Degrees of freedom : 4"));
        assert!(text.contains("P-value            : 0.000004"), "{text}");
        assert!(text.contains("Reject H0"));
    }

    #[test]
    fn test_summary_for_degenerate_table() {
        let result = TestResult::new(1.5, 0);
        let text = render_summary(&result, 0.05);

        assert!(text.contains("P-value            : N/A"));
        assert!(text.contains("No conclusion"));
    }

    #[test]
    fn test_summary_fail_to_reject() {
        let result = TestResult::new(1.0, 4);
        let text = render_summary(&result, 0.05);
        assert!(text.contains("Fail to reject H0"));
    }
}
