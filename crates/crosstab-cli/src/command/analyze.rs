use std::path::PathBuf;

use anyhow::Context;
use crosstab_stats::{
    contingency::count_unmatched,
    independence::{MIN_RELIABLE_EXPECTED, Precision},
};

use crate::{config::AnalysisConfig, export, input, report};

const DEFAULT_INPUT: &str = "./Datos.xlsx";
const DEFAULT_OUTPUT: &str = "resultados_preferencias.xlsx";

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Spreadsheet with one record per row
    #[clap(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Workbook the tables are exported to
    #[clap(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Worksheet to read (the first one if omitted)
    #[clap(long)]
    sheet: Option<String>,
    /// JSON file with column names, age groups and genre categories
    #[clap(long)]
    config: Option<PathBuf>,
    /// Significance level, overrides the configuration
    #[clap(long)]
    alpha: Option<f64>,
    /// Arithmetic precision: `exact`, or `legacy` to round intermediate tables
    #[clap(long, default_value_t = Precision::Exact)]
    precision: Precision,
    /// Only print the report, do not write the workbook
    #[clap(long)]
    no_export: bool,
}

impl Default for AnalyzeArg {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet: None,
            config: None,
            alpha: None,
            precision: Precision::default(),
            no_export: false,
        }
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        input: input_path,
        output: output_path,
        sheet,
        config: config_path,
        alpha,
        precision,
        no_export,
    } = arg;

    let mut config = match config_path {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(alpha) = alpha {
        config.alpha = *alpha;
        config.validate().context("Invalid --alpha value")?;
    }

    log::info!("Reading records from {}...", input_path.display());
    let records = input::read_records(
        input_path,
        sheet.as_deref(),
        &config.age_column,
        &config.genre_column,
    )?;
    println!(
        "Input file read successfully: {} ({} records)",
        input_path.display(),
        records.len()
    );

    log::info!("Building contingency table ({precision} precision)...");
    let test = crate::analyze(&records, &config, *precision);
    let unmatched = count_unmatched(&records, &config.age_groups, &config.categories);
    if unmatched > 0 {
        log::warn!(
            "{unmatched} of {} records match no age group or genre category and were not counted",
            records.len()
        );
    }

    report::print_report(&test, &config.age_column, config.alpha);

    if test.result.is_degenerate() {
        log::warn!(
            "The table has {} row(s) and {} column(s); the statistic and p-value carry no meaning",
            test.observed.num_rows(),
            test.observed.num_columns()
        );
    }
    let sparse = test.sparse_expected_cells();
    if sparse > 0 {
        log::warn!(
            "{sparse} expected frequencies are below {MIN_RELIABLE_EXPECTED}; the chi-square approximation may be unreliable"
        );
    }

    if *no_export {
        return Ok(());
    }

    log::info!("Writing results to {}...", output_path.display());
    match export::write_workbook(output_path, &test, &config.age_column) {
        Ok(()) => println!("\nResults saved to {}", output_path.display()),
        Err(e) if e.is_locked() => log::warn!("{e}"),
        Err(e) => log::error!("{e}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rust_xlsxwriter::Workbook;

    use super::*;

    fn write_input(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Grupo de edad").unwrap();
        sheet.write_string(0, 1, "Género favorito").unwrap();
        let rows = [
            ("Adultos", "Terror"),
            ("Adultos", "Drama"),
            ("Jóvenes", "Comedia"),
            ("Adultos mayores", "Drama"),
        ];
        for (row, (age, genre)) in (1..).zip(rows) {
            sheet.write_string(row, 0, age).unwrap();
            sheet.write_string(row, 1, genre).unwrap();
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_export_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Datos.xlsx");
        let output = dir.path().join("missing").join("out.xlsx");
        write_input(&input);

        let arg = AnalyzeArg {
            input,
            output: output.clone(),
            ..AnalyzeArg::default()
        };
        assert!(run(&arg).is_ok());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let arg = AnalyzeArg {
            input: dir.path().join("Datos.xlsx"),
            no_export: true,
            ..AnalyzeArg::default()
        };
        assert!(run(&arg).is_err());
    }

    #[test]
    fn test_exports_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Datos.xlsx");
        let output = dir.path().join("out.xlsx");
        write_input(&input);

        let arg = AnalyzeArg {
            input,
            output: output.clone(),
            ..AnalyzeArg::default()
        };
        run(&arg).unwrap();
        assert!(output.exists());
    }
}
