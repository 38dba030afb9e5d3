//! Writing the test tables to an Excel workbook.

use std::{
    io,
    path::{Path, PathBuf},
};

use crosstab_stats::{
    independence::{ChiSquareTest, TestResult},
    rounding::{CONTRIBUTION_DECIMALS, EXPECTED_DECIMALS, round_to},
    table::Table,
};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};

pub const OBSERVED_SHEET: &str = "Observados";
pub const EXPECTED_SHEET: &str = "Esperados";
pub const CONTRIBUTIONS_SHEET: &str = "Contribuciones";
pub const SUMMARY_SHEET: &str = "Resumen";

pub const TOTAL_LABEL: &str = "Total";
pub const SUMMARY_HEADERS: [&str; 3] = ["Chi-cuadrado", "Grados_libertad", "P_valor"];

/// Windows reports a file held open by another program as a sharing violation.
const ERROR_SHARING_VIOLATION: i32 = 32;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ExportError {
    #[display("cannot write {}: the file is open in another program, close it and try again", path.display())]
    Locked { path: PathBuf, source: io::Error },
    #[display("failed to write workbook {}: {source}", path.display())]
    Write { path: PathBuf, source: XlsxError },
}

impl ExportError {
    fn classify(path: &Path, error: XlsxError) -> Self {
        match error {
            XlsxError::IoError(source) if is_locked(&source) => ExportError::Locked {
                path: path.to_owned(),
                source,
            },
            source => ExportError::Write {
                path: path.to_owned(),
                source,
            },
        }
    }
}

fn is_locked(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::PermissionDenied
        || (cfg!(windows) && error.raw_os_error() == Some(ERROR_SHARING_VIOLATION))
}

/// Writes the observed, expected and contribution tables and the summary to `path`.
///
/// `row_header` labels the first column of every table sheet.
pub fn write_workbook(path: &Path, test: &ChiSquareTest, row_header: &str) -> Result<(), ExportError> {
    let mut workbook =
        build_workbook(test, row_header).map_err(|e| ExportError::classify(path, e))?;
    workbook
        .save(path)
        .map_err(|e| ExportError::classify(path, e))
}

#[expect(clippy::cast_precision_loss)]
fn build_workbook(test: &ChiSquareTest, row_header: &str) -> Result<Workbook, XlsxError> {
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    let observed = test.observed.map(|v| v as f64);
    write_table(
        workbook.add_worksheet().set_name(OBSERVED_SHEET)?,
        &header,
        row_header,
        &observed,
        None,
    )?;
    write_table(
        workbook.add_worksheet().set_name(EXPECTED_SHEET)?,
        &header,
        row_header,
        &test.expected,
        Some(EXPECTED_DECIMALS),
    )?;
    write_table(
        workbook.add_worksheet().set_name(CONTRIBUTIONS_SHEET)?,
        &header,
        row_header,
        &test.contributions,
        Some(CONTRIBUTION_DECIMALS),
    )?;
    write_summary(
        workbook.add_worksheet().set_name(SUMMARY_SHEET)?,
        &header,
        &test.result,
    )?;

    Ok(workbook)
}

/// Writes a table with a `Total` column and a `Total` row.
///
/// Totals are computed from the unrounded cells and rounded like the cells.
fn write_table(
    sheet: &mut Worksheet,
    header: &Format,
    row_header: &str,
    table: &Table<f64>,
    decimals: Option<i32>,
) -> Result<(), XlsxError> {
    let round = |v: f64| decimals.map_or(v, |d| round_to(v, d));
    let total_col = col_num(table.num_columns() + 1)?;

    sheet.write_string_with_format(0, 0, row_header, header)?;
    for (i, label) in table.column_labels().iter().enumerate() {
        sheet.write_string_with_format(0, col_num(i + 1)?, label, header)?;
    }
    sheet.write_string_with_format(0, total_col, TOTAL_LABEL, header)?;

    let row_totals = table.row_totals();
    for (i, (label, cells)) in table.rows().enumerate() {
        let row = row_num(i + 1)?;
        sheet.write_string(row, 0, label)?;
        for (j, value) in cells.iter().enumerate() {
            sheet.write_number(row, col_num(j + 1)?, round(*value))?;
        }
        sheet.write_number(row, total_col, round(row_totals[i]))?;
    }

    let total_row = row_num(table.num_rows() + 1)?;
    sheet.write_string_with_format(total_row, 0, TOTAL_LABEL, header)?;
    for (j, value) in table.column_totals().into_iter().enumerate() {
        sheet.write_number(total_row, col_num(j + 1)?, round(value))?;
    }
    sheet.write_number(total_row, total_col, round(table.grand_total()))?;

    sheet.autofit();
    Ok(())
}

/// Writes the statistic, degrees of freedom and p-value as a one-row table.
///
/// The p-value cell stays empty when the table is degenerate.
#[expect(clippy::cast_precision_loss)]
fn write_summary(
    sheet: &mut Worksheet,
    header: &Format,
    result: &TestResult,
) -> Result<(), XlsxError> {
    for (col, name) in SUMMARY_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col_num(col)?, *name, header)?;
    }
    sheet.write_number(1, 0, round_to(result.statistic, CONTRIBUTION_DECIMALS))?;
    sheet.write_number(1, 1, result.degrees_of_freedom as f64)?;
    if let Some(p_value) = result.p_value {
        sheet.write_number(1, 2, p_value)?;
    }
    sheet.autofit();
    Ok(())
}

fn row_num(index: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(index: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}
