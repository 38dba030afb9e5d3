//! Reading records from a spreadsheet.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader as _};
use crosstab_stats::record::Record;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum InputError {
    #[display("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },
    #[display("failed to read spreadsheet {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: calamine::Error,
    },
    #[display("sheet {sheet:?} not found in {} (available: {})", path.display(), available.join(", "))]
    MissingSheet {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },
    #[display("spreadsheet {} has no header row", path.display())]
    EmptySheet { path: PathBuf },
    #[display("column {column:?} not found in header (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
}

/// Reads one [`Record`] per data row of a spreadsheet.
///
/// The first row of the sheet is the header. Header names are trimmed of
/// surrounding whitespace before `age_column` and `genre_column` are looked
/// up; cell values are kept verbatim. `sheet` selects a worksheet by name,
/// the first worksheet is used otherwise.
pub fn read_records(
    path: &Path,
    sheet: Option<&str>,
    age_column: &str,
    genre_column: &str,
) -> Result<Vec<Record>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingFile {
            path: path.to_owned(),
        });
    }

    let read_error = |source| InputError::Read {
        path: path.to_owned(),
        source,
    };

    let mut workbook = calamine::open_workbook_auto(path).map_err(read_error)?;
    let range = match sheet {
        Some(name) => {
            let available = workbook.sheet_names();
            if !available.iter().any(|n| n == name) {
                return Err(InputError::MissingSheet {
                    path: path.to_owned(),
                    sheet: name.to_owned(),
                    available,
                });
            }
            workbook.worksheet_range(name).map_err(read_error)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| InputError::EmptySheet {
                path: path.to_owned(),
            })?
            .map_err(read_error)?,
    };

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| InputError::EmptySheet {
        path: path.to_owned(),
    })?;
    records_from_rows(header, rows, age_column, genre_column)
}

/// Extracts records from a header row and the data rows following it.
pub fn records_from_rows<'a, I>(
    header: &[Data],
    rows: I,
    age_column: &str,
    genre_column: &str,
) -> Result<Vec<Record>, InputError>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let names = header
        .iter()
        .map(|cell| cell_text(cell).trim().to_owned())
        .collect::<Vec<_>>();
    let find_column = |column: &str| {
        names
            .iter()
            .position(|n| n == column)
            .ok_or_else(|| InputError::MissingColumn {
                column: column.to_owned(),
                available: names.clone(),
            })
    };
    let age_index = find_column(age_column)?;
    let genre_index = find_column(genre_column)?;

    let records = rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            let field = |index: usize| row.get(index).map(cell_text).unwrap_or_default();
            Record::new(field(age_index), field(genre_index))
        })
        .collect::<Vec<_>>();

    log::debug!(
        "read {} records using columns {age_column:?} (#{age_index}) and {genre_column:?} (#{genre_index})",
        records.len()
    );
    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
