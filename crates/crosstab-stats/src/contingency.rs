use crate::{
    record::{Category, Record},
    table::Table,
};

/// Observed counts, rows are age groups and columns are genre categories.
pub type ContingencyTable = Table<u64>;

/// Cross-tabulates `records` into a contingency table.
///
/// A record is counted in cell (row, column) when its age group equals the
/// row label and its genre is a member of the column's category. Rows and
/// columns are exactly `row_labels` and `categories`, in that order, and
/// cells without matching records hold 0. Records whose age group is not a
/// row label, or whose genre belongs to no category, are not counted.
///
/// Runs in O(records x categories).
pub fn build_observed<'a, I>(
    records: I,
    row_labels: &[String],
    categories: &[Category],
) -> ContingencyTable
where
    I: IntoIterator<Item = &'a Record>,
{
    let width = categories.len();
    let mut counts = vec![0_u64; row_labels.len() * width];

    for record in records {
        let Some(row) = row_labels.iter().position(|l| *l == record.age_group) else {
            continue;
        };
        for (col, category) in categories.iter().enumerate() {
            if category.contains(&record.genre) {
                counts[row * width + col] += 1;
            }
        }
    }

    let column_labels = categories.iter().map(|c| c.name.clone()).collect();
    Table::from_fn(row_labels.to_vec(), column_labels, |row, col| {
        counts[row * width + col]
    })
}

/// Number of records that [`build_observed`] counts in no cell at all.
///
/// A record is unmatched when its age group is not a row label or its genre
/// belongs to no category. Records counted in several overlapping categories
/// are matched once.
pub fn count_unmatched<'a, I>(
    records: I,
    row_labels: &[String],
    categories: &[Category],
) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| {
            !row_labels.contains(&record.age_group)
                || !categories.iter().any(|c| c.contains(&record.genre))
        })
        .count()
}
