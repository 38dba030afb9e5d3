use std::iter::Sum;

/// A two-dimensional table with ordered row and column labels.
///
/// Cells are stored in row-major order and every (row, column) pair always
/// has a value. The table is immutable once built; derived tables are
/// produced with [`Table::map`] or [`Table::from_fn`].
///
/// # Examples
///
/// ```
/// use crosstab_stats::table::Table;
///
/// let table = Table::from_rows(["a", "b"], ["x", "y", "z"], [[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(table.row_totals(), vec![6, 15]);
/// assert_eq!(table.column_totals(), vec![5, 7, 9]);
/// assert_eq!(table.grand_total(), 21);
/// assert_eq!(table.get_by_label("b", "y"), Some(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    cells: Vec<T>,
}

impl<T> Table<T>
where
    T: Copy,
{
    /// Builds a table by evaluating `f(row, column)` for every cell.
    pub fn from_fn<F>(row_labels: Vec<String>, column_labels: Vec<String>, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let num_columns = column_labels.len();
        let cells = (0..row_labels.len())
            .flat_map(|row| (0..num_columns).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        Self {
            row_labels,
            column_labels,
            cells,
        }
    }

    /// Builds a table from nested rows of values.
    ///
    /// # Panics
    ///
    /// Panics if the number of rows or the length of any row does not match
    /// the number of labels.
    pub fn from_rows<R, C, D, Row>(row_labels: R, column_labels: C, rows: D) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        D: IntoIterator<Item = Row>,
        Row: IntoIterator<Item = T>,
    {
        let row_labels = row_labels.into_iter().map(Into::into).collect::<Vec<_>>();
        let column_labels = column_labels
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>();

        let mut cells = Vec::with_capacity(row_labels.len() * column_labels.len());
        let mut num_rows = 0;
        for row in rows {
            let before = cells.len();
            cells.extend(row);
            assert_eq!(
                cells.len() - before,
                column_labels.len(),
                "row {num_rows} has the wrong number of cells"
            );
            num_rows += 1;
        }
        assert_eq!(num_rows, row_labels.len(), "row count must match row labels");

        Self {
            row_labels,
            column_labels,
            cells,
        }
    }

    #[must_use]
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    #[must_use]
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.row_labels.len()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.column_labels.len()
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<T> {
        if row >= self.num_rows() || column >= self.num_columns() {
            return None;
        }
        Some(self.cells[row * self.num_columns() + column])
    }

    #[must_use]
    pub fn get_by_label(&self, row: &str, column: &str) -> Option<T> {
        let row = self.row_labels.iter().position(|l| l == row)?;
        let column = self.column_labels.iter().position(|l| l == column)?;
        self.get(row, column)
    }

    /// Returns the cells of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        let width = self.num_columns();
        &self.cells[row * width..(row + 1) * width]
    }

    /// Iterates over `(row label, row cells)` pairs in order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.row_labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), self.row(i)))
    }

    /// Returns `true` if `other` has the same labels in the same order.
    #[must_use]
    pub fn same_shape<U>(&self, other: &Table<U>) -> bool {
        self.row_labels == other.row_labels && self.column_labels == other.column_labels
    }

    /// Applies `f` to every cell, keeping the labels.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Table<U>
    where
        F: FnMut(T) -> U,
    {
        Table {
            row_labels: self.row_labels.clone(),
            column_labels: self.column_labels.clone(),
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }
}

impl<T> Table<T>
where
    T: Copy + Sum<T>,
{
    #[must_use]
    pub fn row_totals(&self) -> Vec<T> {
        (0..self.num_rows())
            .map(|row| self.row(row).iter().copied().sum())
            .collect()
    }

    #[must_use]
    pub fn column_totals(&self) -> Vec<T> {
        let width = self.num_columns();
        (0..width)
            .map(|col| {
                (0..self.num_rows())
                    .map(|row| self.cells[row * width + col])
                    .sum()
            })
            .collect()
    }

    #[must_use]
    pub fn grand_total(&self) -> T {
        self.cells.iter().copied().sum()
    }
}

impl Table<f64> {
    /// Number of cells whose value is strictly below `threshold`.
    #[must_use]
    pub fn count_below(&self, threshold: f64) -> usize {
        self.cells.iter().filter(|v| **v < threshold).count()
    }
}
