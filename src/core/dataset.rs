//! Parsed CSV dataset shared by the chart and map views.

use tracing::debug;

use crate::error::{VizError, VizResult};

/// One CSV record.
///
/// `values` is aligned with [`DataTable::value_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub id: String,
    pub category: String,
    pub values: Vec<f64>,
}

impl DataRow {
    /// Value at `column`, `NaN` when the row has no such cell.
    #[must_use]
    pub fn value(&self, column: usize) -> f64 {
        self.values.get(column).copied().unwrap_or(f64::NAN)
    }
}

/// One `(row id, value)` pair of a category slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub id: String,
    pub value: f64,
}

/// Dataset keyed by row id, sliced by a discriminator column.
///
/// Expected layout:
/// - header row required
/// - first column is the row id (region name)
/// - the discriminator column (e.g. `semester`) may sit anywhere after it
/// - every other column is numeric, named by a `"{nationality} {sex}"` key
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    id_column: String,
    category_column: String,
    value_columns: Vec<String>,
    rows: Vec<DataRow>,
}

impl DataTable {
    /// Parses `input` and coerces every non-numeric cell to `NaN`.
    ///
    /// Only structural problems fail: unreadable CSV, a header without a
    /// data column, or a missing discriminator column.
    pub fn parse_csv(input: &str, category_column: &str) -> VizResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input.as_bytes());

        let header = reader.headers().map_err(csv_error)?.clone();
        let Some(id_column) = header.get(0).map(str::to_owned) else {
            return Err(VizError::InvalidData("CSV header is empty".to_owned()));
        };
        let category_index = header
            .iter()
            .position(|name| name == category_column)
            .filter(|index| *index > 0)
            .ok_or_else(|| {
                VizError::InvalidData(format!(
                    "CSV header has no `{category_column}` discriminator column"
                ))
            })?;

        let value_indices: Vec<usize> = (1..header.len())
            .filter(|index| *index != category_index)
            .collect();
        let value_columns = value_indices
            .iter()
            .map(|index| header[*index].to_owned())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let Some(id) = record.get(0).filter(|id| !id.is_empty()) else {
                continue;
            };
            let values = value_indices
                .iter()
                .map(|index| record.get(*index).map_or(f64::NAN, coerce_number))
                .collect();
            rows.push(DataRow {
                id: id.to_owned(),
                category: record.get(category_index).unwrap_or_default().to_owned(),
                values,
            });
        }

        debug!(
            rows = rows.len(),
            columns = header.len(),
            "parsed dataset"
        );
        Ok(Self {
            id_column,
            category_column: category_column.to_owned(),
            value_columns,
            rows,
        })
    }

    #[must_use]
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    #[must_use]
    pub fn category_column(&self) -> &str {
        &self.category_column
    }

    #[must_use]
    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    #[must_use]
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.value_columns.iter().position(|column| column == key)
    }

    /// Rows whose discriminator equals `category`, in file order.
    pub fn rows_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a DataRow> {
        self.rows.iter().filter(move |row| row.category == category)
    }

    /// Ordered `(row id, value)` pairs of `key` for one category slice.
    ///
    /// An unknown `key` yields an empty series.
    #[must_use]
    pub fn series(&self, category: &str, key: &str) -> Vec<SeriesPoint> {
        let Some(column) = self.column_index(key) else {
            return Vec::new();
        };
        self.rows_in_category(category)
            .map(|row| SeriesPoint {
                id: row.id.clone(),
                value: row.value(column),
            })
            .collect()
    }
}

/// Numeric coercion for CSV cells: anything unparseable becomes `NaN`.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn csv_error(source: csv::Error) -> VizError {
    VizError::CsvParse {
        offset: source.position().map_or(0, |position| position.byte()),
        source,
    }
}
