use std::{fs::File, io::Read, path::Path};

use log::{debug, warn};

use crate::{ModelErr, Result};

/// A tabular dataset: named `f64` columns, all of the same length.
///
/// Column order is the insertion order. A dataset is treated as immutable once it's handed to
/// the rest of the crate, every consumer works on its own copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Dataset {
    /// Creates a new empty `Dataset`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `Dataset` from `(name, values)` pairs.
    ///
    /// # Arguments
    /// * `columns` - The columns in order.
    ///
    /// # Returns
    /// The dataset or an error if two columns share a name or have different lengths.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut dataset = Self::new();
        for (name, values) in columns {
            dataset.push_column(name, values)?;
        }

        Ok(dataset)
    }

    /// Appends a column at the end of the dataset.
    ///
    /// # Arguments
    /// * `name` - The column's name, must be unique.
    /// * `values` - The column's values, one per row.
    pub fn push_column<S: Into<String>>(&mut self, name: S, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(ModelErr::DuplicateColumn { name });
        }

        let expected = self.columns.first().map_or(values.len(), Vec::len);
        if values.len() != expected {
            return Err(ModelErr::ShapeMismatch {
                what: "column length",
                got: values.len(),
                expected,
            });
        }

        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Returns the values of the column named `name`, if there is one.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Like [`Dataset::column`] but failing with `ModelErr::MissingColumn`.
    pub fn require_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name).ok_or_else(|| ModelErr::MissingColumn {
            name: name.to_string(),
        })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when the dataset has no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.ncols() == 0 || self.nrows() == 0
    }

    /// Reads a dataset from a CSV file with a header row.
    ///
    /// # Arguments
    /// * `path` - The path to the CSV file.
    ///
    /// # Returns
    /// The numeric columns of the file, see [`Dataset::from_csv_reader`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_csv_reader(file)?;
        debug!(rows = dataset.nrows(), cols = dataset.ncols(); "loaded {}", path.display());
        Ok(dataset)
    }

    /// Reads a dataset from CSV data with a header row.
    ///
    /// Columns holding any value that does not parse as a number are dropped, so mixed tables
    /// can still be loaded and trained on their numeric part.
    ///
    /// # Arguments
    /// * `reader` - The source of the CSV data.
    ///
    /// # Returns
    /// The dataset or an error if the CSV is malformed.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut columns: Vec<Option<Vec<f64>>> = vec![Some(Vec::new()); headers.len()];

        for record in rdr.records() {
            let record = record?;
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                let Some(values) = column else {
                    continue;
                };

                match field.parse::<f64>() {
                    Ok(v) => values.push(v),
                    Err(_) => *column = None,
                }
            }
        }

        let mut dataset = Self::new();
        for (name, column) in headers.into_iter().zip(columns) {
            match column {
                Some(values) => dataset.push_column(name, values)?,
                None => warn!("dropping non-numeric column '{name}'"),
            }
        }

        Ok(dataset)
    }
}
