//! Typed records of finished runs.
//!
//! A [`RunRecord`] keeps the objective vectors a run ended with, tagged with
//! the name of the algorithm that produced them. Comparing algorithms is
//! then a matter of collecting records into a [`RunLog`] and exporting it.
//!
//! ```
//! use moea::record::{RunLog, RunRecord};
//!
//! let mut log = RunLog::new();
//! log.push(RunRecord::new("MOPSO", vec![vec![0.0, 1.0], vec![1.0, 0.0]]));
//! log.push(RunRecord::new("DE", vec![vec![0.5, 0.5]]));
//!
//! let mut buf = Vec::new();
//! log.to_csv(&mut buf).unwrap();
//! let csv = String::from_utf8(buf).unwrap();
//! assert_eq!(csv.lines().count(), 4);
//! assert_eq!(log.get("DE").unwrap().objective_matrix.len(), 1);
//! ```

/// Objective vectors produced by one algorithm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    /// Name of the producing algorithm.
    pub algorithm_name: String,
    /// One objective vector per row.
    pub objective_matrix: Vec<Vec<f64>>,
}

impl RunRecord {
    /// Create a record.
    #[must_use]
    pub fn new(algorithm_name: impl Into<String>, objective_matrix: Vec<Vec<f64>>) -> Self {
        Self {
            algorithm_name: algorithm_name.into(),
            objective_matrix,
        }
    }

    /// Number of objective vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objective_matrix.len()
    }

    /// Returns `true` if the record holds no objective vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objective_matrix.is_empty()
    }

    /// Widest objective vector in the record.
    fn n_obj(&self) -> usize {
        self.objective_matrix
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }
}

/// An ordered collection of run records.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunLog {
    records: Vec<RunRecord>,
}

impl RunLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, record: RunRecord) {
        self.records.push(record);
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, RunRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first record with the given algorithm name.
    #[must_use]
    pub fn get(&self, algorithm_name: &str) -> Option<&RunRecord> {
        self.records
            .iter()
            .find(|r| r.algorithm_name == algorithm_name)
    }

    /// Write every objective vector as one CSV row.
    ///
    /// Columns: `algorithm`, `index`, then `f0` through `f{m-1}` where `m`
    /// is the widest objective vector in the log. Shorter rows leave the
    /// trailing cells empty.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn to_csv(&self, mut writer: impl std::io::Write) -> std::io::Result<()> {
        let n_obj = self.records.iter().map(RunRecord::n_obj).max().unwrap_or(0);

        write!(writer, "algorithm,index")?;
        for k in 0..n_obj {
            write!(writer, ",f{k}")?;
        }
        writeln!(writer)?;

        for record in &self.records {
            let name = csv_escape(&record.algorithm_name);
            for (index, row) in record.objective_matrix.iter().enumerate() {
                write!(writer, "{name},{index}")?;
                for k in 0..n_obj {
                    match row.get(k) {
                        Some(v) => write!(writer, ",{v}")?,
                        None => write!(writer, ",")?,
                    }
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// Convenience wrapper around [`to_csv`](Self::to_csv) that creates a
    /// buffered file writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn export_csv(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.to_csv(std::io::BufWriter::new(file))
    }
}

impl<'a> IntoIterator for &'a RunLog {
    type Item = &'a RunRecord;
    type IntoIter = core::slice::Iter<'a, RunRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<RunRecord> for RunLog {
    fn from_iter<I: IntoIterator<Item = RunRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<RunRecord> for RunLog {
    fn extend<I: IntoIterator<Item = RunRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

/// Quote a CSV cell if it contains a separator, quote, or line break.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
