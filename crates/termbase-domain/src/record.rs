//! Record module - one parsed row of an input extract

use std::ops::Index;

/// A single input row: ordered column/value pairs plus the file it came from
///
/// Records are immutable once parsed. Column order follows the header of the
/// originating file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
    source_file: String,
}

impl Record {
    /// Build a record from column/value pairs
    ///
    /// A repeated column keeps its first position and takes the last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use termbase_domain::Record;
    ///
    /// let record = Record::new("a.csv", [("term", "HTTP"), ("definition", "Protocol")]);
    /// assert_eq!(record.value("term"), "HTTP");
    /// assert_eq!(record.source_file(), "a.csv");
    /// ```
    pub fn new<I, K, V>(source_file: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: Vec<(String, String)> = Vec::new();
        for (column, value) in pairs {
            let column = column.into();
            let value = value.into();
            match fields.iter_mut().find(|(existing, _)| *existing == column) {
                Some(slot) => slot.1 = value,
                None => fields.push((column, value)),
            }
        }

        Self {
            fields,
            source_file: source_file.into(),
        }
    }

    /// Look up a column, `None` if the record has no such column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Look up a column, treating a missing column as an empty value
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// All column/value pairs in header order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Name of the file this record was read from
    pub fn source_file(&self) -> &str {
        &self.source_file
    }
}

/// Records in file-read order
///
/// Order is significant: the cluster builder seeds groups in ascending index
/// order and merge tie-breaks prefer earlier records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, preserving read order
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterate in read order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Borrow the records as a slice
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }
}

impl Index<usize> for RecordSet {
    type Output = Record;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for RecordSet {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
