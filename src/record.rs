//! Flat `KEY: value` record format shared by save files and catalog files.
//!
//! A record is a run of non-blank lines, each holding one key and one value
//! separated by the first `:`. Keys are case-insensitive. Catalog files hold
//! several records separated by blank lines; list values are comma-separated
//! with the empty string meaning an empty list.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("no records found")]
    Empty,

    #[error("line {line}: expected `KEY: value`, found {text:?}")]
    MalformedLine { line: usize, text: String },

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("field {field} is not a valid number: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("field {field} has invalid value {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("duplicate id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Parses a single record from a whole file's text. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let record = Self::from_lines(text.lines().enumerate().map(|(i, l)| (i + 1, l)))?;
        if record.fields.is_empty() {
            return Err(RecordError::Empty);
        }
        Ok(record)
    }

    fn from_lines<'a>(
        lines: impl Iterator<Item = (usize, &'a str)>,
    ) -> Result<Self, RecordError> {
        let mut fields = BTreeMap::new();
        for (line_no, raw) in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| RecordError::MalformedLine {
                    line: line_no,
                    text: line.to_string(),
                })?;
            fields.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
        Ok(Self { fields })
    }

    pub fn text(&self, key: &str) -> Result<&str, RecordError> {
        self.optional(key)
            .ok_or_else(|| RecordError::MissingField(key.to_string()))
    }

    pub fn optional(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn number<T: FromStr>(&self, key: &str) -> Result<T, RecordError> {
        let value = self.text(key)?;
        value.parse().map_err(|_| RecordError::InvalidNumber {
            field: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn list(&self, key: &str) -> Result<Vec<String>, RecordError> {
        Ok(split_list(self.text(key)?))
    }
}

/// Splits a comma-separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses blank-line separated records.
pub fn parse_blocks(text: &str) -> Result<Vec<Record>, RecordError> {
    let mut records = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                records.push(Record::from_lines(block.drain(..))?);
            }
        } else {
            block.push((index + 1, line));
        }
    }
    if !block.is_empty() {
        records.push(Record::from_lines(block.into_iter())?);
    }

    if records.is_empty() {
        return Err(RecordError::Empty);
    }
    Ok(records)
}

/// Builds a record in file order.
#[derive(Debug, Default)]
pub struct RecordWriter {
    out: String,
}

impl RecordWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl std::fmt::Display) -> Self {
        let _ = writeln!(self.out, "{}: {}", key, value);
        self
    }

    pub fn list(self, key: &str, values: &[String]) -> Self {
        let joined = values.join(",");
        self.field(key, joined)
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_record() {
        let record = Record::parse("NAME: Hero\nLEVEL: 3\nINVENTORY: a,b\n").unwrap();
        assert_eq!(record.text("name").unwrap(), "Hero");
        assert_eq!(record.number::<u32>("level").unwrap(), 3);
        assert_eq!(record.list("inventory").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_list_value() {
        let record = Record::parse("INVENTORY: \n").unwrap();
        assert!(record.list("inventory").unwrap().is_empty());
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        let record = Record::parse("EFFECT: strength:5").unwrap();
        assert_eq!(record.text("effect").unwrap(), "strength:5");
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = Record::parse("NAME: Hero\nthis line is wrong\n").unwrap_err();
        assert_eq!(
            err,
            RecordError::MalformedLine {
                line: 2,
                text: "this line is wrong".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_number() {
        let record = Record::parse("LEVEL: three").unwrap();
        assert!(matches!(
            record.number::<u32>("level"),
            Err(RecordError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_missing_field() {
        let record = Record::parse("NAME: Hero").unwrap();
        assert_eq!(
            record.text("class").unwrap_err(),
            RecordError::MissingField("class".to_string())
        );
    }

    #[test]
    fn test_parse_blocks_ignores_extra_blank_lines() {
        let text = "ID: a\nX: 1\n\n\n\nID: b\nX: 2\n\n";
        let records = parse_blocks(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("id").unwrap(), "b");
    }

    #[test]
    fn test_parse_blocks_empty_text() {
        assert_eq!(parse_blocks("\n\n  \n").unwrap_err(), RecordError::Empty);
    }

    #[test]
    fn test_writer_output_parses_back() {
        let text = RecordWriter::new()
            .field("NAME", "Hero")
            .list("INVENTORY", &["potion".to_string(), "sword".to_string()])
            .list("ACTIVE_QUESTS", &[])
            .finish();
        assert_eq!(text, "NAME: Hero\nINVENTORY: potion,sword\nACTIVE_QUESTS: \n");

        let record = Record::parse(&text).unwrap();
        assert_eq!(record.list("inventory").unwrap().len(), 2);
        assert!(record.list("active_quests").unwrap().is_empty());
    }
}
