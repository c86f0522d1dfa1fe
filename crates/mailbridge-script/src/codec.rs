//! Flat text protocol shared by the generated scripts and the decoders.
//!
//! Scripts return every result as one string. Rows, columns, list items and
//! attachment columns are separated by four distinct ASCII control
//! characters, nested by specificity:
//!
//! ```text
//! record ─RS─ record ─RS─ record
//!   field ─US─ field ─US─ field
//!                 item ─GS─ item
//!                     name ─FS─ mime ─FS─ size
//! ```
//!
//! Free-text columns (subject, body) always come last in their row shape and
//! are recovered with [`Record::remainder`], so a separator that happens to
//! appear in them never shifts the structural columns.

/// Separates rows.
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// Separates columns within a row.
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Separates items of a multi-valued column.
pub const LIST_SEPARATOR: char = '\u{1d}';

/// Separates the columns of one attachment packed into a list item.
pub const ATTACHMENT_SEPARATOR: char = '\u{1c}';

/// A single decoded row, split into its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    /// Splits one row into columns.
    #[must_use]
    pub fn parse(row: &'a str) -> Self {
        Self {
            fields: row.split(FIELD_SEPARATOR).collect(),
        }
    }

    /// Parses a payload that always holds exactly one row.
    ///
    /// The payload is not split on [`RECORD_SEPARATOR`], so a free-text
    /// remainder containing it is preserved verbatim. Returns `None` for an
    /// empty payload.
    #[must_use]
    pub fn single(payload: &'a str) -> Option<Self> {
        let payload = strip_output(payload);
        if payload.is_empty() {
            None
        } else {
            Some(Self::parse(payload))
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All columns in order.
    #[must_use]
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// Column at `index`, or an empty string when the row is shorter.
    #[must_use]
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or_default()
    }

    /// Everything from column `index` to the end of the row.
    ///
    /// Columns past `index` are joined back with [`FIELD_SEPARATOR`], undoing
    /// any over-segmentation of a free-text column.
    #[must_use]
    pub fn remainder(&self, index: usize) -> String {
        self.fields
            .get(index..)
            .map(|rest| rest.join(&FIELD_SEPARATOR.to_string()))
            .unwrap_or_default()
    }

    /// Items of the list column at `index`.
    #[must_use]
    pub fn list(&self, index: usize) -> Vec<&'a str> {
        split_list(self.field(index))
    }
}

/// Strips the line terminator `osascript` appends to its result.
#[must_use]
pub fn strip_output(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}

/// Splits a multi-row payload into records.
///
/// An empty or blank payload yields no records rather than one empty
/// record, and blank segments left by stray separators are skipped.
#[must_use]
pub fn split_records(payload: &str) -> Vec<Record<'_>> {
    strip_output(payload)
        .split(RECORD_SEPARATOR)
        .filter(|row| !row.trim().is_empty())
        .map(Record::parse)
        .collect()
}

/// Splits a list column into its non-empty items.
#[must_use]
pub fn split_list(field: &str) -> Vec<&str> {
    field
        .split(LIST_SEPARATOR)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Splits one attachment item into its columns.
#[must_use]
pub fn split_attachment(item: &str) -> Vec<&str> {
    item.split(ATTACHMENT_SEPARATOR).collect()
}

/// Joins columns into one row, mirroring what the scripts emit.
#[must_use]
pub fn encode_record<S: AsRef<str>>(fields: &[S]) -> String {
    join(fields, FIELD_SEPARATOR)
}

/// Joins rows into one payload, mirroring what the scripts emit.
#[must_use]
pub fn encode_records<S: AsRef<str>>(rows: &[S]) -> String {
    join(rows, RECORD_SEPARATOR)
}

/// Joins items into one list column.
#[must_use]
pub fn encode_list<S: AsRef<str>>(items: &[S]) -> String {
    join(items, LIST_SEPARATOR)
}

/// Packs attachment columns into one list item.
#[must_use]
pub fn encode_attachment(name: &str, mime_type: &str, size: &str) -> String {
    join(&[name, mime_type, size], ATTACHMENT_SEPARATOR)
}

fn join<S: AsRef<str>>(parts: &[S], sep: char) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(&sep.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_has_no_records() {
        assert!(split_records("").is_empty());
        assert!(split_records("\n").is_empty());
        assert!(split_records("  \n").is_empty());
    }

    #[test]
    fn splits_records_and_fields() {
        let payload = encode_records(&[encode_record(&["a", "b"]), encode_record(&["c", "d"])]);
        let records = split_records(&payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields(), ["a", "b"]);
        assert_eq!(records[1].field(1), "d");
    }

    #[test]
    fn trailing_newline_is_stripped() {
        let payload = format!("{}\n", encode_record(&["x", "y"]));
        let records = split_records(&payload);
        assert_eq!(records[0].field(1), "y");
    }

    #[test]
    fn only_one_newline_is_stripped() {
        assert_eq!(strip_output("body\n\n"), "body\n");
        assert_eq!(strip_output("body\r\n"), "body");
    }

    #[test]
    fn missing_field_is_empty() {
        let record = Record::parse("only");
        assert_eq!(record.field(3), "");
        assert_eq!(record.remainder(3), "");
    }

    #[test]
    fn remainder_rejoins_over_split_text() {
        let row = format!("1{FIELD_SEPARATOR}2{FIELD_SEPARATOR}free{FIELD_SEPARATOR}text");
        let record = Record::parse(&row);
        assert_eq!(record.len(), 4);
        assert_eq!(record.remainder(2), format!("free{FIELD_SEPARATOR}text"));
    }

    #[test]
    fn single_record_keeps_record_separator() {
        let content = format!("para one{RECORD_SEPARATOR}para two");
        let payload = encode_record(&["1", content.as_str()]);
        let record = Record::single(&payload).unwrap();
        assert_eq!(
            record.remainder(1),
            format!("para one{RECORD_SEPARATOR}para two")
        );
    }

    #[test]
    fn single_empty_payload_is_none() {
        assert!(Record::single("").is_none());
        assert!(Record::single("\n").is_none());
    }

    #[test]
    fn list_column_skips_empty_items() {
        let list = encode_list(&["a@x.com", "b@x.com"]);
        let row = encode_record(&["", list.as_str()]);
        let record = Record::parse(&row);
        assert!(record.list(0).is_empty());
        assert_eq!(record.list(1), ["a@x.com", "b@x.com"]);
    }

    #[test]
    fn attachment_columns() {
        let item = encode_attachment("report.pdf", "application/pdf", "1024");
        assert_eq!(split_attachment(&item), ["report.pdf", "application/pdf", "1024"]);
    }
}
