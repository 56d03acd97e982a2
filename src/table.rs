//! The synonym-resolution table for marine-data code lists.
//!
//! The reference data is a small tab-delimited file: the first line names
//! the columns, every other non-blank line registers one code. A code
//! belongs to a `field` (a category such as `project` or `LABO`), carries a
//! canonical `public_value`, and lists alternate spellings in a
//! `<or>`-separated `synonyms` column. The remaining columns are display
//! forms (short name, Swedish name, English name, ...).
//!
//! [`SynonymTable`] reads the whole resource once, normalizes every textual
//! variant, and builds two indexes: synonym to public value, and public
//! value to full row. After construction the table is immutable and queries
//! are pure lookups.
//!
//! # Examples
//!
//! ```
//! use nodc_codes::table::SynonymTable;
//!
//! let table = SynonymTable::from_text(
//!     "field\tpublic_value\tsynonyms\tshort_name\n\
//!      LABO\tSMHI\tSmhi<or>SMHI lab\tSMHI",
//! )
//! .unwrap();
//!
//! assert_eq!(table.resolve("LABO", "smhi lab"), Some("SMHI"));
//! assert_eq!(table.translate("labo", "Smhi", "short_name"), Some("SMHI"));
//! assert_eq!(table.resolve("LABO", "unheard of"), None);
//! ```

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ahash::AHashMap;
use encoding_rs::{Encoding, WINDOWS_1252};
use serde::Serialize;

use crate::error::{CodesError, Result};

/// Separator between alternate spellings in the synonyms column.
pub const SYNONYM_SEPARATOR: &str = "<or>";

/// Required column: the category a row belongs to.
const FIELD: &str = "field";
/// Required column: the canonical code of a row.
const PUBLIC_VALUE: &str = "public_value";
/// Required column: the `<or>`-separated alternate spellings.
const SYNONYMS: &str = "synonyms";

/// Columns whose values are never registered as synonyms.
const NOT_AS_SYNONYMS: [&str; 4] = [FIELD, "filter", "source", SYNONYMS];

/// Normalize a synonym for indexing: case-folded, all whitespace removed.
fn normalize_synonym(synonym: &str) -> String {
    synonym
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Normalize a field name for indexing.
fn normalize_field(field: &str) -> String {
    field.to_lowercase()
}

/// Normalize a public value for indexing.
fn normalize_public_value(public_value: &str) -> String {
    public_value.to_uppercase()
}

/// Normalize a header column name.
fn normalize_header_col(col: &str) -> String {
    col.trim().to_lowercase()
}

/// Look up a required column, or fail the build naming the offending line.
///
/// Rows are right-padded to the header width, so a missing key means the
/// header itself never named the column.
fn required_column<'a>(
    columns: &'a AHashMap<String, String>,
    name: &str,
    line_no: usize,
) -> Result<&'a str> {
    columns.get(name).map(String::as_str).ok_or_else(|| {
        CodesError::parse(format!(
            "line {line_no}: reference table has no '{name}' column"
        ))
    })
}

/// One data row of the reference table.
///
/// Column values are stored verbatim from the source, keyed by the
/// normalized header name. The synonyms registered for the row are kept
/// normalized and ordered.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    columns: AHashMap<String, String>,
    synonyms: BTreeSet<String>,
}

impl TableRow {
    /// Value of `column`, verbatim from the source file.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .get(&normalize_header_col(column))
            .map(String::as_str)
    }

    /// The public value exactly as written in the source file.
    pub fn public_value(&self) -> &str {
        self.columns
            .get(PUBLIC_VALUE)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Normalized synonyms registered for this row, in sorted order.
    pub fn synonyms(&self) -> impl Iterator<Item = &str> {
        self.synonyms.iter().map(String::as_str)
    }
}

/// In-memory synonym-resolution table.
///
/// Built once from a fully-read resource and immutable afterwards; replace
/// the whole table to pick up a changed resource (see
/// [`TableHandle`](crate::handle::TableHandle)). Immutability makes the
/// table safe to share across threads behind an `Arc` without locking.
///
/// Every row's public value is registered as a synonym of its own row, so
/// exact-code lookups always resolve. When the same normalized synonym is
/// registered twice within one field - once through the synonyms column and
/// once through another translatable column, or by two different rows - the
/// last row read wins and earlier mappings are overwritten.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    /// Normalized column vocabulary from the header row.
    header: Vec<String>,
    /// field -> normalized synonym -> literal public value.
    synonyms: AHashMap<String, AHashMap<String, String>>,
    /// field -> normalized public value -> row.
    rows: AHashMap<String, AHashMap<String, TableRow>>,
}

impl SynonymTable {
    /// Build a table from reference-file text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::build(text.lines())
    }

    /// Read `reader` to the end and build, decoding windows-1252 (the
    /// encoding the reference table is distributed in).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_encoding(reader, WINDOWS_1252)
    }

    /// Read `reader` to the end and build, decoding with `encoding`.
    pub fn from_reader_with_encoding<R: Read>(
        mut reader: R,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let (text, _, had_errors) = encoding.decode(&bytes);
        if had_errors {
            return Err(CodesError::resource(format!(
                "resource is not valid {}",
                encoding.name()
            )));
        }
        Self::from_text(&text)
    }

    /// Build from a file on disk, decoding windows-1252.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with_encoding(path, WINDOWS_1252)
    }

    /// Build from a file on disk, decoding with `encoding`.
    pub fn from_path_with_encoding<P: AsRef<Path>>(
        path: P,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        Self::from_reader_with_encoding(File::open(path)?, encoding)
    }

    /// Single linear pass: header first, then one row per non-blank line.
    fn build<'a, I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut header: Vec<String> = Vec::new();
        let mut synonyms: AHashMap<String, AHashMap<String, String>> = AHashMap::new();
        let mut rows: AHashMap<String, AHashMap<String, TableRow>> = AHashMap::new();

        for (index, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').map(str::trim).collect();

            // The first non-blank line is the header.
            if header.is_empty() {
                header = cells.into_iter().map(normalize_header_col).collect();
                continue;
            }

            // Ragged rows are right-padded with empty strings.
            let mut columns = AHashMap::with_capacity(header.len());
            for (i, name) in header.iter().enumerate() {
                let value = cells.get(i).copied().unwrap_or("");
                columns.insert(name.clone(), value.to_string());
            }

            let line_no = index + 1;
            let field = normalize_field(required_column(&columns, FIELD, line_no)?);
            let public_value = required_column(&columns, PUBLIC_VALUE, line_no)?.to_string();

            let mut row_synonyms: BTreeSet<String> =
                required_column(&columns, SYNONYMS, line_no)?
                    .split(SYNONYM_SEPARATOR)
                    .map(normalize_synonym)
                    .collect();
            for name in &header {
                if NOT_AS_SYNONYMS.contains(&name.as_str()) {
                    continue;
                }
                if let Some(value) = columns.get(name) {
                    row_synonyms.insert(normalize_synonym(value));
                }
            }
            // Empty cells normalize to nothing worth indexing.
            row_synonyms.remove("");

            let field_synonyms = synonyms.entry(field.clone()).or_default();
            for synonym in &row_synonyms {
                // Last write wins on colliding synonyms within a field.
                field_synonyms.insert(synonym.clone(), public_value.clone());
            }

            let row = TableRow {
                columns,
                synonyms: row_synonyms,
            };
            rows.entry(field)
                .or_default()
                .insert(normalize_public_value(&public_value), row);
        }

        if header.is_empty() {
            return Err(CodesError::parse("empty resource: no header row"));
        }

        Ok(SynonymTable {
            header,
            synonyms,
            rows,
        })
    }

    /// The normalized column vocabulary defined by the header row.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All fields present in the table, sorted ascending.
    pub fn fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = self.rows.keys().cloned().collect();
        fields.sort();
        fields
    }

    /// Total number of rows across all fields.
    pub fn len(&self) -> usize {
        self.rows.values().map(|rows| rows.len()).sum()
    }

    /// Whether the table holds no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All canonical public values registered for `field`, sorted ascending.
    ///
    /// An unknown field yields an empty list rather than an error; "no
    /// values" is an answer, not a failure.
    pub fn public_values(&self, field: &str) -> Vec<String> {
        let Some(field_rows) = self.rows.get(&normalize_field(field)) else {
            return Vec::new();
        };
        let mut values: Vec<String> = field_rows.keys().cloned().collect();
        values.sort();
        values
    }

    /// Resolve a synonym to its public value.
    ///
    /// Both inputs are normalized before lookup; `None` means nothing
    /// matched, which is an expected outcome when validating unfamiliar
    /// codes.
    pub fn resolve(&self, field: &str, synonym: &str) -> Option<&str> {
        self.synonyms
            .get(&normalize_field(field))?
            .get(&normalize_synonym(synonym))
            .map(String::as_str)
    }

    /// Full row attributes for whatever `synonym` resolves to.
    pub fn row(&self, field: &str, synonym: &str) -> Option<&TableRow> {
        let public_value = self.resolve(field, synonym)?;
        self.rows
            .get(&normalize_field(field))?
            .get(&normalize_public_value(public_value))
    }

    /// Translate whatever `synonym` resolves to into `target_column`.
    ///
    /// An unknown target column or a failed resolution is logged at warn
    /// level and yields `None`; this operation never fails hard.
    pub fn translate(&self, field: &str, synonym: &str, target_column: &str) -> Option<&str> {
        let target = normalize_header_col(target_column);
        if !self.header.contains(&target) {
            tracing::warn!(
                "cannot translate to '{}': no such column in the reference table",
                target_column
            );
            return None;
        }
        let Some(row) = self.row(field, synonym) else {
            tracing::warn!(
                "no public value matching '{}' in field '{}'",
                synonym,
                field
            );
            return None;
        };
        row.get(&target)
    }

    /// The synonyms registered for a public value, sorted ascending.
    ///
    /// Unknown fields and public values yield an empty list.
    pub fn synonyms(&self, field: &str, public_value: &str) -> Vec<String> {
        self.rows
            .get(&normalize_field(field))
            .and_then(|rows| rows.get(&normalize_public_value(public_value)))
            .map(|row| row.synonyms.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// One column across every row of `field`, deduplicated and sorted.
    ///
    /// Bulk view for dropdown-style listings, e.g. all project short names.
    /// An unknown target column behaves like [`translate`](Self::translate):
    /// a warning and an empty result.
    pub fn translated_values(&self, field: &str, target_column: &str) -> Vec<String> {
        let target = normalize_header_col(target_column);
        if !self.header.contains(&target) {
            tracing::warn!(
                "cannot translate to '{}': no such column in the reference table",
                target_column
            );
            return Vec::new();
        }
        let Some(field_rows) = self.rows.get(&normalize_field(field)) else {
            return Vec::new();
        };
        let values: BTreeSet<&String> = field_rows
            .values()
            .filter_map(|row| row.columns.get(&target))
            .collect();
        values.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "field\tpublic_value\tsynonyms\tshort_name\n\
                         LABO\tSMHI\tSmhi<or>SMHI lab\tSMHI";

    #[test]
    fn test_normalize_synonym() {
        assert_eq!(normalize_synonym("SMHI Lab"), "smhilab");
        assert_eq!(normalize_synonym("  ArGo \t floats "), "argofloats");
        assert_eq!(normalize_synonym(""), "");
    }

    #[test]
    fn test_normalize_field_and_public_value() {
        assert_eq!(normalize_field("LABO"), "labo");
        assert_eq!(normalize_public_value("smhi"), "SMHI");
    }

    #[test]
    fn test_normalize_header_col() {
        assert_eq!(normalize_header_col("  Short_Name "), "short_name");
    }

    #[test]
    fn test_build_small_table() {
        let table = SynonymTable::from_text(SMALL).unwrap();
        let header: Vec<&str> = table.header().iter().map(String::as_str).collect();

        assert_eq!(header, ["field", "public_value", "synonyms", "short_name"]);
        assert_eq!(table.fields(), ["labo"]);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_public_value_is_its_own_synonym() {
        let table = SynonymTable::from_text(SMALL).unwrap();
        assert_eq!(table.resolve("LABO", "SMHI"), Some("SMHI"));
    }

    #[test]
    fn test_field_column_is_not_a_synonym() {
        let table = SynonymTable::from_text(SMALL).unwrap();
        assert_eq!(table.resolve("LABO", "labo"), None);
    }

    #[test]
    fn test_empty_synonym_is_not_registered() {
        let text = "field\tpublic_value\tsynonyms\tshort_name\n\
                    LABO\tSMHI\tSmhi\t";
        let table = SynonymTable::from_text(text).unwrap();
        assert_eq!(table.resolve("LABO", ""), None);
        assert_eq!(table.resolve("LABO", "   "), None);
    }

    #[test]
    fn test_row_attributes() {
        let table = SynonymTable::from_text(SMALL).unwrap();
        let row = table.row("labo", "smhi lab").unwrap();

        assert_eq!(row.public_value(), "SMHI");
        assert_eq!(row.get("short_name"), Some("SMHI"));
        assert_eq!(row.get("field"), Some("LABO"));
        let synonyms: Vec<&str> = row.synonyms().collect();
        assert_eq!(synonyms, ["smhi", "smhilab"]);
    }

    #[test]
    fn test_empty_resource_is_parse_error() {
        assert!(matches!(
            SynonymTable::from_text(""),
            Err(CodesError::Parse(_))
        ));
        assert!(matches!(
            SynonymTable::from_text("\n   \n"),
            Err(CodesError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_required_column_is_parse_error() {
        let text = "field\tpublic_value\tshort_name\n\
                    LABO\tSMHI\tSMHI";
        let err = SynonymTable::from_text(text).unwrap_err();

        assert!(matches!(err, CodesError::Parse(_)));
        assert!(err.to_string().contains("synonyms"));
    }

    #[test]
    fn test_header_only_builds_empty_table() {
        let table = SynonymTable::from_text("field\tpublic_value\tsynonyms").unwrap();
        assert!(table.is_empty());
        assert!(table.fields().is_empty());
        assert_eq!(table.public_values("project"), Vec::<String>::new());
    }
}
