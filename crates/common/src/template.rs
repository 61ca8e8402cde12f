//! Flat CSV template reader
//!
//! Templates are comma-delimited with a single header row. There is no
//! quoting or escaping: a cell can never contain a comma, and a quote is just
//! another character. Cells missing at the end of a row read as empty; cells
//! beyond the header width are ignored with a warning.

use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::{Error, Result};

/// One data row of a template, addressed by header name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRow {
    /// 1-based line number in the source file
    line: usize,
    cells: HashMap<String, String>,
}

impl TemplateRow {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Cell under `column`, or "" when the column or cell is missing
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Cell under `column`, `None` when empty
    pub fn optional(&self, column: &str) -> Option<&str> {
        Some(self.get(column)).filter(|value| !value.is_empty())
    }
}

/// Parse template text into rows
pub fn parse_template(raw: &str) -> Vec<TemplateRow> {
    let mut lines = raw
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate();

    let headers: Vec<&str> = match lines.next() {
        Some((_, header)) if !header.is_empty() => header.split(',').collect(),
        _ => return Vec::new(),
    };

    lines
        .filter(|(_, line)| !line.is_empty())
        .map(|(index, line)| {
            let cols: Vec<&str> = line.split(',').collect();
            if cols.len() > headers.len() {
                warn!(
                    "Line {} has {} cells but only {} columns; extra cells ignored",
                    index + 1,
                    cols.len(),
                    headers.len()
                );
            }

            let cells = headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = cols.get(i).copied().unwrap_or("");
                    (header.to_string(), value.to_string())
                })
                .collect();

            TemplateRow {
                line: index + 1,
                cells,
            }
        })
        .collect()
}

/// Read and parse a template file
pub fn read_template(path: &Path) -> Result<Vec<TemplateRow>> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_template(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_by_header() {
        let rows = parse_template("modelKey,displayName\nM1,Model One\nM2,Model Two\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("modelKey"), "M1");
        assert_eq!(rows[1].get("displayName"), "Model Two");
        assert_eq!(rows[1].line(), 3);
    }

    #[test]
    fn test_missing_cells_read_as_empty() {
        let rows = parse_template("a,b,c\n1\n");

        assert_eq!(rows[0].get("a"), "1");
        assert_eq!(rows[0].get("b"), "");
        assert_eq!(rows[0].optional("c"), None);
        assert_eq!(rows[0].get("not-a-column"), "");
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let rows = parse_template("a,b\r\n1,2\r\n\r\n\n3,4\r\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("b"), "2");
        assert_eq!(rows[1].get("a"), "3");
        assert_eq!(rows[1].line(), 5);
    }

    #[test]
    fn test_no_quoting_support() {
        // Quotes are kept verbatim and commas always split
        let rows = parse_template("a,b\n\"x,y\",z\n");

        assert_eq!(rows[0].get("a"), "\"x");
        assert_eq!(rows[0].get("b"), "y\"");
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        assert!(parse_template("").is_empty());
        assert!(parse_template("a,b\n").is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_template(&dir.path().join("nope.csv")).unwrap_err();

        assert!(err.to_string().contains("nope.csv"));
    }
}
