//! Minimal RFC 4180 table codec.
//!
//! # Invariants
//! - Every data row has exactly as many cells as the header.
//! - Quoted cells may contain separators, doubled quotes and line breaks.
//! - Blank lines between records are ignored.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Parsed table with header-name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

/// Structural parse failure with the 1-based physical line where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableError {
    pub line: usize,
    pub message: String,
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// One data row with access by column name.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    cells: &'a [String],
    index: &'a HashMap<String, usize>,
}

impl<'a> TableRow<'a> {
    /// Cell text for `column`; empty when the column is absent.
    pub fn get(&self, column: &str) -> &'a str {
        self.index
            .get(column)
            .and_then(|position| self.cells.get(*position))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Cell text for `column`, or `None` when the cell is blank.
    pub fn optional(&self, column: &str) -> Option<String> {
        let value = self.get(column);
        if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl Table {
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = split_records(text)?.into_iter();

        let Some((_, header)) = records.next() else {
            return Err(TableError {
                line: 1,
                message: "table is empty; expected a header row".to_string(),
            });
        };
        let header: Vec<String> = header.into_iter().map(|name| name.trim().to_string()).collect();

        let mut rows = Vec::new();
        for (line, cells) in records {
            if cells.len() != header.len() {
                return Err(TableError {
                    line,
                    message: format!("expected {} cells, found {}", header.len(), cells.len()),
                });
            }
            rows.push(cells);
        }

        let index = header
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();

        Ok(Self {
            header,
            rows,
            index,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows.iter().map(|cells| TableRow {
            cells,
            index: &self.index,
        })
    }
}

/// Renders a header plus rows as CSV text terminated by a newline.
pub fn write_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        header
            .iter()
            .map(|column| escape_cell(column))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.iter()
                .map(|cell| escape_cell(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn escape_cell(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Splits text into records of cells, tagged with their starting line.
fn split_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, TableError> {
    let mut records = Vec::new();
    let mut cells: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut record_line = 1;
    let mut record_has_content = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    cell.push(ch);
                }
                _ => cell.push(ch),
            }
            continue;
        }

        match ch {
            '"' if cell.is_empty() => {
                in_quotes = true;
                quote_line = line;
                record_has_content = true;
            }
            '"' => {
                return Err(TableError {
                    line,
                    message: "unexpected quote inside an unquoted cell".to_string(),
                });
            }
            ',' => {
                cells.push(std::mem::take(&mut cell));
                record_has_content = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if record_has_content || !cell.is_empty() {
                    cells.push(std::mem::take(&mut cell));
                    records.push((record_line, std::mem::take(&mut cells)));
                }
                record_has_content = false;
                line += 1;
                record_line = line;
            }
            _ => {
                cell.push(ch);
                record_has_content = true;
            }
        }
    }

    if in_quotes {
        return Err(TableError {
            line: quote_line,
            message: "unterminated quoted cell".to_string(),
        });
    }
    if record_has_content || !cell.is_empty() {
        cells.push(cell);
        records.push((record_line, cells));
    }

    Ok(records)
}
