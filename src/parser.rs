//! CSV parsing for exposure datasets.
//!
//! Two entry points are offered: [`parse_records`] deserializes rows into a
//! caller-defined serde type, and [`parse_rows`] produces dynamically typed
//! [`Row`]s driven by a [`CsvSchema`]. Blank lines are ignored by both.

use anyhow::Result;
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

use crate::fetch::{HttpClient, read_source};
use crate::outcome::Outcome;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: column `{column}` expected {expected}, got {value:?}")]
    TypeMismatch {
        line: usize,
        column: String,
        expected: ColumnType,
        value: String,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Declared type of a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnType {
    /// Guess per cell: number, then boolean, then text.
    #[default]
    Infer,
    Number,
    Boolean,
    Text,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Infer => "any value",
            ColumnType::Number => "a number",
            ColumnType::Boolean => "a boolean",
            ColumnType::Text => "text",
            ColumnType::Date => "a YYYY-MM-DD date",
        };
        f.write_str(name)
    }
}

/// Per-column type declarations. Columns that are not declared fall back to
/// the schema's default type, which is [`ColumnType::Infer`] unless changed.
#[derive(Debug, Clone, Default)]
pub struct CsvSchema {
    columns: HashMap<String, ColumnType>,
    default: ColumnType,
}

impl CsvSchema {
    /// Schema that infers every column.
    pub fn infer() -> Self {
        Self::default()
    }

    pub fn column(mut self, name: &str, ty: ColumnType) -> Self {
        self.columns.insert(name.to_string(), ty);
        self
    }

    /// Type applied to columns without an explicit declaration.
    pub fn otherwise(mut self, ty: ColumnType) -> Self {
        self.default = ty;
        self
    }

    pub fn type_of(&self, column: &str) -> ColumnType {
        self.columns.get(column).copied().unwrap_or(self.default)
    }
}

/// A single coerced cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_str(""),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
        }
    }
}

/// One parsed data line, keyed by header name in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Cell)>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(name, cell)| (name.as_str(), cell))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, cell) in &self.fields {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// Drops blank lines.
fn non_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits one line into trimmed fields.
///
/// A `"` flips quoted mode wherever it appears and is dropped; a comma only
/// ends a field outside quotes. `""` inside a field therefore contributes
/// nothing.
fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn strip_wrapping_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.trim()
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerces a raw cell according to `ty`.
///
/// Inference only accepts finite numbers, so `NaN`, `inf` and friends stay
/// text. Whitespace never counts as a number.
pub fn coerce(raw: &str, ty: ColumnType) -> Result<Cell, ColumnType> {
    let value = strip_wrapping_quotes(raw);
    if value.is_empty() {
        return Ok(Cell::Empty);
    }

    match ty {
        ColumnType::Infer => Ok(parse_number(value)
            .map(Cell::Number)
            .or_else(|| parse_bool(value).map(Cell::Bool))
            .unwrap_or_else(|| Cell::Text(value.to_string()))),
        ColumnType::Number => parse_number(value).map(Cell::Number).ok_or(ty),
        ColumnType::Boolean => parse_bool(value).map(Cell::Bool).ok_or(ty),
        ColumnType::Text => Ok(Cell::Text(value.to_string())),
        ColumnType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Cell::Date)
            .map_err(|_| ty),
    }
}

/// Parses CSV text into rows, typing each column according to `schema`.
///
/// The first non-blank line is the header. Short lines are padded with
/// [`Cell::Empty`]; cells past the last header are ignored. Empty or
/// whitespace-only input yields no rows.
pub fn parse_rows(text: &str, schema: &CsvSchema) -> Result<Vec<Row>, CsvError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some((_, line)) => line.split(',').map(|h| h.trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    let types: Vec<ColumnType> = headers.iter().map(|h| schema.type_of(h)).collect();

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let values = tokenize_line(line);

        let mut fields = Vec::with_capacity(headers.len());
        for (col, (header, ty)) in headers.iter().zip(&types).enumerate() {
            let raw = values.get(col).map(String::as_str).unwrap_or("");
            let cell = coerce(raw, *ty).map_err(|expected| CsvError::TypeMismatch {
                line: idx + 1,
                column: header.clone(),
                expected,
                value: raw.to_string(),
            })?;
            fields.push((header.clone(), cell));
        }
        rows.push(Row { fields });
    }

    debug!(columns = headers.len(), rows = rows.len(), "CSV parsed");
    Ok(rows)
}

/// Deserializes CSV text into a caller-specified record type.
///
/// # Errors
///
/// Returns an error if any data line does not match `T`.
pub fn parse_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, CsvError> {
    let body = non_blank_lines(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Loads a CSV resource and parses it into schema-typed rows.
///
/// Read and parse failures are reported as [`Outcome::Error`] so callers can
/// tell "no data" apart from "empty dataset".
pub async fn load_rows<C: HttpClient>(
    client: &C,
    source: &str,
    schema: &CsvSchema,
) -> Outcome<Vec<Row>> {
    match read_source(client, source).await {
        Ok(text) => match parse_rows(&text, schema) {
            Ok(rows) => Outcome::Ok(rows),
            Err(e) => {
                error!(source, error = %e, "CSV parse failed");
                Outcome::error(e)
            }
        },
        Err(e) => {
            error!(source, error = %e, "CSV load failed");
            Outcome::error(format!("{e:#}"))
        }
    }
}

/// Loads a CSV resource and deserializes it into `T` records.
pub async fn load_records<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    source: &str,
) -> Outcome<Vec<T>> {
    match read_source(client, source).await {
        Ok(text) => match parse_records(&text) {
            Ok(records) => Outcome::Ok(records),
            Err(e) => {
                error!(source, error = %e, "CSV parse failed");
                Outcome::error(e)
            }
        },
        Err(e) => {
            error!(source, error = %e, "CSV load failed");
            Outcome::error(format!("{e:#}"))
        }
    }
}
