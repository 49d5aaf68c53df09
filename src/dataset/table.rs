//! In-memory tables
//!
//! A table is a name, an ordered list of column names, and rows of
//! `serde_json::Value` cells. Loaded tables and query results share this
//! shape, so a result can be browsed exactly like a raw table.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

/// The four source tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Providers,
    Receivers,
    FoodListings,
    Claims,
}

impl TableName {
    /// All tables, in load order
    pub const ALL: [TableName; 4] = [
        TableName::Providers,
        TableName::Receivers,
        TableName::FoodListings,
        TableName::Claims,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Providers => "providers",
            TableName::Receivers => "receivers",
            TableName::FoodListings => "food_listings",
            TableName::Claims => "claims",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TableName::Providers => "Providers",
            TableName::Receivers => "Receivers",
            TableName::FoodListings => "Food Listings",
            TableName::Claims => "Claims",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names none of the four tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTableError(String);

impl UnknownTableError {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown table '{}'. Expected one of: providers, receivers, food_listings, claims",
            self.0
        )
    }
}

impl std::error::Error for UnknownTableError {}

impl FromStr for TableName {
    type Err = UnknownTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "providers" => Ok(TableName::Providers),
            "receivers" => Ok(TableName::Receivers),
            "food_listings" | "food" => Ok(TableName::FoodListings),
            "claims" => Ok(TableName::Claims),
            _ => Err(UnknownTableError(s.to_string())),
        }
    }
}

/// A named table of rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with the given columns
    pub fn new<C: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from prebuilt rows.
    ///
    /// Row widths are not checked here; see [`Table::ragged_row`].
    pub fn with_rows<C: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = C>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        let mut table = Self::new(name, columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Appends a row
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
    }

    /// First row whose width differs from the column count, as (row, width)
    pub fn ragged_row(&self) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .position(|r| r.len() != self.columns.len())
            .map(|i| (i, self.rows[i].len()))
    }
}
