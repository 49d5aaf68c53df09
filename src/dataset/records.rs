//! Typed source records
//!
//! Each delimited file is deserialized row by row into one of these
//! structs, validated, then flattened into a table row. Headers are
//! lowercased before deserialization, so `Provider_ID` and `provider_id`
//! land in the same field.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::table::TableName;

/// A record type that backs one source table
pub trait TableRecord: DeserializeOwned {
    /// Which table this record populates
    const TABLE: TableName;
    /// Output columns, in order
    const COLUMNS: &'static [&'static str];
    /// Columns that must appear in the header
    const REQUIRED: &'static [&'static str];
    /// Identity column name
    const IDENTITY: &'static str;

    /// Identity value, unique within the table
    fn identity(&self) -> i64;

    /// Record-level checks beyond what deserialization enforces
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Flatten into one cell per column, in `COLUMNS` order
    fn into_row(self) -> Vec<Value>;
}

fn text(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}

/// Integral quantities stay integers so sums stay exact
fn quantity_cell(quantity: f64) -> Value {
    if quantity.fract() == 0.0 && quantity.abs() < i64::MAX as f64 {
        Value::from(quantity as i64)
    } else {
        Value::from(quantity)
    }
}

/// A food provider (restaurant, grocery store, ...)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderRecord {
    pub provider_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
    pub contact: String,
}

impl TableRecord for ProviderRecord {
    const TABLE: TableName = TableName::Providers;
    const COLUMNS: &'static [&'static str] =
        &["provider_id", "name", "type", "address", "city", "contact"];
    const REQUIRED: &'static [&'static str] = &["provider_id", "name", "type", "city", "contact"];
    const IDENTITY: &'static str = "provider_id";

    fn identity(&self) -> i64 {
        self.provider_id
    }

    fn into_row(self) -> Vec<Value> {
        vec![
            Value::from(self.provider_id),
            Value::String(self.name),
            Value::String(self.provider_type),
            text(self.address),
            Value::String(self.city),
            Value::String(self.contact),
        ]
    }
}

/// A food receiver (shelter, NGO, individual, ...)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceiverRecord {
    pub receiver_id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub receiver_type: Option<String>,
    pub city: String,
    pub contact: String,
}

impl TableRecord for ReceiverRecord {
    const TABLE: TableName = TableName::Receivers;
    const COLUMNS: &'static [&'static str] = &["receiver_id", "name", "type", "city", "contact"];
    const REQUIRED: &'static [&'static str] = &["receiver_id", "name", "city", "contact"];
    const IDENTITY: &'static str = "receiver_id";

    fn identity(&self) -> i64 {
        self.receiver_id
    }

    fn into_row(self) -> Vec<Value> {
        vec![
            Value::from(self.receiver_id),
            Value::String(self.name),
            text(self.receiver_type),
            Value::String(self.city),
            Value::String(self.contact),
        ]
    }
}

/// One donated batch of food
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodListingRecord {
    pub food_id: i64,
    pub food_name: String,
    pub quantity: f64,
    #[serde(default)]
    pub expiry_date: Option<String>,
    pub provider_id: i64,
    #[serde(default)]
    pub provider_type: Option<String>,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
}

impl TableRecord for FoodListingRecord {
    const TABLE: TableName = TableName::FoodListings;
    const COLUMNS: &'static [&'static str] = &[
        "food_id",
        "food_name",
        "quantity",
        "expiry_date",
        "provider_id",
        "provider_type",
        "location",
        "food_type",
        "meal_type",
    ];
    const REQUIRED: &'static [&'static str] = &[
        "food_id",
        "food_name",
        "quantity",
        "provider_id",
        "location",
        "food_type",
        "meal_type",
    ];
    const IDENTITY: &'static str = "food_id";

    fn identity(&self) -> i64 {
        self.food_id
    }

    fn validate(&self) -> Result<(), String> {
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(format!(
                "quantity must be a non-negative number, got {}",
                self.quantity
            ));
        }
        Ok(())
    }

    fn into_row(self) -> Vec<Value> {
        vec![
            Value::from(self.food_id),
            Value::String(self.food_name),
            quantity_cell(self.quantity),
            text(self.expiry_date),
            Value::from(self.provider_id),
            text(self.provider_type),
            Value::String(self.location),
            Value::String(self.food_type),
            Value::String(self.meal_type),
        ]
    }
}

/// A receiver's request against one listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimRecord {
    pub claim_id: i64,
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TableRecord for ClaimRecord {
    const TABLE: TableName = TableName::Claims;
    const COLUMNS: &'static [&'static str] =
        &["claim_id", "food_id", "receiver_id", "status", "timestamp"];
    const REQUIRED: &'static [&'static str] = &["claim_id", "food_id", "receiver_id", "status"];
    const IDENTITY: &'static str = "claim_id";

    fn identity(&self) -> i64 {
        self.claim_id
    }

    fn into_row(self) -> Vec<Value> {
        vec![
            Value::from(self.claim_id),
            Value::from(self.food_id),
            Value::from(self.receiver_id),
            Value::String(self.status),
            text(self.timestamp),
        ]
    }
}
