//! Loaded dataset snapshot

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::table::{Table, TableName};

/// The four loaded tables plus load metadata.
///
/// Immutable once built: nothing hands out `&mut` access to a table.
#[derive(Debug, Clone)]
pub struct Dataset {
    providers: Table,
    receivers: Table,
    food_listings: Table,
    claims: Table,
    fingerprint: u32,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Builds a snapshot from four tables
    pub fn new(providers: Table, receivers: Table, food_listings: Table, claims: Table) -> Self {
        Self {
            providers,
            receivers,
            food_listings,
            claims,
            fingerprint: 0,
            loaded_at: Utc::now(),
        }
    }

    /// Attaches the CRC32 of the source bytes
    pub fn with_fingerprint(mut self, fingerprint: u32) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    pub fn table(&self, name: TableName) -> &Table {
        match name {
            TableName::Providers => &self.providers,
            TableName::Receivers => &self.receivers,
            TableName::FoodListings => &self.food_listings,
            TableName::Claims => &self.claims,
        }
    }

    /// All four tables in load order
    pub fn tables(&self) -> impl Iterator<Item = (TableName, &Table)> {
        TableName::ALL.into_iter().map(move |name| (name, self.table(name)))
    }

    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Headline counts shown above every view
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            total_providers: self.providers.len(),
            total_receivers: self.receivers.len(),
            total_food_listings: self.food_listings.len(),
            total_claims: self.claims.len(),
            fingerprint: format!("{:08x}", self.fingerprint),
            loaded_at: self.loaded_at,
        }
    }
}

/// Single-value metrics for a loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total_providers: usize,
    pub total_receivers: usize,
    pub total_food_listings: usize,
    pub total_claims: usize,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn one_row(name: &str, columns: &[&str]) -> Table {
        let row = columns.iter().map(|_| json!(1)).collect();
        Table::with_rows(name, columns.iter().copied(), vec![row])
    }

    #[test]
    fn test_summary_counts() {
        let dataset = Dataset::new(
            one_row("providers", &["provider_id"]),
            Table::new("receivers", ["receiver_id"]),
            one_row("food_listings", &["food_id"]),
            Table::new("claims", ["claim_id"]),
        )
        .with_fingerprint(0xdeadbeef);

        let summary = dataset.summary();
        assert_eq!(summary.total_providers, 1);
        assert_eq!(summary.total_receivers, 0);
        assert_eq!(summary.total_food_listings, 1);
        assert_eq!(summary.total_claims, 0);
        assert_eq!(summary.fingerprint, "deadbeef");
    }

    #[test]
    fn test_tables_in_load_order() {
        let dataset = Dataset::new(
            Table::new("providers", ["provider_id"]),
            Table::new("receivers", ["receiver_id"]),
            Table::new("food_listings", ["food_id"]),
            Table::new("claims", ["claim_id"]),
        );

        let names: Vec<_> = dataset
            .tables()
            .map(|(name, table)| (name, table.name().to_string()))
            .collect();
        assert_eq!(names[0], (TableName::Providers, "providers".to_string()));
        assert_eq!(names[3], (TableName::Claims, "claims".to_string()));
    }
}
