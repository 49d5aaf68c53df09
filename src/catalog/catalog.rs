//! The predefined query catalog
//!
//! Fifteen canonical entries, in display order. The database subset is
//! seven of them with the limits and column names that variant used.

use serde_json::json;

use crate::dataset::TableName::{self, Claims, FoodListings, Providers, Receivers};

use super::ast::{
    AggregateFunction, ColumnRef, OutputColumn, Predicate, QueryDefinition, SortSpec,
};

fn col(table: TableName, column: &str) -> ColumnRef {
    ColumnRef::new(table, column)
}

fn key(table: TableName, column: &str) -> OutputColumn {
    OutputColumn::named(col(table, column))
}

/// One labelled definition
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    label: &'static str,
    definition: QueryDefinition,
}

impl CatalogEntry {
    fn new(label: &'static str, definition: QueryDefinition) -> Self {
        Self { label, definition }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn definition(&self) -> &QueryDefinition {
        &self.definition
    }
}

/// An ordered, read-only set of catalog entries
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    entries: Vec<CatalogEntry>,
}

impl QueryCatalog {
    /// The fifteen canonical entries
    pub fn canonical() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("Providers per City", providers_per_city()),
                CatalogEntry::new("Receivers per City", receivers_per_city()),
                CatalogEntry::new("Provider Type with Most Listings", listings_per_provider_type()),
                CatalogEntry::new("Provider Contacts", provider_contacts()),
                CatalogEntry::new("Receivers with Most Claims", receivers_by_claim_count()),
                CatalogEntry::new("Total Food Quantity", total_food_quantity()),
                CatalogEntry::new("City with Highest Listings", city_with_most_listings()),
                CatalogEntry::new("Most Common Food Type", most_common_food_type("type_count")),
                CatalogEntry::new("Claims per Food Item", claims_per_food_item()),
                CatalogEntry::new(
                    "Provider with Most Completed Claims",
                    provider_with_most_completed_claims(),
                ),
                CatalogEntry::new("Claims by Status (%)", claims_by_status_percentage()),
                CatalogEntry::new(
                    "Avg Quantity Claimed per Receiver",
                    avg_quantity_claimed_per_receiver(),
                ),
                CatalogEntry::new("Most Claimed Meal Type", claims_by_meal_type()),
                CatalogEntry::new(
                    "Total Quantity Donated per Provider",
                    quantity_donated_per_provider(),
                ),
                CatalogEntry::new("Top 5 Cities by Demand", top_cities_by_demand()),
            ],
        }
    }

    /// The seven entries offered by the live-database variant
    pub fn database_subset() -> Self {
        let top_provider_type = QueryDefinition::scan(FoodListings)
            .group_by(key(FoodListings, "provider_type"))
            .aggregate(AggregateFunction::Count, "food_listing")
            .sort(SortSpec::desc("food_listing"))
            .limit(1);

        Self {
            entries: vec![
                CatalogEntry::new("Providers per City", providers_per_city()),
                CatalogEntry::new("Receivers per City", receivers_per_city()),
                CatalogEntry::new("Top Provider Type", top_provider_type),
                CatalogEntry::new("Top Receiver by Claims", receivers_by_claim_count()),
                CatalogEntry::new("Most Common Food Type", most_common_food_type("count_of_type")),
                CatalogEntry::new("Claims by Status (%)", claims_by_status_percentage()),
                CatalogEntry::new("Top 5 Cities by Demand", top_cities_by_demand()),
            ],
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Labels in display order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.label)
    }

    /// Entry whose label matches, ignoring case
    pub fn get(&self, label: &str) -> Option<&CatalogEntry> {
        let label = label.trim();
        self.entries.iter().find(|e| e.label.eq_ignore_ascii_case(label))
    }

    /// Entry by label or by 1-based position
    pub fn resolve(&self, selector: &str) -> Option<(usize, &CatalogEntry)> {
        if let Ok(position) = selector.trim().parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| self.entries.get(index))
                .map(|entry| (position, entry));
        }

        let label = selector.trim();
        self.entries
            .iter()
            .position(|e| e.label.eq_ignore_ascii_case(label))
            .map(|index| (index + 1, &self.entries[index]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn providers_per_city() -> QueryDefinition {
    QueryDefinition::scan(Providers)
        .group_by(key(Providers, "city"))
        .aggregate(AggregateFunction::Count, "total_providers")
        .sort(SortSpec::desc("total_providers"))
}

fn receivers_per_city() -> QueryDefinition {
    QueryDefinition::scan(Receivers)
        .group_by(key(Receivers, "city"))
        .aggregate(AggregateFunction::Count, "total_receivers")
        .sort(SortSpec::desc("total_receivers"))
}

fn listings_per_provider_type() -> QueryDefinition {
    QueryDefinition::scan(FoodListings)
        .group_by(key(FoodListings, "provider_type"))
        .aggregate(AggregateFunction::Count, "total_listings")
        .sort(SortSpec::desc("total_listings"))
}

fn provider_contacts() -> QueryDefinition {
    QueryDefinition::scan(Providers).project(vec![
        key(Providers, "name"),
        key(Providers, "contact"),
        key(Providers, "city"),
    ])
}

fn receivers_by_claim_count() -> QueryDefinition {
    QueryDefinition::scan(Claims)
        .join(Receivers, col(Claims, "receiver_id"), "receiver_id")
        .join(FoodListings, col(Claims, "food_id"), "food_id")
        .group_by(key(Receivers, "name"))
        .aggregate(AggregateFunction::CountOf(col(Claims, "claim_id")), "total_claims")
        .sort(SortSpec::desc("total_claims"))
}

fn total_food_quantity() -> QueryDefinition {
    QueryDefinition::scan(FoodListings).aggregate(
        AggregateFunction::Sum(col(FoodListings, "quantity")),
        "total_food_quantity",
    )
}

fn city_with_most_listings() -> QueryDefinition {
    QueryDefinition::scan(FoodListings)
        .group_by(key(FoodListings, "location"))
        .aggregate(AggregateFunction::Count, "total_listings")
        .sort(SortSpec::desc("total_listings"))
        .limit(1)
}

fn most_common_food_type(count_alias: &str) -> QueryDefinition {
    QueryDefinition::scan(FoodListings)
        .group_by(key(FoodListings, "food_type"))
        .aggregate(AggregateFunction::Count, count_alias)
        .sort(SortSpec::desc(count_alias))
        .limit(1)
}

fn claims_per_food_item() -> QueryDefinition {
    QueryDefinition::scan(Claims)
        .join(FoodListings, col(Claims, "food_id"), "food_id")
        .group_by(key(FoodListings, "food_name"))
        .aggregate(AggregateFunction::CountOf(col(Claims, "claim_id")), "total_claims")
        .sort(SortSpec::desc("total_claims"))
        .limit(7)
}

fn provider_with_most_completed_claims() -> QueryDefinition {
    QueryDefinition::scan(Claims)
        .join(FoodListings, col(Claims, "food_id"), "food_id")
        .join(Providers, col(FoodListings, "provider_id"), "provider_id")
        .filter(Predicate::eq(col(Claims, "status"), json!("Completed")))
        .group_by(key(Providers, "name"))
        .aggregate(
            AggregateFunction::CountOf(col(Claims, "claim_id")),
            "successful_claims",
        )
        .sort(SortSpec::desc("successful_claims"))
        .limit(1)
}

fn claims_by_status_percentage() -> QueryDefinition {
    QueryDefinition::scan(Claims)
        .group_by(key(Claims, "status"))
        .aggregate(AggregateFunction::Percentage, "percentage")
        .sort(SortSpec::desc("percentage"))
}

fn avg_quantity_claimed_per_receiver() -> QueryDefinition {
    QueryDefinition::scan(Claims)
        .join(Receivers, col(Claims, "receiver_id"), "receiver_id")
        .join(FoodListings, col(Claims, "food_id"), "food_id")
        .group_by(key(Receivers, "name"))
        .aggregate(
            AggregateFunction::Avg(col(FoodListings, "quantity")),
            "avg_quantity_claimed",
        )
        .sort(SortSpec::desc("avg_quantity_claimed"))
}

fn claims_by_meal_type() -> QueryDefinition {
    QueryDefinition::scan(Claims)
        .join(FoodListings, col(Claims, "food_id"), "food_id")
        .group_by(key(FoodListings, "meal_type"))
        .aggregate(AggregateFunction::CountOf(col(Claims, "claim_id")), "total_claims")
        .sort(SortSpec::desc("total_claims"))
}

fn quantity_donated_per_provider() -> QueryDefinition {
    QueryDefinition::scan(FoodListings)
        .join(Providers, col(FoodListings, "provider_id"), "provider_id")
        .group_by(key(Providers, "name"))
        .aggregate(
            AggregateFunction::Sum(col(FoodListings, "quantity")),
            "total_quantity_donated",
        )
        .sort(SortSpec::desc("total_quantity_donated"))
}

fn top_cities_by_demand() -> QueryDefinition {
    QueryDefinition::scan(Claims)
        .join(FoodListings, col(Claims, "food_id"), "food_id")
        .group_by(OutputColumn::new(col(FoodListings, "location"), "city"))
        .aggregate(AggregateFunction::CountOf(col(Claims, "claim_id")), "total_claims")
        .sort(SortSpec::desc("total_claims"))
        .limit(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Selection;

    #[test]
    fn test_canonical_has_fifteen_entries_in_order() {
        let catalog = QueryCatalog::canonical();
        assert_eq!(catalog.len(), 15);

        let labels: Vec<_> = catalog.labels().collect();
        assert_eq!(labels[0], "Providers per City");
        assert_eq!(labels[3], "Provider Contacts");
        assert_eq!(labels[14], "Top 5 Cities by Demand");
    }

    #[test]
    fn test_labels_are_unique() {
        let catalog = QueryCatalog::canonical();
        let mut labels: Vec<_> = catalog.labels().collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), catalog.len());
    }

    #[test]
    fn test_database_subset() {
        let subset = QueryCatalog::database_subset();
        assert_eq!(subset.len(), 7);

        let canonical = QueryCatalog::canonical();
        // Shared labels carry identical definitions
        for entry in subset.entries() {
            if let Some(same) = canonical.get(entry.label()) {
                if entry.label() != "Most Common Food Type" {
                    assert_eq!(same.definition(), entry.definition(), "{}", entry.label());
                }
            }
        }

        let top_type = subset.get("Top Provider Type").unwrap();
        assert_eq!(top_type.definition().limit, Some(1));
    }

    #[test]
    fn test_get_ignores_case() {
        let catalog = QueryCatalog::canonical();
        assert!(catalog.get("claims by status (%)").is_some());
        assert!(catalog.get("  Provider Contacts ").is_some());
        assert!(catalog.get("Unknown").is_none());
    }

    #[test]
    fn test_resolve_by_position_and_label() {
        let catalog = QueryCatalog::canonical();

        let (position, entry) = catalog.resolve("9").unwrap();
        assert_eq!(position, 9);
        assert_eq!(entry.label(), "Claims per Food Item");

        let (position, entry) = catalog.resolve("total food quantity").unwrap();
        assert_eq!(position, 6);
        assert_eq!(entry.label(), "Total Food Quantity");

        assert!(catalog.resolve("0").is_none());
        assert!(catalog.resolve("16").is_none());
    }

    #[test]
    fn test_top_n_limits() {
        let catalog = QueryCatalog::canonical();
        assert_eq!(catalog.get("Claims per Food Item").unwrap().definition().limit, Some(7));
        assert_eq!(catalog.get("Top 5 Cities by Demand").unwrap().definition().limit, Some(5));
        assert_eq!(
            catalog.get("Provider with Most Completed Claims").unwrap().definition().limit,
            Some(1)
        );
    }

    #[test]
    fn test_every_sort_targets_an_output_column() {
        for catalog in [QueryCatalog::canonical(), QueryCatalog::database_subset()] {
            for entry in catalog.entries() {
                let def = entry.definition();
                if let Some(sort) = &def.sort {
                    assert!(
                        def.select.output_names().contains(&sort.alias.as_str()),
                        "{}",
                        entry.label()
                    );
                }
            }
        }
    }

    #[test]
    fn test_receiver_claim_counts_require_existing_listing() {
        let canonical = QueryCatalog::canonical();
        let subset = QueryCatalog::database_subset();

        for entry in [
            canonical.get("Receivers with Most Claims").unwrap(),
            subset.get("Top Receiver by Claims").unwrap(),
        ] {
            assert_eq!(
                entry.definition().tables_in_scope(),
                vec![Claims, Receivers, FoodListings],
                "{}",
                entry.label()
            );
        }
    }

    #[test]
    fn test_provider_contacts_is_projection() {
        let catalog = QueryCatalog::canonical();
        let def = catalog.get("Provider Contacts").unwrap().definition();
        assert!(matches!(def.select, Selection::Projection(_)));
        assert_eq!(def.select.output_names(), vec!["name", "contact", "city"]);
        assert!(def.sort.is_none());
    }
}
