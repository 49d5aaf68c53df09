//! Shared fixtures for integration tests
//!
//! Writes the four data files into a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const PROVIDERS: &str = "\
Provider_ID,Name,Type,Address,City,Contact
1,Green Bistro,Restaurant,12 Elm St,Chicago,555-0101
2,Fresh Mart,Grocery Store,4 Oak Ave,Chicago,555-0102
3,Harbor Bakery,Restaurant,9 Pier Rd,Boston,555-0103
";

pub const RECEIVERS: &str = "\
Receiver_ID,Name,Type,City,Contact
10,Hope Shelter,Shelter,Chicago,555-0201
11,Care NGO,NGO,Boston,555-0202
12,Jane Doe,Individual,Austin,555-0203
";

pub const FOOD_LISTINGS: &str = "\
Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type
100,Rice,10,2025-03-17,1,Restaurant,Chicago,Vegetarian,Lunch
101,Bread,15,2025-03-18,2,Grocery Store,Chicago,Vegan,Breakfast
102,Soup,5,2025-03-19,3,Restaurant,Boston,Vegetarian,Dinner
103,Salad,20,2025-03-20,1,Restaurant,Chicago,Vegan,Lunch
";

pub const CLAIMS: &str = "\
Claim_ID,Food_ID,Receiver_ID,Status,Timestamp
1,100,10,Completed,2025-03-05 10:00
2,101,10,Pending,2025-03-05 11:00
3,102,11,Completed,2025-03-06 09:30
4,103,12,Cancelled,2025-03-06 12:00
5,100,11,Completed,2025-03-07 08:15
6,999,10,Completed,2025-03-07 09:00
";

pub const CLAIMS_HEADER_ONLY: &str = "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n";

/// Writes all four files with the given listings and claims content
pub fn write_dataset(dir: &Path, food_listings: &str, claims: &str) {
    fs::write(dir.join("providers_data.csv"), PROVIDERS).unwrap();
    fs::write(dir.join("receivers_data.csv"), RECEIVERS).unwrap();
    fs::write(dir.join("food_listings_data.csv"), food_listings).unwrap();
    fs::write(dir.join("claims_data.csv"), claims).unwrap();
}

/// Writes all four files with the given claims content
pub fn write_dataset_with_claims(dir: &Path, claims: &str) {
    write_dataset(dir, FOOD_LISTINGS, claims);
}

/// Nine single-listing food items, each in its own city, with the given
/// number of claims per item.
pub fn wide_dataset(items: &[(&str, &str, usize)]) -> TempDir {
    let header = FOOD_LISTINGS.lines().next().unwrap();
    let mut listings = format!("{}\n", header);
    let mut claims = String::from(CLAIMS_HEADER_ONLY);
    let mut claim_id = 1;

    for (i, (food, city, count)) in items.iter().enumerate() {
        let food_id = 200 + i;
        listings.push_str(&format!(
            "{},{},5,2025-03-20,1,Restaurant,{},Vegan,Lunch\n",
            food_id, food, city
        ));
        for _ in 0..*count {
            claims.push_str(&format!(
                "{},{},10,Completed,2025-03-08 10:00\n",
                claim_id, food_id
            ));
            claim_id += 1;
        }
    }

    let tmp = TempDir::new().unwrap();
    write_dataset(tmp.path(), &listings, &claims);
    tmp
}

/// Temporary directory holding the standard dataset
pub fn standard_dataset() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_dataset_with_claims(tmp.path(), CLAIMS);
    tmp
}
