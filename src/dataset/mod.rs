//! Dataset Store subsystem for feedline
//!
//! Loads the four source tables (providers, receivers, food listings,
//! claims) into memory exactly once per session.
//!
//! # Load Flow (strict order)
//!
//! 1. Read each file in table order
//! 2. Lowercase headers and check required columns
//! 3. Deserialize and validate each record
//! 4. Reject duplicate identities
//! 5. Return all four tables, or fail with FEED_DATA_UNAVAILABLE
//!
//! Referential integrity between tables is not checked here; joins at
//! query time simply drop dangling rows.

mod errors;
mod loader;
mod records;
mod session;
mod table;
mod types;

pub use errors::{DatasetError, DatasetErrorCode, DatasetResult};
pub use loader::{parse_table, CsvSource, DatasetSource, SourceFiles};
pub use records::{ClaimRecord, FoodListingRecord, ProviderRecord, ReceiverRecord, TableRecord};
pub use session::Session;
pub use table::{Table, TableName, UnknownTableError};
pub use types::{Dataset, DatasetSummary};
