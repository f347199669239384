//! Ledgerline: normalization and faceting engine for bank financial line items.
//!
//! Ledgerline ingests flat rows of financial line items tagged with
//! bank/category/hierarchy metadata and per-period columns, coerces the
//! period columns into clean numeric series, and derives the filter facets
//! (banks, categories, sub-categories, periods with usable data) a
//! selection UI needs.
//!
//! # Core Principles
//!
//! - **Lossy-safe**: malformed cells degrade to missing values, never errors
//! - **Immutable**: the table is built once; every query is a pure view
//! - **Explicit hierarchy**: the level tree is built once at load instead of
//!   being re-derived from adjacency on every query
//!
//! # Example
//!
//! ```no_run
//! use ledgerline::{LineItemTable, RowReader};
//!
//! let reader = RowReader::new();
//! let (rows, source) = reader.read_path("master.csv").unwrap();
//! let table = LineItemTable::build_default(&rows).unwrap();
//!
//! println!("{} items from {}", table.len(), source.file);
//! println!("Banks: {:?}", table.facets().banks);
//! for key in table.available_periods(50) {
//!     println!("  {}", key.label());
//! }
//! ```

pub mod error;
pub mod hierarchy;
pub mod input;
pub mod table;

pub use error::{Result, TableError};
pub use hierarchy::{Hierarchy, HierarchyNode};
pub use input::{RawCell, ReaderConfig, RowReader, RowRecord, SourceMetadata, rows_from_json};
pub use table::{
    FacetIndex, Frequency, LineItem, LineItemTable, PeriodAvailability, PeriodKey, PeriodScheme,
    TableConfig,
};
