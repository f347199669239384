//! A single normalized line item.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One normalized row of financial data, e.g. "Net Interest Income" for a
/// given bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier: the source id column when present, the row
    /// ordinal otherwise.
    pub id: String,
    /// Issuing bank, e.g. "ADIB". Empty when the row had no value.
    pub bank: String,
    /// Reporting category, e.g. "P&L" or "Balance Sheet".
    pub category: String,
    /// Optional sub-category refinement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Hierarchy depth; 0 is the top of the tree.
    pub level: u32,
    /// Display label (the "Item" field).
    pub name: String,
    /// Coerced numeric value per period column, `None` where missing.
    pub periods: IndexMap<String, Option<f64>>,
    /// Metadata columns not covered by the named fields, verbatim.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

impl LineItem {
    /// Coerced value for one period column.
    pub fn value(&self, period: &str) -> Option<f64> {
        self.periods.get(period).copied().flatten()
    }

    /// True when at least one period value is present.
    pub fn has_data(&self) -> bool {
        self.periods.values().any(|v| v.is_some())
    }
}
