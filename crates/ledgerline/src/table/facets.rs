//! Derived filter facets.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::item::LineItem;
use super::period::PeriodKey;

/// Usable-data counts for one period column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAvailability {
    /// Rows with a non-missing coerced value.
    pub present: usize,
    /// Total rows in the table.
    pub total: usize,
}

impl PeriodAvailability {
    /// Fraction of rows with a usable value.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.present as f64 / self.total as f64
        }
    }

    /// Whether the period clears a usable-data threshold.
    pub fn clears(&self, min_present: usize) -> bool {
        self.present >= min_present
    }
}

/// The distinct filterable values observed across a table, computed once
/// at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetIndex {
    /// Distinct banks, first-seen order.
    pub banks: IndexSet<String>,
    /// Distinct categories, first-seen order.
    pub categories: IndexSet<String>,
    /// Distinct sub-categories, first-seen order.
    pub sub_categories: IndexSet<String>,
    /// Non-missing counts per period column, in source column order.
    #[serde(with = "period_entries")]
    pub periods: IndexMap<PeriodKey, PeriodAvailability>,
}

impl FacetIndex {
    pub(crate) fn build(items: &[LineItem], period_keys: &[PeriodKey]) -> Self {
        let mut banks = IndexSet::new();
        let mut categories = IndexSet::new();
        let mut sub_categories = IndexSet::new();

        for item in items {
            if !item.bank.is_empty() {
                banks.insert(item.bank.clone());
            }
            if !item.category.is_empty() {
                categories.insert(item.category.clone());
            }
            if let Some(sub) = &item.sub_category {
                sub_categories.insert(sub.clone());
            }
        }

        let mut periods = IndexMap::with_capacity(period_keys.len());
        for key in period_keys {
            let present = items
                .iter()
                .filter(|item| item.value(&key.name).is_some())
                .count();
            periods.insert(
                key.clone(),
                PeriodAvailability {
                    present,
                    total: items.len(),
                },
            );
        }

        Self {
            banks,
            categories,
            sub_categories,
            periods,
        }
    }
}

/// Period keys are structs, so the availability map serializes as a
/// sequence of entries rather than a JSON object.
mod period_entries {
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{PeriodAvailability, PeriodKey};

    pub fn serialize<S>(
        map: &IndexMap<PeriodKey, PeriodAvailability>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<IndexMap<PeriodKey, PeriodAvailability>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<(PeriodKey, PeriodAvailability)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
