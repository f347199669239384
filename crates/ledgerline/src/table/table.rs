//! The line-item table: construction, coercion, and facet queries.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use super::facets::{FacetIndex, PeriodAvailability};
use super::item::LineItem;
use super::period::{PeriodKey, PeriodScheme};
use crate::error::{Result, TableError};
use crate::hierarchy::Hierarchy;
use crate::input::{RawCell, RowRecord};

const BANK_COLUMN: &str = "bank";
const CATEGORY_COLUMN: &str = "category";
const LEVEL_COLUMN: &str = "level";
/// Both spellings occur in source feeds.
const SUB_CATEGORY_COLUMNS: &[&str] = &["sub_category", "sub_category1"];

/// Construction options for [`LineItemTable`].
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Period-column recognition rules.
    pub periods: PeriodScheme,
    /// Column holding the explicit item identifier.
    pub id_column: String,
    /// Column holding the display name.
    pub name_column: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            periods: PeriodScheme::default(),
            id_column: "id".to_string(),
            name_column: "Item".to_string(),
        }
    }
}

/// An immutable table of normalized line items.
///
/// Built once from raw row-records; every query is a pure view. The facet
/// index and the level hierarchy are computed at construction, not per
/// query.
#[derive(Debug, Clone)]
pub struct LineItemTable {
    items: Vec<LineItem>,
    period_keys: Vec<PeriodKey>,
    metadata_columns: Vec<String>,
    facets: FacetIndex,
    hierarchy: Hierarchy,
    config: TableConfig,
}

impl LineItemTable {
    /// Build a table with the default configuration.
    pub fn build_default(rows: &[RowRecord]) -> Result<Self> {
        Self::build(rows, TableConfig::default())
    }

    /// Build a table from row-records.
    ///
    /// Fails only on an unusable input: an empty row sequence, or the
    /// mandatory `bank`/`category` columns absent from every row. Per-cell
    /// irregularities (sentinels, malformed numbers, absent values) degrade
    /// to missing values instead.
    pub fn build(rows: &[RowRecord], config: TableConfig) -> Result<Self> {
        if rows.is_empty() {
            return Err(TableError::EmptyData(
                "no rows to build a table from".to_string(),
            ));
        }

        // Union of column names across rows, first-seen order. Individual
        // rows may lack any column.
        let mut columns: IndexSet<String> = IndexSet::new();
        for row in rows {
            for name in row.keys() {
                columns.insert(name.clone());
            }
        }

        for required in [BANK_COLUMN, CATEGORY_COLUMN] {
            if !columns.contains(required) {
                return Err(TableError::MissingColumn {
                    column: required.to_string(),
                });
            }
        }

        // Classify once: period columns vs metadata columns.
        let mut period_keys = Vec::new();
        let mut metadata_columns = Vec::new();
        for name in &columns {
            match PeriodKey::classify(name, &config.periods) {
                Some(key) => period_keys.push(key),
                None => metadata_columns.push(name.clone()),
            }
        }

        let mut items = Vec::with_capacity(rows.len());
        let mut seen_ids: IndexSet<String> = IndexSet::new();
        let mut levels = Vec::with_capacity(rows.len());
        for (ordinal, row) in rows.iter().enumerate() {
            let item = normalize_row(
                row,
                ordinal,
                &period_keys,
                &metadata_columns,
                &config,
                &mut seen_ids,
            );
            levels.push(item.level);
            items.push(item);
        }

        let facets = FacetIndex::build(&items, &period_keys);
        let hierarchy = Hierarchy::from_levels(&levels);

        Ok(Self {
            items,
            period_keys,
            metadata_columns,
            facets,
            hierarchy,
            config,
        })
    }

    /// The normalized items, in source order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the table has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item by row index.
    pub fn item(&self, row: usize) -> Option<&LineItem> {
        self.items.get(row)
    }

    /// Item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Period columns recognized at construction, in source column order.
    pub fn period_keys(&self) -> &[PeriodKey] {
        &self.period_keys
    }

    /// Metadata columns (everything that is not a period column).
    pub fn metadata_columns(&self) -> &[String] {
        &self.metadata_columns
    }

    /// The precomputed facet index.
    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    /// Distinct observed values for a metadata column, missing values
    /// excluded, first-seen order.
    pub fn distinct_values(&self, column: &str) -> Result<IndexSet<String>> {
        if !self.metadata_columns.iter().any(|c| c == column) {
            return Err(TableError::UnknownColumn(column.to_string()));
        }

        let mut values = IndexSet::new();
        for item in &self.items {
            if let Some(value) = self.metadata_value(item, column) {
                values.insert(value);
            }
        }
        Ok(values)
    }

    /// Non-missing counts per period column, in source column order.
    pub fn period_availability(&self) -> &IndexMap<PeriodKey, PeriodAvailability> {
        &self.facets.periods
    }

    /// Periods clearing a caller-supplied usable-data threshold,
    /// chronologically ordered for display.
    pub fn available_periods(&self, min_present: usize) -> Vec<&PeriodKey> {
        let mut keys: Vec<&PeriodKey> = self
            .facets
            .periods
            .iter()
            .filter(|(_, availability)| availability.clears(min_present))
            .map(|(key, _)| key)
            .collect();
        keys.sort();
        keys
    }

    /// Items grouped by declared level, source order preserved within each
    /// group.
    pub fn by_level(&self) -> BTreeMap<u32, Vec<&LineItem>> {
        let mut groups: BTreeMap<u32, Vec<&LineItem>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(item.level).or_default().push(item);
        }
        groups
    }

    /// The level tree built at construction.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Order-preserving subset of items matching a predicate. Compound
    /// filters compose at the call site.
    pub fn filter<P>(&self, predicate: P) -> Vec<&LineItem>
    where
        P: Fn(&LineItem) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    fn metadata_value(&self, item: &LineItem, column: &str) -> Option<String> {
        if column == self.config.id_column {
            return Some(item.id.clone());
        }
        if column == self.config.name_column {
            return Some(item.name.clone());
        }
        match column {
            BANK_COLUMN => non_empty(&item.bank),
            CATEGORY_COLUMN => non_empty(&item.category),
            LEVEL_COLUMN => Some(item.level.to_string()),
            _ if SUB_CATEGORY_COLUMNS.contains(&column) => item.sub_category.clone(),
            _ => item.extra.get(column).cloned(),
        }
    }
}

/// Normalize one raw row into a typed line item.
fn normalize_row(
    row: &RowRecord,
    ordinal: usize,
    period_keys: &[PeriodKey],
    metadata_columns: &[String],
    config: &TableConfig,
    seen_ids: &mut IndexSet<String>,
) -> LineItem {
    let id = unique_id(text_cell(row, &config.id_column), ordinal, seen_ids);
    let bank = text_cell(row, BANK_COLUMN).unwrap_or_default();
    let category = text_cell(row, CATEGORY_COLUMN).unwrap_or_default();
    let sub_category = SUB_CATEGORY_COLUMNS
        .iter()
        .find_map(|column| text_cell(row, column));
    let level = level_cell(row);
    let name = text_cell(row, &config.name_column).unwrap_or_else(|| id.clone());

    let mut periods = IndexMap::with_capacity(period_keys.len());
    for key in period_keys {
        let value = row.get(key.name.as_str()).and_then(RawCell::to_number);
        periods.insert(key.name.clone(), value);
    }

    let mut extra = IndexMap::new();
    for column in metadata_columns {
        if is_named_column(column, config) {
            continue;
        }
        if let Some(text) = text_cell(row, column) {
            extra.insert(column.clone(), text);
        }
    }

    LineItem {
        id,
        bank,
        category,
        sub_category,
        level,
        name,
        periods,
        extra,
    }
}

fn text_cell(row: &RowRecord, column: &str) -> Option<String> {
    row.get(column).and_then(RawCell::to_text)
}

/// Malformed, negative, or absent level tokens degrade to 0.
fn level_cell(row: &RowRecord) -> u32 {
    row.get(LEVEL_COLUMN)
        .and_then(RawCell::to_number)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u32)
        .unwrap_or(0)
}

/// Explicit ids win; duplicates get the row ordinal appended so ids stay
/// unique within the table.
fn unique_id(explicit: Option<String>, ordinal: usize, seen: &mut IndexSet<String>) -> String {
    let base = explicit.unwrap_or_else(|| ordinal.to_string());
    let mut id = base.clone();
    let mut suffix = ordinal;
    while !seen.insert(id.clone()) {
        id = format!("{base}_{suffix}");
        suffix += 1;
    }
    id
}

fn is_named_column(column: &str, config: &TableConfig) -> bool {
    column == BANK_COLUMN
        || column == CATEGORY_COLUMN
        || column == LEVEL_COLUMN
        || column == config.id_column
        || column == config.name_column
        || SUB_CATEGORY_COLUMNS.contains(&column)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RowRecord {
        cells
            .iter()
            .map(|(name, value)| (name.to_string(), RawCell::from(*value)))
            .collect()
    }

    #[test]
    fn test_build_classifies_and_coerces() {
        let rows = vec![
            row(&[
                ("id", "1"),
                ("Item", "Net Interest Income"),
                ("bank", "ADIB"),
                ("category", "P&L"),
                ("fy_2024", "12.5"),
                ("fy_2023", "na"),
            ]),
            row(&[
                ("id", "2"),
                ("Item", "Operating Expenses"),
                ("bank", "FAB"),
                ("category", "P&L"),
                ("fy_2024", "not-a-number"),
                ("fy_2023", "-3"),
            ]),
        ];

        let table = LineItemTable::build_default(&rows).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.period_keys().len(), 2);
        assert_eq!(table.metadata_columns(), &["id", "Item", "bank", "category"]);

        let first = table.get("1").unwrap();
        assert_eq!(first.value("fy_2024"), Some(12.5));
        assert_eq!(first.value("fy_2023"), None);

        let second = table.get("2").unwrap();
        assert_eq!(second.value("fy_2024"), None);
        assert_eq!(second.value("fy_2023"), Some(-3.0));
    }

    #[test]
    fn test_duplicate_ids_stay_unique() {
        let rows = vec![
            row(&[("id", "7"), ("bank", "ADIB"), ("category", "P&L")]),
            row(&[("id", "7"), ("bank", "FAB"), ("category", "KPI")]),
        ];

        let table = LineItemTable::build_default(&rows).unwrap();
        let ids: Vec<&str> = table.items().iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids[0], "7");
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_ordinal_ids_without_id_column() {
        let rows = vec![
            row(&[("bank", "ADIB"), ("category", "P&L")]),
            row(&[("bank", "FAB"), ("category", "KPI")]),
        ];

        let table = LineItemTable::build_default(&rows).unwrap();
        assert_eq!(table.items()[0].id, "0");
        assert_eq!(table.items()[1].id, "1");
    }

    #[test]
    fn test_unknown_facet_column() {
        let rows = vec![row(&[("bank", "ADIB"), ("category", "P&L")])];
        let table = LineItemTable::build_default(&rows).unwrap();

        assert!(matches!(
            table.distinct_values("segment"),
            Err(TableError::UnknownColumn(_))
        ));
    }
}
