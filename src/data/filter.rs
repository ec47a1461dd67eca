use std::collections::BTreeSet;

use super::error::{DataError, Result};
use super::model::{Row, Table, Value};

/// Name of the column rows are grouped by.
pub const REGION_COLUMN: &str = "region";

// ---------------------------------------------------------------------------
// Region registry: 1-based id → distinct region value
// ---------------------------------------------------------------------------

/// Distinct values of the region column, sorted, with ids `1..=N`.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    /// `regions[id - 1]` is the value registered under `id`.
    regions: Vec<Value>,
    column: usize,
}

impl RegionRegistry {
    /// Collect the sorted distinct region values of a table.
    pub fn derive(table: &Table) -> Result<Self> {
        let column = table
            .column_index(REGION_COLUMN)
            .ok_or_else(|| DataError::format("no region column"))?;

        let distinct: BTreeSet<&Value> = table.rows.iter().map(|row| &row[column]).collect();
        Ok(Self {
            regions: distinct.into_iter().cloned().collect(),
            column,
        })
    }

    /// Number of registered regions (`N`).
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Index of the region column within the table.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Value registered under a 1-based id.
    pub fn get(&self, id: usize) -> Result<&Value> {
        id.checked_sub(1)
            .and_then(|i| self.regions.get(i))
            .ok_or_else(|| DataError::range("invalid region selected"))
    }

    /// `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.regions.iter().enumerate().map(|(i, v)| (i + 1, v))
    }
}

/// Rows of `table` whose region column equals `region`, in table order.
pub fn region_rows<'a>(table: &'a Table, registry: &RegionRegistry, region: &Value) -> Vec<&'a Row> {
    table
        .rows
        .iter()
        .filter(|row| row[registry.column()] == *region)
        .collect()
}
