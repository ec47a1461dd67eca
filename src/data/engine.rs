use std::path::Path;

use super::error::{DataError, Result};
use super::filter::{region_rows, RegionRegistry};
use super::loader::load_file;
use super::metrics::Metrics;
use super::model::{ColumnType, Row, Table};

// ---------------------------------------------------------------------------
// Dataset – a table together with its region registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: Table,
    pub regions: RegionRegistry,
}

impl Dataset {
    /// Derive the region registry for a freshly parsed table.
    pub fn from_table(table: Table) -> Result<Self> {
        let regions = RegionRegistry::derive(&table)?;
        Ok(Self { table, regions })
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Owns the loaded dataset. Every successful load replaces it wholesale;
/// a failed load leaves it untouched.
#[derive(Debug, Default)]
pub struct Engine {
    dataset: Option<Dataset>,
}

impl Engine {
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let dataset = Dataset::from_table(load_file(path)?)?;
        log::info!(
            "Loaded {} rows with columns {:?}, {} regions",
            dataset.table.len(),
            dataset.table.headers,
            dataset.regions.len()
        );
        self.dataset = Some(dataset);
        Ok(())
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Column names of the loaded table (empty before the first load).
    pub fn headers(&self) -> &[String] {
        self.dataset
            .as_ref()
            .map(|ds| ds.table.headers.as_slice())
            .unwrap_or(&[])
    }

    pub fn region_count(&self) -> usize {
        self.dataset.as_ref().map_or(0, |ds| ds.regions.len())
    }

    /// All rows of the region registered under `region_id`, in file order.
    pub fn region_rows(&self, region_id: usize) -> Result<Vec<&Row>> {
        let ds = self.loaded()?;
        let region = ds.regions.get(region_id)?;
        Ok(region_rows(&ds.table, &ds.regions, region))
    }

    /// Summary statistics of column `column_id` (1-based) within a region.
    pub fn compute_metrics(&self, region_id: usize, column_id: usize) -> Result<Metrics> {
        let ds = self.loaded()?;
        let region = ds.regions.get(region_id)?;

        let col = column_id
            .checked_sub(1)
            .filter(|&c| c < ds.table.column_count())
            .ok_or_else(|| DataError::range("invalid column selected"))?;
        if ds.table.column_types[col] == ColumnType::Text {
            return Err(DataError::TypeMismatch(
                "cannot compute metrics for non-numeric column".into(),
            ));
        }

        let mut values: Vec<_> = region_rows(&ds.table, &ds.regions, region)
            .into_iter()
            .filter_map(|row| row[col].as_number())
            .collect();

        Metrics::compute(
            region.to_string(),
            ds.table.headers[col].clone(),
            &mut values,
        )
    }

    /// With nothing loaded there are no regions, so any id is out of range.
    fn loaded(&self) -> Result<&Dataset> {
        self.dataset
            .as_ref()
            .ok_or_else(|| DataError::range("invalid region selected"))
    }
}
