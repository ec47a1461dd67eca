use std::path::Path;

use crate::data::engine::Engine;
use crate::data::error::{DataError, Result};
use crate::data::metrics::Metrics;
use crate::data::model::Row;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything the session remembers between menu options, independent of
/// rendering.
#[derive(Debug, Default)]
pub struct SessionState {
    pub engine: Engine,

    /// 1-based region id chosen with "Select region". Not revalidated when a
    /// new file is loaded; the engine checks it on use.
    pub selected_region: Option<usize>,
}

impl SessionState {
    /// Load a file, replacing the current dataset on success.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.engine.load(path)
    }

    /// Validate and remember a region id.
    pub fn select_region(&mut self, region_id: usize) -> Result<()> {
        if region_id < 1 || region_id > self.engine.region_count() {
            return Err(DataError::range("invalid region selected"));
        }
        log::info!("Selected region {region_id}");
        self.selected_region = Some(region_id);
        Ok(())
    }

    fn require_region(&self) -> Result<usize> {
        self.selected_region
            .ok_or_else(|| DataError::range("no region selected"))
    }

    /// Rows of the selected region.
    pub fn selected_rows(&self) -> Result<Vec<&Row>> {
        self.engine.region_rows(self.require_region()?)
    }

    /// Metrics of a 1-based column within the selected region.
    pub fn selected_metrics(&self, column_id: usize) -> Result<Metrics> {
        self.engine
            .compute_metrics(self.require_region()?, column_id)
    }
}
