//! JSON exporter for map and list front ends.
//!
//! Exports one view of the population, together with the population
//! summary and (optionally) the density heatmap.

use crate::runner::{ViewResult, ViewRow};
use hilumi_core::{DensityMap, HilumiError, PopulationSummary, StreamKind};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete view export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationExport {
    /// View name
    pub view: String,

    /// Seed used
    pub seed: u64,

    /// Stream used
    pub stream: StreamKind,

    /// Size of the whole population
    pub total_members: usize,

    /// Rows matched by the view
    pub matched: usize,

    /// Whole-population aggregates
    pub summary: PopulationSummary,

    /// Matching members in view order
    pub members: Vec<ViewRow>,

    /// Density heatmap, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<DensityMap>,
}

impl PopulationExport {
    /// Creates an export from a view result.
    pub fn new(result: &ViewResult, stream: StreamKind) -> Self {
        Self {
            view: result.view.name().to_string(),
            seed: result.seed,
            stream,
            total_members: result.total_members,
            matched: result.matched(),
            summary: result.summary.clone(),
            members: result.rows.clone(),
            heatmap: None,
        }
    }

    /// Attaches a heatmap.
    pub fn with_heatmap(mut self, heatmap: DensityMap) -> Self {
        self.heatmap = Some(heatmap);
        self
    }

    /// Renders as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, HilumiError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), HilumiError> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
