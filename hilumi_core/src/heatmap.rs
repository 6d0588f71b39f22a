//! Member density heatmap over H3 hexagons.
//!
//! Members are binned into H3 cells at a single resolution; each cell keeps
//! a head count plus summed credits and storage. Resolution 3 (~60 km
//! edges) separates the laboratories; resolution 5 resolves the Geneva
//! basin.

use crate::error::HilumiError;
use crate::members::Member;
use h3o::{CellIndex, LatLng, Resolution};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolution used when none is configured
pub const DEFAULT_RESOLUTION: u8 = 3;

/// Aggregate of all members falling in one H3 cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCell {
    pub cell: CellIndex,
    /// Cell centre
    pub lat: f64,
    pub lon: f64,
    pub members: usize,
    /// Saturating sum
    pub credits: u64,
    #[serde(deserialize_with = "crate::members::f64_or_nan")]
    pub storage_tb: f64,
}

/// A population binned into H3 cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityMap {
    pub resolution: u8,
    /// Densest first; ties by cell index
    pub cells: Vec<DensityCell>,
    /// Members whose coordinates could not be indexed
    pub skipped: usize,
}

impl DensityMap {
    /// The `n` densest cells.
    pub fn top(&self, n: usize) -> &[DensityCell] {
        &self.cells[..n.min(self.cells.len())]
    }

    /// Total members binned into cells.
    pub fn binned(&self) -> usize {
        self.cells.iter().map(|c| c.members).sum()
    }
}

/// Bins `members` into H3 cells at `resolution` (0..=15).
pub fn density_map(members: &[Member], resolution: u8) -> Result<DensityMap, HilumiError> {
    let res = Resolution::try_from(resolution).map_err(|_| HilumiError::InvalidResolution(resolution))?;

    let mut cells: HashMap<CellIndex, DensityCell> = HashMap::new();
    let mut skipped = 0;

    for member in members {
        // Only non-finite coordinates are rejected
        let lat_lng = match LatLng::new(member.lat, member.lon) {
            Ok(ll) => ll,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let cell_id = lat_lng.to_cell(res);
        let entry = cells.entry(cell_id).or_insert_with(|| {
            let center = LatLng::from(cell_id);
            DensityCell {
                cell: cell_id,
                lat: center.lat(),
                lon: center.lng(),
                members: 0,
                credits: 0,
                storage_tb: 0.0,
            }
        });

        entry.members += 1;
        entry.credits = entry.credits.saturating_add(member.credits);
        entry.storage_tb += member.storage_tb;
    }

    let mut cells: Vec<DensityCell> = cells.into_values().collect();
    cells.sort_by(|a, b| {
        b.members
            .cmp(&a.members)
            .then_with(|| u64::from(a.cell).cmp(&u64::from(b.cell)))
    });

    Ok(DensityMap {
        resolution,
        cells,
        skipped,
    })
}
