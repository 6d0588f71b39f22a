//! View runner - generates a population once and evaluates views over it.

use crate::config::RunConfig;
use crate::views::ViewId;

use hilumi_core::{
    density_map, generate_members_with, members_by_angular_sector, members_near_atlas, summarize,
    DensityMap, HilumiError, Member, MemberWithAngle, MemberWithDistance, PopulationSummary,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A member as listed by a view, with whatever geometry the view computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    #[serde(flatten)]
    pub member: Member,

    /// Distance from ATLAS in km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Angle around CERN in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl From<Member> for ViewRow {
    fn from(member: Member) -> Self {
        Self {
            member,
            distance: None,
            angle: None,
        }
    }
}

impl From<MemberWithDistance> for ViewRow {
    fn from(m: MemberWithDistance) -> Self {
        Self {
            member: m.member,
            distance: Some(m.distance),
            angle: None,
        }
    }
}

impl From<MemberWithAngle> for ViewRow {
    fn from(m: MemberWithAngle) -> Self {
        Self {
            member: m.member,
            distance: Some(m.distance),
            angle: Some(m.angle),
        }
    }
}

/// Results from running a view.
#[derive(Debug, Clone)]
pub struct ViewResult {
    /// View that was run
    pub view: ViewId,

    /// Seed used
    pub seed: u64,

    /// Size of the population the view was drawn from
    pub total_members: usize,

    /// Matching members in view order
    pub rows: Vec<ViewRow>,

    /// Aggregates over the whole population, not just the matched rows
    pub summary: PopulationSummary,
}

impl ViewResult {
    /// Number of members the view matched.
    pub fn matched(&self) -> usize {
        self.rows.len()
    }
}

/// Evaluates views over one generated population.
pub struct ViewRunner {
    config: RunConfig,
    members: Vec<Member>,
    summary: PopulationSummary,
}

impl ViewRunner {
    /// Generates the population described by `config`.
    pub fn new(config: RunConfig) -> Self {
        let members = generate_members_with(&config.generator());
        info!(
            "Generated {} members (seed={}, stream={})",
            members.len(),
            config.seed,
            config.stream
        );
        let summary = summarize(&members);
        Self {
            config,
            members,
            summary,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Runs a single view.
    pub fn run(&self, view: ViewId) -> ViewResult {
        let rows: Vec<ViewRow> = match view {
            ViewId::All => self.members.iter().cloned().map(ViewRow::from).collect(),
            ViewId::NearAtlas => members_near_atlas(&self.members, self.config.near_radius_km)
                .into_iter()
                .map(ViewRow::from)
                .collect(),
            ViewId::Angular => members_by_angular_sector(
                &self.members,
                self.config.sector.min,
                self.config.sector.max,
                self.config.sector_radius_km,
            )
            .into_iter()
            .map(ViewRow::from)
            .collect(),
        };

        match view {
            ViewId::NearAtlas => debug!(
                "  {}: radius={}km -> {} members",
                view, self.config.near_radius_km, rows.len()
            ),
            ViewId::Angular => debug!(
                "  {}: sector={} radius={:?} -> {} members",
                view,
                self.config.sector,
                self.config.sector_radius_km,
                rows.len()
            ),
            ViewId::All => debug!("  {}: {} members", view, rows.len()),
        }

        ViewResult {
            view,
            seed: self.config.seed,
            total_members: self.members.len(),
            rows,
            summary: self.summary.clone(),
        }
    }

    /// Runs every view.
    pub fn run_all(&self) -> Vec<ViewResult> {
        ViewId::all().into_iter().map(|view| self.run(view)).collect()
    }

    /// Summary of the whole population.
    pub fn summary(&self) -> &PopulationSummary {
        &self.summary
    }

    /// Density heatmap at the configured resolution.
    pub fn density_map(&self) -> Result<DensityMap, HilumiError> {
        let map = density_map(&self.members, self.config.heatmap_resolution)?;
        if map.skipped > 0 {
            warn!("{} members with non-finite coordinates left out of heatmap", map.skipped);
        }
        debug!(
            "Heatmap: {} cells at resolution {}",
            map.cells.len(),
            map.resolution
        );
        Ok(map)
    }
}
