//! HiLumi member-network CLI
//!
//! Generate the seeded member population and list a view of it.

use anyhow::Context;
use clap::Parser;
use hilumi_core::format::{format_member_line, format_number, format_storage, truncation_note};
use hilumi_core::{AngularSector, StreamKind};
use hilumi_sim::{PopulationExport, RunConfig, ViewId, ViewRunner};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// HiLumi M.C. member network
#[derive(Parser, Debug)]
#[command(name = "hilumi")]
#[command(about = "Generate the HiLumi M.C. member network and query it", long_about = None)]
struct Args {
    /// JSON config file (flags below override it)
    #[arg(short, long)]
    config: Option<String>,

    /// Number of members to generate
    #[arg(short = 'n', long)]
    members: Option<usize>,

    /// Master seed for determinism
    #[arg(short, long)]
    seed: Option<u64>,

    /// Random stream (lcg, chacha)
    #[arg(long)]
    stream: Option<StreamKind>,

    /// View to list (all, near_atlas, angular)
    #[arg(short, long, default_value = "all")]
    view: ViewId,

    /// Radius of the near_atlas view in km
    #[arg(short, long)]
    radius: Option<f64>,

    /// Angular sector as MIN-MAX degrees, e.g. 90-120 or 350-10
    #[arg(long)]
    sector: Option<AngularSector>,

    /// Distance cap for the angular view in km
    #[arg(long)]
    sector_radius: Option<f64>,

    /// Maximum rows to list
    #[arg(short, long)]
    limit: Option<usize>,

    /// Include the H3 density heatmap
    #[arg(long)]
    heatmap: bool,

    /// H3 resolution for the heatmap (0-15)
    #[arg(long)]
    resolution: Option<u8>,

    /// Write the view as JSON to this file
    #[arg(long)]
    export: Option<String>,

    /// JSON output on stdout
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short = 'V', long)]
    verbose: bool,
}

impl Args {
    /// Loads the config file (if any) and applies flag overrides.
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("loading config from {}", path))?,
            None => RunConfig::default(),
        };

        if let Some(members) = self.members {
            config.total_members = members;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(stream) = self.stream {
            config.stream = stream;
        }
        if let Some(radius) = self.radius {
            config.near_radius_km = radius;
        }
        if let Some(sector) = self.sector {
            config.sector = sector;
        }
        if self.sector_radius.is_some() {
            config.sector_radius_km = self.sector_radius;
        }
        if let Some(limit) = self.limit {
            config.list_limit = limit;
        }
        if let Some(resolution) = self.resolution {
            config.heatmap_resolution = resolution;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = args.run_config()?;

    if !args.json {
        info!("HiLumi M.C. Member Network v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let runner = ViewRunner::new(config.clone());
    let result = runner.run(args.view);

    let heatmap = if args.heatmap || args.export.is_some() {
        Some(runner.density_map()?)
    } else {
        None
    };

    let mut export = PopulationExport::new(&result, config.stream);
    if let Some(map) = heatmap.clone() {
        export = export.with_heatmap(map);
    }

    if let Some(path) = &args.export {
        export
            .write_to_file(path)
            .with_context(|| format!("writing export to {}", path))?;
        info!("Exported {} members ({}) to {}", export.matched, args.view, path);
    }

    if args.json {
        println!("{}", export.to_json()?);
        return Ok(());
    }

    let summary = &result.summary;
    info!(
        "{} active members | ~{} PB total storage | {} credits | {} affiliated",
        format_number(summary.total_members as u64),
        summary.total_storage_pb,
        format_number(summary.total_credits),
        format_number(summary.affiliated_members as u64)
    );

    let heading = match args.view {
        ViewId::Angular => format!("{} ({})", args.view.description(), config.sector),
        _ => args.view.description().to_string(),
    };
    info!("");
    info!("{} ({})", heading, result.matched());

    for row in result.rows.iter().take(config.list_limit) {
        info!("  #{:<5} {}", row.member.id, format_member_line(&row.member, row.distance));
    }
    if let Some(note) = truncation_note(config.list_limit, result.matched()) {
        info!("  {}", note);
    }

    if let Some(map) = &heatmap {
        info!("");
        info!(
            "Densest H3 cells (resolution {}, {} cells):",
            map.resolution,
            map.cells.len()
        );
        for cell in map.top(10) {
            info!(
                "  {} ({:.2}, {:.2}) | {} members | {} | {} credits",
                cell.cell,
                cell.lat,
                cell.lon,
                cell.members,
                format_storage(cell.storage_tb),
                format_number(cell.credits)
            );
        }
    }

    Ok(())
}
