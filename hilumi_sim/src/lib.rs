//! HiLumi Member Network Runner
//!
//! Drives the member-network screen headlessly: one seeded population,
//! several named views over it.
//!
//! # Views
//!
//! - **all**: every member in generation order
//! - **near_atlas**: members within a radius of ATLAS, nearest first
//! - **angular**: members in an angular sector around CERN, nearest first
//!
//! # Usage
//!
//! ```ignore
//! use hilumi_sim::{RunConfig, ViewRunner, ViewId};
//!
//! let config = RunConfig {
//!     seed: 42,
//!     total_members: 1247,
//!     ..Default::default()
//! };
//!
//! let runner = ViewRunner::new(config);
//! let nearby = runner.run(ViewId::NearAtlas);
//! ```

mod config;
mod exporter;
mod runner;
pub mod views;

pub use config::RunConfig;
pub use exporter::PopulationExport;
pub use runner::{ViewResult, ViewRow, ViewRunner};
pub use views::ViewId;
