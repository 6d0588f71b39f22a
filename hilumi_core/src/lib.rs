//! HiLumi Core - Synthetic Member Network for the HiLumi M.C. collaboration
//!
//! Produces a reproducible population of network members clustered around
//! the major physics laboratories, and answers geo-spatial questions about it:
//! 1. **Seeded streams**: every population is a pure function of its seed
//! 2. **Member generator**: weighted anchor selection, normal scatter, log-normal resources
//! 3. **Geo-queries**: Haversine distance and angular sectors around ATLAS
//! 4. **Aggregates**: population summary and H3 density heatmap

pub mod error;
pub mod format;
pub mod geo_query;
pub mod heatmap;
pub mod labs;
pub mod members;
pub mod seeded;
pub mod summary;

// Re-export key types for convenience
pub use error::HilumiError;
pub use geo_query::{
    angle_from_cern, calculate_distance, members_by_angular_sector, members_near_atlas,
    AngularSector, MemberWithAngle, MemberWithDistance,
};
pub use heatmap::{density_map, DensityCell, DensityMap};
pub use labs::{AnchorPoint, PHYSICS_LABS};
pub use members::{generate_members, generate_members_with, GeneratorConfig, Member};
pub use seeded::{LcgStream, StreamKind, UnitStream};
pub use summary::{summarize, PopulationSummary};
