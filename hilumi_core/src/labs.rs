//! Static reference data: the weighted laboratory anchors and name pools.

use serde::Serialize;

/// A physics laboratory that members cluster around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnchorPoint {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// Relative selection weight; also tightens the spatial cluster
    pub weight: u32,
}

impl AnchorPoint {
    const fn new(name: &'static str, lat: f64, lon: f64, weight: u32) -> Self {
        Self { name, lat, lon, weight }
    }

    /// Standard deviation (degrees) of member positions around this anchor.
    pub fn cluster_tightness(&self) -> f64 {
        0.3 / (self.weight as f64 / 100.0).sqrt()
    }
}

/// Laboratories in selection order. Order is significant for seeded output.
pub static PHYSICS_LABS: [AnchorPoint; 14] = [
    AnchorPoint::new("CERN", 46.2333, 6.0557, 500),
    AnchorPoint::new("Fermilab", 41.8314, -88.2565, 80),
    AnchorPoint::new("SLAC", 37.4175, -122.2054, 60),
    AnchorPoint::new("KEK", 36.1455, 140.0764, 70),
    AnchorPoint::new("DESY", 53.5753, 9.8779, 65),
    AnchorPoint::new("Brookhaven", 40.8720, -72.8870, 45),
    AnchorPoint::new("TRIUMF", 49.2488, -123.2328, 30),
    AnchorPoint::new("INFN Frascati", 41.8102, 12.6750, 40),
    AnchorPoint::new("IHEP Beijing", 39.9042, 116.4074, 50),
    AnchorPoint::new("RAL", 51.5710, -1.3149, 35),
    AnchorPoint::new("LAPP Annecy", 45.8992, 6.1294, 25),
    AnchorPoint::new("ETH Zürich", 47.3769, 8.5417, 40),
    AnchorPoint::new("LPNHE Paris", 48.8566, 2.3522, 30),
    AnchorPoint::new("Nikhef", 52.3547, 4.9517, 25),
];

pub static FIRST_NAMES: [&str; 50] = [
    "Emma", "Liam", "Sofia", "Noah", "Olivia", "Lucas", "Ava", "Oliver", "Isabella", "Elijah",
    "Mia", "James", "Charlotte", "Benjamin", "Amelia", "Alexander", "Harper", "Michael", "Evelyn", "William",
    "Maja", "Klaus", "Ingrid", "Lars", "Astrid", "Hans", "Karin", "Erik", "Sven", "Anna",
    "Pierre", "Marie", "Jean", "Sophie", "Antoine", "Camille", "Marco", "Giulia", "Paolo", "Francesca",
    "Yuki", "Kenji", "Hana", "Akira", "Wei", "Li", "Chen", "Ming", "Raj", "Priya",
];

pub static LAST_NAMES: [&str; 40] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez", "Martinez",
    "Petersen", "Hansen", "Nielsen", "Jensen", "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer",
    "Dubois", "Martin", "Bernard", "Thomas", "Rossi", "Russo", "Ferrari", "Esposito", "Bianchi", "Romano",
    "Tanaka", "Suzuki", "Takahashi", "Watanabe", "Wang", "Li", "Zhang", "Liu", "Kumar", "Singh",
];

/// Sum of all anchor weights.
pub fn total_weight() -> u32 {
    PHYSICS_LABS.iter().map(|lab| lab.weight).sum()
}

/// Picks the anchor for a draw `r` in [0, total_weight).
///
/// Walks the anchors in order subtracting weights; the first anchor that
/// brings `r` to zero or below wins. Falls back to the last anchor if
/// rounding leaves `r` positive after the walk.
pub fn select_anchor(mut r: f64) -> &'static AnchorPoint {
    for lab in &PHYSICS_LABS {
        r -= lab.weight as f64;
        if r <= 0.0 {
            return lab;
        }
    }
    &PHYSICS_LABS[PHYSICS_LABS.len() - 1]
}
