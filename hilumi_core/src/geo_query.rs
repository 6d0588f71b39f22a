//! Geo-queries around the ATLAS detector at CERN.
//!
//! Two measures are attached to members:
//! - great-circle distance (Haversine, spherical earth)
//! - a planar angle around CERN (0 = East, 90 = North, 180 = West, 270 = South)
//!
//! The angle is a tangent-plane approximation, fine for the regional views
//! it is used for but not a geodesic bearing.

use crate::error::HilumiError;
use crate::members::Member;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Mean earth radius used by the distance queries (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// ATLAS detector at CERN (latitude)
pub const ATLAS_LAT: f64 = 46.2333;
/// ATLAS detector at CERN (longitude)
pub const ATLAS_LON: f64 = 6.0557;

/// Default radius of the "near ATLAS" view (km)
pub const DEFAULT_NEAR_RADIUS_KM: f64 = 50.0;

/// A member annotated with its distance from ATLAS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberWithDistance {
    #[serde(flatten)]
    pub member: Member,

    /// Great-circle distance in km
    pub distance: f64,
}

/// A member annotated with distance and angle around CERN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberWithAngle {
    #[serde(flatten)]
    pub member: Member,

    /// Great-circle distance in km
    pub distance: f64,

    /// Degrees in [0, 360), counter-clockwise from East
    pub angle: f64,
}

/// Haversine distance between two points, in km.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from ATLAS, in km.
pub fn distance_from_atlas(lat: f64, lon: f64) -> f64 {
    calculate_distance(ATLAS_LAT, ATLAS_LON, lat, lon)
}

/// Planar angle of a point around CERN, normalized into [0, 360).
pub fn angle_from_cern(lat: f64, lon: f64) -> f64 {
    let theta = (lat - ATLAS_LAT).atan2(lon - ATLAS_LON).to_degrees();
    (theta + 360.0) % 360.0
}

/// An angular sector around CERN. Wraps through 0° when `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularSector {
    pub min: f64,
    pub max: f64,
}

impl AngularSector {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True if the sector crosses the 0°/360° line.
    pub fn wraps(&self) -> bool {
        self.min > self.max
    }

    /// Inclusive membership test.
    pub fn contains(&self, angle: f64) -> bool {
        if self.wraps() {
            angle >= self.min || angle <= self.max
        } else {
            angle >= self.min && angle <= self.max
        }
    }
}

impl Default for AngularSector {
    fn default() -> Self {
        Self::new(90.0, 120.0)
    }
}

impl std::fmt::Display for AngularSector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°-{}°", self.min, self.max)
    }
}

impl std::str::FromStr for AngularSector {
    type Err = HilumiError;

    /// Parses `"MIN-MAX"` in degrees, e.g. `"90-120"` or `"350-10"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| HilumiError::sector(format!("expected MIN-MAX, got '{}'", s)))?;

        let parse_bound = |raw: &str| -> Result<f64, HilumiError> {
            let value: f64 = raw
                .trim()
                .trim_end_matches('°')
                .parse()
                .map_err(|_| HilumiError::sector(format!("'{}' is not a number", raw.trim())))?;
            if !value.is_finite() || !(0.0..=360.0).contains(&value) {
                return Err(HilumiError::sector(format!("{} is outside 0..=360", value)));
            }
            Ok(value)
        };

        Ok(Self::new(parse_bound(min)?, parse_bound(max)?))
    }
}

/// Members within `max_distance_km` of ATLAS, nearest first.
pub fn members_near_atlas(members: &[Member], max_distance_km: f64) -> Vec<MemberWithDistance> {
    let mut nearby: Vec<MemberWithDistance> = members
        .iter()
        .map(|member| MemberWithDistance {
            distance: distance_from_atlas(member.lat, member.lon),
            member: member.clone(),
        })
        .filter(|m| m.distance <= max_distance_km)
        .collect();

    nearby.sort_by(|a, b| by_distance_then_id(a.distance, a.member.id, b.distance, b.member.id));
    nearby
}

/// Members whose angle around CERN falls in `[min_angle, max_angle]`
/// (wrapping when `min_angle > max_angle`), optionally limited to
/// `max_distance_km`. Nearest first.
pub fn members_by_angular_sector(
    members: &[Member],
    min_angle: f64,
    max_angle: f64,
    max_distance_km: Option<f64>,
) -> Vec<MemberWithAngle> {
    let sector = AngularSector::new(min_angle, max_angle);

    let mut in_sector: Vec<MemberWithAngle> = members
        .iter()
        .map(|member| MemberWithAngle {
            distance: distance_from_atlas(member.lat, member.lon),
            angle: angle_from_cern(member.lat, member.lon),
            member: member.clone(),
        })
        .filter(|m| max_distance_km.map_or(true, |max| m.distance <= max))
        .filter(|m| sector.contains(m.angle))
        .collect();

    in_sector.sort_by(|a, b| by_distance_then_id(a.distance, a.member.id, b.distance, b.member.id));
    in_sector
}

fn by_distance_then_id(d_a: f64, id_a: u64, d_b: f64, id_b: u64) -> Ordering {
    d_a.total_cmp(&d_b).then(id_a.cmp(&id_b))
}
