//! Population-level statistics for the member-network header cards.

use crate::members::Member;
use geo::{BoundingRect, Centroid, MultiPoint, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Axis-aligned geographic extent of a population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// Number of members affiliated with one institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionCount {
    pub institution: String,
    pub members: usize,
}

/// Aggregates over a member population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub total_members: usize,
    #[serde(deserialize_with = "crate::members::f64_or_nan")]
    pub total_storage_tb: f64,
    /// Petabytes, rounded to one decimal
    #[serde(deserialize_with = "crate::members::f64_or_nan")]
    pub total_storage_pb: f64,
    /// Saturating sum
    pub total_credits: u64,
    /// Saturating sum
    pub total_compute_hours: u64,
    pub affiliated_members: usize,
    /// Sorted by member count (descending), then name
    pub institutions: Vec<InstitutionCount>,
    /// `(lat, lon)` mean of all finite positions
    pub centroid: Option<(f64, f64)>,
    pub bounds: Option<GeoBounds>,
}

/// Summarizes a population. Non-finite positions are left out of the
/// centroid and bounds but still counted everywhere else.
pub fn summarize(members: &[Member]) -> PopulationSummary {
    let total_storage_tb: f64 = members.iter().map(|m| m.storage_tb).sum();

    let mut by_institution: HashMap<&str, usize> = HashMap::new();
    for inst in members.iter().filter_map(|m| m.institution.as_deref()) {
        *by_institution.entry(inst).or_default() += 1;
    }
    let affiliated_members: usize = by_institution.values().sum();

    let mut institutions: Vec<InstitutionCount> = by_institution
        .into_iter()
        .map(|(institution, count)| InstitutionCount {
            institution: institution.to_string(),
            members: count,
        })
        .collect();
    institutions.sort_by(|a, b| {
        b.members
            .cmp(&a.members)
            .then_with(|| a.institution.cmp(&b.institution))
    });

    // geo works in (x, y) = (lon, lat)
    let points: MultiPoint<f64> = members
        .iter()
        .filter(|m| m.lat.is_finite() && m.lon.is_finite())
        .map(|m| Point::new(m.lon, m.lat))
        .collect::<Vec<_>>()
        .into();

    let centroid = points.centroid().map(|p| (p.y(), p.x()));
    let bounds = points.bounding_rect().map(|rect| GeoBounds {
        min_lat: rect.min().y,
        min_lon: rect.min().x,
        max_lat: rect.max().y,
        max_lon: rect.max().x,
    });

    PopulationSummary {
        total_members: members.len(),
        total_storage_tb,
        total_storage_pb: (total_storage_tb / 1000.0 * 10.0).round() / 10.0,
        total_credits: members
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.credits)),
        total_compute_hours: members
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.compute_hours)),
        affiliated_members,
        institutions,
        centroid,
        bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::members::generate_members;
    use approx::assert_relative_eq;

    fn member(id: u64, lat: f64, lon: f64, institution: Option<&str>) -> Member {
        Member {
            id,
            name: "Test Member".to_string(),
            lat,
            lon,
            credits: 100,
            storage_tb: 1.5,
            compute_hours: 60,
            institution: institution.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_population() {
        let summary = summarize(&[]);

        assert_eq!(summary.total_members, 0);
        assert_eq!(summary.total_storage_pb, 0.0);
        assert!(summary.institutions.is_empty());
        assert!(summary.centroid.is_none());
        assert!(summary.bounds.is_none());
    }

    #[test]
    fn test_totals_and_institutions() {
        let members = vec![
            member(1, 10.0, 20.0, Some("CERN")),
            member(2, 20.0, 40.0, Some("DESY")),
            member(3, 30.0, 60.0, Some("CERN")),
            member(4, 40.0, 80.0, None),
        ];
        let summary = summarize(&members);

        assert_eq!(summary.total_members, 4);
        assert_relative_eq!(summary.total_storage_tb, 6.0);
        assert_eq!(summary.total_credits, 400);
        assert_eq!(summary.total_compute_hours, 240);
        assert_eq!(summary.affiliated_members, 3);
        assert_eq!(summary.institutions[0].institution, "CERN");
        assert_eq!(summary.institutions[0].members, 2);
        assert_eq!(summary.institutions[1].institution, "DESY");

        let (lat, lon) = summary.centroid.unwrap();
        assert_relative_eq!(lat, 25.0);
        assert_relative_eq!(lon, 50.0);

        let bounds = summary.bounds.unwrap();
        assert_eq!(bounds.min_lat, 10.0);
        assert_eq!(bounds.max_lon, 80.0);
    }

    #[test]
    fn test_non_finite_positions_excluded_from_geometry() {
        let members = vec![
            member(1, 10.0, 10.0, None),
            member(2, f64::INFINITY, 10.0, None),
        ];
        let summary = summarize(&members);

        assert_eq!(summary.total_members, 2);
        let bounds = summary.bounds.unwrap();
        assert_eq!(bounds.max_lat, 10.0);
    }

    #[test]
    fn test_reference_population_storage() {
        let summary = summarize(&generate_members(1247, 42));

        assert_eq!(summary.affiliated_members, 884);
        assert_relative_eq!(summary.total_storage_tb, 3039.33, epsilon = 0.05);
        assert_relative_eq!(summary.total_storage_pb, 3.0);
        assert_eq!(summary.institutions[0].institution, "CERN");
    }

    #[test]
    fn test_credit_totals_saturate() {
        let mut rich = member(1, 10.0, 10.0, None);
        rich.credits = u64::MAX;
        rich.compute_hours = u64::MAX - 10;
        let members = vec![rich, member(2, 20.0, 20.0, None)];
        let summary = summarize(&members);

        assert_eq!(summary.total_credits, u64::MAX);
        assert_eq!(summary.total_compute_hours, u64::MAX);
    }

    #[test]
    fn test_seed_with_infinite_credit_draw() {
        let summary = summarize(&generate_members(1247, 334));

        assert_eq!(summary.total_members, 1247);
        assert_eq!(summary.total_credits, u64::MAX);
        assert!(summary.centroid.is_some());
    }

    #[test]
    fn test_infinite_storage_total_reads_back() {
        let mut members = vec![member(1, 10.0, 10.0, None)];
        members[0].storage_tb = f64::INFINITY;
        let summary = summarize(&members);
        assert!(summary.total_storage_pb.is_infinite());

        let json = serde_json::to_string(&summary).unwrap();
        let back: PopulationSummary = serde_json::from_str(&json).unwrap();

        assert!(back.total_storage_tb.is_nan());
        assert!(back.total_storage_pb.is_nan());
        assert_eq!(back.total_credits, 100);
    }
}
