//! crates/healthtrack_core/src/geo.rs
//!
//! Great-circle distance and proximity ranking of facilities.

use std::cmp::Ordering;

use crate::domain::{Coordinate, FacilityRecord, RankedFacility};
use crate::error::{CoreError, CoreResult};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average urban travel speed for ETA estimates.
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

/// What the ranker does with a facility that lacks a usable coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingCoordinatePolicy {
    /// Absent latitude/longitude read as 0. The facility is ranked as if it
    /// sat at (0, 0), which usually puts it far down the list.
    #[default]
    NullIsland,
    /// The facility is left out of the ranking entirely.
    Exclude,
}

impl std::str::FromStr for MissingCoordinatePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "null_island" | "zero" => Ok(Self::NullIsland),
            "exclude" => Ok(Self::Exclude),
            other => Err(CoreError::InvalidInput(format!(
                "unknown missing-coordinate policy '{other}'"
            ))),
        }
    }
}

/// Great-circle distance in kilometres between two points given in degrees.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Whole minutes to cover `distance_km` at [`AVERAGE_SPEED_KMH`].
pub fn eta_minutes(distance_km: f64) -> u32 {
    (distance_km / AVERAGE_SPEED_KMH * 60.0).round() as u32
}

/// Ranks facilities by proximity under a fixed missing-coordinate policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoRanker {
    policy: MissingCoordinatePolicy,
}

impl GeoRanker {
    pub fn new(policy: MissingCoordinatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MissingCoordinatePolicy {
        self.policy
    }

    /// Returns at most `limit` facilities ordered by ascending distance from
    /// `origin`, ties broken by facility id.
    ///
    /// An empty `facilities` slice yields an empty list. A `limit` of zero is
    /// rejected with [`CoreError::InvalidInput`].
    pub fn rank(
        &self,
        origin: Coordinate,
        facilities: &[FacilityRecord],
        limit: usize,
    ) -> CoreResult<Vec<RankedFacility>> {
        if limit == 0 {
            return Err(CoreError::InvalidInput(
                "ranking limit must be at least 1".to_string(),
            ));
        }

        let mut ranked: Vec<RankedFacility> = facilities
            .iter()
            .filter_map(|facility| {
                let (lat, lng) = self.resolve(facility)?;
                let distance_km =
                    haversine_km(origin.latitude(), origin.longitude(), lat, lng);
                Some(RankedFacility {
                    facility: facility.clone(),
                    distance_km,
                    eta_minutes: eta_minutes(distance_km),
                })
            })
            .collect();

        ranked.sort_by(|a, b| match a.distance_km.total_cmp(&b.distance_km) {
            Ordering::Equal => a.facility.id.cmp(&b.facility.id),
            other => other,
        });
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// The coordinate the ranker uses for a facility, or `None` when the
    /// policy drops it.
    fn resolve(&self, facility: &FacilityRecord) -> Option<(f64, f64)> {
        let usable = |v: Option<f64>| v.filter(|x| x.is_finite());
        match (usable(facility.latitude), usable(facility.longitude)) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            (lat, lng) => match self.policy {
                MissingCoordinatePolicy::NullIsland => {
                    Some((lat.unwrap_or(0.0), lng.unwrap_or(0.0)))
                }
                MissingCoordinatePolicy::Exclude => None,
            },
        }
    }
}

/// Ranks `facilities` around `origin` using the default
/// [`MissingCoordinatePolicy::NullIsland`] policy.
pub fn rank_by_proximity(
    origin: Coordinate,
    facilities: &[FacilityRecord],
    limit: usize,
) -> CoreResult<Vec<RankedFacility>> {
    GeoRanker::default().rank(origin, facilities, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(id: &str, lat: f64, lng: f64) -> FacilityRecord {
        FacilityRecord::new(id, format!("Hospital {id}"), "Somewhere", "108")
            .with_location(lat, lng)
    }

    fn hyderabad() -> Coordinate {
        Coordinate::new(17.3850, 78.4867).unwrap()
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            ((17.3850, 78.4867), (17.4000, 78.4800)),
            ((51.5074, -0.1278), (48.8566, 2.3522)),
            ((-33.8688, 151.2093), (35.6762, 139.6503)),
        ];
        for ((lat1, lng1), (lat2, lng2)) in pairs {
            let forward = haversine_km(lat1, lng1, lat2, lng2);
            let backward = haversine_km(lat2, lng2, lat1, lng1);
            assert!((forward - backward).abs() < 1e-9);

            let from_first = Coordinate::new(lat1, lng1).unwrap();
            let from_second = Coordinate::new(lat2, lng2).unwrap();
            let there = rank_by_proximity(from_first, &[facility("b", lat2, lng2)], 1).unwrap();
            let back = rank_by_proximity(from_second, &[facility("a", lat1, lng1)], 1).unwrap();
            assert!((there[0].distance_km - back[0].distance_km).abs() < 1e-9);
            assert_eq!(there[0].eta_minutes, back[0].eta_minutes);
        }
    }

    #[test]
    fn antipodal_facility_has_finite_distance() {
        let origin = Coordinate::new(82.0, 0.0).unwrap();
        let ranked = rank_by_proximity(origin, &[facility("far", -82.0, -180.0)], 1).unwrap();
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;

        assert!(ranked[0].distance_km.is_finite());
        assert!((ranked[0].distance_km - half_circumference).abs() < 1.0);
        assert!(ranked[0].eta_minutes > 0);
    }

    #[test]
    fn every_antipodal_pair_ranks_finite() {
        for lat in (-9..=9).map(|i| i as f64 * 10.0) {
            for lng in (-18..=18).map(|i| i as f64 * 10.0) {
                let origin = Coordinate::new(lat, lng).unwrap();
                let antipode_lng = if lng > 0.0 { lng - 180.0 } else { lng + 180.0 };
                let ranked =
                    rank_by_proximity(origin, &[facility("x", -lat, antipode_lng)], 1).unwrap();
                let d = ranked[0].distance_km;
                assert!(d.is_finite() && d >= 0.0, "({lat}, {lng}) gave {d}");
            }
        }
    }

    #[test]
    fn london_to_paris_is_about_344_km() {
        let d = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn facility_at_origin_has_zero_distance() {
        let ranked =
            rank_by_proximity(hyderabad(), &[facility("h1", 17.3850, 78.4867)], 5).unwrap();
        assert_eq!(ranked[0].distance_km, 0.0);
        assert_eq!(ranked[0].eta_minutes, 0);
    }

    #[test]
    fn nearest_hospital_comes_first() {
        let facilities = vec![facility("h2", 17.3000, 78.6000), facility("h1", 17.4000, 78.4800)];
        let ranked = rank_by_proximity(hyderabad(), &facilities, 5).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].facility.id, "h1");
        assert_eq!(ranked[1].facility.id, "h2");
        for entry in &ranked {
            assert!(entry.distance_km.is_finite());
            assert!(entry.distance_km > 0.0);
        }
    }

    #[test]
    fn empty_input_returns_empty_list() {
        assert!(rank_by_proximity(hyderabad(), &[], 5).unwrap().is_empty());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = rank_by_proximity(hyderabad(), &[facility("h1", 17.4, 78.5)], 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn output_is_sorted_and_bounded() {
        let facilities: Vec<FacilityRecord> = (0..12)
            .map(|i| {
                let lat = 17.0 + (i as f64 * 0.37) % 1.5;
                let lng = 78.0 + (i as f64 * 0.53) % 1.2;
                facility(&format!("h{i:02}"), lat, lng)
            })
            .collect();

        for limit in [1, 3, 5, 12, 20] {
            let ranked = rank_by_proximity(hyderabad(), &facilities, limit).unwrap();
            assert_eq!(ranked.len(), limit.min(facilities.len()));
            assert!(ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        }
    }

    #[test]
    fn equal_distances_are_ordered_by_id() {
        let facilities = vec![
            facility("c", 17.5, 78.5),
            facility("a", 17.5, 78.5),
            facility("b", 17.5, 78.5),
        ];
        let ranked = rank_by_proximity(hyderabad(), &facilities, 3).unwrap();
        let ids: Vec<&str> = ranked.iter().map(|r| r.facility.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let facilities = vec![
            facility("h3", 17.2, 78.3),
            facility("h1", 17.4, 78.48),
            facility("h2", 17.3, 78.6),
        ];
        let first = rank_by_proximity(hyderabad(), &facilities, 3).unwrap();
        let second = rank_by_proximity(hyderabad(), &facilities, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn eta_uses_forty_kmh() {
        assert_eq!(eta_minutes(40.0), 60);
        assert_eq!(eta_minutes(10.0), 15);
        assert_eq!(eta_minutes(0.3), 0);
        assert_eq!(eta_minutes(0.34), 1);
    }

    #[test]
    fn missing_coordinates_default_to_null_island() {
        let origin = Coordinate::new(0.0, 1.0).unwrap();
        let facilities = vec![
            FacilityRecord::new("nowhere", "Unlocated Clinic", "Unknown", "100"),
            facility("far", 10.0, 10.0),
        ];
        let ranked = rank_by_proximity(origin, &facilities, 5).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].facility.id, "nowhere");
        let expected = haversine_km(0.0, 1.0, 0.0, 0.0);
        assert!((ranked[0].distance_km - expected).abs() < 1e-9);
    }

    #[test]
    fn exclude_policy_drops_facilities_without_coordinates() {
        let mut partial = FacilityRecord::new("partial", "Half Known", "Unknown", "100");
        partial.latitude = Some(17.39);
        let mut broken = facility("broken", 0.0, 0.0);
        broken.longitude = Some(f64::NAN);
        let facilities = vec![
            FacilityRecord::new("nowhere", "Unlocated Clinic", "Unknown", "100"),
            partial,
            broken,
            facility("h1", 17.4, 78.48),
        ];

        let ranker = GeoRanker::new(MissingCoordinatePolicy::Exclude);
        let ranked = ranker.rank(hyderabad(), &facilities, 10).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].facility.id, "h1");
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!(
            "exclude".parse::<MissingCoordinatePolicy>().unwrap(),
            MissingCoordinatePolicy::Exclude
        );
        assert_eq!(
            " Null_Island ".parse::<MissingCoordinatePolicy>().unwrap(),
            MissingCoordinatePolicy::NullIsland
        );
        assert!("drop".parse::<MissingCoordinatePolicy>().is_err());
    }
}
