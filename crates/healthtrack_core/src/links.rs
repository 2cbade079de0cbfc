//! crates/healthtrack_core/src/links.rs
//!
//! Call and directions links rendered next to each facility.

use crate::domain::FacilityRecord;

/// A `tel:` link; the phone number is used verbatim.
pub fn tel_link(phone: &str) -> String {
    format!("tel:{phone}")
}

/// Driving directions to the facility, addressed by "name, address".
pub fn directions_url(facility: &FacilityRecord) -> String {
    let destination = format!("{}, {}", facility.name, facility.address);
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={}&travelmode=driving",
        urlencoding::encode(&destination)
    )
}

/// Human-readable distance: whole metres below one kilometre, otherwise
/// kilometres to one decimal.
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{}m", (distance_km * 1000.0).round() as u64)
    } else {
        format!("{distance_km:.1}km")
    }
}
