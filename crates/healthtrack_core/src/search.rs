//! crates/healthtrack_core/src/search.rs
//!
//! Browse-and-filter over the facility list, as used by the search and
//! bed-booking screens.

use serde::Serialize;

use crate::domain::FacilityRecord;

/// Filter criteria. Unset fields match every facility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityQuery {
    /// Case-insensitive substring of the facility name or city.
    pub text: Option<String>,
    pub specialty: Option<String>,
    /// A bed category that must currently have a free bed.
    pub bed_category: Option<String>,
    pub facility_type: Option<String>,
}

impl FacilityQuery {
    pub fn matches(&self, facility: &FacilityRecord) -> bool {
        let text_ok = match non_blank(&self.text) {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                facility.name.to_lowercase().contains(&needle)
                    || facility
                        .city
                        .as_deref()
                        .is_some_and(|city| city.to_lowercase().contains(&needle))
            }
        };
        let specialty_ok = non_blank(&self.specialty)
            .map_or(true, |wanted| facility.specialties.iter().any(|s| s == wanted));
        let beds_ok = non_blank(&self.bed_category).map_or(true, |wanted| {
            facility
                .beds
                .iter()
                .any(|b| b.category == wanted && b.available > 0)
        });
        let type_ok = non_blank(&self.facility_type)
            .map_or(true, |wanted| facility.facility_type.as_deref() == Some(wanted));

        text_ok && specialty_ok && beds_ok && type_ok
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Returns the facilities matching `query`, in their original order.
pub fn filter_facilities(
    facilities: &[FacilityRecord],
    query: &FacilityQuery,
) -> Vec<FacilityRecord> {
    facilities
        .iter()
        .filter(|f| query.matches(f))
        .cloned()
        .collect()
}

/// Free beds summed over every ward category.
pub fn total_available_beds(facility: &FacilityRecord) -> u32 {
    facility.beds.iter().map(|b| b.available).sum()
}

/// Coarse availability band shown next to a bed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityLevel {
    Plenty,
    Limited,
    Scarce,
}

impl AvailabilityLevel {
    pub fn from_available(available: u32) -> Self {
        match available {
            n if n > 10 => Self::Plenty,
            n if n > 5 => Self::Limited,
            _ => Self::Scarce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BedSummary;

    fn dataset() -> Vec<FacilityRecord> {
        let mut apollo =
            FacilityRecord::new("1", "Apollo Hospitals", "Jubilee Hills", "040-2360-7777");
        apollo.city = Some("Hyderabad".to_string());
        apollo.facility_type = Some("Multi-Specialty Hospital".to_string());
        apollo.specialties = vec!["Cardiology".to_string(), "Neurology".to_string()];
        apollo.beds = vec![
            BedSummary { category: "ICU".to_string(), available: 0, total: 20 },
            BedSummary { category: "General".to_string(), available: 12, total: 100 },
        ];

        let mut osmania =
            FacilityRecord::new("2", "Osmania General", "Afzal Gunj", "040-2460-0146");
        osmania.city = Some("Hyderabad".to_string());
        osmania.facility_type = Some("General Hospital".to_string());
        osmania.specialties = vec!["Emergency Medicine".to_string()];
        osmania.beds = vec![BedSummary { category: "ICU".to_string(), available: 3, total: 30 }];

        let mut kims = FacilityRecord::new("3", "KIMS", "Secunderabad", "040-4488-5000");
        kims.city = Some("Secunderabad".to_string());
        vec![apollo, osmania, kims]
    }

    fn ids(facilities: &[FacilityRecord]) -> Vec<&str> {
        facilities.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        let all = dataset();
        assert_eq!(filter_facilities(&all, &FacilityQuery::default()).len(), 3);
        let blank = FacilityQuery { text: Some("  ".to_string()), ..Default::default() };
        assert_eq!(filter_facilities(&all, &blank).len(), 3);
    }

    #[test]
    fn text_matches_name_or_city_case_insensitively() {
        let all = dataset();
        let by_name = FacilityQuery { text: Some("apollo".to_string()), ..Default::default() };
        assert_eq!(ids(&filter_facilities(&all, &by_name)), vec!["1"]);

        let by_city = FacilityQuery { text: Some("SECUNDER".to_string()), ..Default::default() };
        assert_eq!(ids(&filter_facilities(&all, &by_city)), vec!["3"]);
    }

    #[test]
    fn bed_category_requires_a_free_bed() {
        let all = dataset();
        let icu = FacilityQuery { bed_category: Some("ICU".to_string()), ..Default::default() };
        assert_eq!(ids(&filter_facilities(&all, &icu)), vec!["2"]);
    }

    #[test]
    fn criteria_combine() {
        let all = dataset();
        let query = FacilityQuery {
            text: Some("hyderabad".to_string()),
            specialty: Some("Cardiology".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_facilities(&all, &query)), vec!["1"]);

        let typed = FacilityQuery {
            facility_type: Some("General Hospital".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_facilities(&all, &typed)), vec!["2"]);
    }

    #[test]
    fn bed_totals_and_levels() {
        let all = dataset();
        assert_eq!(total_available_beds(&all[0]), 12);
        assert_eq!(total_available_beds(&all[2]), 0);
        assert_eq!(AvailabilityLevel::from_available(11), AvailabilityLevel::Plenty);
        assert_eq!(AvailabilityLevel::from_available(10), AvailabilityLevel::Limited);
        assert_eq!(AvailabilityLevel::from_available(6), AvailabilityLevel::Limited);
        assert_eq!(AvailabilityLevel::from_available(5), AvailabilityLevel::Scarce);
    }
}
