//! services/api/src/adapters/static_dataset.rs
//!
//! This module contains the static dataset adapter, the concrete implementation
//! of the `FacilityDataSource` port backed by a JSON file loaded once at startup.

use async_trait::async_trait;
use healthtrack_core::domain::{BedSummary, FacilityRecord};
use healthtrack_core::ports::{FacilityDataSource, PortError, PortResult};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A read-only, in-memory facility source.
#[derive(Clone, Debug, Default)]
pub struct StaticDatasetAdapter {
    facilities: Vec<FacilityRecord>,
}

impl StaticDatasetAdapter {
    /// Creates an adapter over an already-built facility list.
    pub fn new(facilities: Vec<FacilityRecord>) -> Self {
        Self { facilities }
    }

    /// Reads and parses a `{ "hospitals": [...] }` dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> PortResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PortError::Unexpected(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let adapter = Self::from_json(&raw)?;
        info!(
            "Loaded {} facilities from {}",
            adapter.facilities.len(),
            path.display()
        );
        Ok(adapter)
    }

    /// Parses a dataset document.
    pub fn from_json(raw: &str) -> PortResult<Self> {
        let file: DatasetFile = serde_json::from_str(raw)
            .map_err(|e| PortError::Unexpected(format!("Invalid facility dataset: {}", e)))?;
        Ok(Self::new(
            file.hospitals.into_iter().map(HospitalRecord::to_domain).collect(),
        ))
    }
}

//=========================================================================================
// "Impure" Dataset Record Structs
//=========================================================================================

#[derive(Deserialize)]
struct DatasetFile {
    hospitals: Vec<HospitalRecord>,
}

/// Ids appear both as numbers and as strings in dataset files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HospitalRecord {
    id: RecordId,
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    phone: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    #[serde(rename = "type")]
    facility_type: Option<String>,
    #[serde(default)]
    specialties: Vec<String>,
    #[serde(default)]
    beds: Vec<BedRecord>,
    rating: Option<f32>,
}

#[derive(Deserialize)]
struct BedRecord {
    #[serde(rename = "type")]
    category: String,
    available: u32,
    total: u32,
}

impl HospitalRecord {
    fn to_domain(self) -> FacilityRecord {
        FacilityRecord {
            id: match self.id {
                RecordId::Number(n) => n.to_string(),
                RecordId::Text(s) => s,
            },
            name: self.name,
            address: self.address,
            phone: self.phone,
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city,
            facility_type: self.facility_type,
            specialties: self.specialties,
            beds: self
                .beds
                .into_iter()
                .map(|b| BedSummary {
                    category: b.category,
                    available: b.available,
                    total: b.total,
                })
                .collect(),
            rating: self.rating,
        }
    }
}

//=========================================================================================
// `FacilityDataSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl FacilityDataSource for StaticDatasetAdapter {
    async fn list_facilities(&self) -> PortResult<Vec<FacilityRecord>> {
        Ok(self.facilities.clone())
    }

    async fn get_facility(&self, id: &str) -> PortResult<FacilityRecord> {
        self.facilities
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("facility {}", id)))
    }
}
