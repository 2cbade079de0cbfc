//! crates/healthtrack_core/src/domain.rs
//!
//! Defines the core data structures shared by the ranker, the classifier and
//! the triage assistant. These types carry no behaviour tied to any storage
//! or transport; serde derives exist so adapters can move them over the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::intent::IntentCategory;

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> CoreResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidInput(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidInput(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Bed counts for one ward category of a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedSummary {
    pub category: String,
    pub available: u32,
    pub total: u32,
}

/// One hospital or clinic, as supplied by the facility data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub facility_type: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub beds: Vec<BedSummary>,
    #[serde(default)]
    pub rating: Option<f32>,
}

impl FacilityRecord {
    /// Creates a record with only the mandatory fields set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            latitude: None,
            longitude: None,
            city: None,
            facility_type: None,
            specialties: Vec::new(),
            beds: Vec::new(),
            rating: None,
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// A facility augmented with its distance from a reference point.
/// Built fresh on every ranking call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility {
    #[serde(flatten)]
    pub facility: FacilityRecord,
    pub distance_km: f64,
    pub eta_minutes: u32,
}

/// A public emergency number shown alongside urgent replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub id: &'static str,
    pub name: &'static str,
    pub phone: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in a chat session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<IntentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<RankedFacility>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contacts: Option<Vec<EmergencyContact>>,
    pub is_emergency: bool,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into())
    }

    fn new(role: Role, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            timestamp: Utc::now(),
            category: None,
            facilities: None,
            emergency_contacts: None,
            is_emergency: false,
        }
    }
}

/// The ordered message log of one chat session. Messages can only be
/// appended; the whole log is dropped with the session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to the stored copy.
    pub fn push(&mut self, message: ConversationMessage) -> &ConversationMessage {
        self.messages.push(message);
        // The vector is non-empty right after the push.
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range_and_nan() {
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(Coordinate::new(0.0, -180.01).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn conversation_keeps_append_order() {
        let mut conversation = Conversation::new();
        conversation.push(ConversationMessage::user("first"));
        conversation.push(ConversationMessage::assistant("second"));

        let texts: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(conversation.messages()[0].role, Role::User);
        assert_eq!(conversation.messages()[1].role, Role::Assistant);
    }

    #[test]
    fn ranked_facility_serializes_flat() {
        let ranked = RankedFacility {
            facility: FacilityRecord::new("h1", "City Hospital", "1 Main St", "108"),
            distance_km: 1.5,
            eta_minutes: 2,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["id"], "h1");
        assert_eq!(json["distance_km"], 1.5);
        assert_eq!(json["eta_minutes"], 2);
    }
}
