//! crates/healthtrack_core/src/assistant.rs
//!
//! Wires the classifier, the template table and the ranker into chat replies.
//! Callers own the `Conversation` and the facility list; the assistant only
//! appends to the former and reads the latter.

use serde::Deserialize;

use crate::domain::{Conversation, ConversationMessage, Coordinate, FacilityRecord, RankedFacility};
use crate::error::{CoreError, CoreResult};
use crate::geo::GeoRanker;
use crate::intent::IntentClassifier;
use crate::templates::{emergency_contacts, template_for, ResponseTemplate};

pub const WELCOME_TEXT: &str = "👋 Hi! I'm your HealthTrack assistant. I can help you find hospitals, check bed availability, or navigate to medical facilities. Describe your emergency or ask me anything.";
pub const NO_FACILITIES_TEXT: &str =
    "⚠️ No hospital data is available right now. Please call 108 for emergency services!";
pub const LOCATION_HINT_TEXT: &str =
    "📍 Share your location and I'll list the nearest hospitals.";
const LOCATION_FOUND_TEXT: &str = "📍 Location detected! These are the hospitals nearest to you:";
const LOCATION_DENIED_TEXT: &str = "⚠️ Location access was denied. Allow location access to see the nearest hospitals, and call 108 if this is life-threatening!";
const LOCATION_UNAVAILABLE_TEXT: &str = "⚠️ Unable to detect your exact location. Please call 108 if this is a life-threatening emergency!";
const LOCATION_TIMEOUT_TEXT: &str = "⚠️ Locating you took too long. Try again, and call 108 if this is a life-threatening emergency!";

/// Facilities listed after a successful location fix.
const LOCATION_RESULT_LIMIT: usize = 5;

/// Why a geolocation attempt produced no coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFailure {
    PermissionDenied,
    Unavailable,
    Timeout,
}

#[derive(Debug, Default)]
pub struct TriageAssistant {
    classifier: IntentClassifier,
    ranker: GeoRanker,
}

impl TriageAssistant {
    pub fn new(classifier: IntentClassifier, ranker: GeoRanker) -> Self {
        Self { classifier, ranker }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn ranker(&self) -> &GeoRanker {
        &self.ranker
    }

    /// Appends the greeting a chat widget shows when it opens.
    pub fn welcome<'c>(&self, conversation: &'c mut Conversation) -> &'c ConversationMessage {
        conversation.push(ConversationMessage::assistant(WELCOME_TEXT))
    }

    /// Records the user's text and appends the assistant's reply.
    ///
    /// Blank input is rejected before anything is appended.
    pub fn respond<'c>(
        &self,
        conversation: &'c mut Conversation,
        user_text: &str,
        origin: Option<Coordinate>,
        facilities: &[FacilityRecord],
    ) -> CoreResult<&'c ConversationMessage> {
        if user_text.trim().is_empty() {
            return Err(CoreError::InvalidInput("message text is empty".to_string()));
        }
        conversation.push(ConversationMessage::user(user_text));

        let category = self.classifier.classify(user_text);
        let template = template_for(category);

        let mut reply = ConversationMessage::assistant(template.text);
        reply.category = Some(category);
        reply.is_emergency = template.is_emergency;

        if template.show_nearest_facilities {
            match origin {
                Some(origin) => {
                    let ranked = self.nearest(template, origin, facilities)?;
                    if ranked.is_empty() {
                        reply.text = format!("{}\n\n{}", reply.text, NO_FACILITIES_TEXT);
                    } else {
                        reply.facilities = Some(ranked);
                    }
                }
                None => {
                    reply.text = format!("{}\n\n{}", reply.text, LOCATION_HINT_TEXT);
                }
            }
        }
        if template.show_emergency_contacts {
            reply.emergency_contacts = Some(emergency_contacts().to_vec());
        }

        Ok(conversation.push(reply))
    }

    /// Appends the outcome of a geolocation attempt.
    pub fn location_update<'c>(
        &self,
        conversation: &'c mut Conversation,
        outcome: Result<Coordinate, LocationFailure>,
        facilities: &[FacilityRecord],
    ) -> CoreResult<&'c ConversationMessage> {
        let reply = match outcome {
            Ok(origin) => {
                let ranked = self.ranker.rank(origin, facilities, LOCATION_RESULT_LIMIT)?;
                if ranked.is_empty() {
                    ConversationMessage::assistant(NO_FACILITIES_TEXT)
                } else {
                    let mut message = ConversationMessage::assistant(LOCATION_FOUND_TEXT);
                    message.facilities = Some(ranked);
                    message
                }
            }
            Err(failure) => {
                let text = match failure {
                    LocationFailure::PermissionDenied => LOCATION_DENIED_TEXT,
                    LocationFailure::Unavailable => LOCATION_UNAVAILABLE_TEXT,
                    LocationFailure::Timeout => LOCATION_TIMEOUT_TEXT,
                };
                let mut message = ConversationMessage::assistant(text);
                message.emergency_contacts = Some(emergency_contacts().to_vec());
                message
            }
        };
        Ok(conversation.push(reply))
    }

    fn nearest(
        &self,
        template: &ResponseTemplate,
        origin: Coordinate,
        facilities: &[FacilityRecord],
    ) -> CoreResult<Vec<RankedFacility>> {
        let candidates: Vec<FacilityRecord> = facilities
            .iter()
            .filter(|f| template.facility_filter.accepts(f))
            .cloned()
            .collect();
        self.ranker.rank(origin, &candidates, template.facility_limit)
    }
}
