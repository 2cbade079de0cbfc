pub mod assistant;
pub mod domain;
pub mod error;
pub mod geo;
pub mod intent;
pub mod links;
pub mod ports;
pub mod search;
pub mod templates;

pub use assistant::{LocationFailure, TriageAssistant};
pub use domain::{
    BedSummary, Conversation, ConversationMessage, Coordinate, EmergencyContact, FacilityRecord,
    RankedFacility, Role,
};
pub use error::{CoreError, CoreResult};
pub use geo::{rank_by_proximity, GeoRanker, MissingCoordinatePolicy};
pub use intent::{
    classify, IntentCategory, IntentClassifier, IntentRule, KeywordRule, QualifiedRule,
};
pub use ports::{FacilityDataSource, PortError, PortResult};
pub use search::{filter_facilities, total_available_beds, AvailabilityLevel, FacilityQuery};
pub use templates::{emergency_contacts, template_for, FacilityFilter, ResponseTemplate};
