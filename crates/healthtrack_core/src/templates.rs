//! crates/healthtrack_core/src/templates.rs
//!
//! The static response table: one canned reply and its follow-up actions per
//! intent category, plus the public emergency numbers.

use serde::Serialize;

use crate::domain::{EmergencyContact, FacilityRecord};
use crate::intent::IntentCategory;

/// Which facilities a reply may attach before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityFilter {
    Any,
    /// Facilities offering "Emergency Medicine" or typed "General Hospital".
    EmergencyCapable,
    /// Facilities that report at least one free bed.
    WithAvailableBeds,
}

impl FacilityFilter {
    pub fn accepts(self, facility: &FacilityRecord) -> bool {
        match self {
            Self::Any => true,
            Self::EmergencyCapable => {
                facility
                    .specialties
                    .iter()
                    .any(|s| s == "Emergency Medicine")
                    || facility.facility_type.as_deref() == Some("General Hospital")
            }
            Self::WithAvailableBeds => facility.beds.iter().any(|b| b.available > 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTemplate {
    pub category: IntentCategory,
    pub text: &'static str,
    pub show_nearest_facilities: bool,
    pub show_emergency_contacts: bool,
    pub is_emergency: bool,
    /// Maximum facilities to attach when `show_nearest_facilities` is set.
    pub facility_limit: usize,
    pub facility_filter: FacilityFilter,
}

const fn emergency(category: IntentCategory, text: &'static str) -> ResponseTemplate {
    ResponseTemplate {
        category,
        text,
        show_nearest_facilities: true,
        show_emergency_contacts: true,
        is_emergency: true,
        facility_limit: 5,
        facility_filter: FacilityFilter::Any,
    }
}

const fn info(category: IntentCategory, text: &'static str) -> ResponseTemplate {
    ResponseTemplate {
        category,
        text,
        show_nearest_facilities: false,
        show_emergency_contacts: false,
        is_emergency: false,
        facility_limit: 5,
        facility_filter: FacilityFilter::Any,
    }
}

const fn with_facilities(
    mut template: ResponseTemplate,
    limit: usize,
    filter: FacilityFilter,
) -> ResponseTemplate {
    template.show_nearest_facilities = true;
    template.facility_limit = limit;
    template.facility_filter = filter;
    template
}

static CARDIAC: ResponseTemplate = emergency(
    IntentCategory::Cardiac,
    "🚨 CARDIAC EMERGENCY DETECTED! This needs immediate medical attention. Call 108 or your local emergency number now.",
);
static BREATHING: ResponseTemplate = emergency(
    IntentCategory::BreathingDifficulty,
    "🚨 BREATHING EMERGENCY! If breathing is severely difficult, call 108 immediately.",
);
static STROKE: ResponseTemplate = emergency(
    IntentCategory::Stroke,
    "🚨 POSSIBLE STROKE! Time is critical, call 108 immediately.\nRemember FAST: Face drooping, Arm weakness, Speech difficulty, Time to call.",
);
static TRAUMA: ResponseTemplate = emergency(
    IntentCategory::Trauma,
    "🚨 INJURY EMERGENCY! For heavy bleeding or a suspected fracture, call 108 immediately.\nApply firm pressure to bleeding wounds and keep the injured limb still.",
);
static POISONING: ResponseTemplate = emergency(
    IntentCategory::Poisoning,
    "🚨 POISONING EMERGENCY! Call 108 immediately. Do not induce vomiting unless a professional tells you to.",
);
static MENTAL_HEALTH: ResponseTemplate = emergency(
    IntentCategory::MentalHealthCrisis,
    "🚨 MENTAL HEALTH CRISIS! If you are thinking about harming yourself, call 108 or a crisis helpline right now. You are not alone.",
);
static SEVERE_PAIN: ResponseTemplate = emergency(
    IntentCategory::SeverePain,
    "🚨 SEVERE PAIN ALERT! Intense pain can signal a serious condition. Seek immediate medical attention.",
);
static GENERIC_EMERGENCY: ResponseTemplate = emergency(
    IntentCategory::GenericEmergency,
    "🚨 EMERGENCY SITUATION! If this is life-threatening, call 108 immediately.",
);
static SEARCH_NEARBY: ResponseTemplate = with_facilities(
    info(
        IntentCategory::HospitalSearchNearby,
        "🏥 Here are the hospitals nearest to you:",
    ),
    5,
    FacilityFilter::Any,
);
static SEARCH_EMERGENCY: ResponseTemplate = with_facilities(
    info(
        IntentCategory::HospitalSearchEmergency,
        "🚨 For medical emergencies, call 108 immediately!\n\nThese nearby hospitals offer emergency services:",
    ),
    3,
    FacilityFilter::EmergencyCapable,
);
static SEARCH_GENERAL: ResponseTemplate = info(
    IntentCategory::HospitalSearch,
    "🔍 I can help you find hospitals! You can:\n• View nearby hospitals\n• Search by specialty\n• Check bed availability\n• Get directions\n\nWould you like to see nearby hospitals?",
);
static BED_AVAILABILITY: ResponseTemplate = with_facilities(
    info(
        IntentCategory::BedAvailability,
        "🛏️ To check bed availability:\n• Each hospital lists its free beds per ward\n• Open a hospital for department-level counts\n• Filter by bed type to narrow the list\n\nHospitals near you with free beds:",
    ),
    3,
    FacilityFilter::WithAvailableBeds,
);
static NAVIGATION: ResponseTemplate = with_facilities(
    info(
        IntentCategory::NavigationHelp,
        "🗺️ I can help you get directions!\n• Use the Directions link on any hospital\n• It opens turn-by-turn navigation in your maps app\n\nChoose a hospital for directions:",
    ),
    4,
    FacilityFilter::Any,
);
static CONTACTS: ResponseTemplate = ResponseTemplate {
    show_emergency_contacts: true,
    ..info(
        IntentCategory::EmergencyContacts,
        "📞 Emergency numbers you can call right now:",
    )
};
static GUIDANCE: ResponseTemplate = info(
    IntentCategory::MedicalGuidance,
    "🩺 I can't diagnose conditions, but a doctor can. If symptoms are getting worse, visit the nearest hospital or call 108.\nFor mild symptoms, rest, stay hydrated and book a consultation.",
);
static GREETING: ResponseTemplate = info(
    IntentCategory::Greeting,
    "Hello! 👋 I'm here to help you with hospital searches, bed availability, and navigation. What would you like to know?",
);
static UNKNOWN: ResponseTemplate = info(
    IntentCategory::Unknown,
    "I can help you with:\n• Finding nearby hospitals\n• Checking bed availability\n• Getting directions to medical facilities\n• Emergency assistance\n\nFor life-threatening emergencies, always call 108 first!",
);

/// The reply template for `category`.
pub fn template_for(category: IntentCategory) -> &'static ResponseTemplate {
    match category {
        IntentCategory::Cardiac => &CARDIAC,
        IntentCategory::BreathingDifficulty => &BREATHING,
        IntentCategory::Stroke => &STROKE,
        IntentCategory::Trauma => &TRAUMA,
        IntentCategory::Poisoning => &POISONING,
        IntentCategory::MentalHealthCrisis => &MENTAL_HEALTH,
        IntentCategory::SeverePain => &SEVERE_PAIN,
        IntentCategory::GenericEmergency => &GENERIC_EMERGENCY,
        IntentCategory::HospitalSearchNearby => &SEARCH_NEARBY,
        IntentCategory::HospitalSearchEmergency => &SEARCH_EMERGENCY,
        IntentCategory::HospitalSearch => &SEARCH_GENERAL,
        IntentCategory::BedAvailability => &BED_AVAILABILITY,
        IntentCategory::NavigationHelp => &NAVIGATION,
        IntentCategory::EmergencyContacts => &CONTACTS,
        IntentCategory::MedicalGuidance => &GUIDANCE,
        IntentCategory::Greeting => &GREETING,
        IntentCategory::Unknown => &UNKNOWN,
    }
}

static EMERGENCY_NUMBERS: [EmergencyContact; 4] = [
    EmergencyContact {
        id: "emergency",
        name: "Emergency Services",
        phone: "108",
        description: "All-in-one emergency number for medical, fire, and police",
    },
    EmergencyContact {
        id: "ambulance",
        name: "Ambulance",
        phone: "102",
        description: "Medical emergency and ambulance services",
    },
    EmergencyContact {
        id: "police",
        name: "Police",
        phone: "100",
        description: "Police emergency services",
    },
    EmergencyContact {
        id: "fire",
        name: "Fire Department",
        phone: "101",
        description: "Fire emergency services",
    },
];

pub fn emergency_contacts() -> &'static [EmergencyContact] {
    &EMERGENCY_NUMBERS
}
