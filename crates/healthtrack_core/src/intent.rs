//! crates/healthtrack_core/src/intent.rs
//!
//! Rule-based intent classification of free-text chat input.
//!
//! The classifier walks an ordered table of rules and stops at the first one
//! that matches, so emergency categories listed early win over the
//! informational ones listed later. Matching is plain substring containment
//! on the lowercased input: "heart" also matches inside "sweetheart".

use std::sync::OnceLock;

use serde::Serialize;

/// The closed set of intents the assistant understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Cardiac,
    BreathingDifficulty,
    Stroke,
    Trauma,
    Poisoning,
    MentalHealthCrisis,
    SeverePain,
    GenericEmergency,
    HospitalSearchNearby,
    HospitalSearchEmergency,
    HospitalSearch,
    BedAvailability,
    NavigationHelp,
    EmergencyContacts,
    MedicalGuidance,
    Greeting,
    Unknown,
}

impl IntentCategory {
    /// Every category, in classification priority order.
    pub const ALL: [IntentCategory; 17] = [
        Self::Cardiac,
        Self::BreathingDifficulty,
        Self::Stroke,
        Self::Trauma,
        Self::Poisoning,
        Self::MentalHealthCrisis,
        Self::SeverePain,
        Self::GenericEmergency,
        Self::HospitalSearchNearby,
        Self::HospitalSearchEmergency,
        Self::HospitalSearch,
        Self::BedAvailability,
        Self::NavigationHelp,
        Self::EmergencyContacts,
        Self::MedicalGuidance,
        Self::Greeting,
        Self::Unknown,
    ];

    /// True for the categories that describe a medical emergency.
    pub fn is_emergency(self) -> bool {
        matches!(
            self,
            Self::Cardiac
                | Self::BreathingDifficulty
                | Self::Stroke
                | Self::Trauma
                | Self::Poisoning
                | Self::MentalHealthCrisis
                | Self::SeverePain
                | Self::GenericEmergency
        )
    }
}

/// A single entry in the classification table.
pub trait IntentRule: Send + Sync {
    /// The category this rule assigns when it matches.
    fn category(&self) -> IntentCategory;

    /// Tests already-normalized (trimmed, lowercased) input.
    fn matches(&self, normalized: &str) -> bool;
}

/// Matches when the input contains any of the trigger phrases.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    category: IntentCategory,
    triggers: Vec<String>,
}

impl KeywordRule {
    pub fn new<I, S>(category: IntentCategory, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            triggers: lowercase_all(triggers),
        }
    }
}

impl IntentRule for KeywordRule {
    fn category(&self) -> IntentCategory {
        self.category
    }

    fn matches(&self, normalized: &str) -> bool {
        contains_any(normalized, &self.triggers)
    }
}

/// Matches when the input contains a base phrase AND a qualifier phrase,
/// e.g. "hospital" together with "near".
#[derive(Debug, Clone)]
pub struct QualifiedRule {
    category: IntentCategory,
    base: Vec<String>,
    qualifiers: Vec<String>,
}

impl QualifiedRule {
    pub fn new<B, Q, S, T>(category: IntentCategory, base: B, qualifiers: Q) -> Self
    where
        B: IntoIterator<Item = S>,
        Q: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            category,
            base: lowercase_all(base),
            qualifiers: lowercase_all(qualifiers),
        }
    }
}

impl IntentRule for QualifiedRule {
    fn category(&self) -> IntentCategory {
        self.category
    }

    fn matches(&self, normalized: &str) -> bool {
        contains_any(normalized, &self.base) && contains_any(normalized, &self.qualifiers)
    }
}

fn lowercase_all<I, S>(phrases: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| p.as_ref().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

const SEARCH_WORDS: [&str; 3] = ["hospital", "find", "search"];

/// An ordered rule table. The first matching rule decides the category;
/// input no rule matches is [`IntentCategory::Unknown`].
pub struct IntentClassifier {
    rules: Vec<Box<dyn IntentRule>>,
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let order: Vec<IntentCategory> = self.rules.iter().map(|r| r.category()).collect();
        f.debug_struct("IntentClassifier").field("rules", &order).finish()
    }
}

impl IntentClassifier {
    /// Builds a classifier over a caller-supplied table, tested in order.
    pub fn with_rules(rules: Vec<Box<dyn IntentRule>>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, input: &str) -> IntentCategory {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return IntentCategory::Unknown;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.category())
            .unwrap_or(IntentCategory::Unknown)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        use IntentCategory::*;

        let rules: Vec<Box<dyn IntentRule>> = vec![
            Box::new(KeywordRule::new(
                Cardiac,
                ["heart attack", "chest pain", "cardiac", "heart", "myocardial"],
            )),
            Box::new(KeywordRule::new(
                BreathingDifficulty,
                [
                    "breathing",
                    "shortness of breath",
                    "asthma",
                    "respiratory",
                    "can't breathe",
                    "cannot breathe",
                ],
            )),
            Box::new(KeywordRule::new(
                Stroke,
                ["stroke", "paralysis", "weakness", "speech", "facial drooping"],
            )),
            Box::new(KeywordRule::new(
                Trauma,
                ["accident", "injury", "bleeding", "broken", "fracture", "wound"],
            )),
            Box::new(KeywordRule::new(
                Poisoning,
                ["poisoning", "overdose", "toxic", "ingested"],
            )),
            Box::new(KeywordRule::new(
                MentalHealthCrisis,
                [
                    "suicide",
                    "mental health",
                    "depression",
                    "anxiety crisis",
                    "self-harm",
                    "self harm",
                ],
            )),
            Box::new(KeywordRule::new(
                SeverePain,
                ["severe pain", "intense pain", "unbearable pain"],
            )),
            Box::new(KeywordRule::new(
                GenericEmergency,
                ["emergency", "urgent", "critical", "severe", "help"],
            )),
            Box::new(KeywordRule::new(
                HospitalSearchNearby,
                ["nearest", "near me", "where is", "my location"],
            )),
            Box::new(QualifiedRule::new(
                HospitalSearchNearby,
                SEARCH_WORDS,
                ["near", "close"],
            )),
            Box::new(QualifiedRule::new(
                HospitalSearchEmergency,
                SEARCH_WORDS,
                ["casualty", "24/7", "24x7", "trauma centre", "trauma center"],
            )),
            Box::new(KeywordRule::new(
                HospitalSearch,
                ["hospital", "find", "search", "clinic"],
            )),
            Box::new(KeywordRule::new(
                BedAvailability,
                ["bed", "available", "availability"],
            )),
            Box::new(KeywordRule::new(
                NavigationHelp,
                ["direction", "navigate", "route"],
            )),
            Box::new(KeywordRule::new(
                EmergencyContacts,
                [
                    "ambulance",
                    "police",
                    "fire department",
                    "helpline",
                    "hotline",
                    "phone number",
                    "contacts",
                ],
            )),
            Box::new(KeywordRule::new(
                MedicalGuidance,
                [
                    "symptom",
                    "fever",
                    "medicine",
                    "medication",
                    "first aid",
                    "advice",
                    "treatment",
                ],
            )),
            Box::new(KeywordRule::new(
                Greeting,
                [
                    "hi",
                    "hello",
                    "hey",
                    "good morning",
                    "good afternoon",
                    "good evening",
                ],
            )),
        ];
        Self::with_rules(rules)
    }
}

/// Classifies `input` with the built-in rule table.
pub fn classify(input: &str) -> IntentCategory {
    static DEFAULT: OnceLock<IntentClassifier> = OnceLock::new();
    DEFAULT.get_or_init(IntentClassifier::default).classify(input)
}

#[cfg(test)]
mod tests {
    use super::IntentCategory::*;
    use super::*;

    #[test]
    fn emergency_outranks_greeting() {
        assert_eq!(classify("hello, chest pain"), Cardiac);
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(classify("HELP ME, HEART ATTACK"), classify("help me, heart attack"));
        assert_eq!(classify("HELP ME, HEART ATTACK"), Cardiac);
    }

    #[test]
    fn nonsense_is_unknown() {
        assert_eq!(classify("qwertyuiop"), Unknown);
    }

    #[test]
    fn empty_and_blank_input_is_unknown() {
        assert_eq!(classify(""), Unknown);
        assert_eq!(classify("   \t\n"), Unknown);
    }

    #[test]
    fn stroke_is_detected() {
        assert_eq!(classify("I think I'm having a stroke"), Stroke);
    }

    #[test]
    fn substring_matching_is_permissive() {
        assert_eq!(classify("my sweetheart"), Cardiac);
    }

    #[test]
    fn each_emergency_category_has_a_trigger() {
        let cases = [
            ("I can't breathe properly", BreathingDifficulty),
            ("there was a car accident", Trauma),
            ("my son ingested bleach", Poisoning),
            ("thinking about suicide", MentalHealthCrisis),
            ("unbearable pain in my back", SeverePain),
            ("this is urgent", GenericEmergency),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "input: {text}");
        }
    }

    #[test]
    fn severe_pain_wins_over_generic_severe() {
        assert_eq!(classify("severe pain in my stomach"), SeverePain);
        assert_eq!(classify("severe allergic reaction"), GenericEmergency);
    }

    #[test]
    fn hospital_search_variants() {
        assert_eq!(classify("find a hospital close to me"), HospitalSearchNearby);
        assert_eq!(classify("which is the nearest clinic"), HospitalSearchNearby);
        assert_eq!(classify("search for a 24/7 hospital"), HospitalSearchEmergency);
        assert_eq!(classify("search for a hospital"), HospitalSearch);
    }

    #[test]
    fn emergency_keyword_beats_hospital_search() {
        assert_eq!(classify("find an emergency hospital"), GenericEmergency);
    }

    #[test]
    fn informational_categories() {
        let cases = [
            ("are there any beds free", BedAvailability),
            ("how do I navigate there", NavigationHelp),
            ("what is the ambulance number", EmergencyContacts),
            ("I have a mild fever", MedicalGuidance),
            ("good morning", Greeting),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "input: {text}");
        }
    }

    #[test]
    fn custom_table_is_tested_in_order() {
        let classifier = IntentClassifier::with_rules(vec![
            Box::new(KeywordRule::new(Greeting, ["Hello"])),
            Box::new(KeywordRule::new(Cardiac, ["hello"])),
        ]);
        assert_eq!(classifier.classify("HELLO there"), Greeting);
        assert_eq!(classifier.classify("bye"), Unknown);
    }

    #[test]
    fn qualified_rule_needs_both_parts() {
        let rule = QualifiedRule::new(HospitalSearchNearby, ["hospital"], ["near"]);
        assert!(rule.matches("hospital near here"));
        assert!(!rule.matches("hospital"));
        assert!(!rule.matches("near"));
    }

    #[test]
    fn priority_order_lists_every_category_once() {
        let mut seen = std::collections::HashSet::new();
        for category in IntentCategory::ALL {
            assert!(seen.insert(category));
        }
        assert_eq!(IntentCategory::ALL.last(), Some(&Unknown));
    }
}
