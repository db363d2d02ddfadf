use super::catalog::{Feature, Region};
use std::collections::BTreeMap;

/// Qualitative preference level. `parse` accepts only the canonical
/// lowercase tokens; the HTTP layer's allow-list check is case-insensitive
/// but forwards the raw value unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceLevel {
    Low,
    Medium,
    High,
}

impl PreferenceLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(PreferenceLevel::Low),
            "medium" => Some(PreferenceLevel::Medium),
            "high" => Some(PreferenceLevel::High),
            _ => None,
        }
    }

    /// Numeric translation on the 3/6/9 scale used for scoring intensity
    /// and explanation influence ranking.
    pub const fn intensity(self) -> u8 {
        match self {
            PreferenceLevel::Low => 3,
            PreferenceLevel::Medium => 6,
            PreferenceLevel::High => 9,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PreferenceLevel::Low => "low",
            PreferenceLevel::Medium => "medium",
            PreferenceLevel::High => "high",
        }
    }
}

/// Raw qualitative input for one recommendation, exactly as supplied by the
/// caller. Absent feature levels default to "medium" during normalization;
/// `industry` and `team_expertise` are free-form strings matched (trimmed,
/// lowercased) against the service model rule tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub budget: Option<String>,
    pub scalability: Option<String>,
    pub security: Option<String>,
    pub ease_of_use: Option<String>,
    pub free_tier: Option<String>,
    pub team_expertise: Option<String>,
    pub industry: Option<String>,
}

impl UserPreferences {
    pub fn level(&self, feature: Feature) -> Option<&str> {
        match feature {
            Feature::Budget => self.budget.as_deref(),
            Feature::Scalability => self.scalability.as_deref(),
            Feature::Security => self.security.as_deref(),
            Feature::EaseOfUse => self.ease_of_use.as_deref(),
            Feature::FreeTier => self.free_tier.as_deref(),
        }
    }

    /// The cost penalty keys off the literal token, matching the exact
    /// comparison the scorer's validation admits.
    pub(crate) fn wants_high_budget(&self) -> bool {
        self.budget.as_deref() == Some("high")
    }
}

/// Full engine input: preferences plus the optional overrides the caller
/// may supply alongside them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationRequest {
    pub preferences: UserPreferences,
    pub custom_weights: Option<BTreeMap<Feature, f64>>,
    pub region: Option<Region>,
}

/// Errors surfaced to the caller before or during scoring. Input errors map
/// to client errors at the HTTP boundary; `EmptyScores` is the one internal
/// computation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    #[error("Request body must be a JSON object.")]
    InvalidShape,
    #[error("Missing required fields: {}.", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Invalid value for {field}")]
    InvalidValue { field: String },
    #[error("No provider scores computed.")]
    EmptyScores,
}
