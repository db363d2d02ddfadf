//! The recommendation engine: catalog data, preference normalization,
//! weighted scoring, cost and confidence estimation, service-model rules,
//! explanation generation, and the HTTP router that fronts them.

pub mod catalog;
pub mod domain;
pub mod enhance;
mod explain;
pub mod router;
pub mod rules;
pub mod scoring;
mod service;

pub use catalog::{
    Feature, FeatureWeights, Provider, ProviderCatalog, ProviderProfile, Region,
    RegionalModifiers,
};
pub use domain::{PreferenceLevel, RecommendError, RecommendationRequest, UserPreferences};
pub use enhance::{
    EnhancementError, ExplanationEnhancer, GeminiEnhancer, PassthroughEnhancer,
    EXPLANATION_SEPARATOR,
};
pub use router::recommendation_router;
pub use rules::{ServiceModel, ServiceModelDecision, ServiceModelRules};
pub use scoring::{
    compute_confidence, select_provider, Confidence, ConfidenceLevel, ScoringEngine,
};
pub use service::{Recommendation, RecommendationService};
