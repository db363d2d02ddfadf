use super::catalog::Provider;
use super::domain::{RecommendError, RecommendationRequest};
use super::enhance::{ExplanationEnhancer, EXPLANATION_SEPARATOR};
use super::explain::generate_explanation;
use super::rules::{ServiceModel, ServiceModelRules};
use super::scoring::{compute_confidence, select_provider, Confidence, ScoringEngine};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Service composing the scoring engine, the service-model rules, and the
/// explanation pipeline. The catalog and rule tables are built once here
/// and shared read-only across requests.
pub struct RecommendationService {
    engine: ScoringEngine,
    rules: ServiceModelRules,
    enhancer: Arc<dyn ExplanationEnhancer>,
}

impl RecommendationService {
    pub fn new(enhancer: Arc<dyn ExplanationEnhancer>) -> Self {
        Self::with_engine(ScoringEngine::standard(), ServiceModelRules::standard(), enhancer)
    }

    pub fn with_engine(
        engine: ScoringEngine,
        rules: ServiceModelRules,
        enhancer: Arc<dyn ExplanationEnhancer>,
    ) -> Self {
        Self {
            engine,
            rules,
            enhancer,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Run the full decision pipeline for one request. Caller-input errors
    /// surface before any scoring output exists; an enhancement failure is
    /// absorbed here and the deterministic text served instead.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        let scores = self.engine.calculate_provider_scores(
            &request.preferences,
            request.custom_weights.as_ref(),
            request.region,
        )?;
        let selected = select_provider(&scores).ok_or(RecommendError::EmptyScores)?;

        let confidence = compute_confidence(&scores);
        let decision = self.rules.determine(&request.preferences);
        let estimated_costs = self.engine.estimated_costs(&request.preferences);

        let explanation = generate_explanation(
            &request.preferences,
            &scores,
            selected,
            Some(&decision),
            self.engine.catalog(),
            self.engine.default_weights(),
        );

        let deterministic = explanation.join(EXPLANATION_SEPARATOR);
        let explanation_enhanced = match self.enhancer.enhance(&deterministic).await {
            Ok(text) => text,
            Err(err) => {
                warn!("explanation enhancement failed, serving deterministic text: {err}");
                deterministic
            }
        };

        info!(
            provider = selected.id(),
            service_model = decision.service_model.label(),
            confidence = confidence.level.label(),
            "recommendation computed"
        );

        Ok(Recommendation {
            recommended_provider: selected,
            recommended_service_model: decision.service_model,
            final_scores: scores,
            estimated_costs,
            confidence,
            explanation,
            explanation_enhanced,
        })
    }
}

/// Full response payload for one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub recommended_provider: Provider,
    pub recommended_service_model: ServiceModel,
    pub final_scores: BTreeMap<Provider, f64>,
    pub estimated_costs: BTreeMap<Provider, u32>,
    pub confidence: Confidence,
    pub explanation: Vec<String>,
    pub explanation_enhanced: String,
}

#[cfg(test)]
mod tests {
    use super::super::domain::UserPreferences;
    use super::super::enhance::{EnhancementError, PassthroughEnhancer};
    use super::*;
    use async_trait::async_trait;

    struct FailingEnhancer;

    #[async_trait]
    impl ExplanationEnhancer for FailingEnhancer {
        async fn enhance(&self, _explanation: &str) -> Result<String, EnhancementError> {
            Err(EnhancementError::EmptyResponse)
        }
    }

    fn medium_request() -> RecommendationRequest {
        RecommendationRequest {
            preferences: UserPreferences {
                budget: Some("medium".to_string()),
                scalability: Some("medium".to_string()),
                security: Some("medium".to_string()),
                ease_of_use: Some("medium".to_string()),
                free_tier: Some("medium".to_string()),
                team_expertise: Some("medium".to_string()),
                industry: Some("general".to_string()),
            },
            custom_weights: None,
            region: None,
        }
    }

    #[tokio::test]
    async fn pipeline_produces_a_complete_recommendation() {
        let service = RecommendationService::new(Arc::new(PassthroughEnhancer));
        let recommendation = service
            .recommend(&medium_request())
            .await
            .expect("valid request");

        assert_eq!(recommendation.recommended_provider, Provider::Gcp);
        assert_eq!(recommendation.recommended_service_model, ServiceModel::Paas);
        assert_eq!(recommendation.final_scores.len(), 3);
        assert_eq!(recommendation.estimated_costs.len(), 3);
        assert_eq!(recommendation.explanation.len(), 3);
        assert_eq!(
            recommendation.explanation_enhanced,
            recommendation.explanation.join(EXPLANATION_SEPARATOR)
        );
    }

    #[tokio::test]
    async fn enhancement_failure_falls_back_to_deterministic_text() {
        let service = RecommendationService::new(Arc::new(FailingEnhancer));
        let recommendation = service
            .recommend(&medium_request())
            .await
            .expect("enhancement failures never surface");

        assert_eq!(
            recommendation.explanation_enhanced,
            recommendation.explanation.join(EXPLANATION_SEPARATOR)
        );
    }

    #[tokio::test]
    async fn invalid_input_errors_before_any_scoring_output() {
        let service = RecommendationService::new(Arc::new(PassthroughEnhancer));
        let mut request = medium_request();
        request.preferences.budget = Some("lavish".to_string());

        let error = service.recommend(&request).await.expect_err("must reject");
        assert_eq!(
            error,
            RecommendError::InvalidValue {
                field: "budget".to_string()
            }
        );
    }
}
