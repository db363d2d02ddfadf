//! Integration specifications for the recommendation pipeline.
//!
//! Scenarios exercise end-to-end behavior through the public service facade
//! and HTTP router so scoring, rules, explanation, and routing are validated
//! without reaching into private modules.

mod common {
    use std::sync::Arc;

    use async_trait::async_trait;
    use cloud_advisor::recommend::{
        EnhancementError, ExplanationEnhancer, PassthroughEnhancer, RecommendationRequest,
        RecommendationService, UserPreferences,
    };

    pub(super) struct FailingEnhancer;

    #[async_trait]
    impl ExplanationEnhancer for FailingEnhancer {
        async fn enhance(&self, _explanation: &str) -> Result<String, EnhancementError> {
            Err(EnhancementError::EmptyResponse)
        }
    }

    pub(super) fn preferences(level: &str) -> UserPreferences {
        UserPreferences {
            budget: Some(level.to_string()),
            scalability: Some(level.to_string()),
            security: Some(level.to_string()),
            ease_of_use: Some(level.to_string()),
            free_tier: Some(level.to_string()),
            team_expertise: Some("medium".to_string()),
            industry: Some("general".to_string()),
        }
    }

    pub(super) fn request(level: &str) -> RecommendationRequest {
        RecommendationRequest {
            preferences: preferences(level),
            custom_weights: None,
            region: None,
        }
    }

    pub(super) fn build_service() -> Arc<RecommendationService> {
        Arc::new(RecommendationService::new(Arc::new(PassthroughEnhancer)))
    }

    pub(super) fn build_failing_service() -> Arc<RecommendationService> {
        Arc::new(RecommendationService::new(Arc::new(FailingEnhancer)))
    }
}

mod scoring {
    use super::common::*;
    use cloud_advisor::recommend::{
        compute_confidence, ConfidenceLevel, Provider, Region, ScoringEngine,
    };

    #[test]
    fn scores_cover_exactly_the_three_providers() {
        let engine = ScoringEngine::standard();
        for level in ["low", "medium", "high"] {
            let scores = engine
                .calculate_provider_scores(&preferences(level), None, None)
                .expect("valid input");
            assert_eq!(scores.len(), 3);
            for provider in Provider::ALL {
                let score = scores.get(&provider).expect("provider scored");
                assert!(score.is_finite());
            }
        }
    }

    #[test]
    fn region_us_raises_aws_relative_to_no_region() {
        let engine = ScoringEngine::standard();
        let without = engine
            .calculate_provider_scores(&preferences("medium"), None, None)
            .expect("valid input");
        let with_us = engine
            .calculate_provider_scores(&preferences("medium"), None, Some(Region::Us))
            .expect("valid input");
        assert!(with_us[&Provider::Aws] > without[&Provider::Aws]);
    }

    #[test]
    fn confidence_rating_comes_from_the_top_two_gap() {
        let engine = ScoringEngine::standard();
        let scores = engine
            .calculate_provider_scores(&preferences("medium"), None, None)
            .expect("valid input");
        let confidence = compute_confidence(&scores);
        // gcp 5.3333 vs aws 5.0333: a 0.3 gap is rated Low at 10%.
        assert_eq!(confidence.level, ConfidenceLevel::Low);
        assert!((confidence.percent - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn service_reports_costs_for_every_provider() {
        let service = build_service();
        let recommendation = service
            .recommend(&request("medium"))
            .await
            .expect("valid request");
        assert_eq!(
            recommendation.estimated_costs.get(&Provider::Aws).copied(),
            Some(200)
        );
        assert_eq!(
            recommendation.estimated_costs.get(&Provider::Azure).copied(),
            Some(194)
        );
        assert_eq!(
            recommendation.estimated_costs.get(&Provider::Gcp).copied(),
            Some(169)
        );
    }
}

mod rules {
    use super::common::*;
    use cloud_advisor::recommend::{ServiceModel, ServiceModelRules};

    #[test]
    fn industry_precedence_beats_team_expertise() {
        let rules = ServiceModelRules::standard();
        let mut input = preferences("medium");
        input.industry = Some("healthcare".to_string());
        input.team_expertise = Some("low".to_string());

        let decision = rules.determine(&input);
        assert_eq!(decision.service_model, ServiceModel::Paas);
        assert!(decision.reason.contains("healthcare"));
    }

    #[test]
    fn startup_industry_selects_paas() {
        let rules = ServiceModelRules::standard();
        let mut input = preferences("medium");
        input.industry = Some("startup".to_string());

        let decision = rules.determine(&input);
        assert_eq!(decision.service_model, ServiceModel::Paas);
        assert!(decision.reason.contains("startup"));
    }

    #[test]
    fn unmapped_industry_without_expertise_uses_the_default() {
        let rules = ServiceModelRules::standard();
        let mut input = preferences("medium");
        input.industry = Some("fintech".to_string());
        input.team_expertise = None;

        let decision = rules.determine(&input);
        assert_eq!(decision.service_model, ServiceModel::Iaas);
        assert!(decision.reason.contains("No industry or team_expertise rule matched"));
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use cloud_advisor::recommend::recommendation_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn payload() -> Value {
        json!({
            "budget": "medium",
            "scalability": "medium",
            "security": "medium",
            "ease_of_use": "medium",
            "free_tier": "medium",
            "team_expertise": "medium",
            "industry": "general",
        })
    }

    fn post(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/recommend")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(body).expect("serialize payload"),
            ))
            .expect("request")
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn post_recommend_returns_the_full_payload() {
        let router = recommendation_router(build_service());
        let response = router.oneshot(post(&payload())).await.expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["recommended_provider"], json!("gcp"));
        assert_eq!(body["recommended_service_model"], json!("PaaS"));
        assert_eq!(body["final_scores"].as_object().map(|m| m.len()), Some(3));
        assert_eq!(body["estimated_costs"]["aws"], json!(200));
        assert_eq!(body["confidence"]["confidence_level"], json!("Low"));
        assert!(body["explanation"].as_array().is_some_and(|l| l.len() == 3));
        assert!(body["explanation_enhanced"]
            .as_str()
            .is_some_and(|text| text.contains("GCP was selected")));
    }

    #[tokio::test]
    async fn missing_fields_yield_a_descriptive_client_error() {
        let router = recommendation_router(build_service());
        let response = router
            .oneshot(post(&json!({ "budget": "low" })))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(
            body["error"],
            json!("Missing required fields: ease_of_use, free_tier, industry, scalability, security, team_expertise.")
        );
    }

    #[tokio::test]
    async fn invalid_value_names_the_offending_field() {
        let router = recommendation_router(build_service());
        let mut bad = payload();
        bad["free_tier"] = json!("unlimited");
        let response = router.oneshot(post(&bad)).await.expect("dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(body["error"], json!("Invalid value for free_tier"));
    }

    #[tokio::test]
    async fn array_body_is_a_shape_error() {
        let router = recommendation_router(build_service());
        let response = router
            .oneshot(post(&json!([1, 2, 3])))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(body["error"], json!("Request body must be a JSON object."));
    }

    #[tokio::test]
    async fn industry_rule_applies_end_to_end() {
        let router = recommendation_router(build_service());
        let mut healthcare = payload();
        healthcare["industry"] = json!("healthcare");
        healthcare["team_expertise"] = json!("low");

        let response = router.oneshot(post(&healthcare)).await.expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["recommended_service_model"], json!("PaaS"));
        let last_line = body["explanation"]
            .as_array()
            .and_then(|lines| lines.last())
            .and_then(Value::as_str)
            .expect("reason line");
        assert!(last_line.contains("healthcare"));
    }

    #[tokio::test]
    async fn region_shifts_scores_in_the_response() {
        let router = recommendation_router(build_service());
        let plain = read_json(
            router
                .clone()
                .oneshot(post(&payload()))
                .await
                .expect("dispatch"),
        )
        .await;

        let mut with_region = payload();
        with_region["region"] = json!("us");
        let regional = read_json(router.oneshot(post(&with_region)).await.expect("dispatch")).await;

        let aws_plain = plain["final_scores"]["aws"].as_f64().expect("score");
        let aws_regional = regional["final_scores"]["aws"].as_f64().expect("score");
        assert!((aws_regional - aws_plain - 0.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn malformed_weights_fall_back_to_defaults() {
        let router = recommendation_router(build_service());
        let plain = read_json(
            router
                .clone()
                .oneshot(post(&payload()))
                .await
                .expect("dispatch"),
        )
        .await;

        let mut with_weights = payload();
        with_weights["weights"] = json!({ "budget": "most" });
        let fallback =
            read_json(router.oneshot(post(&with_weights)).await.expect("dispatch")).await;

        assert_eq!(plain["final_scores"], fallback["final_scores"]);
    }

    #[tokio::test]
    async fn enhancer_failure_still_returns_ok_with_deterministic_text() {
        let router = recommendation_router(build_failing_service());
        let response = router.oneshot(post(&payload())).await.expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        let lines: Vec<String> = body["explanation"]
            .as_array()
            .expect("lines")
            .iter()
            .filter_map(|line| line.as_str().map(str::to_string))
            .collect();
        assert_eq!(
            body["explanation_enhanced"],
            json!(lines.join("\n\n"))
        );
    }

    #[tokio::test]
    async fn get_recommend_serves_a_usage_hint() {
        let router = recommendation_router(build_service());
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/recommend")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert!(body["message"]
            .as_str()
            .is_some_and(|message| message.contains("POST")));
        assert_eq!(
            body["required_fields"].as_array().map(|fields| fields.len()),
            Some(7)
        );
    }
}
