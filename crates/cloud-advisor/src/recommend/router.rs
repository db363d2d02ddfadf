use super::catalog::{Feature, Region};
use super::domain::{RecommendError, RecommendationRequest, UserPreferences};
use super::service::RecommendationService;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, warn};

pub const REQUIRED_FIELDS: [&str; 7] = [
    "budget",
    "scalability",
    "security",
    "ease_of_use",
    "free_tier",
    "team_expertise",
    "industry",
];

const QUALITATIVE_FIELDS: [&str; 6] = [
    "budget",
    "scalability",
    "security",
    "ease_of_use",
    "free_tier",
    "team_expertise",
];

const QUALITATIVE_VALUES: [&str; 3] = ["low", "medium", "high"];
const INDUSTRY_VALUES: [&str; 4] = ["general", "fintech", "healthcare", "ai"];

/// Router builder exposing the recommendation endpoint. GET serves a usage
/// hint; POST runs the full pipeline.
pub fn recommendation_router(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route(
            "/api/v1/recommend",
            get(usage_handler).post(recommend_handler),
        )
        .with_state(service)
}

async fn usage_handler() -> Json<Value> {
    Json(json!({
        "message": "Use POST with a JSON body to get a recommendation.",
        "required_fields": REQUIRED_FIELDS,
        "example_values": {
            "budget": "low | medium | high",
            "industry": "general | fintech | healthcare | ai",
        },
    }))
}

async fn recommend_handler(
    State(service): State<Arc<RecommendationService>>,
    Json(payload): Json<Value>,
) -> Response {
    let request = match parse_request(&payload) {
        Ok(request) => request,
        Err(err) => {
            warn!("recommendation rejected: {err}");
            return error_response(&err);
        }
    };

    match service.recommend(&request).await {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(err) => {
            match err {
                RecommendError::EmptyScores => error!("recommendation failed: {err}"),
                _ => warn!("recommendation rejected: {err}"),
            }
            error_response(&err)
        }
    }
}

fn error_response(err: &RecommendError) -> Response {
    let status = match err {
        RecommendError::EmptyScores => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Validate the payload shape, required fields, and allowed values, then
/// assemble the engine request. Field values are checked on a
/// trimmed+lowercased copy but forwarded raw; malformed optional `weights`
/// and `region` inputs are dropped so engine-level fallbacks apply.
pub fn parse_request(payload: &Value) -> Result<RecommendationRequest, RecommendError> {
    let Some(data) = payload.as_object() else {
        return Err(RecommendError::InvalidShape);
    };

    let mut missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !data.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(RecommendError::MissingFields(missing));
    }

    validate_field_values(data)?;

    Ok(RecommendationRequest {
        preferences: extract_preferences(data),
        custom_weights: extract_custom_weights(data),
        region: extract_region(data),
    })
}

fn validate_field_values(data: &Map<String, Value>) -> Result<(), RecommendError> {
    for field in REQUIRED_FIELDS {
        let invalid = || RecommendError::InvalidValue {
            field: field.to_string(),
        };
        let Some(value) = data.get(field).and_then(Value::as_str) else {
            return Err(invalid());
        };
        let normalized = value.trim().to_lowercase();
        if QUALITATIVE_FIELDS.contains(&field) {
            if !QUALITATIVE_VALUES.contains(&normalized.as_str()) {
                return Err(invalid());
            }
        } else if field == "industry" && !INDUSTRY_VALUES.contains(&normalized.as_str()) {
            return Err(invalid());
        }
    }
    Ok(())
}

fn extract_preferences(data: &Map<String, Value>) -> UserPreferences {
    let field = |name: &str| data.get(name).and_then(Value::as_str).map(str::to_string);
    UserPreferences {
        budget: field("budget"),
        scalability: field("scalability"),
        security: field("security"),
        ease_of_use: field("ease_of_use"),
        free_tier: field("free_tier"),
        team_expertise: field("team_expertise"),
        industry: field("industry"),
    }
}

/// All five feature keys must carry numbers; anything else drops the whole
/// override so the default weights apply.
fn extract_custom_weights(data: &Map<String, Value>) -> Option<BTreeMap<Feature, f64>> {
    let weights = data.get("weights")?.as_object()?;
    let mut extracted = BTreeMap::new();
    for feature in Feature::ALL {
        let value = weights.get(feature.key())?.as_f64()?;
        extracted.insert(feature, value);
    }
    Some(extracted)
}

fn extract_region(data: &Map<String, Value>) -> Option<Region> {
    data.get("region")
        .and_then(Value::as_str)
        .and_then(Region::parse)
}
