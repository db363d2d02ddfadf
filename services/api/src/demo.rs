use clap::Args;
use cloud_advisor::error::AppError;
use cloud_advisor::recommend::{
    PassthroughEnhancer, Provider, RecommendationRequest, RecommendationService, Region,
    UserPreferences,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Budget sensitivity (low | medium | high)
    #[arg(long, default_value = "medium")]
    budget: String,
    /// Scalability needs (low | medium | high)
    #[arg(long, default_value = "medium")]
    scalability: String,
    /// Security needs (low | medium | high)
    #[arg(long, default_value = "medium")]
    security: String,
    /// Ease-of-use preference (low | medium | high)
    #[arg(long, default_value = "medium")]
    ease_of_use: String,
    /// Free-tier importance (low | medium | high)
    #[arg(long, default_value = "medium")]
    free_tier: String,
    /// Team cloud expertise (low | medium | high)
    #[arg(long, default_value = "medium")]
    team_expertise: String,
    /// Industry used by the service model rules (e.g. healthcare, startup)
    #[arg(long, default_value = "general")]
    industry: String,
    /// Optional deployment region (india | us | europe)
    #[arg(long)]
    region: Option<String>,
}

impl Default for RecommendArgs {
    fn default() -> Self {
        Self {
            budget: "medium".to_string(),
            scalability: "medium".to_string(),
            security: "medium".to_string(),
            ease_of_use: "medium".to_string(),
            free_tier: "medium".to_string(),
            team_expertise: "medium".to_string(),
            industry: "general".to_string(),
            region: None,
        }
    }
}

/// Offline demo: runs the engine once with the deterministic explanation
/// (no AI rewrite) and prints the result.
pub(crate) async fn run_recommend_demo(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        budget,
        scalability,
        security,
        ease_of_use,
        free_tier,
        team_expertise,
        industry,
        region,
    } = args;

    let request = RecommendationRequest {
        preferences: UserPreferences {
            budget: Some(budget),
            scalability: Some(scalability),
            security: Some(security),
            ease_of_use: Some(ease_of_use),
            free_tier: Some(free_tier),
            team_expertise: Some(team_expertise),
            industry: Some(industry),
        },
        custom_weights: None,
        region: region.as_deref().and_then(Region::parse),
    };

    let service = RecommendationService::new(Arc::new(PassthroughEnhancer));
    let recommendation = service.recommend(&request).await.map_err(AppError::from)?;

    println!("Cloud provider recommendation demo");
    println!(
        "Recommended provider: {}",
        recommendation.recommended_provider.id()
    );
    println!(
        "Recommended service model: {}",
        recommendation.recommended_service_model.label()
    );
    println!(
        "Decision confidence: {}% ({})",
        recommendation.confidence.percent,
        recommendation.confidence.level.label()
    );

    println!("\nFinal scores");
    for provider in Provider::ALL {
        if let Some(score) = recommendation.final_scores.get(&provider) {
            println!("- {}: {}", provider.id(), score);
        }
    }

    println!("\nEstimated monthly costs (USD)");
    for provider in Provider::ALL {
        if let Some(cost) = recommendation.estimated_costs.get(&provider) {
            println!("- {}: ${}", provider.id(), cost);
        }
    }

    println!("\nWhy");
    for line in &recommendation.explanation {
        println!("- {line}");
    }

    Ok(())
}
