use super::domain::UserPreferences;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Level of managed abstraction recommended alongside the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceModel {
    #[serde(rename = "IaaS")]
    Iaas,
    #[serde(rename = "PaaS")]
    Paas,
    #[serde(rename = "SaaS")]
    Saas,
}

impl ServiceModel {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceModel::Iaas => "IaaS",
            ServiceModel::Paas => "PaaS",
            ServiceModel::Saas => "SaaS",
        }
    }
}

impl fmt::Display for ServiceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the rule evaluation: the model plus a human-readable reason
/// naming the rule that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceModelDecision {
    pub service_model: ServiceModel,
    pub reason: String,
}

/// Rule tables mapping industry and team-expertise keys to service models.
/// Lookups are trimmed and lowercased; industry rules take precedence over
/// team-expertise rules, and unmatched keys fall through to the default.
#[derive(Debug, Clone)]
pub struct ServiceModelRules {
    industry: Vec<(&'static str, ServiceModel)>,
    team_expertise: Vec<(&'static str, ServiceModel)>,
    default_model: ServiceModel,
}

impl ServiceModelRules {
    pub fn standard() -> Self {
        Self {
            industry: vec![
                ("healthcare", ServiceModel::Paas),
                ("finance", ServiceModel::Iaas),
                ("startup", ServiceModel::Paas),
                ("enterprise", ServiceModel::Iaas),
                ("default", ServiceModel::Iaas),
            ],
            team_expertise: vec![
                ("high", ServiceModel::Iaas),
                ("medium", ServiceModel::Paas),
                ("low", ServiceModel::Saas),
                ("default", ServiceModel::Paas),
            ],
            default_model: ServiceModel::Iaas,
        }
    }

    /// Two-tier precedence: a matching industry rule wins outright and
    /// team expertise is not consulted; otherwise a matching expertise rule
    /// applies; otherwise the fixed default. Unknown or absent values are
    /// non-matches, never errors.
    pub fn determine(&self, preferences: &UserPreferences) -> ServiceModelDecision {
        if let Some(industry) = preferences.industry.as_deref() {
            let key = industry.trim().to_lowercase();
            if let Some(model) = lookup(&self.industry, &key) {
                return ServiceModelDecision {
                    service_model: model,
                    reason: format!(
                        "Matched industry rule: {key}. Recommended service model: {model}."
                    ),
                };
            }
        }

        if let Some(expertise) = preferences.team_expertise.as_deref() {
            let key = expertise.trim().to_lowercase();
            if let Some(model) = lookup(&self.team_expertise, &key) {
                return ServiceModelDecision {
                    service_model: model,
                    reason: format!(
                        "Matched team_expertise rule: {key}. Recommended service model: {model}."
                    ),
                };
            }
        }

        ServiceModelDecision {
            service_model: self.default_model,
            reason: format!(
                "No industry or team_expertise rule matched. Using default service model: {}.",
                self.default_model
            ),
        }
    }
}

fn lookup(table: &[(&'static str, ServiceModel)], key: &str) -> Option<ServiceModel> {
    table
        .iter()
        .find(|(rule_key, _)| *rule_key == key)
        .map(|(_, model)| *model)
}
