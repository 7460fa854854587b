use serde::{Deserialize, Serialize};

/// Complete explanation for a recipe's sustainability index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub recipe_id: u64,
    pub summary: String,
    pub environmental_factors: Vec<Factor>,
    pub nutritional_factors: Vec<Factor>,
    /// 1 to 3 actionable suggestions
    pub suggestions: Vec<String>,
    /// 0.0 - 1.0
    pub confidence: f64,
    pub source: ExplanationSource,
}

/// One contributor to the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub impact: Impact,
    pub explanation: String,
    /// 0.0 - 1.0
    pub importance: f64,
}

impl Factor {
    pub fn new(name: impl Into<String>, impact: Impact, explanation: impl Into<String>, importance: f64) -> Self {
        let importance = if importance.is_finite() {
            importance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            name: name.into(),
            impact,
            explanation: explanation.into(),
            importance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl Impact {
    pub fn parse(value: &str) -> Option<Impact> {
        match value.trim().to_lowercase().as_str() {
            "positive" => Some(Impact::Positive),
            "negative" => Some(Impact::Negative),
            "neutral" => Some(Impact::Neutral),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Impact::Positive => "✅",
            Impact::Negative => "⚠️",
            Impact::Neutral => "➖",
        }
    }
}

/// Which generator produced an explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExplanationSource {
    RuleBased,
    Provider { name: String },
}
