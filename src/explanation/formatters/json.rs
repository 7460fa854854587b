use crate::explanation::types::Explanation;
use serde_json;

/// JSON formatter for explanations
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format explanation as pretty-printed JSON
    pub fn format(explanation: &Explanation) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(explanation)
    }

    /// Format explanation as compact JSON (no whitespace)
    pub fn format_compact(explanation: &Explanation) -> Result<String, serde_json::Error> {
        serde_json::to_string(explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explanation::types::*;

    fn sample() -> Explanation {
        Explanation {
            recipe_id: 2,
            summary: "Marhapörkölt scores 19.4/100 (Very poor).".to_string(),
            environmental_factors: vec![Factor::new("Beef", Impact::Negative, "Methane.", 0.8)],
            nutritional_factors: vec![],
            suggestions: vec!["Replace beef with lentils".to_string()],
            confidence: 0.82,
            source: ExplanationSource::RuleBased,
        }
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&sample()).unwrap();

        assert!(json.contains("\"recipe_id\": 2"));
        assert!(json.contains("\"impact\": \"negative\""));
        assert!(json.contains("\"kind\": \"rule_based\""));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&sample()).unwrap();

        assert!(!json.contains('\n'));
        assert!(json.contains("\"confidence\":0.82"));
    }

    #[test]
    fn test_provider_source_tag() {
        let mut explanation = sample();
        explanation.source = ExplanationSource::Provider { name: "fake".to_string() };
        let json = JsonFormatter::format_compact(&explanation).unwrap();
        assert!(json.contains("\"source\":{\"kind\":\"provider\",\"name\":\"fake\"}"));
    }
}
