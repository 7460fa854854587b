use crate::explanation::types::{Explanation, ExplanationSource, Factor};

/// Markdown formatter for explanations
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format explanation as markdown
    pub fn format(explanation: &Explanation) -> String {
        let mut md = String::with_capacity(1024);

        md.push_str("# Why this score?\n\n");
        md.push_str(&format!("{}\n\n", explanation.summary));

        if !explanation.environmental_factors.is_empty() {
            md.push_str("## Environmental Factors\n\n");
            Self::format_factors(&mut md, &explanation.environmental_factors);
        }

        if !explanation.nutritional_factors.is_empty() {
            md.push_str("## Nutritional Factors\n\n");
            Self::format_factors(&mut md, &explanation.nutritional_factors);
        }

        md.push_str("## Suggestions\n\n");
        for suggestion in &explanation.suggestions {
            md.push_str(&format!("- {}\n", suggestion));
        }
        md.push('\n');

        let source = match &explanation.source {
            ExplanationSource::RuleBased => "rule-based".to_string(),
            ExplanationSource::Provider { name } => format!("provider: {}", name),
        };
        md.push_str(&format!(
            "*Confidence: {:.0}% ({})*\n",
            explanation.confidence * 100.0,
            source
        ));

        md
    }

    fn format_factors(md: &mut String, factors: &[Factor]) {
        for factor in factors {
            md.push_str(&format!(
                "- {} **{}** ({:.0}%): {}\n",
                factor.impact.icon(),
                factor.name,
                factor.importance * 100.0,
                factor.explanation
            ));
        }
        md.push('\n');
    }
}
