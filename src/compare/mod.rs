//! Translation comparison
//!
//! Compares the successful translations of one probe. The heuristic scores
//! each translation by its length relative to the source and its character
//! diversity; the LLM comparator asks an OpenAI-compatible model instead and
//! falls back to the heuristic when that fails.

mod llm;

pub use llm::LlmComparator;

use std::collections::BTreeSet;
use std::fmt;

use crate::config::{AppConfig, ComparisonMode};
use crate::models::{TestResult, Vendor};

/// Coarse quality grade of one translation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    Good,
    Fair,
    NeedsWork,
}

impl Quality {
    pub fn grade(length_score: f64, char_diversity: f64) -> Self {
        if length_score > 80.0 && char_diversity > 0.3 {
            Quality::Good
        } else if length_score > 60.0 && char_diversity > 0.2 {
            Quality::Fair
        } else {
            Quality::NeedsWork
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::Good => "good",
            Quality::Fair => "fair",
            Quality::NeedsWork => "needs work",
        };
        write!(f, "{s}")
    }
}

/// Metrics for one vendor's translation
#[derive(Clone, Debug)]
pub struct TranslationScore {
    pub vendor: Vendor,
    pub translation: String,
    /// Translation length as a percentage of the source, capped at 100
    pub length_score: f64,
    /// Distinct characters / characters
    pub char_diversity: f64,
    pub quality: Quality,
}

impl TranslationScore {
    pub fn measure(vendor: Vendor, original: &str, translation: &str) -> Self {
        let original_len = original.chars().count();
        let translation_len = translation.chars().count();

        let length_score = if original_len > 0 {
            (translation_len as f64 / original_len as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let char_diversity = if translation_len > 0 {
            let distinct: BTreeSet<char> = translation.chars().collect();
            distinct.len() as f64 / translation_len as f64
        } else {
            0.0
        };

        Self {
            vendor,
            translation: translation.to_string(),
            length_score,
            char_diversity,
            quality: Quality::grade(length_score, char_diversity),
        }
    }
}

/// Heuristic comparison of two or more translations
#[derive(Clone, Debug)]
pub struct ComparisonReport {
    pub original: String,
    pub scores: Vec<TranslationScore>,
    /// Vendor with the longest translation
    pub recommended: Vendor,
}

impl ComparisonReport {
    /// Human-readable summary attached to the aggregate result
    pub fn render(&self) -> String {
        let mut output = format!("Original: {}\n\nTranslation comparison:\n\n", self.original);

        for score in &self.scores {
            output.push_str(&format!("{}:\n", score.vendor.name()));
            output.push_str(&format!("  Translation: {}\n", score.translation));
            output.push_str(&format!("  Length ratio: {:.1}%\n", score.length_score));
            output.push_str(&format!("  Character diversity: {:.2}\n", score.char_diversity));
            output.push_str(&format!("  Quality: {}\n\n", score.quality));
        }

        output.push_str(&format!(
            "Recommended: {} gave the most complete translation\n",
            self.recommended.name()
        ));
        output.push_str(
            "\nNote: this is a basic metric comparison. Configure an LLM comparison for a deeper review.",
        );
        output
    }
}

/// Length and diversity based comparator
pub struct HeuristicComparator;

impl HeuristicComparator {
    /// Compare the successful results; `None` with fewer than two
    pub fn compare(original: &str, successes: &[&TestResult]) -> Option<ComparisonReport> {
        let scores: Vec<TranslationScore> = successes
            .iter()
            .filter(|r| r.success)
            .filter_map(|r| {
                r.translation
                    .as_deref()
                    .map(|t| TranslationScore::measure(r.vendor, original, t))
            })
            .collect();

        if scores.len() < 2 {
            return None;
        }

        // First vendor wins a tie
        let mut recommended = &scores[0];
        for score in &scores[1..] {
            if score.translation.chars().count() > recommended.translation.chars().count() {
                recommended = score;
            }
        }
        let recommended = recommended.vendor;

        Some(ComparisonReport {
            original: original.to_string(),
            scores,
            recommended,
        })
    }
}

/// Comparison text for a probe, following `comparison.mode`
pub async fn summarize(
    config: &AppConfig,
    original: &str,
    successes: &[&TestResult],
) -> Option<String> {
    if successes.len() < 2 {
        return None;
    }

    match config.comparison.mode {
        ComparisonMode::Off => None,
        ComparisonMode::Heuristic => {
            HeuristicComparator::compare(original, successes).map(|r| r.render())
        }
        ComparisonMode::Llm => Some(
            LlmComparator::from_config(config)
                .compare(original, successes)
                .await,
        ),
    }
}
