//! Experiment model: test groups, participants, and the choice log.
//!
//! - Group A: control, no scores shown, shuffled result order
//! - Group B: scores shown, relevance/sustainability blend
//! - Group C: scores and explanations shown, sustainability first
//!
//! Assignment is a pure function of the participant id, so a returning
//! participant always lands in the same group.

use crate::recipe::{Category, Recipe};
use crate::utils::score_bands::{environmental_label, evaluate, EnvironmentalBand, ScoreBand};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Test groups
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestGroup {
    A,
    B,
    C,
}

impl TestGroup {
    pub const ALL: [TestGroup; 3] = [TestGroup::A, TestGroup::B, TestGroup::C];

    /// Deterministic group for a participant id
    ///
    /// 32-bit wrapping string hash (`h = h * 31 + code_unit` over UTF-16),
    /// absolute value, modulo 3.
    pub fn assign(participant_id: &str) -> TestGroup {
        match string_hash(participant_id).unsigned_abs() % 3 {
            0 => TestGroup::A,
            1 => TestGroup::B,
            _ => TestGroup::C,
        }
    }

    pub fn parse(value: &str) -> Option<TestGroup> {
        match value.trim() {
            "A" | "a" => Some(TestGroup::A),
            "B" | "b" => Some(TestGroup::B),
            "C" | "c" => Some(TestGroup::C),
            _ => None,
        }
    }

    pub fn shows_scores(&self) -> bool {
        !matches!(self, TestGroup::A)
    }

    pub fn shows_explanations(&self) -> bool {
        matches!(self, TestGroup::C)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestGroup::A => "A",
            TestGroup::B => "B",
            TestGroup::C => "C",
        }
    }
}

impl fmt::Display for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn string_hash(value: &str) -> i32 {
    value.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

// ============================================================================
// Participants
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ExperimentError {
    #[error("participant id must not be blank")]
    BlankParticipantId,
}

/// Registered study participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub test_group: TestGroup,
    pub registered_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub session_count: u32,
}

impl Participant {
    pub fn register(id: &str) -> Result<Self, ExperimentError> {
        Self::register_at(id, Utc::now())
    }

    pub fn register_at(id: &str, now: DateTime<Utc>) -> Result<Self, ExperimentError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ExperimentError::BlankParticipantId);
        }

        Ok(Self {
            id: id.to_string(),
            test_group: TestGroup::assign(id),
            registered_at: now,
            last_seen: now,
            session_count: 1,
        })
    }

    /// Mark a returning visit; the group never changes
    pub fn start_session(&mut self) {
        self.start_session_at(Utc::now());
    }

    pub fn start_session_at(&mut self, now: DateTime<Utc>) {
        self.session_count += 1;
        self.last_seen = now;
    }
}

// ============================================================================
// Choice log
// ============================================================================

/// Where in the UI a choice was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceSource {
    Search,
    Details,
    Alternative,
    AiRecommendation,
}

impl ChoiceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceSource::Search => "search",
            ChoiceSource::Details => "details",
            ChoiceSource::Alternative => "alternative",
            ChoiceSource::AiRecommendation => "ai-recommendation",
        }
    }
}

/// One recorded choice, with the recipe's scores as they were at choice time
///
/// Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    participant_id: String,
    test_group: TestGroup,
    recipe_id: u64,
    recipe_name: String,
    category: Category,
    rank: usize,
    query: String,
    decision_time_seconds: f64,
    sustainability_index: f64,
    env_score: f64,
    nutri_score: f64,
    source: ChoiceSource,
    chosen_at: DateTime<Utc>,
}

impl ChoiceRecord {
    pub fn new(
        participant: &Participant,
        recipe: &Recipe,
        rank: usize,
        query: &str,
        decision_time_seconds: f64,
        source: ChoiceSource,
    ) -> Self {
        Self::new_at(participant, recipe, rank, query, decision_time_seconds, source, Utc::now())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_at(
        participant: &Participant,
        recipe: &Recipe,
        rank: usize,
        query: &str,
        decision_time_seconds: f64,
        source: ChoiceSource,
        chosen_at: DateTime<Utc>,
    ) -> Self {
        let decision_time_seconds = if decision_time_seconds.is_finite() {
            decision_time_seconds.max(0.0)
        } else {
            0.0
        };

        Self {
            participant_id: participant.id.clone(),
            test_group: participant.test_group,
            recipe_id: recipe.id,
            recipe_name: recipe.name.clone(),
            category: recipe.category,
            rank,
            query: query.to_string(),
            decision_time_seconds,
            sustainability_index: recipe.sustainability_index,
            env_score: recipe.env_score,
            nutri_score: recipe.nutri_score,
            source,
            chosen_at,
        }
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn test_group(&self) -> TestGroup {
        self.test_group
    }

    pub fn recipe_id(&self) -> u64 {
        self.recipe_id
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn sustainability_index(&self) -> f64 {
        self.sustainability_index
    }

    pub fn source(&self) -> ChoiceSource {
        self.source
    }

    pub fn chosen_at(&self) -> DateTime<Utc> {
        self.chosen_at
    }
}

/// Append-only log of participant choices
#[derive(Debug, Clone, Default)]
pub struct ChoiceLog {
    records: Vec<ChoiceRecord>,
}

impl ChoiceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, choice: ChoiceRecord) -> &ChoiceRecord {
        tracing::debug!(
            participant = %choice.participant_id,
            group = %choice.test_group,
            recipe = choice.recipe_id,
            "choice recorded"
        );
        self.records.push(choice);
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ChoiceRecord] {
        &self.records
    }

    pub fn for_participant<'a>(&'a self, participant_id: &'a str) -> impl Iterator<Item = &'a ChoiceRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.participant_id == participant_id)
    }

    /// Export for analysis, one row per choice in recording order
    pub fn to_csv(&self) -> Result<String> {
        let records = &self.records;
        let mut df = df! {
            "participant_id" => records.iter().map(|r| r.participant_id.as_str()).collect::<Vec<_>>(),
            "test_group" => records.iter().map(|r| r.test_group.as_str()).collect::<Vec<_>>(),
            "recipe_id" => records.iter().map(|r| r.recipe_id).collect::<Vec<_>>(),
            "recipe_name" => records.iter().map(|r| r.recipe_name.as_str()).collect::<Vec<_>>(),
            "category" => records.iter().map(|r| r.category.as_str()).collect::<Vec<_>>(),
            "rank" => records.iter().map(|r| r.rank as u64).collect::<Vec<_>>(),
            "query" => records.iter().map(|r| r.query.as_str()).collect::<Vec<_>>(),
            "decision_time_seconds" => records.iter().map(|r| r.decision_time_seconds).collect::<Vec<_>>(),
            "sustainability_index" => records.iter().map(|r| r.sustainability_index).collect::<Vec<_>>(),
            "env_score" => records.iter().map(|r| r.env_score).collect::<Vec<_>>(),
            "nutri_score" => records.iter().map(|r| r.nutri_score).collect::<Vec<_>>(),
            "source" => records.iter().map(|r| r.source.as_str()).collect::<Vec<_>>(),
            "chosen_at" => records.iter().map(|r| r.chosen_at.to_rfc3339()).collect::<Vec<_>>(),
        }
        .context("Failed to build choice frame")?;

        let mut buf = Vec::with_capacity(64 * (records.len() + 1));
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut df)
            .context("Failed to write choice CSV")?;

        String::from_utf8(buf).context("Choice CSV is not valid UTF-8")
    }
}

// ============================================================================
// Per-group presentation
// ============================================================================

/// Score block, only present for groups that see scores
#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub sustainability_index: f64,
    pub env_score: f64,
    pub nutri_score: f64,
    pub band: ScoreBand,
    pub environmental_band: EnvironmentalBand,
    pub low_confidence: bool,
}

/// Recipe as shown to a participant of a given group
#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub category_label: &'static str,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreView>,
    pub explanation_available: bool,
}

impl RecipeView {
    pub fn for_group(recipe: &Recipe, group: TestGroup) -> Self {
        let scores = group.shows_scores().then(|| ScoreView {
            sustainability_index: recipe.sustainability_index,
            env_score: recipe.env_score,
            nutri_score: recipe.nutri_score,
            band: evaluate(recipe.sustainability_index),
            environmental_band: environmental_label(recipe.env_score),
            low_confidence: recipe.low_confidence,
        });

        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            category: recipe.category,
            category_label: recipe.category.label(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            scores,
            explanation_available: group.shows_explanations(),
        }
    }
}
