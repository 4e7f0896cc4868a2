//! Behavior analyzer - qualitative signals from hint and timing events.
//!
//! Pure aggregation, consulted exactly once when a session is finalized.
//! Every output has a well-defined default for a session with no hints,
//! so no path divides by zero or propagates a missing value.

use serde::{Deserialize, Serialize};

use crate::domain::behavior::{HintCategory, HintEvent, HintOutcome, TimeMetrics};

/// Below this average time-to-hint the learner reaches for help quickly.
const QUICK_HINT_THRESHOLD_MS: u64 = 30_000;
/// Above this average time-to-hint the learner holds out a long time.
const RELUCTANT_HINT_THRESHOLD_MS: u64 = 120_000;

/// How readily the learner asks for help.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpSeekingStyle {
    /// Asks within seconds of getting stuck.
    Quick,
    /// Exhausts their own attempts first.
    Reluctant,
    #[default]
    Balanced,
}

/// Coarse learning-mode label derived from the most-used hint category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningMode {
    /// Leans on conceptual explanations.
    ConceptDriven,
    /// Learns best from worked examples.
    ExampleDriven,
    /// Wants the precise syntax or structure spelled out.
    DetailOriented,
    /// Narrows answers down by ruling options out.
    TrialAndError,
}

impl LearningMode {
    fn from_category(category: HintCategory) -> Self {
        match category {
            HintCategory::Conceptual => LearningMode::ConceptDriven,
            HintCategory::Example => LearningMode::ExampleDriven,
            HintCategory::Syntactic | HintCategory::Structural => LearningMode::DetailOriented,
            HintCategory::Elimination => LearningMode::TrialAndError,
        }
    }
}

/// Aggregated behavior signals for a completed session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorReport {
    pub help_seeking_style: HelpSeekingStyle,
    /// Category with the highest correct-answer follow-up rate.
    pub most_effective_category: Option<HintCategory>,
    pub learning_mode: Option<LearningMode>,
    /// Fraction of all hint events followed by a correct answer.
    pub hint_effectiveness: f64,
    pub average_time_to_hint_ms: Option<u64>,
    pub average_question_time_ms: Option<u64>,
}

/// Stateless aggregation over a session's event log.
pub struct BehaviorAnalyzer;

impl BehaviorAnalyzer {
    pub fn analyze(hints: &[HintEvent], timings: &[TimeMetrics]) -> BehaviorReport {
        BehaviorReport {
            help_seeking_style: Self::help_seeking_style(hints),
            most_effective_category: Self::most_effective_category(hints),
            learning_mode: Self::learning_mode(hints),
            hint_effectiveness: Self::hint_effectiveness(hints),
            average_time_to_hint_ms: Self::average_time_to_hint(hints),
            average_question_time_ms: Self::average_question_time(timings),
        }
    }

    fn help_seeking_style(hints: &[HintEvent]) -> HelpSeekingStyle {
        match Self::average_time_to_hint(hints) {
            Some(avg) if avg < QUICK_HINT_THRESHOLD_MS => HelpSeekingStyle::Quick,
            Some(avg) if avg > RELUCTANT_HINT_THRESHOLD_MS => HelpSeekingStyle::Reluctant,
            _ => HelpSeekingStyle::Balanced,
        }
    }

    /// Highest per-category success rate; canonical category order breaks
    /// ties so the label is deterministic.
    fn most_effective_category(hints: &[HintEvent]) -> Option<HintCategory> {
        if hints.is_empty() {
            return None;
        }
        let mut best: Option<(HintCategory, f64)> = None;
        for category in HintCategory::ALL {
            let of_category: Vec<&HintEvent> =
                hints.iter().filter(|h| h.category() == category).collect();
            if of_category.is_empty() {
                continue;
            }
            let correct = of_category
                .iter()
                .filter(|h| h.outcome() == Some(HintOutcome::AnsweredCorrectly))
                .count();
            let rate = correct as f64 / of_category.len() as f64;
            match best {
                Some((_, top)) if rate <= top => {}
                _ => best = Some((category, rate)),
            }
        }
        best.map(|(category, _)| category)
    }

    /// Most-used category mapped to a learning-mode label; ties again go
    /// to canonical order.
    fn learning_mode(hints: &[HintEvent]) -> Option<LearningMode> {
        if hints.is_empty() {
            return None;
        }
        let mut best: Option<(HintCategory, usize)> = None;
        for category in HintCategory::ALL {
            let count = hints.iter().filter(|h| h.category() == category).count();
            if count == 0 {
                continue;
            }
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((category, count)),
            }
        }
        best.map(|(category, _)| LearningMode::from_category(category))
    }

    fn hint_effectiveness(hints: &[HintEvent]) -> f64 {
        if hints.is_empty() {
            return 0.0;
        }
        let correct = hints
            .iter()
            .filter(|h| h.outcome() == Some(HintOutcome::AnsweredCorrectly))
            .count();
        correct as f64 / hints.len() as f64
    }

    fn average_time_to_hint(hints: &[HintEvent]) -> Option<u64> {
        if hints.is_empty() {
            return None;
        }
        let total: u64 = hints.iter().map(HintEvent::time_into_question_ms).sum();
        Some(total / hints.len() as u64)
    }

    fn average_question_time(timings: &[TimeMetrics]) -> Option<u64> {
        if timings.is_empty() {
            return None;
        }
        let total: u64 = timings.iter().map(TimeMetrics::total_time_ms).sum();
        Some(total / timings.len() as u64)
    }
}
