//! In-memory question bank.
//!
//! Holds the pre-authored question pool, tagged by dimension and integer
//! difficulty tier. Lookup tries the exact tier first, then the two
//! adjacent tiers, picks randomly among ties, and bumps the chosen
//! question's usage counter so authors can see which items carry the
//! load.

use std::sync::RwLock;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::domain::foundation::{scale, Dimension, QuestionId};
use crate::domain::question::Question;
use crate::ports::{QuestionStore, StoreError};

struct BankSlot {
    question: Question,
    usage_count: u32,
}

/// In-memory [`QuestionStore`] implementation.
///
/// # Panics
/// Methods panic if the internal lock is poisoned.
pub struct InMemoryQuestionBank {
    slots: RwLock<Vec<BankSlot>>,
}

impl InMemoryQuestionBank {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
        }
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        let bank = Self::new();
        for question in questions {
            bank.add(question);
        }
        bank
    }

    /// Adds a question to the pool.
    pub fn add(&self, question: Question) {
        self.slots.write().expect("lock poisoned").push(BankSlot {
            question,
            usage_count: 0,
        });
    }

    /// How often a question has been handed out.
    pub fn usage_count(&self, id: &QuestionId) -> Option<u32> {
        self.slots
            .read()
            .expect("lock poisoned")
            .iter()
            .find(|slot| slot.question.id() == id)
            .map(|slot| slot.usage_count)
    }

    pub fn len(&self) -> usize {
        self.slots.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pick(
        &self,
        dimension: Dimension,
        tier: u8,
        exclude: &[QuestionId],
    ) -> Option<Question> {
        let mut slots = self.slots.write().expect("lock poisoned");
        let candidates: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                slot.question.targets(dimension)
                    && slot.question.tier() == tier
                    && !exclude.contains(slot.question.id())
            })
            .map(|(i, _)| i)
            .collect();
        let index = *candidates.choose(&mut rand::thread_rng())?;
        slots[index].usage_count += 1;
        Some(slots[index].question.clone())
    }
}

impl Default for InMemoryQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionBank {
    async fn find_by_dimension_and_difficulty(
        &self,
        dimension: Dimension,
        tier: u8,
        exclude: &[QuestionId],
    ) -> Result<Option<Question>, StoreError> {
        // Exact tier, then one below, then one above. The easier tier is
        // tried first so an inexact match under-shoots the target rather
        // than over-shooting it.
        let floor = scale::SCALE_MIN as u8;
        let ceiling = scale::SCALE_MAX as u8;
        let mut tiers = vec![tier];
        if tier > floor {
            tiers.push(tier - 1);
        }
        if tier < ceiling {
            tiers.push(tier + 1);
        }

        for candidate_tier in tiers {
            if let Some(question) = self.pick(dimension, candidate_tier, exclude) {
                return Ok(Some(question));
            }
        }
        Ok(None)
    }
}
