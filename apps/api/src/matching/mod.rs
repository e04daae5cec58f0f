// Career matching: quiz answers in, ranked careers out.
// The scorer is pure and permissive; strict checks live in validation.rs and
// run at the HTTP boundary before the scorer is called.

pub mod handlers;
pub mod scorer;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::catalog::Career;

/// One submitted quiz answer. `value` echoes the selected option's point value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: u32,
    pub selected_option: String,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub personality_match: u32, // 0 – 100
    pub skills_match: u32,      // 0 – 100
    pub interests_match: u32,   // 0 – 100
}

/// A catalog career with its overall score and per-category breakdown.
/// Borrows the career from the catalog the ranking was computed against.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerMatchResult<'c> {
    pub career: &'c Career,
    pub match_score: u32,
    pub breakdown: MatchBreakdown,
}

pub use scorer::{calculate_career_match, CareerMatcher, RuleBasedMatcher};
