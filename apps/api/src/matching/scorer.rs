//! Career scorer: pluggable, trait-based ranking of catalog careers against quiz answers.
//!
//! Default (and only) backend: `RuleBasedMatcher`, a weighted tally over option
//! endorsements. `AppState` holds an `Arc<dyn CareerMatcher>`.

use crate::catalog::{Catalog, QuestionCategory};
use crate::matching::{CareerMatchResult, MatchBreakdown, QuizAnswer};

/// Theoretical maximum points a single answer can give one career.
pub const MAX_POINTS_PER_ANSWER: u32 = 3;

/// Sub-score denominator: two questions per category at full weight.
pub const CATEGORY_MAX_POINTS: u32 = 2 * MAX_POINTS_PER_ANSWER;

/// Ranks every catalog career against a set of answers.
///
/// Implementations must return each catalog career exactly once, sorted by
/// descending `match_score`, and must not fail on unresolvable answers.
pub trait CareerMatcher: Send + Sync {
    fn rank<'c>(&self, catalog: &'c Catalog, answers: &[QuizAnswer]) -> Vec<CareerMatchResult<'c>>;

    /// Backend label, for logs.
    fn backend(&self) -> &'static str;
}

pub struct RuleBasedMatcher;

impl CareerMatcher for RuleBasedMatcher {
    fn rank<'c>(&self, catalog: &'c Catalog, answers: &[QuizAnswer]) -> Vec<CareerMatchResult<'c>> {
        calculate_career_match(catalog, answers)
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

/// Per-career point accumulator. Allocated fresh for every call.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    total: u64,
    personality: u64,
    skills: u64,
    interests: u64,
}

impl Tally {
    fn add(&mut self, category: QuestionCategory, points: u32) {
        let points = u64::from(points);
        self.total = self.total.saturating_add(points);
        let bucket = match category {
            QuestionCategory::Personality => &mut self.personality,
            QuestionCategory::Skills => &mut self.skills,
            QuestionCategory::Interests => &mut self.interests,
        };
        *bucket = bucket.saturating_add(points);
    }
}

/// Algorithm:
/// 1. One zeroed tally per catalog career.
/// 2. For each answer, resolve question and option; skip the answer if either is unknown.
/// 3. Every endorsed career present in the catalog gains `answer.value` in its total
///    and in the bucket of the question's category.
/// 4. match_score = round(total / (answer_count × 3) × 100), 0 when there are no answers.
///    Not clamped.
/// 5. Each sub-score = min(100, round(bucket / 6 × 100)).
/// 6. Stable sort by descending match_score, so catalog order breaks ties.
pub fn calculate_career_match<'c>(
    catalog: &'c Catalog,
    answers: &[QuizAnswer],
) -> Vec<CareerMatchResult<'c>> {
    let careers = catalog.careers();
    let mut tallies = vec![Tally::default(); careers.len()];

    for answer in answers {
        let Some(question) = catalog.question(answer.question_id) else {
            continue;
        };
        let Some(option) = question.option(&answer.selected_option) else {
            continue;
        };

        for title in &option.careers {
            if let Some(idx) = catalog.career_position(title) {
                tallies[idx].add(question.category, answer.value);
            }
        }
    }

    let max_total = answers.len() as u64 * u64::from(MAX_POINTS_PER_ANSWER);
    let max_bucket = u64::from(CATEGORY_MAX_POINTS);

    let mut results: Vec<CareerMatchResult<'c>> = careers
        .iter()
        .zip(tallies)
        .map(|(career, tally)| CareerMatchResult {
            career,
            match_score: percentage(tally.total, max_total),
            breakdown: MatchBreakdown {
                personality_match: percentage(tally.personality, max_bucket).min(100),
                skills_match: percentage(tally.skills, max_bucket).min(100),
                interests_match: percentage(tally.interests, max_bucket).min(100),
            },
        })
        .collect();

    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results
}

fn percentage(points: u64, max: u64) -> u32 {
    if max == 0 {
        return 0;
    }
    ((points as f64 / max as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_career;
    use crate::catalog::{CatalogFile, QuizOption, QuizQuestion};

    fn answer(question_id: u32, option: &str) -> QuizAnswer {
        QuizAnswer {
            question_id,
            selected_option: option.to_string(),
            value: 3,
        }
    }

    fn embedded() -> Catalog {
        Catalog::embedded().unwrap()
    }

    fn find<'a, 'c>(results: &'a [CareerMatchResult<'c>], title: &str) -> &'a CareerMatchResult<'c> {
        results
            .iter()
            .find(|r| r.career.title == title)
            .unwrap_or_else(|| panic!("{title} missing from results"))
    }

    #[test]
    fn test_software_engineer_scenario() {
        let catalog = embedded();
        let results = calculate_career_match(&catalog, &[answer(1, "1a"), answer(2, "2c")]);

        let se = find(&results, "Software Engineer");
        assert_eq!(se.match_score, 100);
        assert_eq!(se.breakdown.personality_match, 50);
        assert_eq!(se.breakdown.interests_match, 50);
        assert_eq!(se.breakdown.skills_match, 0);
        assert_eq!(results[0].career.title, "Software Engineer");
    }

    #[test]
    fn test_unendorsed_career_scores_zero() {
        let catalog = embedded();
        let results = calculate_career_match(&catalog, &[answer(1, "1a"), answer(2, "2c")]);

        let ux = find(&results, "UX Designer");
        assert_eq!(ux.match_score, 0);
        assert_eq!(ux.breakdown, MatchBreakdown::default());
    }

    #[test]
    fn test_every_career_appears_once() {
        let catalog = embedded();
        let results = calculate_career_match(
            &catalog,
            &[answer(1, "1c"), answer(3, "3b"), answer(5, "5d")],
        );
        assert_eq!(results.len(), catalog.careers().len());
        for career in catalog.careers() {
            let count = results.iter().filter(|r| r.career.id == career.id).count();
            assert_eq!(count, 1, "{} appeared {count} times", career.id);
        }
    }

    #[test]
    fn test_sorted_descending_and_bounded() {
        let catalog = embedded();
        let answers = vec![
            answer(1, "1d"),
            answer(2, "2c"),
            answer(3, "3a"),
            answer(4, "4d"),
            answer(5, "5a"),
            answer(6, "6d"),
        ];
        let results = calculate_career_match(&catalog, &answers);

        assert!(results
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
        for r in &results {
            assert!(r.breakdown.personality_match <= 100);
            assert!(r.breakdown.skills_match <= 100);
            assert!(r.breakdown.interests_match <= 100);
        }

        let ds = find(&results, "Data Scientist");
        assert_eq!(ds.match_score, 100);
        assert_eq!(
            ds.breakdown,
            MatchBreakdown {
                personality_match: 100,
                skills_match: 100,
                interests_match: 100,
            }
        );
    }

    #[test]
    fn test_full_quiz_partial_matches() {
        let catalog = embedded();
        let answers = vec![
            answer(1, "1c"),
            answer(2, "2b"),
            answer(3, "3b"),
            answer(4, "4c"),
            answer(5, "5d"),
            answer(6, "6a"),
        ];
        let results = calculate_career_match(&catalog, &answers);

        assert_eq!(results[0].career.title, "Teacher");
        assert_eq!(results[0].match_score, 100);

        let hp = find(&results, "Healthcare Professional");
        assert_eq!(hp.match_score, 83); // misses only 4c: round(15 / 18 × 100)
        assert_eq!(hp.breakdown.personality_match, 50);
        assert_eq!(hp.breakdown.skills_match, 100);
        assert_eq!(hp.breakdown.interests_match, 100);
    }

    #[test]
    fn test_empty_answers_yield_zero_scores_in_catalog_order() {
        let catalog = embedded();
        let results = calculate_career_match(&catalog, &[]);

        assert_eq!(results.len(), catalog.careers().len());
        assert!(results.iter().all(|r| r.match_score == 0));
        assert!(results.iter().all(|r| r.breakdown == MatchBreakdown::default()));
        let order: Vec<&str> = results.iter().map(|r| r.career.id.as_str()).collect();
        let expected: Vec<&str> = catalog.careers().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_unknown_references_are_ignored() {
        let catalog = embedded();
        let baseline = calculate_career_match(&catalog, &[answer(1, "1a")]);
        let se_baseline = find(&baseline, "Software Engineer").breakdown;

        let results = calculate_career_match(
            &catalog,
            &[answer(1, "1a"), answer(42, "42a"), answer(2, "2z")],
        );
        let se = find(&results, "Software Engineer");
        // Unknown answers still count toward the denominator: 3 / 9.
        assert_eq!(se.match_score, 33);
        assert_eq!(se.breakdown, se_baseline);
        assert!(results
            .iter()
            .filter(|r| r.career.title != "Software Engineer")
            .all(|r| r.match_score == 0));
    }

    #[test]
    fn test_deterministic() {
        let catalog = embedded();
        let answers = vec![answer(1, "1b"), answer(4, "4c"), answer(6, "6c")];
        let first = calculate_career_match(&catalog, &answers);
        let second = calculate_career_match(&catalog, &answers);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = embedded();
        // 2c endorses Software Engineer and Data Scientist, catalog positions 0 and 2.
        let results = calculate_career_match(&catalog, &[answer(2, "2c")]);
        assert_eq!(results[0].career.title, "Software Engineer");
        assert_eq!(results[1].career.title, "Data Scientist");
    }

    #[test]
    fn test_sub_scores_clamp_when_category_repeats() {
        let file = CatalogFile {
            version: "clamp".to_string(),
            questions: (1..=3)
                .map(|id| QuizQuestion {
                    id,
                    question: format!("Q{id}"),
                    category: QuestionCategory::Skills,
                    options: vec![QuizOption {
                        id: format!("{id}a"),
                        text: "yes".to_string(),
                        value: 3,
                        careers: vec!["Alpha".to_string()],
                    }],
                })
                .collect(),
            careers: vec![sample_career("alpha", "Alpha")],
        };
        let catalog = Catalog::from_file(file).unwrap();
        let results =
            calculate_career_match(&catalog, &[answer(1, "1a"), answer(2, "2a"), answer(3, "3a")]);

        assert_eq!(results[0].match_score, 100);
        assert_eq!(results[0].breakdown.skills_match, 100); // 9 / 6 clamped
    }

    #[test]
    fn test_overall_score_is_not_clamped() {
        let catalog = embedded();
        let mut inflated = answer(1, "1a");
        inflated.value = 6;
        let results = calculate_career_match(&catalog, &[inflated]);
        assert_eq!(find(&results, "Software Engineer").match_score, 200);
        assert_eq!(find(&results, "Software Engineer").breakdown.interests_match, 100);
    }

    #[test]
    fn test_rule_based_matcher_delegates() {
        let catalog = embedded();
        let matcher: &dyn CareerMatcher = &RuleBasedMatcher;
        let ranked = matcher.rank(&catalog, &[answer(1, "1a"), answer(2, "2c")]);
        assert_eq!(ranked, calculate_career_match(&catalog, &[answer(1, "1a"), answer(2, "2c")]));
        assert_eq!(matcher.backend(), "rule_based");
    }
}
