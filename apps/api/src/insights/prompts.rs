// Prompt builders for the Insights module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::catalog::Career;
use crate::llm_client::prompts::{AUDIENCE_INSTRUCTION, JSON_ONLY_SYSTEM};

/// System prompt for every enrichment call.
pub fn enrichment_system() -> String {
    format!("You are an experienced career counselor. {JSON_ONLY_SYSTEM} {AUDIENCE_INSTRUCTION}")
}

pub fn build_insight_prompt(career: &Career, match_score: u32) -> String {
    format!(
        r#"Generate insights based on the following career statistics:

Career: {title}
Match Score: {match_score}%
Growth Potential: {growth}%
Stress Index: {stress}%
Salary Range: ₹{min:.1}L - ₹{max:.1}L

Provide:
1. A concise title for the insight (max 10 words)
2. A detailed insight about this career (2-3 sentences)
3. A specific recommendation for the student (2-3 sentences)

Return a JSON object with this EXACT schema:
{{"title": "...", "insight": "...", "recommendation": "..."}}"#,
        title = career.title,
        growth = career.growth_potential,
        stress = career.stress_index,
        min = career.salary_range.min as f64 / 100_000.0,
        max = career.salary_range.max as f64 / 100_000.0,
    )
}

/// `reference` is the catalog entry when the career is known, used as a baseline.
pub fn build_metrics_prompt(career_name: &str, reference: Option<&Career>) -> String {
    let baseline = reference
        .map(|c| {
            format!(
                "\nCurrent reference data (update it if the market has moved):\n\
                 Salary: {} - {} INR, growth {}, stress {}, mismatch {}, trends: {}\n",
                c.salary_range.min,
                c.salary_range.max,
                c.growth_potential,
                c.stress_index,
                c.mismatch_probability,
                c.industry_trends
            )
        })
        .unwrap_or_default();

    format!(
        r#"Provide current market metrics for the career "{career_name}".
{baseline}
Return a JSON object with this EXACT schema (no extra fields):
{{
  "salaryRange": {{"min": 600000, "max": 1800000}},
  "growthPotential": 85,
  "stressIndex": 54,
  "mismatchProbability": 22,
  "industryTrends": "one or two sentences",
  "personalityMatch": 70,
  "skillsMatch": 65,
  "interestsMatch": 80,
  "careerFitAnalysis": "two or three sentences on who thrives in this career"
}}"#
    )
}

pub fn build_realtime_careers_prompt(count: usize) -> String {
    format!(
        r#"List {count} careers that are in high demand right now for students in India.

Return a JSON array. Each element MUST follow this EXACT schema:
{{
  "id": "kebab-case-id",
  "title": "Career Title",
  "description": "one sentence",
  "category": "Technology",
  "salaryRange": {{"min": 800000, "max": 2500000, "currency": "INR"}},
  "growthPotential": 90,
  "stressIndex": 60,
  "mismatchProbability": 20,
  "requiredSkills": ["Skill"],
  "personalityTraits": ["Trait"],
  "industryTrends": "one or two sentences"
}}"#
    )
}
