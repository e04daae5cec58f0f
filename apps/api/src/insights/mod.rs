//! Insights: Gemini enrichment layered over the static catalog.
//!
//! Every operation here degrades instead of failing: no API key, an LLM error
//! or an unusable response all fall back to static data drawn from the catalog.
//! Only `fetch_career_metrics` can surface an error, when the career is unknown
//! and nothing could be fetched for it.

pub mod cache;
pub mod handlers;
pub mod prompts;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Career, Catalog};
use crate::errors::AppError;
use crate::insights::prompts::{
    build_insight_prompt, build_metrics_prompt, build_realtime_careers_prompt, enrichment_system,
};
use crate::llm_client::{LlmClient, LlmError};

pub use cache::EnrichmentCache;

const REALTIME_CAREERS_KEY: &str = "careers-realtime";
const REALTIME_CAREER_COUNT: usize = 8;

const FALLBACK_FIT_ANALYSIS: &str = "Live market analysis is unavailable right now. \
    These figures come from the DreamWeave career catalog.";

// ────────────────────────────────────────────────────────────────────────────
// Career insights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerInsight {
    pub title: String,
    pub insight: String,
    pub recommendation: String,
}

impl CareerInsight {
    /// Served whenever the LLM is unavailable or fails.
    pub fn fallback() -> Self {
        Self {
            title: "Career Opportunity".to_string(),
            insight: "This career path aligns well with your profile and offers promising \
                      growth potential."
                .to_string(),
            recommendation: "Focus on continuous skill development and industry certifications \
                             to maximize your career growth."
                .to_string(),
        }
    }
}

/// LLM output; any missing or blank field is filled with a default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawInsight {
    title: Option<String>,
    insight: Option<String>,
    recommendation: Option<String>,
}

impl From<RawInsight> for CareerInsight {
    fn from(raw: RawInsight) -> Self {
        fn or_default(value: Option<String>, default: &str) -> String {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        Self {
            title: or_default(raw.title, "Career Insight"),
            insight: or_default(
                raw.insight,
                "This career offers excellent opportunities for growth and development.",
            ),
            recommendation: or_default(
                raw.recommendation,
                "Consider developing additional skills to enhance your career prospects.",
            ),
        }
    }
}

pub async fn generate_career_insights(
    llm: Option<&LlmClient>,
    career: &Career,
    match_score: u32,
) -> CareerInsight {
    let Some(llm) = llm else {
        debug!("No LLM configured, serving fallback insight for {}", career.title);
        return CareerInsight::fallback();
    };

    let prompt = build_insight_prompt(career, match_score);
    match llm.call_json::<RawInsight>(&prompt, &enrichment_system()).await {
        Ok(raw) => raw.into(),
        Err(e) => {
            warn!("Insight generation for {} failed: {e}", career.title);
            CareerInsight::fallback()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career metrics
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricsSalaryRange {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerMetrics {
    pub salary_range: MetricsSalaryRange,
    pub growth_potential: u8,
    pub stress_index: u8,
    pub mismatch_probability: u8,
    pub industry_trends: String,
    pub personality_match: u8,
    pub skills_match: u8,
    pub interests_match: u8,
    pub career_fit_analysis: String,
}

impl CareerMetrics {
    /// Static values from the catalog. The breakdown is unknown without a quiz, so it is zero.
    pub fn from_catalog(career: &Career) -> Self {
        Self {
            salary_range: MetricsSalaryRange {
                min: career.salary_range.min,
                max: career.salary_range.max,
            },
            growth_potential: career.growth_potential,
            stress_index: career.stress_index,
            mismatch_probability: career.mismatch_probability,
            industry_trends: career.industry_trends.clone(),
            personality_match: 0,
            skills_match: 0,
            interests_match: 0,
            career_fit_analysis: FALLBACK_FIT_ANALYSIS.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSalary {
    min: f64,
    max: f64,
}

/// Models return floats and out-of-range numbers often enough to parse loosely.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetrics {
    salary_range: RawSalary,
    growth_potential: f64,
    stress_index: f64,
    mismatch_probability: f64,
    #[serde(default)]
    industry_trends: String,
    #[serde(default)]
    personality_match: f64,
    #[serde(default)]
    skills_match: f64,
    #[serde(default)]
    interests_match: f64,
    #[serde(default)]
    career_fit_analysis: String,
}

impl From<RawMetrics> for CareerMetrics {
    fn from(raw: RawMetrics) -> Self {
        let a = rupees(raw.salary_range.min);
        let b = rupees(raw.salary_range.max);
        Self {
            salary_range: MetricsSalaryRange {
                min: a.min(b),
                max: a.max(b),
            },
            growth_potential: percent(raw.growth_potential),
            stress_index: percent(raw.stress_index),
            mismatch_probability: percent(raw.mismatch_probability),
            industry_trends: raw.industry_trends,
            personality_match: percent(raw.personality_match),
            skills_match: percent(raw.skills_match),
            interests_match: percent(raw.interests_match),
            career_fit_analysis: raw.career_fit_analysis,
        }
    }
}

fn percent(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

fn rupees(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Looks the career up by title first, then by id.
fn find_career<'c>(catalog: &'c Catalog, name: &str) -> Option<&'c Career> {
    catalog
        .career_by_title(name)
        .or_else(|| catalog.career_by_id(name))
}

/// Live metrics for `career_name`, cached. Careers outside the catalog are
/// allowed as long as the LLM can describe them.
pub async fn fetch_career_metrics(
    llm: Option<&LlmClient>,
    cache: &EnrichmentCache,
    catalog: &Catalog,
    career_name: &str,
) -> Result<CareerMetrics, AppError> {
    let career_name = career_name.trim();
    if career_name.is_empty() {
        return Err(AppError::Validation("careerName cannot be empty".to_string()));
    }

    let key = format!("career-metrics:{career_name}");
    if let Some(cached) = cache.get_json::<CareerMetrics>(&key).await {
        return Ok(cached);
    }

    let reference = find_career(catalog, career_name);

    let failure = match llm {
        Some(llm) => {
            let prompt = build_metrics_prompt(career_name, reference);
            match llm.call_json::<RawMetrics>(&prompt, &enrichment_system()).await {
                Ok(raw) => {
                    let metrics = CareerMetrics::from(raw);
                    cache.put_json(&key, &metrics).await;
                    return Ok(metrics);
                }
                Err(e) => {
                    warn!("Metrics for {career_name} failed, using catalog values: {e}");
                    e
                }
            }
        }
        None => LlmError::NotConfigured,
    };

    match (reference, failure) {
        (Some(career), _) => Ok(CareerMetrics::from_catalog(career)),
        (None, LlmError::NotConfigured) => {
            Err(AppError::NotFound(format!("Career {career_name} not found")))
        }
        (None, e) => Err(e.into()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Realtime careers
// ────────────────────────────────────────────────────────────────────────────

/// Drops entries that would not pass catalog validation, and duplicate ids.
fn sanitize_careers(raw: Vec<serde_json::Value>) -> Vec<Career> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|value| serde_json::from_value::<Career>(value).ok())
        .filter(|c| {
            !c.id.trim().is_empty()
                && !c.title.trim().is_empty()
                && c.growth_potential <= 100
                && c.stress_index <= 100
                && c.mismatch_probability <= 100
                && c.salary_range.min <= c.salary_range.max
        })
        .filter(|c| seen.insert(c.id.clone()))
        .collect()
}

/// Current in-demand careers from Gemini, cached; the static catalog otherwise.
pub async fn fetch_realtime_careers(
    llm: Option<&LlmClient>,
    cache: &EnrichmentCache,
    catalog: &Catalog,
) -> Vec<Career> {
    if let Some(cached) = cache.get_json::<Vec<Career>>(REALTIME_CAREERS_KEY).await {
        if !cached.is_empty() {
            return cached;
        }
    }

    let Some(llm) = llm else {
        return catalog.careers().to_vec();
    };

    let prompt = build_realtime_careers_prompt(REALTIME_CAREER_COUNT);
    match llm
        .call_json::<Vec<serde_json::Value>>(&prompt, &enrichment_system())
        .await
    {
        Ok(raw) => {
            let received = raw.len();
            let careers = sanitize_careers(raw);
            if careers.is_empty() {
                warn!("Realtime careers returned no usable entries ({received} received)");
                return catalog.careers().to_vec();
            }
            info!("Fetched {} realtime careers ({received} received)", careers.len());
            cache.put_json(REALTIME_CAREERS_KEY, &careers).await;
            careers
        }
        Err(e) => {
            warn!("Realtime careers failed, serving catalog: {e}");
            catalog.careers().to_vec()
        }
    }
}
