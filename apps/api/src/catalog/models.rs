use serde::{Deserialize, Serialize};

/// Which breakdown bucket a question's points feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Personality,
    Skills,
    Interests,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub value: u32,
    /// Career titles this option endorses. Titles missing from the catalog are ignored.
    pub careers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub category: QuestionCategory,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub salary_range: SalaryRange,
    pub growth_potential: u8,     // 0 – 100
    pub stress_index: u8,         // 0 – 100
    pub mismatch_probability: u8, // 0 – 100
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_model_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_fallback_path: Option<String>,
    #[serde(default)]
    pub industry_trends: String,
    #[serde(
        default,
        rename = "workspace3dModel",
        skip_serializing_if = "Option::is_none"
    )]
    pub workspace3d_model: Option<String>,
}

/// On-disk shape of the catalog artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub version: String,
    pub questions: Vec<QuizQuestion>,
    pub careers: Vec<Career>,
}
