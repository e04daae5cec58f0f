//! Catalog: the single versioned source of quiz questions and career reference data.
//!
//! The same artifact feeds `GET /api/quiz` (what the UI displays) and the matcher
//! (which options endorse which careers).
//!
//! The shipped catalog is embedded at compile time; `CATALOG_PATH` swaps in a file
//! from disk. Either way the catalog is validated once at startup and then shared
//! read-only as `Arc<Catalog>`.

pub mod handlers;
pub mod models;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

pub use models::{Career, CatalogFile, QuestionCategory, QuizOption, QuizQuestion, SalaryRange};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Validated, immutable catalog with lookup indexes.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    questions: Vec<QuizQuestion>,
    careers: Vec<Career>,
    question_index: HashMap<u32, usize>,
    title_index: HashMap<String, usize>,
    id_index: HashMap<String, usize>,
}

impl Catalog {
    /// Loads the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::from_file(file)
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let CatalogFile {
            version,
            questions,
            careers,
        } = file;

        if questions.is_empty() {
            return Err(CatalogError::Invalid("catalog has no questions".into()));
        }
        if careers.is_empty() {
            return Err(CatalogError::Invalid("catalog has no careers".into()));
        }

        let mut question_index = HashMap::with_capacity(questions.len());
        for (idx, question) in questions.iter().enumerate() {
            if question_index.insert(question.id, idx).is_some() {
                return Err(CatalogError::Invalid(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
            if question.options.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "question {} has no options",
                    question.id
                )));
            }
            let mut seen = HashSet::new();
            for option in &question.options {
                if !seen.insert(option.id.as_str()) {
                    return Err(CatalogError::Invalid(format!(
                        "duplicate option id '{}' in question {}",
                        option.id, question.id
                    )));
                }
            }
        }

        let mut title_index = HashMap::with_capacity(careers.len());
        let mut id_index = HashMap::with_capacity(careers.len());
        for (idx, career) in careers.iter().enumerate() {
            if id_index.insert(career.id.clone(), idx).is_some() {
                return Err(CatalogError::Invalid(format!(
                    "duplicate career id '{}'",
                    career.id
                )));
            }
            if title_index.insert(career.title.clone(), idx).is_some() {
                return Err(CatalogError::Invalid(format!(
                    "duplicate career title '{}'",
                    career.title
                )));
            }
            validate_career(career)?;
        }

        let dangling = questions
            .iter()
            .flat_map(|q| q.options.iter())
            .flat_map(|o| o.careers.iter())
            .filter(|title| !title_index.contains_key(title.as_str()))
            .count();
        if dangling > 0 {
            debug!("{dangling} option endorsements reference careers outside the catalog");
        }

        Ok(Self {
            version,
            questions,
            careers,
            question_index,
            title_index,
            id_index,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn careers(&self) -> &[Career] {
        &self.careers
    }

    pub fn question(&self, id: u32) -> Option<&QuizQuestion> {
        self.question_index.get(&id).map(|&idx| &self.questions[idx])
    }

    pub fn career_by_id(&self, id: &str) -> Option<&Career> {
        self.id_index.get(id).map(|&idx| &self.careers[idx])
    }

    pub fn career_by_title(&self, title: &str) -> Option<&Career> {
        self.title_index.get(title).map(|&idx| &self.careers[idx])
    }

    /// Catalog position of the career with this title, used by the matcher's accumulators.
    pub fn career_position(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }
}

/// Loads from `path` when given, otherwise the embedded catalog.
pub fn load_catalog(path: Option<&str>) -> Result<Catalog, CatalogError> {
    let catalog = match path {
        Some(p) => Catalog::from_path(p)?,
        None => Catalog::embedded()?,
    };
    info!(
        "Catalog v{} loaded: {} questions, {} careers",
        catalog.version(),
        catalog.questions().len(),
        catalog.careers().len()
    );
    Ok(catalog)
}

fn validate_career(career: &Career) -> Result<(), CatalogError> {
    let scalars = [
        ("growthPotential", career.growth_potential),
        ("stressIndex", career.stress_index),
        ("mismatchProbability", career.mismatch_probability),
    ];
    for (name, value) in scalars {
        if value > 100 {
            return Err(CatalogError::Invalid(format!(
                "career '{}' has {name} {value} outside 0-100",
                career.id
            )));
        }
    }
    if career.salary_range.min > career.salary_range.max {
        return Err(CatalogError::Invalid(format!(
            "career '{}' salary min exceeds max",
            career.id
        )));
    }
    Ok(())
}
