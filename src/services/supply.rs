use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

use crate::models::{Candidate, Category, FOR_YOU};

const SEED_PROFILES: &str = include_str!("../../data/profiles.json");

/// Errors that can occur when fetching candidates
#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    #[error("Invalid candidate {id}: {errors}")]
    InvalidCandidate {
        id: String,
        errors: validator::ValidationErrors,
    },
}

/// Source of candidate profiles for a category
#[async_trait]
pub trait CandidateSupply: Send + Sync {
    /// Fetch the ordered candidate list; `None` means every category
    async fn fetch(&self, category: Option<&str>) -> Result<Vec<Candidate>, SupplyError>;
}

/// Fixed category catalogue shown on the discover screen
pub fn categories() -> Vec<Category> {
    [
        (FOR_YOU, "For You", "✨"),
        ("school-clubs", "School Clubs", "🎓"),
        ("finance", "Finance", "💰"),
        ("philosophy", "Philosophy", "💭"),
        ("media", "Media", "📱"),
        ("law", "Law", "⚖️"),
        ("technology", "Technology", "💻"),
        ("arts", "Arts", "🎨"),
        ("science", "Science", "🔬"),
        ("business", "Business", "💼"),
        ("health", "Health & Wellness", "🏥"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

pub fn is_known_category(id: &str) -> bool {
    categories().iter().any(|c| c.id == id)
}

/// Parse and validate the bundled profile list
pub fn seed_profiles() -> Result<Vec<Candidate>, SupplyError> {
    let profiles: Vec<Candidate> = serde_json::from_str(SEED_PROFILES)?;
    for profile in &profiles {
        profile
            .validate()
            .map_err(|errors| SupplyError::InvalidCandidate {
                id: profile.id.clone(),
                errors,
            })?;
    }
    Ok(profiles)
}

/// In-memory supply with an artificial round-trip delay
#[derive(Debug, Clone)]
pub struct MockCandidateSupply {
    profiles: Vec<Candidate>,
    delay: Duration,
}

impl MockCandidateSupply {
    pub fn new(profiles: Vec<Candidate>, delay: Duration) -> Self {
        Self { profiles, delay }
    }

    /// Supply backed by the bundled seed profiles
    pub fn seeded(delay: Duration) -> Result<Self, SupplyError> {
        Ok(Self::new(seed_profiles()?, delay))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl CandidateSupply for MockCandidateSupply {
    async fn fetch(&self, category: Option<&str>) -> Result<Vec<Candidate>, SupplyError> {
        let category = category.unwrap_or(FOR_YOU);
        if !is_known_category(category) {
            return Err(SupplyError::UnknownCategory(category.to_string()));
        }

        tokio::time::sleep(self.delay).await;

        let candidates: Vec<Candidate> = self
            .profiles
            .iter()
            .filter(|p| category == FOR_YOU || p.category == category)
            .cloned()
            .collect();

        tracing::debug!("Supplied {} candidates for {}", candidates.len(), category);
        Ok(candidates)
    }
}
