use std::collections::HashMap;
use thiserror::Error;

use crate::models::{Profile, Role};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("No {0} profile set up")]
    Missing(&'static str),
}

/// The user's mentor and mentee profiles
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: HashMap<Role, Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_profile(&mut self, role: Role, profile: Profile) {
        self.profiles.insert(role, profile);
    }

    pub fn profile(&self, role: Role) -> Option<&Profile> {
        self.profiles.get(&role)
    }

    fn profile_mut(&mut self, role: Role) -> Result<&mut Profile, ProfileError> {
        self.profiles
            .get_mut(&role)
            .ok_or(ProfileError::Missing(role.as_str()))
    }

    pub fn update_bio(&mut self, role: Role, bio: impl Into<String>) -> Result<(), ProfileError> {
        self.profile_mut(role)?.bio = bio.into();
        Ok(())
    }

    /// Add an interest; returns false when it was already there
    pub fn add_interest(&mut self, role: Role, interest: &str) -> Result<bool, ProfileError> {
        let profile = self.profile_mut(role)?;
        if profile.interests.iter().any(|i| i == interest) {
            return Ok(false);
        }
        profile.interests.push(interest.to_string());
        Ok(true)
    }

    pub fn remove_interest(&mut self, role: Role, interest: &str) -> Result<bool, ProfileError> {
        let profile = self.profile_mut(role)?;
        let before = profile.interests.len();
        profile.interests.retain(|i| i != interest);
        Ok(profile.interests.len() != before)
    }
}
