use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

use crate::config::AuthSettings;
use crate::models::{LoginRequest, RegisterRequest, Role, User};

/// Errors that can occur with account operations
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not signed in")]
    NotSignedIn,
}

/// Premium subscription plans offered on the upsell screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumPlan {
    Plus,
    Pro,
}

/// Mock account session. Accepts any credentials, persists nothing.
#[derive(Debug, Clone)]
pub struct AuthSession {
    user: Option<User>,
    token: Option<String>,
    current_role: Role,
    plan: Option<PremiumPlan>,
    login_delay: Duration,
    register_delay: Duration,
}

impl AuthSession {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            user: None,
            token: None,
            current_role: Role::Mentee,
            plan: None,
            login_delay: Duration::from_millis(settings.login_delay_ms),
            register_delay: Duration::from_millis(settings.register_delay_ms),
        }
    }

    pub async fn login(&mut self, req: LoginRequest) -> Result<&User, AuthError> {
        req.validate()?;
        tokio::time::sleep(self.login_delay).await;

        let name = req.email.split('@').next().unwrap_or_default().to_string();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: req.email,
            name,
            university: "Example University".to_string(),
            major: "Computer Science".to_string(),
            year: 3,
            role: Role::Mentee,
            active_role: Role::Mentee,
            is_premium: false,
        };

        tracing::info!("Signed in as {}", user.email);
        Ok(self.sign_in(user))
    }

    pub async fn register(&mut self, req: RegisterRequest) -> Result<&User, AuthError> {
        req.validate()?;
        tokio::time::sleep(self.register_delay).await;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: req.email,
            name: req.name,
            university: req.university,
            major: req.major,
            year: req.year,
            role: req.role,
            active_role: req.role,
            is_premium: false,
        };

        tracing::info!("Registered {} as {}", user.email, user.role.as_str());
        Ok(self.sign_in(user))
    }

    fn sign_in(&mut self, user: User) -> &User {
        self.token = Some(format!("mock-token-{}", uuid::Uuid::new_v4()));
        self.current_role = user.active_role;
        self.plan = None;
        self.user.insert(user)
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.plan = None;
    }

    /// Flip between browsing as mentor and as mentee
    pub fn switch_role(&mut self, role: Role) {
        self.current_role = role;
        if let Some(user) = self.user.as_mut() {
            user.active_role = role;
        }
    }

    pub fn subscribe(&mut self, plan: PremiumPlan) -> Result<(), AuthError> {
        let user = self.user.as_mut().ok_or(AuthError::NotSignedIn)?;
        user.is_premium = true;
        self.plan = Some(plan);
        tracing::info!("{} subscribed to {:?}", user.email, plan);
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn current_role(&self) -> Role {
        self.current_role
    }

    pub fn plan(&self) -> Option<PremiumPlan> {
        self.plan
    }
}
