// Service exports
pub mod auth;
pub mod chat;
pub mod profile;
pub mod review;
pub mod supply;

pub use auth::{AuthError, AuthSession, PremiumPlan};
pub use chat::{CannedReplies, ChatError, ChatService, ChatStore, ReplyGenerator};
pub use profile::{ProfileError, ProfileStore};
pub use review::{ReviewError, ReviewLedger};
pub use supply::{categories, CandidateSupply, MockCandidateSupply, SupplyError};
