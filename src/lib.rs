//! MentorBee - discovery, matching and chat core for the MentorBee mentoring app
//!
//! The centre of the crate is the swipe engine in [`core`]: a gesture tracker,
//! a threshold-based swipe resolver, a pluggable match policy and the emitter
//! that opens a conversation when a like turns into a match. Everything else
//! is in-memory stores and mocked collaborators around it.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DiscoverySession, MatchPolicy, SessionConfig, SwipeEvent};
pub use models::{Candidate, Conversation, DiscoveryView, Match, SwipeAction};
