// Model exports
pub mod domain;
pub mod requests;
pub mod views;

pub use domain::{
    Candidate, Category, Conversation, Match, Message, Profile, Review, Role, ScheduledSession,
    SwipeAction, SwipeRecord, User, Verdict, CURRENT_USER, FOR_YOU, PARTNER,
};
pub use requests::{LoginRequest, RegisterRequest, ReviewRequest};
pub use views::DiscoveryView;
