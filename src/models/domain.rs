use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which side of a mentorship a profile sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
        }
    }
}

/// Discovery category shown on the browse screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// Category id that matches every candidate
pub const FOR_YOU: &str = "for-you";

/// A profile eligible to be swiped on in the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Candidate {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub role: Role,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub major: String,
    #[serde(default = "default_year")]
    pub year: u8,
    #[validate(length(min = 1))]
    pub images: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "willMatch", default)]
    pub will_match: bool,
}

impl Candidate {
    /// First image, used as the card cover and conversation avatar
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

fn default_year() -> u8 { 1 }

/// A resolved swipe direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Pass,
}

/// Terminal state of a candidate after a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    PassedByLike,
    Matched,
}

/// One entry of the swipe history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRecord {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub action: SwipeAction,
    #[serde(rename = "swipedAt")]
    pub swiped_at: chrono::DateTime<chrono::Utc>,
}

/// Mutual-interest outcome on a liked candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub candidate: Candidate,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

/// Chat message; `sender_id` is either the current user or the partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "senderId")]
    pub sender_id: String,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub const CURRENT_USER: &str = "current-user";
pub const PARTNER: &str = "partner";

impl Message {
    pub fn from_current_user(&self) -> bool {
        self.sender_id == CURRENT_USER
    }
}

/// Mentoring session proposed inside a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSession {
    pub id: String,
    pub datetime: chrono::DateTime<chrono::Utc>,
    pub confirmed: bool,
}

/// Conversation with a matched partner, owned by the chat store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(rename = "partnerId")]
    pub partner_id: String,
    #[serde(rename = "partnerName")]
    pub partner_name: String,
    #[serde(rename = "partnerRole")]
    pub partner_role: Role,
    #[serde(rename = "partnerImage")]
    pub partner_image: Option<String>,
    pub category: String,
    pub messages: Vec<Message>,
    #[serde(rename = "lastMessage", default)]
    pub last_message: Option<String>,
    #[serde(rename = "lastMessageTime", default)]
    pub last_message_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "hasUnread")]
    pub has_unread: bool,
    #[serde(rename = "isArchived")]
    pub is_archived: bool,
    #[serde(rename = "scheduledSession", default)]
    pub scheduled_session: Option<ScheduledSession>,
}

impl Conversation {
    pub(crate) fn push_message(&mut self, message: Message) {
        self.last_message = Some(message.text.clone());
        self.last_message_time = Some(message.timestamp);
        self.messages.push(message);
    }
}

/// Signed-in account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub university: String,
    pub major: String,
    pub year: u8,
    pub role: Role,
    #[serde(rename = "activeRole")]
    pub active_role: Role,
    #[serde(rename = "isPremium")]
    pub is_premium: bool,
}

/// Per-role profile the user edits during onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub bio: String,
    pub interests: Vec<String>,
    pub images: Vec<String>,
}

/// Feedback left for a partner after a mentorship ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(rename = "partnerId")]
    pub partner_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
