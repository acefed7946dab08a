use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::core::{ConversationSink, DiscoverySession, SwipeEvent};
use crate::models::{Conversation, Message, Role, ScheduledSession, CURRENT_USER, PARTNER};

const SEED_CONVERSATIONS: &str = include_str!("../../data/conversations.json");

/// Errors that can occur with chat operations
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("Message text is empty")]
    EmptyMessage,

    #[error("No session scheduled in conversation {0}")]
    NoSession(String),

    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] serde_json::Error),
}

/// In-memory conversation list plus the chat currently on screen
#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    conversations: Vec<Conversation>,
    active_chat_id: Option<String>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            active_chat_id: None,
        }
    }

    /// Store preloaded with the bundled sample conversations
    pub fn seeded() -> Result<Self, ChatError> {
        let conversations: Vec<Conversation> = serde_json::from_str(SEED_CONVERSATIONS)?;
        Ok(Self::with_conversations(conversations))
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, chat_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == chat_id)
    }

    fn get_mut(&mut self, chat_id: &str) -> Result<&mut Conversation, ChatError> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or_else(|| ChatError::NotFound(chat_id.to_string()))
    }

    /// Conversations still in progress
    pub fn active(&self) -> Vec<&Conversation> {
        self.conversations.iter().filter(|c| !c.is_archived).collect()
    }

    /// Conversations whose mentorship has ended
    pub fn archived(&self) -> Vec<&Conversation> {
        self.conversations.iter().filter(|c| c.is_archived).collect()
    }

    pub fn unread_count(&self) -> usize {
        self.conversations.iter().filter(|c| c.has_unread).count()
    }

    pub fn active_chat_id(&self) -> Option<&str> {
        self.active_chat_id.as_deref()
    }

    /// Append a message from the current user
    pub fn send_message(&mut self, chat_id: &str, text: &str) -> Result<Message, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let conversation = self.get_mut(chat_id)?;
        let message = new_message(CURRENT_USER, text);
        conversation.push_message(message.clone());
        Ok(message)
    }

    /// Append a partner reply; unread unless the chat is on screen
    pub fn deliver_reply(&mut self, chat_id: &str, text: &str) -> Result<Message, ChatError> {
        let on_screen = self.active_chat_id.as_deref() == Some(chat_id);
        let conversation = self.get_mut(chat_id)?;

        let message = new_message(PARTNER, text);
        conversation.push_message(message.clone());
        conversation.has_unread = !on_screen;
        Ok(message)
    }

    /// Propose a session, replacing any earlier proposal
    pub fn schedule_session(
        &mut self,
        chat_id: &str,
        datetime: chrono::DateTime<chrono::Utc>,
    ) -> Result<ScheduledSession, ChatError> {
        let conversation = self.get_mut(chat_id)?;
        let session = ScheduledSession {
            id: uuid::Uuid::new_v4().to_string(),
            datetime,
            confirmed: false,
        };
        conversation.scheduled_session = Some(session.clone());

        tracing::info!("Scheduled session {} in {} for {}", session.id, chat_id, datetime);
        Ok(session)
    }

    pub fn confirm_session(&mut self, chat_id: &str) -> Result<(), ChatError> {
        let conversation = self.get_mut(chat_id)?;
        match conversation.scheduled_session.as_mut() {
            Some(session) => {
                session.confirmed = true;
                Ok(())
            }
            None => Err(ChatError::NoSession(chat_id.to_string())),
        }
    }

    /// Archive the conversation
    /// Archive the chat and hand back the partner id, who is up for review
    pub fn end_mentorship(&mut self, chat_id: &str) -> Result<String, ChatError> {
        let conversation = self.get_mut(chat_id)?;
        conversation.is_archived = true;
        tracing::info!("Mentorship in {} ended", chat_id);
        Ok(conversation.partner_id.clone())
    }

    pub fn mark_as_read(&mut self, chat_id: &str) -> Result<(), ChatError> {
        self.get_mut(chat_id)?.has_unread = false;
        Ok(())
    }

    /// Put a chat on screen (marking it read) or clear the selection
    pub fn set_active_chat(&mut self, chat_id: Option<&str>) -> Result<(), ChatError> {
        if let Some(id) = chat_id {
            self.mark_as_read(id)?;
        }
        self.active_chat_id = chat_id.map(str::to_string);
        Ok(())
    }
}

impl ConversationSink for ChatStore {
    fn add_conversation(&mut self, conversation: Conversation) {
        self.conversations.push(conversation);
    }
}

fn new_message(sender_id: &str, text: &str) -> Message {
    Message {
        id: uuid::Uuid::new_v4().to_string(),
        sender_id: sender_id.to_string(),
        text: text.to_string(),
        timestamp: chrono::Utc::now(),
    }
}

/// Stand-in for the conversational partner
pub trait ReplyGenerator: Send {
    fn reply(&mut self, partner_role: Role, user_text: &str) -> String;
}

const MENTOR_REPLIES: &[&str] = &[
    "Thanks for sharing! From my experience, focus on the fundamentals first.",
    "Good question. I ran into the same thing as a student, happy to walk you through it.",
    "You're on the right track. Keep going and don't be afraid to try new approaches.",
    "I know that feeling. Want me to go into more detail on any part of it?",
    "When would be a good time to meet?",
];

const MENTEE_REPLIES: &[&str] = &[
    "Thank you for sharing! I'd love to learn more about this.",
    "That makes sense. Could you give me a concrete example?",
    "That's really helpful, I'll try it this week. Thanks so much!",
    "Looking forward to learning from you!",
    "I have a few more questions on this, do you have time later?",
];

/// Picks a random canned reply matching the partner's role
#[derive(Debug, Clone)]
pub struct CannedReplies<R: Rng> {
    rng: R,
}

impl<R: Rng> CannedReplies<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl CannedReplies<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> ReplyGenerator for CannedReplies<R> {
    fn reply(&mut self, partner_role: Role, _user_text: &str) -> String {
        let pool = match partner_role {
            Role::Mentor => MENTOR_REPLIES,
            Role::Mentee => MENTEE_REPLIES,
        };
        pool[self.rng.gen_range(0..pool.len())].to_string()
    }
}

/// Shared chat store with a mocked partner that answers after a delay
#[derive(Clone)]
pub struct ChatService {
    store: Arc<Mutex<ChatStore>>,
    replies: Arc<Mutex<Box<dyn ReplyGenerator>>>,
    reply_delay: Duration,
}

impl ChatService {
    pub fn new(store: ChatStore, replies: impl ReplyGenerator + 'static, reply_delay: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            replies: Arc::new(Mutex::new(Box::new(replies))),
            reply_delay,
        }
    }

    pub fn store(&self) -> &Arc<Mutex<ChatStore>> {
        &self.store
    }

    /// Send a message and schedule the partner's reply
    ///
    /// The reply is fire-and-forget; the handle is only useful for tests and
    /// shutdown.
    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
    ) -> Result<(Message, JoinHandle<()>), ChatError> {
        let (message, partner_role) = {
            let mut store = self.store.lock().await;
            let message = store.send_message(chat_id, text)?;
            let role = store
                .get(chat_id)
                .map(|c| c.partner_role)
                .ok_or_else(|| ChatError::NotFound(chat_id.to_string()))?;
            (message, role)
        };

        let store = Arc::clone(&self.store);
        let replies = Arc::clone(&self.replies);
        let delay = self.reply_delay;
        let chat_id = chat_id.to_string();
        let user_text = message.text.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let text = replies.lock().await.reply(partner_role, &user_text);
            if let Err(e) = store.lock().await.deliver_reply(&chat_id, &text) {
                tracing::warn!("Dropping reply for {}: {}", chat_id, e);
            }
        });

        Ok((message, handle))
    }

    /// Let the session's swipe settle, then file any new conversation
    ///
    /// The store is only locked after the settle delay, so reply timers that
    /// come due during the animation are not held up.
    pub async fn settle_swipe(&self, session: &mut DiscoverySession) -> SwipeEvent {
        let mut emitted: Vec<Conversation> = Vec::new();
        let event = session.settle_after_delay(&mut emitted).await;

        if !emitted.is_empty() {
            let mut store = self.store.lock().await;
            for conversation in emitted {
                store.add_conversation(conversation);
            }
        }
        event
    }
}
