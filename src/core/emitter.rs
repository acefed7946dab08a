use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Candidate, Conversation};

/// Receiver of conversations created by matches
pub trait ConversationSink {
    fn add_conversation(&mut self, conversation: Conversation);
}

impl ConversationSink for Vec<Conversation> {
    fn add_conversation(&mut self, conversation: Conversation) {
        self.push(conversation);
    }
}

/// What to do when a candidate that already has a conversation matches again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RematchPolicy {
    /// Append another conversation
    #[default]
    Append,
    /// Keep the existing conversation, emit nothing
    Skip,
}

/// Builds conversation records for matched candidates and hands them to the sink
#[derive(Debug, Clone, Default)]
pub struct ConversationEmitter {
    rematch: RematchPolicy,
    emitted: HashSet<String>,
}

impl ConversationEmitter {
    pub fn new(rematch: RematchPolicy) -> Self {
        Self {
            rematch,
            emitted: HashSet::new(),
        }
    }

    /// Fresh conversation for `candidate`: no messages, read, not archived
    pub fn build(candidate: &Candidate) -> Conversation {
        Conversation {
            id: uuid::Uuid::new_v4().to_string(),
            partner_id: candidate.id.clone(),
            partner_name: candidate.name.clone(),
            partner_role: candidate.role,
            partner_image: candidate.primary_image().map(str::to_string),
            category: candidate.category.clone(),
            messages: Vec::new(),
            last_message: None,
            last_message_time: None,
            has_unread: false,
            is_archived: false,
            scheduled_session: None,
        }
    }

    /// Emit a conversation for `candidate`, returning its id
    ///
    /// Returns `None` only when the candidate was already emitted and the
    /// rematch policy is [`RematchPolicy::Skip`].
    pub fn emit<S: ConversationSink + ?Sized>(
        &mut self,
        candidate: &Candidate,
        sink: &mut S,
    ) -> Option<String> {
        let first = self.emitted.insert(candidate.id.clone());
        if !first {
            tracing::warn!(
                "Candidate {} matched again (rematch policy: {:?})",
                candidate.id,
                self.rematch
            );
            if self.rematch == RematchPolicy::Skip {
                return None;
            }
        }

        let conversation = Self::build(candidate);
        let id = conversation.id.clone();
        sink.add_conversation(conversation);

        tracing::info!("Opened conversation {} with {}", id, candidate.id);
        Some(id)
    }

    pub fn has_emitted(&self, candidate_id: &str) -> bool {
        self.emitted.contains(candidate_id)
    }
}
