use serde::{Deserialize, Serialize};

use crate::models::Candidate;

/// 1-based position of the current card, as shown under the card stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

/// Ordered candidates plus a cursor that only moves forward
#[derive(Debug, Clone, Default)]
pub struct CandidateQueue {
    candidates: Vec<Candidate>,
    cursor: usize,
}

impl CandidateQueue {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            cursor: 0,
        }
    }

    /// Candidate under the cursor, or `None` once the queue is exhausted
    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.cursor)
    }

    /// Move past the current candidate. No-op when exhausted.
    pub fn advance(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.current().map(|_| Progress {
            position: self.cursor + 1,
            total: self.candidates.len(),
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}
