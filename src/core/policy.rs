use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::queue::CandidateQueue;
use crate::models::{Candidate, Match, SwipeAction, SwipeRecord, Verdict};

/// Default chance that a like without a hint turns into a match
pub const DEFAULT_MATCH_PROBABILITY: f64 = 0.3;

/// Decision source for whether a like becomes a match
pub trait MatchDecider: Send {
    fn decide(&mut self, candidate: &Candidate) -> bool;
}

/// Matches hinted candidates, everything else with a fixed probability
#[derive(Debug, Clone)]
pub struct RandomDecider<R: Rng> {
    rng: R,
    probability: f64,
}

impl<R: Rng> RandomDecider<R> {
    /// Probability is clamped to 0..=1; a non-finite value never matches
    pub fn new(rng: R, probability: f64) -> Self {
        let probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            tracing::warn!("Match probability {} is not finite, using 0", probability);
            0.0
        };
        Self { rng, probability }
    }
}

impl RandomDecider<StdRng> {
    pub fn from_entropy(probability: f64) -> Self {
        Self::new(StdRng::from_entropy(), probability)
    }

    pub fn seeded(seed: u64, probability: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), probability)
    }
}

impl<R: Rng + Send> MatchDecider for RandomDecider<R> {
    fn decide(&mut self, candidate: &Candidate) -> bool {
        candidate.will_match || self.rng.gen_bool(self.probability)
    }
}

/// Explicit override: every unhinted like gets the same answer
#[derive(Debug, Clone, Copy)]
pub struct FixedDecider(pub bool);

impl MatchDecider for FixedDecider {
    fn decide(&mut self, candidate: &Candidate) -> bool {
        candidate.will_match || self.0
    }
}

/// What the policy did with a resolved swipe
#[derive(Debug, Clone)]
pub enum PolicyOutcome {
    Passed,
    PassedByLike,
    /// Cursor is left on the matched candidate until the match is acknowledged
    Matched(Match),
}

impl PolicyOutcome {
    pub fn verdict(&self) -> Verdict {
        match self {
            PolicyOutcome::Passed => Verdict::Passed,
            PolicyOutcome::PassedByLike => Verdict::PassedByLike,
            PolicyOutcome::Matched(_) => Verdict::Matched,
        }
    }
}

/// Applies like/pass decisions to the queue and swipe history
pub struct MatchPolicy {
    decider: Box<dyn MatchDecider>,
}

impl MatchPolicy {
    pub fn new(decider: impl MatchDecider + 'static) -> Self {
        Self {
            decider: Box::new(decider),
        }
    }

    pub fn with_probability(probability: f64) -> Self {
        Self::new(RandomDecider::from_entropy(probability))
    }

    /// Dispatch on `action`; `None` when the queue is exhausted
    pub fn resolve(
        &mut self,
        action: SwipeAction,
        queue: &mut CandidateQueue,
        history: &mut Vec<SwipeRecord>,
    ) -> Option<PolicyOutcome> {
        match action {
            SwipeAction::Like => self.resolve_like(queue, history),
            SwipeAction::Pass => self.resolve_pass(queue, history),
        }
    }

    /// Always advances and records a pass
    pub fn resolve_pass(
        &mut self,
        queue: &mut CandidateQueue,
        history: &mut Vec<SwipeRecord>,
    ) -> Option<PolicyOutcome> {
        let candidate = queue.current()?;
        tracing::debug!("Pass on {}", candidate.id);

        record(history, candidate, SwipeAction::Pass);
        queue.advance();
        Some(PolicyOutcome::Passed)
    }

    /// Matches or advances, depending on the decider
    pub fn resolve_like(
        &mut self,
        queue: &mut CandidateQueue,
        history: &mut Vec<SwipeRecord>,
    ) -> Option<PolicyOutcome> {
        let candidate = queue.current()?;

        if self.decider.decide(candidate) {
            tracing::debug!("Like on {} matched", candidate.id);
            return Some(PolicyOutcome::Matched(Match {
                id: uuid::Uuid::new_v4().to_string(),
                candidate: candidate.clone(),
                matched_at: chrono::Utc::now(),
            }));
        }

        tracing::debug!("Like on {} did not match", candidate.id);
        record(history, candidate, SwipeAction::Like);
        queue.advance();
        Some(PolicyOutcome::PassedByLike)
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::with_probability(DEFAULT_MATCH_PROBABILITY)
    }
}

impl std::fmt::Debug for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchPolicy").finish_non_exhaustive()
    }
}

fn record(history: &mut Vec<SwipeRecord>, candidate: &Candidate, action: SwipeAction) {
    history.push(SwipeRecord {
        candidate_id: candidate.id.clone(),
        action,
        swiped_at: chrono::Utc::now(),
    });
}
