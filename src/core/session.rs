use std::time::Duration;

use serde::Serialize;

use crate::config::DiscoverySettings;
use crate::core::{
    emitter::{ConversationEmitter, ConversationSink, RematchPolicy},
    gesture::{DragOffset, GestureTracker, Point, SwipeHint, DEFAULT_HINT_THRESHOLD_PX},
    policy::{MatchPolicy, PolicyOutcome},
    queue::{CandidateQueue, Progress},
    resolver::{DragResolution, SwipeResolver, DEFAULT_SWIPE_THRESHOLD_PX},
};
use crate::models::{Candidate, DiscoveryView, Match, SwipeAction, SwipeRecord, Verdict};

/// Default time the swipe-out animation takes before its outcome is applied
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Tunables for one discovery session
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub swipe_threshold_px: f64,
    pub hint_threshold_px: f64,
    pub settle_delay: Duration,
    pub rematch: RematchPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            hint_threshold_px: DEFAULT_HINT_THRESHOLD_PX,
            settle_delay: DEFAULT_SETTLE_DELAY,
            rematch: RematchPolicy::default(),
        }
    }
}

impl From<&DiscoverySettings> for SessionConfig {
    fn from(settings: &DiscoverySettings) -> Self {
        Self {
            swipe_threshold_px: settings.swipe_threshold_px,
            hint_threshold_px: settings.hint_threshold_px,
            settle_delay: Duration::from_millis(settings.settle_delay_ms),
            rematch: settings.rematch,
        }
    }
}

/// Why an input had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Move or release without a preceding press
    NoGesture,
    /// Pointer sample with a non-finite coordinate
    InvalidSample,
    /// A swipe-out animation is still in flight
    Busy,
    /// A match is waiting to be acknowledged
    MatchPending,
    /// No candidate left
    Exhausted,
    NothingInFlight,
    NoPendingMatch,
}

/// What a session operation did, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SwipeEvent {
    DragStarted,
    Dragged {
        offset: DragOffset,
        hint: Option<SwipeHint>,
    },
    /// Drag fell short of the threshold, card is back at rest
    SnappedBack,
    /// Swipe accepted, outcome applies once the animation settles
    Animating { action: SwipeAction },
    Settled {
        candidate_id: String,
        verdict: Verdict,
    },
    Matched {
        match_id: String,
        candidate_id: String,
        conversation_id: Option<String>,
    },
    Acknowledged { candidate_id: String },
    Ignored { reason: IgnoreReason },
}

impl SwipeEvent {
    fn ignored(reason: IgnoreReason) -> Self {
        SwipeEvent::Ignored { reason }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, SwipeEvent::Ignored { .. })
    }
}

/// Swipe state for one browsing session
///
/// Owns the candidate queue, the active gesture, the busy guard for the
/// swipe-out animation, and the swipe and match ledgers. Conversations
/// produced by matches go to the sink passed into [`DiscoverySession::settle`].
///
/// # Lifecycle of a candidate
/// 1. Presented: a short drag snaps back without changing anything
/// 2. Pass: history gets a pass, cursor advances
/// 3. Like without match: history gets a like, cursor advances
/// 4. Like with match: match and conversation are created, cursor waits for
///    [`DiscoverySession::acknowledge_match`]
#[derive(Debug)]
pub struct DiscoverySession {
    category: Option<String>,
    queue: CandidateQueue,
    tracker: GestureTracker,
    resolver: SwipeResolver,
    policy: MatchPolicy,
    emitter: ConversationEmitter,
    history: Vec<SwipeRecord>,
    matches: Vec<Match>,
    pending_match: Option<Match>,
    settle_delay: Duration,
}

impl DiscoverySession {
    pub fn new(config: SessionConfig, policy: MatchPolicy) -> Self {
        Self {
            category: None,
            queue: CandidateQueue::default(),
            tracker: GestureTracker::new(config.hint_threshold_px),
            resolver: SwipeResolver::new(config.swipe_threshold_px),
            policy,
            emitter: ConversationEmitter::new(config.rematch),
            history: Vec::new(),
            matches: Vec::new(),
            pending_match: None,
            settle_delay: config.settle_delay,
        }
    }

    /// Start browsing a freshly fetched candidate list
    ///
    /// Swipe history and matches carry over; gesture, animation and any
    /// pending match are dropped.
    pub fn load(&mut self, category: impl Into<String>, candidates: Vec<Candidate>) {
        let category = category.into();
        tracing::info!("Loaded {} candidates for category {}", candidates.len(), category);

        self.category = Some(category);
        self.queue = CandidateQueue::new(candidates);
        self.clear_transient();
    }

    /// Leave the card stack entirely
    pub fn reset(&mut self) {
        self.category = None;
        self.queue = CandidateQueue::default();
        self.clear_transient();
    }

    fn clear_transient(&mut self) {
        self.tracker.reset();
        self.resolver.finish();
        self.pending_match = None;
    }

    pub fn pointer_down(&mut self, point: Point) -> SwipeEvent {
        if let Some(reason) = self.blocked() {
            return SwipeEvent::ignored(reason);
        }
        if !self.tracker.start(point) {
            return SwipeEvent::ignored(IgnoreReason::InvalidSample);
        }
        SwipeEvent::DragStarted
    }

    pub fn pointer_move(&mut self, point: Point) -> SwipeEvent {
        if self.tracker.is_active() && !point.is_finite() {
            tracing::debug!("Dropping pointer sample {:?}", point);
            return SwipeEvent::ignored(IgnoreReason::InvalidSample);
        }
        match self.tracker.update(point) {
            Some(offset) => SwipeEvent::Dragged {
                offset,
                hint: self.tracker.hint(),
            },
            None => SwipeEvent::ignored(IgnoreReason::NoGesture),
        }
    }

    pub fn pointer_up(&mut self) -> SwipeEvent {
        let Some(offset) = self.tracker.end() else {
            return SwipeEvent::ignored(IgnoreReason::NoGesture);
        };

        match self.resolver.resolve_drag(offset) {
            DragResolution::Rejected => {
                tracing::trace!("Drag of {:.0}px snapped back", offset.x);
                self.tracker.reset();
                SwipeEvent::SnappedBack
            }
            DragResolution::Resolved(action) => self.begin(action),
        }
    }

    pub fn press_like(&mut self) -> SwipeEvent {
        self.begin(SwipeAction::Like)
    }

    pub fn press_pass(&mut self) -> SwipeEvent {
        self.begin(SwipeAction::Pass)
    }

    fn begin(&mut self, action: SwipeAction) -> SwipeEvent {
        if self.queue.is_exhausted() {
            return SwipeEvent::ignored(IgnoreReason::Exhausted);
        }
        if self.pending_match.is_some() {
            return SwipeEvent::ignored(IgnoreReason::MatchPending);
        }
        if !self.resolver.begin(action) {
            return SwipeEvent::ignored(IgnoreReason::Busy);
        }
        SwipeEvent::Animating { action }
    }

    fn blocked(&self) -> Option<IgnoreReason> {
        if self.queue.is_exhausted() {
            Some(IgnoreReason::Exhausted)
        } else if self.pending_match.is_some() {
            Some(IgnoreReason::MatchPending)
        } else if self.resolver.is_busy() {
            Some(IgnoreReason::Busy)
        } else {
            None
        }
    }

    /// Apply the in-flight swipe now that its animation has finished
    pub fn settle<S: ConversationSink + ?Sized>(&mut self, sink: &mut S) -> SwipeEvent {
        let Some(action) = self.resolver.finish() else {
            return SwipeEvent::ignored(IgnoreReason::NothingInFlight);
        };
        self.tracker.reset();

        let Some(candidate_id) = self.queue.current().map(|c| c.id.clone()) else {
            return SwipeEvent::ignored(IgnoreReason::Exhausted);
        };

        match self.policy.resolve(action, &mut self.queue, &mut self.history) {
            None => SwipeEvent::ignored(IgnoreReason::Exhausted),
            Some(PolicyOutcome::Matched(record)) => {
                let conversation_id = self.emitter.emit(&record.candidate, sink);
                tracing::info!("Matched with {}", candidate_id);

                let event = SwipeEvent::Matched {
                    match_id: record.id.clone(),
                    candidate_id,
                    conversation_id,
                };
                self.matches.push(record.clone());
                self.pending_match = Some(record);
                event
            }
            Some(outcome) => SwipeEvent::Settled {
                candidate_id,
                verdict: outcome.verdict(),
            },
        }
    }

    /// Wait out the settle delay, then [`settle`](Self::settle)
    pub async fn settle_after_delay<S: ConversationSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> SwipeEvent {
        if !self.resolver.is_busy() {
            return SwipeEvent::ignored(IgnoreReason::NothingInFlight);
        }
        tokio::time::sleep(self.settle_delay).await;
        self.settle(sink)
    }

    /// Dismiss the match notice and move on to the next candidate
    pub fn acknowledge_match(&mut self) -> SwipeEvent {
        let Some(record) = self.pending_match.take() else {
            return SwipeEvent::ignored(IgnoreReason::NoPendingMatch);
        };
        self.queue.advance();
        SwipeEvent::Acknowledged {
            candidate_id: record.candidate.id,
        }
    }

    pub fn current_candidate(&self) -> Option<&Candidate> {
        self.queue.current()
    }

    pub fn drag_offset(&self) -> DragOffset {
        self.tracker.offset()
    }

    pub fn hint(&self) -> Option<SwipeHint> {
        self.tracker.hint()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.queue.progress()
    }

    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_exhausted()
    }

    pub fn is_animating(&self) -> bool {
        self.resolver.is_busy()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn history(&self) -> &[SwipeRecord] {
        &self.history
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn pending_match(&self) -> Option<&Match> {
        self.pending_match.as_ref()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Snapshot for rendering the card stack
    pub fn view(&self) -> DiscoveryView {
        DiscoveryView {
            category: self.category.clone(),
            current: self.queue.current().cloned(),
            offset: self.tracker.offset(),
            hint: self.tracker.hint(),
            progress: self.queue.progress(),
            animating: self.resolver.in_flight(),
            matched: self.pending_match.as_ref().map(|m| m.candidate.clone()),
            exhausted: self.queue.is_exhausted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::FixedDecider;
    use crate::models::{Conversation, Role};

    fn candidate(id: &str, will_match: bool) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Candidate {}", id),
            role: Role::Mentor,
            category: "technology".to_string(),
            university: String::new(),
            major: String::new(),
            year: 3,
            images: vec![format!("https://img/{}.jpg", id)],
            bio: String::new(),
            interests: vec![],
            will_match,
        }
    }

    fn session(matches: bool, candidates: Vec<Candidate>) -> DiscoverySession {
        let mut session =
            DiscoverySession::new(SessionConfig::default(), MatchPolicy::new(FixedDecider(matches)));
        session.load("technology", candidates);
        session
    }

    fn drag(session: &mut DiscoverySession, dx: f64) -> SwipeEvent {
        session.pointer_down(Point::new(200.0, 300.0));
        session.pointer_move(Point::new(200.0 + dx / 2.0, 305.0));
        session.pointer_move(Point::new(200.0 + dx, 310.0));
        session.pointer_up()
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut session = session(false, vec![candidate("a", false)]);
        let mut sink: Vec<Conversation> = Vec::new();

        assert_eq!(drag(&mut session, 50.0), SwipeEvent::SnappedBack);
        assert_eq!(session.drag_offset(), DragOffset::ZERO);
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_animating());
        assert!(session.settle(&mut sink).is_ignored());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_pass_settles_and_advances() {
        let mut session = session(true, vec![candidate("a", false), candidate("b", false)]);
        let mut sink: Vec<Conversation> = Vec::new();

        assert_eq!(session.press_pass(), SwipeEvent::Animating { action: SwipeAction::Pass });
        // Nothing moves until the animation settles
        assert_eq!(session.cursor(), 0);

        let event = session.settle(&mut sink);
        assert_eq!(
            event,
            SwipeEvent::Settled { candidate_id: "a".to_string(), verdict: Verdict::Passed }
        );
        assert_eq!(session.cursor(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_busy_guard_drops_second_resolution() {
        let mut session = session(false, vec![candidate("a", false), candidate("b", false)]);
        let mut sink: Vec<Conversation> = Vec::new();

        session.press_like();
        assert_eq!(session.press_pass(), SwipeEvent::ignored(IgnoreReason::Busy));
        assert_eq!(session.press_like(), SwipeEvent::ignored(IgnoreReason::Busy));
        assert_eq!(
            session.pointer_down(Point::new(0.0, 0.0)),
            SwipeEvent::ignored(IgnoreReason::Busy)
        );

        session.settle(&mut sink);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].action, SwipeAction::Like);
    }

    #[test]
    fn test_match_blocks_until_acknowledged() {
        let mut session = session(false, vec![candidate("a", true), candidate("b", false)]);
        let mut sink: Vec<Conversation> = Vec::new();

        session.press_like();
        let event = session.settle(&mut sink);
        assert!(matches!(event, SwipeEvent::Matched { ref candidate_id, .. } if candidate_id == "a"));
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.view().matched.unwrap().id, "a");

        assert_eq!(session.press_pass(), SwipeEvent::ignored(IgnoreReason::MatchPending));

        assert_eq!(
            session.acknowledge_match(),
            SwipeEvent::Acknowledged { candidate_id: "a".to_string() }
        );
        assert_eq!(session.current_candidate().unwrap().id, "b");
        assert_eq!(session.acknowledge_match(), SwipeEvent::ignored(IgnoreReason::NoPendingMatch));
    }

    #[test]
    fn test_exhausted_queue_is_terminal() {
        let mut session = session(false, vec![]);
        assert!(session.is_exhausted());
        assert_eq!(session.press_like(), SwipeEvent::ignored(IgnoreReason::Exhausted));
        assert_eq!(
            session.pointer_down(Point::new(0.0, 0.0)),
            SwipeEvent::ignored(IgnoreReason::Exhausted)
        );
        assert!(session.view().exhausted);
        assert!(session.view().current.is_none());
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut session = session(false, vec![candidate("a", false)]);
        assert_eq!(
            session.pointer_move(Point::new(10.0, 0.0)),
            SwipeEvent::ignored(IgnoreReason::NoGesture)
        );
        assert_eq!(session.pointer_up(), SwipeEvent::ignored(IgnoreReason::NoGesture));
    }

    #[test]
    fn test_nan_sample_does_not_commit_a_swipe() {
        let mut session = session(false, vec![candidate("a", false)]);

        assert_eq!(
            session.pointer_down(Point::new(f64::NAN, 0.0)),
            SwipeEvent::ignored(IgnoreReason::InvalidSample)
        );

        session.pointer_down(Point::new(0.0, 0.0));
        assert_eq!(
            session.pointer_move(Point::new(f64::NAN, 0.0)),
            SwipeEvent::ignored(IgnoreReason::InvalidSample)
        );
        assert_eq!(session.pointer_up(), SwipeEvent::SnappedBack);
        assert!(!session.is_animating());
        assert_eq!(session.cursor(), 0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_drag_reports_hint() {
        let mut session = session(false, vec![candidate("a", false)]);
        session.pointer_down(Point::new(0.0, 0.0));

        let event = session.pointer_move(Point::new(-45.0, 0.0));
        assert_eq!(
            event,
            SwipeEvent::Dragged {
                offset: DragOffset { x: -45.0, y: 0.0 },
                hint: Some(SwipeHint::Pass),
            }
        );
    }

    #[test]
    fn test_reload_keeps_ledgers() {
        let mut session = session(false, vec![candidate("a", false)]);
        let mut sink: Vec<Conversation> = Vec::new();

        session.press_pass();
        session.settle(&mut sink);
        session.load("finance", vec![candidate("b", false)]);

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.category(), Some("finance"));

        session.reset();
        assert!(session.category().is_none());
        assert!(session.is_exhausted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_after_delay_waits() {
        let mut session = session(false, vec![candidate("a", false)]);
        let mut sink: Vec<Conversation> = Vec::new();

        session.press_pass();
        let started = tokio::time::Instant::now();
        let event = session.settle_after_delay(&mut sink).await;

        assert!(started.elapsed() >= DEFAULT_SETTLE_DELAY);
        assert!(matches!(event, SwipeEvent::Settled { verdict: Verdict::Passed, .. }));
    }
}
