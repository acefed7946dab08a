// Discovery engine exports
pub mod emitter;
pub mod gesture;
pub mod policy;
pub mod queue;
pub mod resolver;
pub mod session;

pub use emitter::{ConversationEmitter, ConversationSink, RematchPolicy};
pub use gesture::{DragOffset, GestureTracker, Point, SwipeHint};
pub use policy::{FixedDecider, MatchDecider, MatchPolicy, PolicyOutcome, RandomDecider};
pub use queue::{CandidateQueue, Progress};
pub use resolver::{DragResolution, SwipeResolver};
pub use session::{DiscoverySession, IgnoreReason, SessionConfig, SwipeEvent};
