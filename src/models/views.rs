use serde::Serialize;

use crate::core::{
    gesture::{DragOffset, SwipeHint},
    queue::Progress,
};
use crate::models::{Candidate, SwipeAction};

/// Everything the card stack needs to render one frame
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryView {
    pub category: Option<String>,
    /// `None` with `exhausted` set is the end-of-queue screen
    pub current: Option<Candidate>,
    pub offset: DragOffset,
    pub hint: Option<SwipeHint>,
    pub progress: Option<Progress>,
    pub animating: Option<SwipeAction>,
    /// Candidate shown in the match notice until acknowledged
    pub matched: Option<Candidate>,
    pub exhausted: bool,
}
