use serde::{Deserialize, Serialize};

/// Default offset beyond which a directional hint is shown
pub const DEFAULT_HINT_THRESHOLD_PX: f64 = 30.0;

/// A pointer or touch sample in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Card displacement relative to where the gesture started
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragOffset {
    pub x: f64,
    pub y: f64,
}

impl DragOffset {
    pub const ZERO: DragOffset = DragOffset { x: 0.0, y: 0.0 };

    pub fn between(start: Point, current: Point) -> Self {
        Self {
            x: current.x - start.x,
            y: current.y - start.y,
        }
    }
}

/// Visual leaning of the card while dragging. Carries no decision authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeHint {
    Like,
    Pass,
}

/// Turns a start/move/end sample stream into a drag offset
///
/// Samples outside a start..end bracket are ignored, as are samples with a
/// non-finite coordinate.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    start: Option<Point>,
    offset: DragOffset,
    hint_threshold: f64,
}

impl GestureTracker {
    pub fn new(hint_threshold: f64) -> Self {
        Self {
            start: None,
            offset: DragOffset::ZERO,
            hint_threshold,
        }
    }

    /// Begin tracking. A start while already active restarts from `point`.
    ///
    /// Returns false, leaving the tracker untouched, for a non-finite point.
    pub fn start(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            return false;
        }
        self.start = Some(point);
        self.offset = DragOffset::ZERO;
        true
    }

    /// Feed a move sample; `None` when no gesture is active or the sample is unusable
    pub fn update(&mut self, point: Point) -> Option<DragOffset> {
        let start = self.start?;
        if !point.is_finite() {
            return None;
        }
        self.offset = DragOffset::between(start, point);
        Some(self.offset)
    }

    /// Finish the gesture and hand back the final offset
    ///
    /// The offset stays visible until the caller resets it or the card is
    /// swiped out.
    pub fn end(&mut self) -> Option<DragOffset> {
        self.start.take().map(|_| self.offset)
    }

    /// Snap the card back to rest and drop any active gesture
    pub fn reset(&mut self) {
        self.start = None;
        self.offset = DragOffset::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn offset(&self) -> DragOffset {
        self.offset
    }

    pub fn hint(&self) -> Option<SwipeHint> {
        if self.offset.x > self.hint_threshold {
            Some(SwipeHint::Like)
        } else if self.offset.x < -self.hint_threshold {
            Some(SwipeHint::Pass)
        } else {
            None
        }
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HINT_THRESHOLD_PX)
    }
}
