use crate::core::gesture::DragOffset;
use crate::models::SwipeAction;

/// Default horizontal distance a drag must cover to count as a swipe
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 100.0;

/// Outcome of measuring a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragResolution {
    Resolved(SwipeAction),
    /// Below threshold, the card goes back to rest
    Rejected,
}

/// Decides like/pass from a drag or a button and guards against double resolution
///
/// Only one resolution can be in flight at a time. It stays armed until the
/// swipe-out animation has been settled with [`SwipeResolver::finish`].
#[derive(Debug, Clone)]
pub struct SwipeResolver {
    threshold: f64,
    in_flight: Option<SwipeAction>,
}

impl SwipeResolver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            in_flight: None,
        }
    }

    /// Measure a finished drag against the swipe threshold
    #[inline]
    pub fn resolve_drag(&self, offset: DragOffset) -> DragResolution {
        if !offset.x.is_finite() || offset.x.abs() < self.threshold {
            return DragResolution::Rejected;
        }

        if offset.x > 0.0 {
            DragResolution::Resolved(SwipeAction::Like)
        } else {
            DragResolution::Resolved(SwipeAction::Pass)
        }
    }

    /// Arm the busy guard for `action`; false if another resolution is in flight
    pub fn begin(&mut self, action: SwipeAction) -> bool {
        if self.in_flight.is_some() {
            tracing::debug!("Dropping {:?}, {:?} still animating", action, self.in_flight);
            return false;
        }
        self.in_flight = Some(action);
        true
    }

    /// Disarm the guard and return the action that was in flight
    pub fn finish(&mut self) -> Option<SwipeAction> {
        self.in_flight.take()
    }

    pub fn in_flight(&self) -> Option<SwipeAction> {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for SwipeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}
