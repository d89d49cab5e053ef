//! The gesture vocabulary shared between a platform gesture classifier and the
//! modules that react to it.
//!
//! Recognition itself (press durations, swipe velocities, pinch thresholds) is
//! the job of the host platform. What arrives here are already classified
//! gestures:
//!
//! * `Hold` - a long press, reported when it begins and when it ends.
//! * `Tap` - a single tap at a screen position, in pixels.
//! * `Swipe` - a directional swipe.
//! * `Pinch` - an incremental scale factor since the last pinch event.

use serde::{Deserialize, Serialize};

use crate::math::Vector2;

/// The phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureState {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GestureState {
    /// Returns true if the gesture is still in progress after this phase.
    #[inline]
    pub fn is_active(self) -> bool {
        match self {
            GestureState::Began | GestureState::Changed => true,
            GestureState::Ended | GestureState::Cancelled => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Hold(GestureState),
    Tap {
        /// The tap position relative to the top-left corner of the view.
        position: Vector2<f32>,
    },
    Swipe(SwipeDirection),
    Pinch {
        /// The scale factor relative to the previous pinch event.
        scale: f32,
        state: GestureState,
    },
}
