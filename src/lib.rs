//! # What is This?
//!
//! `airsketch` is the small framework underneath a camera-tracked drawing tool. It
//! carries the pieces shared by every module of the workspace: versioned handles,
//! math re-exports, the gesture vocabulary, a post-frame task queue and the frame
//! driver that sequences one frame of work.
//!
//! The scene graph lives in `airsketch-world`, and the interactive drawing engine
//! in `airsketch-sketch`.

#[macro_use]
pub mod utils;
pub mod application;
pub mod errors;
pub mod input;
pub mod math;
pub mod sched;

pub mod prelude {
    pub use crate::application::{Application, Engine, FrameInfo};
    pub use crate::input::{GestureEvent, GestureState, SwipeDirection};
    pub use crate::math::prelude::*;
    pub use crate::sched::TaskQueue;
    pub use crate::utils::prelude::*;
}
