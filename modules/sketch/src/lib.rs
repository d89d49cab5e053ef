//! Freehand drawing and rigid relocation of point structures, in a scene tracked by
//! a live camera.
//!
//! A `SceneSession` keeps a cursor floating in front of the camera. Holding in pen
//! mode drops points at the cursor, which are committed into a structure anchored at
//! their centroid on release. In manipulator mode taps select structures, and holding
//! drags every selected structure along with the cursor, as one rigid group.
//!
//! Hierarchy changes never happen while the scene is traversed: they are deferred into
//! a task queue that is flushed at the end of each frame.

pub mod camera;
pub mod cursor;
pub mod draw;
pub mod driver;
pub mod errors;
pub mod grab;
pub mod hit;
pub mod kind;
pub mod selection;
pub mod session;
pub mod settings;
pub mod tool;

pub mod prelude {
    pub use crate::camera::{CameraProvider, FnCamera};
    pub use crate::draw::{DrawAccumulator, DrawState};
    pub use crate::driver::SketchApp;
    pub use crate::grab::{GrabState, SelectionGrouper};
    pub use crate::hit::{HitTest, RayHitTest};
    pub use crate::kind::{NodeKind, NodeKinds};
    pub use crate::selection::Selection;
    pub use crate::session::SceneSession;
    pub use crate::settings::{MarkerSettings, SketchSettings, ToolSettings};
    pub use crate::tool::{Tool, ToolMode};
}
