//! Hierarchical transforms.
//!
//! Every entity of a `SceneGraph` has a local `Transform` relative to its parent.
//! The world transform of a node is the composition of its ancestors' local
//! transforms with its own, all the way up to its root.

pub mod graph;
pub mod node;
pub mod transform;

pub mod prelude {
    pub use super::graph::SceneGraph;
    pub use super::node::Node;
    pub use super::transform::Transform;
}
