//! The scene graph substrate: entities, their hierarchy and transforms, and the
//! shapes attached to them.

#[macro_use]
extern crate airsketch;

pub mod errors;
pub mod renderable;
pub mod scene;
pub mod spatial;
pub mod tags;
pub mod utils;

pub mod prelude {
    pub use super::errors::{Error, Result};
    pub use super::renderable::prelude::*;
    pub use super::scene::Scene;
    pub use super::spatial::prelude::*;
    pub use super::Entity;
}

impl_handle!(Entity);
