//! A unified frame model for hosts that drive the scene from a render loop.
//!
//! ## Application
//!
//! The host (usually the renderer's per-frame callback) owns the loop. To hide
//! the details of the hosting platform, we offer a trait `Application` which
//! defines a simple per-frame state model. Its methods are called in a
//! pre-determined order once per produced frame.
//!
//! # Engine
//!
//! `Engine` is where one frame actually gets sequenced: update, then render
//! (the scene traversal), then post-render, where work deferred during the
//! frame is carried out.

mod engine;

pub use self::engine::{Engine, FrameInfo};

use crate::errors::Result;

/// `Application` is a user-friendly facade to building application, which defines a number
/// of event functions that get executed in a pre-determined order.
pub trait Application {
    /// `Application::on_update` is called every frame. Its the main workhorse
    /// function for frame updates.
    fn on_update(&mut self, _: &FrameInfo) -> Result<()> {
        Ok(())
    }

    /// `Application::on_render` is called when the scene is traversed for rendering.
    /// The scene must not be restructured from here.
    fn on_render(&mut self, _: &FrameInfo) -> Result<()> {
        Ok(())
    }

    /// `Application::on_post_render` is called after the traversal has completed, and
    /// before the next frame starts.
    fn on_post_render(&mut self, _: &FrameInfo) -> Result<()> {
        Ok(())
    }
}
