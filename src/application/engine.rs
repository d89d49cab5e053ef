use std::time::{Duration, Instant};

use log::trace;

use super::Application;
use crate::errors::Result;

/// Information about the frame being produced.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Index of this frame, starting from 0.
    pub frame: u64,
    /// Wall time the previous frame took.
    pub duration: Duration,
}

/// `Engine` sequences the frames of an `Application`. It does not own a loop; the
/// host calls `advance` once per produced frame.
#[derive(Debug, Default)]
pub struct Engine {
    info: FrameInfo,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    /// Information about the next frame to be produced.
    #[inline]
    pub fn frame_info(&self) -> FrameInfo {
        self.info
    }

    /// Produces exactly one frame: update, render, then post-render.
    pub fn advance<T: Application>(&mut self, application: &mut T) -> Result<FrameInfo> {
        let ts = Instant::now();
        let info = self.info;

        trace!("[Engine] frame {} begins.", info.frame);
        application.on_update(&info)?;
        application.on_render(&info)?;
        application.on_post_render(&info)?;

        self.info = FrameInfo {
            frame: info.frame + 1,
            duration: ts.elapsed(),
        };

        Ok(info)
    }

    /// Produces `n` frames in a row. Stops at the first failing frame.
    pub fn run_frames<T: Application>(&mut self, application: &mut T, n: usize) -> Result<()> {
        for _ in 0..n {
            self.advance(application)?;
        }

        Ok(())
    }
}
