use airsketch::application::{Application, FrameInfo};
use airsketch::errors::Result;
use airsketch_world::prelude::Renderer;

use crate::camera::CameraProvider;
use crate::session::SceneSession;

/// Drives a `SceneSession` from the frame callbacks of an `Engine`.
pub struct SketchApp<P, R> {
    session: SceneSession,
    camera: P,
    renderer: R,
}

impl<P, R> SketchApp<P, R>
where
    P: CameraProvider,
    R: Renderer,
{
    pub fn new(session: SceneSession, camera: P, renderer: R) -> Self {
        SketchApp {
            session,
            camera,
            renderer,
        }
    }

    #[inline]
    pub fn session(&self) -> &SceneSession {
        &self.session
    }

    #[inline]
    pub fn session_mut(&mut self) -> &mut SceneSession {
        &mut self.session
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut P {
        &mut self.camera
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<P, R> Application for SketchApp<P, R>
where
    P: CameraProvider,
    R: Renderer,
{
    fn on_update(&mut self, info: &FrameInfo) -> Result<()> {
        let pose = self.camera.pose(info);
        self.session.update(pose)
    }

    fn on_render(&mut self, _: &FrameInfo) -> Result<()> {
        self.session.draw(&mut self.renderer);
        Ok(())
    }

    fn on_post_render(&mut self, _: &FrameInfo) -> Result<()> {
        self.session.flush()?;
        Ok(())
    }
}
