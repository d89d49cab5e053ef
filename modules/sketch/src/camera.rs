use airsketch::application::FrameInfo;
use airsketch_world::prelude::Transform;

/// Supplies the live camera pose, once per frame.
pub trait CameraProvider {
    fn pose(&mut self, info: &FrameInfo) -> Transform;
}

/// A camera that never moves.
impl CameraProvider for Transform {
    fn pose(&mut self, _: &FrameInfo) -> Transform {
        *self
    }
}

/// Adapts a closure into a `CameraProvider`.
pub struct FnCamera<F>(pub F);

impl<F> CameraProvider for FnCamera<F>
where
    F: FnMut(&FrameInfo) -> Transform,
{
    fn pose(&mut self, info: &FrameInfo) -> Transform {
        (self.0)(info)
    }
}
