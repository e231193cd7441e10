use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the layer that owns the scene.
///
/// The runtime has no stop condition of its own; the loop runs until the
/// app returns `Exit`, pushes a command through `RuntimeCtx`, or the window
/// is closed.
pub trait App {
    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
