use super::ctx::FrameCtx;

/// Control directive returned by `App::on_frame`.
///
/// This is the animation-frame handshake: the runtime only schedules another
/// redraw when the app asks for one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    /// Schedule the next frame at the display's refresh cadence.
    Continue,
    /// Do not schedule another frame; wake again on input.
    Idle,
    /// Close the window and leave the event loop.
    Exit,
}

/// Application contract implemented by the binary.
pub trait App {
    /// Called once per redraw. Input collected since the previous frame is
    /// available on `ctx.input_frame`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the event loop returns.
    fn on_exit(&mut self) {}
}
