use std::error::Error;

use octet_core::FrameBuffer;

/// Input gathered by a frontend since it was last polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    KeyDown(u8),
    KeyUp(u8),
    Quit,
}

/// # Frontend
/// Everything the run loop needs from the outside world.
///
/// The interpreter doesn't know how frames are shown, where sound goes or
/// where key presses come from; a frontend provides all three.
pub trait Frontend {
    /// Shows a frame; only called when the frame changed
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), Box<dyn Error>>;

    /// The sound timer is active for one more period
    fn beep(&mut self);

    /// Returns the input received since the last poll
    fn poll(&mut self) -> Vec<Input>;

    /// Called once when the run loop exits, with the final frame
    fn finish(&mut self, _frame: &FrameBuffer) {}
}
