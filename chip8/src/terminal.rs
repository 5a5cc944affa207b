use std::error::Error;
use std::io::{self, Write};

use log::info;
use octet_core::FrameBuffer;

use crate::frontend::{Frontend, Input};

const LIT: char = '█';
const UNLIT: char = ' ';

/// # Terminal
/// A headless frontend that never produces input.
///
/// Only the last rendered frame is kept; it's printed to stdout when the run
/// loop exits. Each sound period rings the terminal bell on stderr.
#[derive(Default)]
pub struct Terminal {
    frames: u64,
    beeps: u64,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats a FrameBuffer as one line of text per row
    fn frame_to_text(frame: &FrameBuffer) -> String {
        frame
            .iter()
            .map(|row| {
                row.iter()
                    .map(|lit| if *lit { LIT } else { UNLIT })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Frontend for Terminal {
    fn render(&mut self, _frame: &FrameBuffer) -> Result<(), Box<dyn Error>> {
        self.frames += 1;
        Ok(())
    }

    fn beep(&mut self) {
        self.beeps += 1;
        let mut stderr = io::stderr();
        // a missed bell isn't worth stopping for
        let _ = stderr.write_all(b"\x07").and_then(|_| stderr.flush());
    }

    fn poll(&mut self) -> Vec<Input> {
        Vec::new()
    }

    fn finish(&mut self, frame: &FrameBuffer) {
        info!("rendered {} frames and {} sound periods", self.frames, self.beeps);
        println!("{}", Terminal::frame_to_text(frame));
    }
}
