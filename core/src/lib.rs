//! An interpreter for Chip-8 programs with no I/O of its own.
//!
//! The outside world feeds `Event`s to `Chip8::handle` and dispatches the
//! `Effect`s it returns: drawing frames, playing sound and scheduling timer ticks.

pub use chip8::{Chip8, Effect, Event};
pub use config::{Config, UnknownOpcodePolicy};
pub use display::FrameBuffer;
pub use error::{Chip8Error, Result};
pub use state::{RunState, State};
pub use timer::TimerKind;

mod chip8;
pub mod config;
pub mod constants;
pub mod display;
mod error;
mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod state;
pub mod timer;
