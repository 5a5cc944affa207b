use thiserror::Error;

/// Errors surfaced by the interpreter.
///
/// Out of range memory and display accesses never appear here: addresses are
/// masked to 12 bits and display coordinates wrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("stack overflow: call at {address:#05X} exceeds 16 nested subroutines")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("unable to load program: {0}")]
    ProgramLoad(String),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
