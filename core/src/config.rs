use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_INSTRUCTIONS_PER_TICK;

/// What the interpreter does when it fetches a word that isn't an instruction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Stop executing and report `Chip8Error::UnknownOpcode`
    Halt,
    /// Log the word and carry on with the one after it
    Skip,
}

impl FromStr for UnknownOpcodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "halt" => Ok(UnknownOpcodePolicy::Halt),
            "skip" => Ok(UnknownOpcodePolicy::Skip),
            other => Err(format!("expected `halt` or `skip` but got `{}`", other)),
        }
    }
}

impl fmt::Display for UnknownOpcodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownOpcodePolicy::Halt => write!(f, "halt"),
            UnknownOpcodePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Interpreter settings
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed for every `Event::CpuTick`
    pub instructions_per_tick: u32,
    pub unknown_opcode: UnknownOpcodePolicy,
    /// Seeds the random number generator; entropy is used when unset
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions_per_tick: DEFAULT_INSTRUCTIONS_PER_TICK,
            unknown_opcode: UnknownOpcodePolicy::Halt,
            seed: None,
        }
    }
}
