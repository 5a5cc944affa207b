use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use octet_core::constants::DEFAULT_INSTRUCTIONS_PER_TICK;
use octet_core::{Config, UnknownOpcodePolicy};

use crate::run::RunOptions;

/// CPU ticks per second; at two instructions per tick this is roughly 500 instructions a second
const DEFAULT_HZ: u32 = 250;

/// Runs a Chip-8 program
#[derive(Parser, Debug)]
#[command(name = "octet", version, about)]
pub struct Args {
    /// Path to the program to run
    pub rom: PathBuf,

    /// CPU ticks per second
    #[arg(long, default_value_t = DEFAULT_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    pub hz: u32,

    /// Instructions executed per CPU tick
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_TICK)]
    pub instructions_per_tick: u32,

    /// What to do with words that aren't instructions (halt or skip)
    #[arg(long, default_value_t = UnknownOpcodePolicy::Halt)]
    pub unknown_opcode: UnknownOpcodePolicy,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many CPU ticks
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Run as fast as possible instead of at `--hz`
    #[arg(long)]
    pub fast: bool,

    /// Open a window instead of printing the final frame
    #[cfg(feature = "sdl")]
    #[arg(long)]
    pub sdl: bool,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            instructions_per_tick: self.instructions_per_tick,
            unknown_opcode: self.unknown_opcode,
            seed: self.seed,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            cycle_time: Duration::from_secs(1) / self.hz,
            max_cycles: self.cycles,
            fast_forward: self.fast,
        }
    }
}
