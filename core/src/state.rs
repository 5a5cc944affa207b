use crate::display::Display;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timer::Timers;

/// Whether the interpreter is executing instructions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    /// No program has been loaded, or loading one failed
    Stopped,
    Running,
    /// Suspended until a key press is captured into the waiting register
    WaitingForKey,
    /// A fatal error stopped execution; only loading a program resumes it
    Halted,
}

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - `registers`: V0..VF, I, the program counter and the call stack
/// - `timers`: the delay and sound timers
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - 64x32 display
///
/// ## Input
/// - the pressed status of keys 0..F
/// - emulation halts while a key's value is waiting to be written to some register
#[derive(Copy, Clone)]
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub display: Display,
    pub keypad: Keypad,
    pub timers: Timers,
    pub run_state: RunState,
    /// Set by instructions that change the display
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        State {
            memory: Memory::new(),
            registers: Registers::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            timers: Timers::default(),
            run_state: RunState::Stopped,
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
