use std::time::Duration;

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, UnknownOpcodePolicy};
use crate::constants::{PROGRAM_START, TIMER_PERIOD};
use crate::display::FrameBuffer;
use crate::error::{Chip8Error, Result};
use crate::instruction::from_op;
use crate::state::{RunState, State};
use crate::timer::{TimerKind, TimerStep, Timers};

/// Something that happened in the outside world
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Execute `Config::instructions_per_tick` instructions
    CpuTick,
    /// A tick previously requested through `Effect::ScheduleTimer`
    TimerTick { timer: TimerKind, epoch: u32 },
    KeyDown(u8),
    KeyUp(u8),
    /// Program bytes to run from 0x200
    ProgramLoaded(Vec<u8>),
    /// The loader couldn't produce a program
    ProgramLoadFailed(String),
}

/// Something the outside world should do in response to an `Event`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// The display changed and should be redrawn
    Render(FrameBuffer),
    /// The sound timer is active for another period
    PlaySound,
    /// Deliver `Event::TimerTick { timer, epoch }` once `after` has elapsed
    ScheduleTimer {
        timer: TimerKind,
        epoch: u32,
        after: Duration,
    },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `epoch` of the loaded program, which invalidates timer ticks scheduled for older ones
///
/// Every interaction goes through `handle`, which runs to completion and returns the
/// effects the caller is responsible for dispatching:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
pub struct Chip8 {
    state: State,
    config: Config,
    rng: StdRng,
    epoch: u32,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            config,
            rng,
            epoch: 0,
        }
    }

    /// Applies a single event to the interpreter
    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>> {
        match event {
            Event::CpuTick => self.tick(self.config.instructions_per_tick),
            Event::TimerTick { timer, epoch } => Ok(self.tick_timer(timer, epoch)),
            Event::KeyDown(key) => {
                self.key_press(key);
                Ok(Vec::new())
            }
            Event::KeyUp(key) => {
                self.key_release(key);
                Ok(Vec::new())
            }
            Event::ProgramLoaded(program) => self.load_program(&program),
            Event::ProgramLoadFailed(reason) => self.load_failed(reason),
        }
    }

    /// Resets the machine and loads `program` at 0x200.
    ///
    /// On failure the machine is left reset and `Stopped`.
    pub fn load_program(&mut self, program: &[u8]) -> Result<Vec<Effect>> {
        self.reset();
        if let Err(e) = self.state.memory.load(program, PROGRAM_START) {
            debug!("rejected program: {}", e);
            return Err(e);
        }
        self.state.run_state = RunState::Running;
        info!("loaded {} byte program", program.len());
        Ok(vec![Effect::Render(self.state.display.frame())])
    }

    /// Records that the loader couldn't produce a program
    pub fn load_failed(&mut self, reason: String) -> Result<Vec<Effect>> {
        self.reset();
        debug!("program load failed: {}", reason);
        Err(Chip8Error::ProgramLoad(reason))
    }

    /// Replaces the whole state; timers scheduled before this are now stale
    fn reset(&mut self) {
        self.state = State::new();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if let Some((register, key)) = self.state.keypad.press(key) {
            debug!("captured key {:X} into v{:X}", key, register);
            self.state.registers.set_v(register, key);
            if self.state.run_state == RunState::WaitingForKey {
                self.state.run_state = RunState::Running;
            }
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad.release(key);
    }

    /// Advances the CPU by up to `count` instructions
    /// - does nothing unless running; in particular while awaiting a keypress
    /// - stops early if an instruction starts waiting for a key
    /// - halts on a fatal error and returns it
    pub fn tick(&mut self, count: u32) -> Result<Vec<Effect>> {
        if self.state.run_state != RunState::Running {
            return Ok(Vec::new());
        }

        let timers = self.state.timers;
        self.state.draw_flag = false;
        for _ in 0..count {
            if self.state.run_state != RunState::Running {
                break;
            }
            if let Err(e) = self.advance_cpu() {
                info!("halting: {}", e);
                self.state.run_state = RunState::Halted;
                return Err(e);
            }
        }

        let mut effects = Vec::new();
        if self.state.draw_flag {
            effects.push(Effect::Render(self.state.display.frame()));
        }
        effects.extend(self.started_timers(&timers));
        Ok(effects)
    }

    /// Gets and executes the next opcode
    fn advance_cpu(&mut self) -> Result<()> {
        let address = self.state.registers.pc;
        let op = self.state.memory.read_word(address);
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.registers.all_v(),
            self.state.registers.i,
            address
        );
        self.state.registers.advance();

        match (from_op(&op), self.config.unknown_opcode) {
            (Some(operation), _) => {
                self.state = operation(&op, &self.state, &mut self.rng)?;
                Ok(())
            }
            (None, UnknownOpcodePolicy::Skip) => {
                warn!("skipping unknown opcode {:04X} at {:03X}", op, address);
                Ok(())
            }
            (None, UnknownOpcodePolicy::Halt) => Err(Chip8Error::UnknownOpcode {
                opcode: op,
                address,
            }),
        }
    }

    /// Schedules the first tick of any timer that wasn't running in `before`
    fn started_timers(&self, before: &Timers) -> Vec<Effect> {
        [TimerKind::Delay, TimerKind::Sound]
            .iter()
            .filter(|kind| {
                !before.get(**kind).is_running() && self.state.timers.get(**kind).is_running()
            })
            .map(|kind| {
                debug!("starting {:?} timer", kind);
                self.schedule(*kind)
            })
            .collect()
    }

    fn schedule(&self, timer: TimerKind) -> Effect {
        Effect::ScheduleTimer {
            timer,
            epoch: self.epoch,
            after: TIMER_PERIOD,
        }
    }

    /// Advances one timer by a single period
    /// - ticks scheduled for a previously loaded program are ignored
    /// - the sound timer asks for a sound while it counts down
    pub fn tick_timer(&mut self, kind: TimerKind, epoch: u32) -> Vec<Effect> {
        if epoch != self.epoch {
            trace!("ignoring {:?} timer tick from epoch {}", kind, epoch);
            return Vec::new();
        }

        let mut effects = Vec::new();
        let timer = self.state.timers.get_mut(kind);
        if kind == TimerKind::Sound && timer.is_running() && timer.value() > 0 {
            effects.push(Effect::PlaySound);
        }
        match timer.step() {
            TimerStep::Rescheduled => effects.push(self.schedule(kind)),
            TimerStep::Stopped => debug!("{:?} timer stopped", kind),
            TimerStep::Idle => {}
        }
        effects
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn frame(&self) -> FrameBuffer {
        self.state.display.frame()
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    /// Increases every time a program is loaded
    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
