use std::error::Error;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use octet_core::{Chip8, Effect, Event};

use crate::frontend::{Frontend, Input};
use crate::scheduler::TimerQueue;

/// How the run loop paces the interpreter
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Time between two `CpuTick`s
    pub cycle_time: Duration,
    /// Stop after this many `CpuTick`s
    pub max_cycles: Option<u64>,
    /// Don't wait out the remainder of each cycle
    pub fast_forward: bool,
}

/// Drives `chip8` until the frontend quits, the cycle limit is reached or the
/// interpreter halts.
///
/// Time is kept on a clock that advances one `cycle_time` per CPU tick; timer
/// ticks are delivered when that clock passes their deadline. Unless fast
/// forwarding, each cycle sleeps so the clock keeps pace with the wall clock.
pub fn run(
    chip8: &mut Chip8,
    frontend: &mut dyn Frontend,
    initial_effects: Vec<Effect>,
    options: &RunOptions,
) -> Result<(), Box<dyn Error>> {
    let mut timers = TimerQueue::new();
    let started = Instant::now();
    let mut clock = Duration::ZERO;
    let mut cycles: u64 = 0;

    dispatch(frontend, &mut timers, clock, initial_effects)?;

    let result: Result<(), Box<dyn Error>> = 'event: loop {
        if options.max_cycles.map_or(false, |max| cycles >= max) {
            info!("stopping after {} cycles", cycles);
            break Ok(());
        }

        // Handle input
        for input in frontend.poll() {
            let event = match input {
                Input::KeyDown(key) => Event::KeyDown(key),
                Input::KeyUp(key) => Event::KeyUp(key),
                Input::Quit => break 'event Ok(()),
            };
            let effects = chip8.handle(event)?;
            dispatch(frontend, &mut timers, clock, effects)?;
        }

        // Timers scheduled from a due tick are measured from its deadline so they don't drift
        while let Some(tick) = timers.pop_due(clock) {
            let effects = chip8.handle(Event::TimerTick {
                timer: tick.timer,
                epoch: tick.epoch,
            })?;
            dispatch(frontend, &mut timers, tick.due, effects)?;
        }

        // Update state
        match chip8.handle(Event::CpuTick) {
            Ok(effects) => dispatch(frontend, &mut timers, clock, effects)?,
            Err(e) => {
                error!("interpreter halted: {}", e);
                break Err(e.into());
            }
        }
        cycles += 1;
        clock += options.cycle_time;

        // Handle timing
        if !options.fast_forward {
            let elapsed = started.elapsed();
            if clock > elapsed {
                std::thread::sleep(clock - elapsed);
            }
        }
    };

    debug!("{} timer ticks still pending", timers.len());
    frontend.finish(&chip8.frame());
    result
}

/// Carries out the effects returned by the interpreter at `now`
fn dispatch(
    frontend: &mut dyn Frontend,
    timers: &mut TimerQueue,
    now: Duration,
    effects: Vec<Effect>,
) -> Result<(), Box<dyn Error>> {
    for effect in effects {
        match effect {
            Effect::Render(frame) => frontend.render(&frame)?,
            Effect::PlaySound => frontend.beep(),
            Effect::ScheduleTimer {
                timer,
                epoch,
                after,
            } => timers.schedule(now + after, timer, epoch),
        }
    }
    Ok(())
}
