/// Which of the two timers an event or effect refers to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Delay,
    Sound,
}

/// Outcome of a single timer period
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerStep {
    /// The timer wasn't running; nothing changed
    Idle,
    /// The timer counted down and wants another tick after one more period
    Rescheduled,
    /// The timer reached or was observed at 0 and stopped running
    Stopped,
}

/// # Timer
/// An 8-bit countdown register decremented once per 60Hz period.
///
/// The timer doesn't keep time itself. Starting it asks the owner to schedule
/// a tick one period later and every `Rescheduled` step asks for another;
/// a timer that isn't running ignores ticks, which makes late ticks from a
/// previous program harmless.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    value: u8,
    running: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sets the timer's value.
    ///
    /// Returns `true` if this started the timer, in which case its first tick
    /// needs to be scheduled. An already running timer keeps its pending tick.
    pub fn set(&mut self, value: u8) -> bool {
        self.value = value;
        if value > 0 && !self.running {
            self.running = true;
            return true;
        }
        false
    }

    /// Advances the timer by one period
    pub fn step(&mut self) -> TimerStep {
        if !self.running {
            return TimerStep::Idle;
        }
        if self.value == 0 {
            self.running = false;
            return TimerStep::Stopped;
        }
        self.value -= 1;
        if self.value > 0 {
            TimerStep::Rescheduled
        } else {
            self.running = false;
            TimerStep::Stopped
        }
    }
}

/// The delay and sound timers
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: Timer,
    pub sound: Timer,
}

impl Timers {
    pub fn get(&self, kind: TimerKind) -> &Timer {
        match kind {
            TimerKind::Delay => &self.delay,
            TimerKind::Sound => &self.sound,
        }
    }

    pub fn get_mut(&mut self, kind: TimerKind) -> &mut Timer {
        match kind {
            TimerKind::Delay => &mut self.delay,
            TimerKind::Sound => &mut self.sound,
        }
    }
}
