//! Delay and sound timers, and the clock that paces instructions and timer ticks.

use std::time::Duration;

/// Timer decay rate, in ticks per second.
pub const TIMER_HZ: u32 = 60;
pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;
/// Fastest rate with a nonzero instruction period.
pub const MAX_INSTRUCTIONS_PER_SECOND: u32 = 1_000_000_000;

/// What drives the timers down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// One decrement per 60 Hz clock tick.
    Clock,
    /// One decrement per executed instruction, for programs tuned to that.
    PerInstruction,
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Clock
    }
}

impl std::str::FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clock" => Ok(TimerMode::Clock),
            "instruction" => Ok(TimerMode::PerInstruction),
            other => Err(format!("unknown timer mode '{}', expected clock or instruction", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrement each nonzero timer by one.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// The buzzer sounds while the sound timer is nonzero.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

/// Converts elapsed wall time into instruction steps and timer ticks,
/// carrying the remainders over to the next call.
#[derive(Debug, Clone)]
pub struct Clock {
    instructions_per_second: u32,
    instruction_debt: Duration,
    tick_debt: Duration,
}

impl Clock {
    pub fn new(instructions_per_second: u32) -> Clock {
        Clock {
            instructions_per_second: instructions_per_second.max(1).min(MAX_INSTRUCTIONS_PER_SECOND),
            instruction_debt: Duration::default(),
            tick_debt: Duration::default(),
        }
    }

    pub fn instruction_period(&self) -> Duration {
        Duration::from_secs(1) / self.instructions_per_second
    }

    pub fn tick_period() -> Duration {
        Duration::from_secs(1) / TIMER_HZ
    }

    /// Account for `elapsed` time and return `(steps, ticks)` now due.
    pub fn advance(&mut self, elapsed: Duration) -> (u32, u32) {
        self.instruction_debt += elapsed;
        self.tick_debt += elapsed;
        let period = self.instruction_period();
        let steps = drain(&mut self.instruction_debt, period);
        let ticks = drain(&mut self.tick_debt, Self::tick_period());
        (steps, ticks)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new(DEFAULT_INSTRUCTIONS_PER_SECOND)
    }
}

fn drain(debt: &mut Duration, period: Duration) -> u32 {
    if period == Duration::default() {
        return 0;
    }
    let count = (debt.as_nanos() / period.as_nanos()).min(u32::MAX as u128) as u32;
    *debt -= period * count;
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_stop_at_zero() {
        let mut timers = Timers { delay: 2, sound: 1 };
        timers.tick();
        assert_eq!(timers, Timers { delay: 1, sound: 0 });
        assert!(!timers.sound_active());
        timers.tick();
        timers.tick();
        assert_eq!(timers, Timers::default());
    }

    #[test]
    fn one_second_yields_rate_steps_and_sixty_ticks() {
        let mut clock = Clock::new(600);
        let (steps, ticks) = clock.advance(Duration::from_secs(1));
        assert_eq!(steps, 600);
        assert_eq!(ticks, 60);
    }

    #[test]
    fn remainders_carry_over() {
        let mut clock = Clock::new(100);
        assert_eq!(clock.advance(Duration::from_millis(15)), (1, 0));
        assert_eq!(clock.advance(Duration::from_millis(5)), (1, 1));
    }

    #[test]
    fn excessive_rates_are_clamped() {
        let mut clock = Clock::new(u32::MAX);
        assert_eq!(clock.instruction_period(), Duration::from_nanos(1));
        assert_eq!(clock.advance(Duration::from_micros(1)), (1000, 0));
    }

    #[test]
    fn zero_period_drains_nothing() {
        let mut debt = Duration::from_millis(1);
        assert_eq!(drain(&mut debt, Duration::default()), 0);
        assert_eq!(debt, Duration::from_millis(1));
    }

    #[test]
    fn timer_mode_parses() {
        assert_eq!("clock".parse::<TimerMode>(), Ok(TimerMode::Clock));
        assert_eq!("instruction".parse::<TimerMode>(), Ok(TimerMode::PerInstruction));
        assert!("wall".parse::<TimerMode>().is_err());
    }
}
