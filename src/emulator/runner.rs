//! The host loop: feeds input to the machine, steps it at the
//! instruction rate, ticks timers and presents frames at 60 Hz.

use crate::emulator::emulator::Emulator;
use crate::emulator::error::ExecError;
use crate::emulator::input::{EmulatorInput, KeyEvent};
use crate::emulator::output::EmulatorOutput;
use crate::emulator::timer::{Clock, TimerMode};

use rand::RngCore;
use std::io;
use std::time::{Duration, Instant};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("execution stopped: {0}")]
    Exec(#[from] ExecError),
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub steps: u64,
    pub ticks: u64,
}

pub struct Runner<I: EmulatorInput, O: EmulatorOutput, R: RngCore> {
    emulator: Emulator<R>,
    input: I,
    output: O,
    clock: Clock,
    stats: RunStats,
}

impl<I: EmulatorInput, O: EmulatorOutput, R: RngCore> Runner<I, O, R> {
    pub fn new(emulator: Emulator<R>, input: I, output: O, clock: Clock) -> Self {
        Runner {
            emulator,
            input,
            output,
            clock,
            stats: RunStats::default(),
        }
    }

    pub fn emulator(&self) -> &Emulator<R> {
        &self.emulator
    }

    pub fn emulator_mut(&mut self) -> &mut Emulator<R> {
        &mut self.emulator
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Apply pending key events to the keypad.
    pub fn poll_input(&mut self) {
        while let Some(event) = self.input.poll() {
            log::debug!("{:?}", event);
            match event {
                KeyEvent::Pressed(key) => self.emulator.set_key(key, true),
                KeyEvent::Released(key) => self.emulator.set_key(key, false),
            }
        }
    }

    /// Catch the machine up on `elapsed` time. Each 60 Hz tick decrements
    /// the timers (unless they follow the instruction count) and presents a frame.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), RunError> {
        self.poll_input();

        let (steps, ticks) = self.clock.advance(elapsed);
        for _ in 0..steps {
            self.emulator.step()?;
            self.stats.steps += 1;
        }

        for _ in 0..ticks {
            if self.emulator.timer_mode() == TimerMode::Clock {
                self.emulator.tick_timers();
            }
            self.output.present(self.emulator.display())?;
            self.stats.ticks += 1;
        }

        Ok(())
    }

    /// Run in real time for `duration`, sleeping one instruction period between batches.
    pub fn run_for(&mut self, duration: Duration) -> Result<RunStats, RunError> {
        let start = Instant::now();
        let mut last = start;
        while start.elapsed() < duration {
            std::thread::sleep(self.clock.instruction_period());
            let now = Instant::now();
            self.advance(now - last)?;
            last = now;
        }
        Ok(self.stats)
    }

    pub fn into_parts(self) -> (Emulator<R>, I, O) {
        (self.emulator, self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::input::{DummyInput, HeldKeys};
    use crate::emulator::output::DummyOutput;
    use std::collections::VecDeque;

    #[test]
    fn one_second_runs_the_configured_rate() {
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0x12, 0x00]).unwrap(); // jump to self
        emulator.set_delay_timer(100);

        let mut runner = Runner::new(emulator, DummyInput, DummyOutput::new(), Clock::new(500));
        runner.advance(Duration::from_secs(1)).unwrap();

        assert_eq!(runner.stats(), RunStats { steps: 500, ticks: 60 });
        assert_eq!(runner.output().frames(), 60);
        assert_eq!(runner.emulator().delay_timer(), 40);
    }

    #[test]
    fn instruction_timers_ignore_the_clock() {
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0x12, 0x00]).unwrap();
        emulator.set_timer_mode(TimerMode::PerInstruction);
        emulator.set_delay_timer(255);

        let mut runner = Runner::new(emulator, DummyInput, DummyOutput::new(), Clock::new(100));
        runner.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(runner.emulator().delay_timer(), 155);
    }

    #[test]
    fn held_key_releases_wait() {
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0xF1, 0x0A, 0x12, 0x02]).unwrap();
        let mut runner = Runner::new(emulator, HeldKeys::new(vec![0x9]), DummyOutput::new(), Clock::new(60));
        runner.advance(Duration::from_millis(100)).unwrap();
        assert_eq!(runner.emulator().register(1), 0x9);
        assert_eq!(runner.emulator().program_counter(), 0x202);
    }

    #[test]
    fn released_keys_are_applied() {
        let emulator = Emulator::with_seed(1);
        let events: VecDeque<KeyEvent> = vec![KeyEvent::Pressed(3), KeyEvent::Pressed(4), KeyEvent::Released(3)]
            .into_iter()
            .collect();
        let mut runner = Runner::new(emulator, events, DummyOutput::new(), Clock::default());
        runner.poll_input();
        assert!(!runner.emulator().keypad().is_pressed(3));
        assert!(runner.emulator().keypad().is_pressed(4));
    }

    #[test]
    fn stack_fault_stops_the_run() {
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0x00, 0xEE]).unwrap();
        let mut runner = Runner::new(emulator, DummyInput, DummyOutput::new(), Clock::new(10));
        let result = runner.advance(Duration::from_secs(1));
        assert!(matches!(result, Err(RunError::Exec(ExecError::StackUnderflow { pc: 0x200 }))));
    }

    #[test]
    fn run_errors_wrap_their_cause() {
        let err = RunError::from(ExecError::StackOverflow { pc: 0x2fe });
        assert_eq!(err.to_string(), "execution stopped: stack overflow at 0x2fe");
        assert!(std::error::Error::source(&err).is_some());
    }
}
