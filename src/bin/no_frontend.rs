use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use log::LevelFilter;
use structopt::StructOpt;

use chip8_vm::emulator::input::{key_for_char, HeldKeys};
use chip8_vm::emulator::output::DummyOutput;
use chip8_vm::emulator::runner::Runner;
use chip8_vm::emulator::timer::{Clock, TimerMode, DEFAULT_INSTRUCTIONS_PER_SECOND, MAX_INSTRUCTIONS_PER_SECOND};
use chip8_vm::emulator::Emulator;

/// Run a CHIP-8 program without a screen, then print the final display and registers.
#[derive(StructOpt, Debug)]
#[structopt(name = "no_frontend")]
struct Opt {
    /// Verbose mode (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Instructions executed per second
    #[structopt(long, default_value = "700")]
    ips: u32,

    /// What decrements the timers: `clock` (60 Hz) or `instruction`
    #[structopt(long, default_value = "clock")]
    timer_mode: TimerMode,

    /// How long to run, in seconds
    #[structopt(long, default_value = "5")]
    seconds: f64,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// Keys held down for the whole run, e.g. `qw` (1234/qwer/asdf/zxcv layout)
    #[structopt(long, default_value = "")]
    hold: String,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    // RUST_LOG still takes precedence when set
    let env = env_logger::Env::default().default_filter_or(log_level(verbose).to_string());
    env_logger::Builder::from_env(env).init();
}

fn instruction_rate(ips: u32) -> anyhow::Result<u32> {
    if ips == 0 || ips > MAX_INSTRUCTIONS_PER_SECOND {
        return Err(anyhow!(
            "--ips must be between 1 and {}, got {}",
            MAX_INSTRUCTIONS_PER_SECOND,
            ips
        ));
    }
    Ok(ips)
}

fn run_duration(seconds: f64) -> anyhow::Result<Duration> {
    if !seconds.is_finite() || seconds < 0.0 || seconds >= u64::MAX as f64 {
        return Err(anyhow!("--seconds must be a finite, non-negative number, got {}", seconds));
    }
    Ok(Duration::from_secs_f64(seconds))
}

fn main() -> anyhow::Result<()> {
    // Get configuration and read input file
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    log::info!("Executing {:?}", &opt.input);

    let held = opt
        .hold
        .chars()
        .map(|c| key_for_char(c).ok_or_else(|| anyhow!("'{}' is not mapped to a key", c)))
        .collect::<anyhow::Result<Vec<u8>>>()?;

    let ips = instruction_rate(opt.ips)?;
    let duration = run_duration(opt.seconds)?;

    let mut emulator = match opt.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };
    emulator.set_timer_mode(opt.timer_mode);
    emulator
        .load_file(&opt.input)
        .with_context(|| format!("could not load {}", opt.input.display()))?;

    if ips != DEFAULT_INSTRUCTIONS_PER_SECOND {
        log::info!("Running at {} instructions per second", ips);
    }

    // Start execution
    let mut runner = Runner::new(emulator, HeldKeys::new(held), DummyOutput::new(), Clock::new(ips));
    let stats = runner.run_for(duration)?;
    log::info!("Executed {} instructions over {} frames", stats.steps, stats.ticks);

    let (emulator, _, _) = runner.into_parts();
    print!("{}", emulator.display());
    print!("{}", emulator.registers());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(7), LevelFilter::Trace);
    }

    #[test]
    fn rates_outside_the_clock_range_are_rejected() {
        assert!(instruction_rate(0).is_err());
        assert!(instruction_rate(MAX_INSTRUCTIONS_PER_SECOND + 1).is_err());
        assert_eq!(instruction_rate(700).unwrap(), 700);
        assert_eq!(instruction_rate(MAX_INSTRUCTIONS_PER_SECOND).unwrap(), MAX_INSTRUCTIONS_PER_SECOND);
    }

    #[test]
    fn unusable_durations_are_rejected() {
        assert!(run_duration(f64::INFINITY).is_err());
        assert!(run_duration(f64::NAN).is_err());
        assert!(run_duration(-1.0).is_err());
        assert!(run_duration(1e30).is_err());
        assert_eq!(run_duration(0.5).unwrap(), Duration::from_millis(500));
    }
}
