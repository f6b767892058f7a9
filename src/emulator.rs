//! The CHIP-8 virtual machine and the host-side pieces that drive it.

pub mod dispatch;
pub mod display;
pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod runner;
pub mod timer;

pub use self::emulator::{Emulator, RegisterSnapshot};
pub use self::error::{ExecError, LoadError};
