use std::io;
use std::path::PathBuf;

/// Why a program image could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The path does not name a readable file.
    #[error("ROM {} not found", .0.display())]
    NotFound(PathBuf),
    /// The image does not fit between 0x200 and 0xFFF.
    #[error("ROM is {size} bytes but only {capacity} bytes fit in memory")]
    CapacityExceeded { size: usize, capacity: usize },
    #[error("IO error while reading ROM: {0}")]
    Io(#[from] io::Error),
}

/// A fault raised while executing an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    /// CALL with every stack slot in use.
    #[error("stack overflow at {pc:#05x}")]
    StackOverflow { pc: u16 },
    /// RET with an empty stack.
    #[error("stack underflow at {pc:#05x}")]
    StackUnderflow { pc: u16 },
}
