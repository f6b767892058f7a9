/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Headless runner

To try the machine on a program, run `cargo run --release --bin no_frontend -- <program>`.
It runs the program for a few seconds and prints the final screen and registers.
Use `--hold` to keep keys pressed, e.g. `--hold qw`, using the usual keyboard layout
(`1234`, `qwer`, `asdf`, `zxcv`).

# Library

The main way of running a program is to load it as bytes and step it.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::with_seed(7);

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
emulator.step().unwrap(); // Will now clear the display
assert_eq!(emulator.program_counter(), 0x202);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::with_seed(7);

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.register(0xB), 35);
```

## Timers, input and output

`step` only executes instructions. The delay and sound timers decay at 60 Hz
through `tick_timers`, which `emulator::runner::Runner` calls for you while pacing
instructions, polling an `EmulatorInput` for key events and handing every frame
to an `EmulatorOutput`.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;
use chip8_vm::emulator::runner::Runner;
use chip8_vm::emulator::timer::Clock;
use std::time::Duration;

let mut emulator = Emulator::with_seed(7);
emulator.load(&[0x12, 0x00]).unwrap(); // Jump to self forever
let mut runner = Runner::new(emulator, DummyInput, DummyOutput::new(), Clock::new(700));
runner.advance(Duration::from_millis(100)).unwrap();
assert_eq!(runner.stats().steps, 70);
```
*/

pub mod emulator;
