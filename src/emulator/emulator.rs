//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::display::Display;
use crate::emulator::error::{ExecError, LoadError};
use crate::emulator::instruction::*;
use crate::emulator::keypad::Keypad;
use crate::emulator::memory::{Memory, FONT_SPRITE_LEN, PROGRAM_START};
use crate::emulator::opcode::Opcode;
use crate::emulator::timer::{TimerMode, Timers};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use std::path::Path;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
const FLAG: usize = 0xF;

/// The interpreter state and its fetch-decode-execute loop.
///
/// `R` supplies the random bytes for `RND`; inject a seeded generator
/// with [`Emulator::with_rng`] for reproducible runs.
pub struct Emulator<R: RngCore = StdRng> {
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],
    timers: Timers,
    display: Display,
    keypad: Keypad,

    opcode: Opcode,
    waiting_for_key: bool,
    timer_mode: TimerMode,
    rng: R,
}

impl Emulator {
    /// Create a new emulator seeded from system entropy.
    pub fn new() -> Emulator {
        Emulator::with_rng(StdRng::from_entropy())
    }

    /// Create a new emulator whose random bytes are reproducible.
    pub fn with_seed(seed: u64) -> Emulator {
        Emulator::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Emulator<R> {
    /// Create a new emulator drawing random bytes from `rng`.
    pub fn with_rng(rng: R) -> Emulator<R> {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            timers: Timers::default(),
            display: Display::new(),
            keypad: Keypad::new(),

            opcode: Opcode(0),
            waiting_for_key: false,
            timer_mode: TimerMode::default(),
            rng,
        }
    }

    /// Return memory, registers, stack, timers and display to their power-on state.
    /// The keypad belongs to the input source and is left alone.
    pub fn reset(&mut self) {
        log::debug!("Resetting machine state");
        self.memory = Memory::new();
        self.registers = [0; NUM_REGISTERS];
        self.i = 0;
        self.program_counter = PROGRAM_START;
        self.stack_pointer = 0;
        self.stack = [0; STACK_SIZE];
        self.timers = Timers::default();
        self.display.clear();
        self.opcode = Opcode(0);
        self.waiting_for_key = false;
    }

    /// Reset the machine and copy a program into memory at 0x200.
    ///
    /// An image that does not fit is rejected before anything is touched.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        let capacity = Memory::program_capacity();
        if program.len() > capacity {
            return Err(LoadError::CapacityExceeded {
                size: program.len(),
                capacity,
            });
        }

        self.reset();
        self.memory.copy_program(program);
        log::debug!("Loaded {} byte program at {:#05x}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Read a ROM file and [`load`](Emulator::load) it.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        log::info!("Loading ROM {:?}", path);
        let program = std::fs::read(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                LoadError::NotFound(path.to_path_buf())
            }
            _ => LoadError::Io(err),
        })?;
        self.load(&program)
    }

    /// Perform a single step: fetch the word at PC, advance PC past it,
    /// then decode and execute it.
    ///
    /// Words that match no instruction are logged and skipped.
    pub fn step(&mut self) -> Result<(), ExecError> {
        if self.timer_mode == TimerMode::PerInstruction {
            self.timers.tick();
        }

        let address = self.program_counter;
        self.opcode = Opcode(self.memory.read_word(address));
        self.program_counter = self.program_counter.wrapping_add(2);

        match Instruction::decode(self.opcode) {
            Some(instruction) => {
                log::trace!("{:#05x}: {:04x} {}", address, self.opcode.as_u16(), instruction);
                self.execute_single(instruction)
            }
            None => {
                log::warn!("Unknown opcode {:#06x} at {:#05x}", self.opcode.as_u16(), address);
                Ok(())
            }
        }
    }

    /// Execute instructions in sequence, stopping at the first fault.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), ExecError> {
        instructions
            .iter()
            .try_for_each(|instruction| self.execute_single(*instruction))
    }

    /// Execute a single instruction against the current state.
    /// PC is expected to already point past the instruction.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), ExecError> {
        self.waiting_for_key = false;

        match instruction {
            // Clear the screen
            Instruction::ClearScreen => self.display.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(self.fault(ExecError::StackUnderflow { pc: self.instruction_address() }));
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer as usize]; // Jump back via stack
            }

            // Machine code routines don't exist here
            Instruction::Sys(_) => {}

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer as usize >= STACK_SIZE {
                    return Err(self.fault(ExecError::StackOverflow { pc: self.instruction_address() }));
                }
                self.stack[self.stack_pointer as usize] = self.program_counter; // Store current address
                self.stack_pointer += 1;
                self.program_counter = addr; // Jump to addr
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) == self.reg(y));
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
            }

            // No carry flag for the immediate form
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
            }

            // VF is written before Vx, so when x is F the result overwrites the flag.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_flag(carry);
                self.set_reg(x, sum);
            }

            // VF = NOT borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_flag(vx >= vy);
                self.set_reg(x, vx.wrapping_sub(vy));
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.reg(x);
                self.set_flag(vx & 1 == 1);
                self.set_reg(x, vx >> 1);
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_flag(vy >= vx);
                self.set_reg(x, vy.wrapping_sub(vx));
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.reg(x);
                self.set_flag(vx >> 7 & 1 == 1);
                self.set_reg(x, vx << 1);
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) != self.reg(y));
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = addr.wrapping_add(self.reg(0) as u16);
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let byte: u8 = self.rng.gen();
                self.set_reg(x, byte & n);
            }

            Instruction::Draw(Reg(x), Reg(y), Const(height)) => {
                let height = height as usize & 0xF;
                let mut sprite = [0u8; 15];
                for (row, byte) in sprite.iter_mut().enumerate().take(height) {
                    *byte = self.memory.read(self.i.wrapping_add(row as u16));
                }

                let (vx, vy) = (self.reg(x), self.reg(y));
                let collision = self.display.draw_sprite(vx, vy, &sprite[..height]);
                self.set_flag(collision);
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                self.skip_if(self.keypad.is_pressed(self.reg(x)));
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                self.skip_if(!self.keypad.is_pressed(self.reg(x)));
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.timers.delay);
            }

            // Wait for a key press by fetching this instruction again until one is down
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => self.set_reg(x, key),
                None => {
                    self.program_counter = self.instruction_address();
                    self.waiting_for_key = true;
                }
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.delay = self.reg(x);
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.timers.sound = self.reg(x);
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.reg(x) as u16);
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = FONT_SPRITE_LEN * self.reg(x) as u16;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.reg(x);
                self.memory.write(self.i, value / 100);
                self.memory.write(self.i.wrapping_add(1), value / 10 % 10);
                self.memory.write(self.i.wrapping_add(2), value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x {
                    self.memory.write(self.i.wrapping_add(reg_no as u16), self.reg(reg_no));
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x {
                    let value = self.memory.read(self.i.wrapping_add(reg_no as u16));
                    self.set_reg(reg_no, value);
                }
            }
        };

        Ok(())
    }

    /// Decrement the delay and sound timers once. Call this at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[(x & 0xF) as usize]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.registers[(x & 0xF) as usize] = value;
    }

    fn set_flag(&mut self, flag: bool) {
        self.registers[FLAG] = flag as u8;
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    /// Address of the instruction being executed.
    fn instruction_address(&self) -> u16 {
        self.program_counter.wrapping_sub(2)
    }

    /// Rewind PC onto the faulting instruction and log the fault.
    fn fault(&mut self, error: ExecError) -> ExecError {
        self.program_counter = self.instruction_address();
        log::error!("{}", error);
        error
    }
}

/// Inspection and developer overrides. Writes bypass the normal
/// instruction semantics and are meant for debuggers and tests.
impl<R: RngCore> Emulator<R> {
    pub fn get_pixel(&self, index: usize) -> bool {
        self.display.get_pixel(index)
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set_key(key, pressed);
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn register(&self, x: u8) -> u8 {
        self.reg(x)
    }

    pub fn set_register(&mut self, x: u8, value: u8) {
        self.set_reg(x, value);
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn set_index(&mut self, value: u16) {
        self.i = value;
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn set_program_counter(&mut self, value: u16) {
        self.program_counter = value;
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    /// The return addresses currently on the stack, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer as usize]
    }

    pub fn push_stack(&mut self, addr: u16) -> Result<(), ExecError> {
        if self.stack_pointer as usize >= STACK_SIZE {
            return Err(ExecError::StackOverflow { pc: self.program_counter });
        }
        self.stack[self.stack_pointer as usize] = addr;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop_stack(&mut self) -> Result<u16, ExecError> {
        if self.stack_pointer == 0 {
            return Err(ExecError::StackUnderflow { pc: self.program_counter });
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer as usize])
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.timers.delay = value;
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.timers.sound = value;
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The word fetched by the most recent step.
    pub fn last_opcode(&self) -> Opcode {
        self.opcode
    }

    /// Decode the word at PC without executing it.
    pub fn current_instruction(&self) -> Option<Instruction> {
        Instruction::decode(Opcode(self.memory.read_word(self.program_counter)))
    }

    /// True while `LD Vx, K` is re-executing for lack of a pressed key.
    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer_mode
    }

    pub fn set_timer_mode(&mut self, mode: TimerMode) {
        self.timer_mode = mode;
    }

    pub fn registers(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            v: self.registers,
            i: self.i,
            pc: self.program_counter,
            sp: self.stack_pointer,
            delay_timer: self.timers.delay,
            sound_timer: self.timers.sound,
        }
    }
}

/// A copy of the register file, for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.v.chunks(4).enumerate() {
            for (col, value) in values.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "V{:X}={:02X}", row * 4 + col, value)?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "DT={:02X} ST={:02X} SP={:02X} I={:04X} PC={:04X}",
            self.delay_timer, self.sound_timer, self.sp, self.i, self.pc
        )
    }
}
