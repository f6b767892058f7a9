use crate::emulator::dispatch::{self, Mnemonic};
use crate::emulator::opcode::Opcode;
use std::fmt;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - KK: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,                // 00E0
    Return,                     // 00EE
    Sys(Addr),                  // 0NNN
    Goto(Addr),                 // 1NNN
    Call(Addr),                 // 2NNN
    IfRegEqConst(Reg, Const),   // 3XKK
    IfRegNeqConst(Reg, Const),  // 4XKK
    IfRegEqReg(Reg, Reg),       // 5XY0
    SetRegToConst(Reg, Const),  // 6XKK
    IncRegByConst(Reg, Const),  // 7XKK
    SetRegToReg(Reg, Reg),      // 8XY0
    BitwiseOr(Reg, Reg),        // 8XY1
    BitwiseAnd(Reg, Reg),       // 8XY2
    BitwiseXor(Reg, Reg),       // 8XY3
    IncRegByReg(Reg, Reg),      // 8XY4
    DecRegByReg(Reg, Reg),      // 8XY5
    BitshiftRight(Reg),         // 8XY6
    SetVxVyMinusVx(Reg, Reg),   // 8XY7
    BitshiftLeft(Reg),          // 8XYE
    IfRegNeqReg(Reg, Reg),      // 9XY0
    SetI(Addr),                 // ANNN
    SetPcToV0PlusAddr(Addr),    // BNNN
    SetVxRand(Reg, Const),      // CXKK
    Draw(Reg, Reg, Const),      // DXYN
    IfKeyEqVx(Reg),             // EX9E
    IfKeyNeqVx(Reg),            // EXA1
    SetRegToDelayTimer(Reg),    // FX07
    SetRegToGetKey(Reg),        // FX0A
    SetDelayTimerToReg(Reg),    // FX15
    SetSoundTimerToReg(Reg),    // FX18
    AddRegToI(Reg),             // FX1E
    SetIToSpriteAddrVx(Reg),    // FX29
    SetIToBcdOfReg(Reg),        // FX33
    RegDump(Reg),               // FX55
    RegLoad(Reg),               // FX65
}

impl Instruction {
    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(Opcode(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(Opcode::from_two_u8(left, right))
    }

    /// Look the opcode up in the dispatch table and bind its operands.
    /// Returns `None` for words no table entry matches.
    pub fn decode(opcode: Opcode) -> Option<Instruction> {
        let addr = Addr(opcode.nnn());
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let kk = Const(opcode.kk());

        let instruction = match dispatch::lookup(opcode.as_u16())? {
            Mnemonic::Cls => Instruction::ClearScreen,
            Mnemonic::Ret => Instruction::Return,
            Mnemonic::Sys => Instruction::Sys(addr),
            Mnemonic::Jp => Instruction::Goto(addr),
            Mnemonic::Call => Instruction::Call(addr),
            Mnemonic::SeByte => Instruction::IfRegEqConst(x, kk),
            Mnemonic::SneByte => Instruction::IfRegNeqConst(x, kk),
            Mnemonic::SeReg => Instruction::IfRegEqReg(x, y),
            Mnemonic::LdByte => Instruction::SetRegToConst(x, kk),
            Mnemonic::AddByte => Instruction::IncRegByConst(x, kk),
            Mnemonic::LdReg => Instruction::SetRegToReg(x, y),
            Mnemonic::Or => Instruction::BitwiseOr(x, y),
            Mnemonic::And => Instruction::BitwiseAnd(x, y),
            Mnemonic::Xor => Instruction::BitwiseXor(x, y),
            Mnemonic::AddReg => Instruction::IncRegByReg(x, y),
            Mnemonic::Sub => Instruction::DecRegByReg(x, y),
            Mnemonic::Shr => Instruction::BitshiftRight(x),
            Mnemonic::Subn => Instruction::SetVxVyMinusVx(x, y),
            Mnemonic::Shl => Instruction::BitshiftLeft(x),
            Mnemonic::SneReg => Instruction::IfRegNeqReg(x, y),
            Mnemonic::LdI => Instruction::SetI(addr),
            Mnemonic::JpV0 => Instruction::SetPcToV0PlusAddr(addr),
            Mnemonic::Rnd => Instruction::SetVxRand(x, kk),
            Mnemonic::Drw => Instruction::Draw(x, y, Const(opcode.n())),
            Mnemonic::Skp => Instruction::IfKeyEqVx(x),
            Mnemonic::Sknp => Instruction::IfKeyNeqVx(x),
            Mnemonic::LdVxDt => Instruction::SetRegToDelayTimer(x),
            Mnemonic::LdK => Instruction::SetRegToGetKey(x),
            Mnemonic::LdDtVx => Instruction::SetDelayTimerToReg(x),
            Mnemonic::LdStVx => Instruction::SetSoundTimerToReg(x),
            Mnemonic::AddI => Instruction::AddRegToI(x),
            Mnemonic::LdF => Instruction::SetIToSpriteAddrVx(x),
            Mnemonic::LdB => Instruction::SetIToBcdOfReg(x),
            Mnemonic::StoreRegs => Instruction::RegDump(x),
            Mnemonic::ReadRegs => Instruction::RegLoad(x),
        };

        Some(instruction)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#05x}", self.0)
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Renders the conventional assembler mnemonic, e.g. `LD V1, K`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Sys(a) => write!(f, "SYS {}", a),
            Goto(a) => write!(f, "JP {}", a),
            Call(a) => write!(f, "CALL {}", a),
            IfRegEqConst(x, k) => write!(f, "SE {}, {}", x, k),
            IfRegNeqConst(x, k) => write!(f, "SNE {}, {}", x, k),
            IfRegEqReg(x, y) => write!(f, "SE {}, {}", x, y),
            SetRegToConst(x, k) => write!(f, "LD {}, {}", x, k),
            IncRegByConst(x, k) => write!(f, "ADD {}, {}", x, k),
            SetRegToReg(x, y) => write!(f, "LD {}, {}", x, y),
            BitwiseOr(x, y) => write!(f, "OR {}, {}", x, y),
            BitwiseAnd(x, y) => write!(f, "AND {}, {}", x, y),
            BitwiseXor(x, y) => write!(f, "XOR {}, {}", x, y),
            IncRegByReg(x, y) => write!(f, "ADD {}, {}", x, y),
            DecRegByReg(x, y) => write!(f, "SUB {}, {}", x, y),
            BitshiftRight(x) => write!(f, "SHR {}", x),
            SetVxVyMinusVx(x, y) => write!(f, "SUBN {}, {}", x, y),
            BitshiftLeft(x) => write!(f, "SHL {}", x),
            IfRegNeqReg(x, y) => write!(f, "SNE {}, {}", x, y),
            SetI(a) => write!(f, "LD I, {}", a),
            SetPcToV0PlusAddr(a) => write!(f, "JP V0, {}", a),
            SetVxRand(x, k) => write!(f, "RND {}, {}", x, k),
            Draw(x, y, Const(n)) => write!(f, "DRW {}, {}, {}", x, y, n),
            IfKeyEqVx(x) => write!(f, "SKP {}", x),
            IfKeyNeqVx(x) => write!(f, "SKNP {}", x),
            SetRegToDelayTimer(x) => write!(f, "LD {}, DT", x),
            SetRegToGetKey(x) => write!(f, "LD {}, K", x),
            SetDelayTimerToReg(x) => write!(f, "LD DT, {}", x),
            SetSoundTimerToReg(x) => write!(f, "LD ST, {}", x),
            AddRegToI(x) => write!(f, "ADD I, {}", x),
            SetIToSpriteAddrVx(x) => write!(f, "LD F, {}", x),
            SetIToBcdOfReg(x) => write!(f, "LD B, {}", x),
            RegDump(x) => write!(f, "LD [I], {}", x),
            RegLoad(x) => write!(f, "LD {}, [I]", x),
        }
    }
}
