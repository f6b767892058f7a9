//! Opcode dispatch by pattern and mask.
//!
//! Every instruction is registered with a fixed pattern and a mask. A word
//! selects the first entry, in table order, where `word & mask == pattern`,
//! so the table is ordered most-specific-mask-first.

/// The instruction families of the CHIP-8 instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Cls,
    Ret,
    Sys,
    Jp,
    Call,
    SeByte,
    SneByte,
    SeReg,
    LdByte,
    AddByte,
    LdReg,
    Or,
    And,
    Xor,
    AddReg,
    Sub,
    Shr,
    Subn,
    Shl,
    SneReg,
    LdI,
    JpV0,
    Rnd,
    Drw,
    Skp,
    Sknp,
    LdVxDt,
    LdK,
    LdDtVx,
    LdStVx,
    AddI,
    LdF,
    LdB,
    StoreRegs,
    ReadRegs,
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub pattern: u16,
    pub mask: u16,
    pub mnemonic: Mnemonic,
}

const fn entry(pattern: u16, mask: u16, mnemonic: Mnemonic) -> Entry {
    Entry {
        pattern,
        mask,
        mnemonic,
    }
}

/// Registration order matters: exact matches come before the families they overlap.
pub const TABLE: [Entry; 35] = [
    entry(0x00E0, 0xFFFF, Mnemonic::Cls),
    entry(0x00EE, 0xFFFF, Mnemonic::Ret),
    entry(0x0000, 0xF000, Mnemonic::Sys),
    entry(0x1000, 0xF000, Mnemonic::Jp),
    entry(0x2000, 0xF000, Mnemonic::Call),
    entry(0x3000, 0xF000, Mnemonic::SeByte),
    entry(0x4000, 0xF000, Mnemonic::SneByte),
    entry(0x5000, 0xF00F, Mnemonic::SeReg),
    entry(0x6000, 0xF000, Mnemonic::LdByte),
    entry(0x7000, 0xF000, Mnemonic::AddByte),
    entry(0x8000, 0xF00F, Mnemonic::LdReg),
    entry(0x8001, 0xF00F, Mnemonic::Or),
    entry(0x8002, 0xF00F, Mnemonic::And),
    entry(0x8003, 0xF00F, Mnemonic::Xor),
    entry(0x8004, 0xF00F, Mnemonic::AddReg),
    entry(0x8005, 0xF00F, Mnemonic::Sub),
    entry(0x8006, 0xF00F, Mnemonic::Shr),
    entry(0x8007, 0xF00F, Mnemonic::Subn),
    entry(0x800E, 0xF00F, Mnemonic::Shl),
    entry(0x9000, 0xF00F, Mnemonic::SneReg),
    entry(0xA000, 0xF000, Mnemonic::LdI),
    entry(0xB000, 0xF000, Mnemonic::JpV0),
    entry(0xC000, 0xF000, Mnemonic::Rnd),
    entry(0xD000, 0xF000, Mnemonic::Drw),
    entry(0xE09E, 0xF0FF, Mnemonic::Skp),
    entry(0xE0A1, 0xF0FF, Mnemonic::Sknp),
    entry(0xF007, 0xF0FF, Mnemonic::LdVxDt),
    entry(0xF00A, 0xF0FF, Mnemonic::LdK),
    entry(0xF015, 0xF0FF, Mnemonic::LdDtVx),
    entry(0xF018, 0xF0FF, Mnemonic::LdStVx),
    entry(0xF01E, 0xF0FF, Mnemonic::AddI),
    entry(0xF029, 0xF0FF, Mnemonic::LdF),
    entry(0xF033, 0xF0FF, Mnemonic::LdB),
    entry(0xF055, 0xF0FF, Mnemonic::StoreRegs),
    entry(0xF065, 0xF0FF, Mnemonic::ReadRegs),
];

/// Find the first entry matching `word`, if any.
pub fn lookup(word: u16) -> Option<Mnemonic> {
    TABLE
        .iter()
        .find(|entry| word & entry.mask == entry.pattern)
        .map(|entry| entry.mnemonic)
}
