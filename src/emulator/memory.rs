//! The 4 KiB address space, with the font set resident at address 0.

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const ADDR_MASK: u16 = 0x0FFF;

/// Bytes per font sprite.
pub const FONT_SPRITE_LEN: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Addresses are taken modulo 4096, so indexed instructions
/// that run off the end continue at 0x000.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Zeroed memory with the font loaded.
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        bytes[..FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = value;
    }

    /// Read the big-endian word at `addr`.
    pub fn read_word(&self, addr: u16) -> u16 {
        (self.read(addr) as u16) << 8 | self.read(addr.wrapping_add(1)) as u16
    }

    /// Space available for a program image.
    pub fn program_capacity() -> usize {
        MEM_SIZE - PROGRAM_START as usize
    }

    /// Copy a program image to 0x200. The caller checks the length.
    pub(crate) fn copy_program(&mut self, program: &[u8]) {
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_is_resident_after_construction() {
        let memory = Memory::new();
        for digit in 0..16u16 {
            let start = digit * FONT_SPRITE_LEN;
            let sprite: Vec<u8> = (start..start + FONT_SPRITE_LEN)
                .map(|addr| memory.read(addr))
                .collect();
            assert_eq!(sprite, &FONT[start as usize..(start + FONT_SPRITE_LEN) as usize]);
        }
        assert!(memory.as_slice()[FONT.len()..].iter().all(|b| *b == 0));
    }

    #[test]
    fn addresses_wrap_at_4k() {
        let mut memory = Memory::new();
        memory.write(0x1000 + 0x300, 0xAB);
        assert_eq!(memory.read(0x300), 0xAB);
    }

    #[test]
    fn words_are_big_endian_and_wrap() {
        let mut memory = Memory::new();
        memory.write(0x200, 0x12);
        memory.write(0x201, 0x34);
        assert_eq!(memory.read_word(0x200), 0x1234);

        memory.write(0xFFF, 0xAA);
        assert_eq!(memory.read_word(0xFFF), 0xAA00 | FONT[0] as u16);
    }
}
