/// A fetched 16-bit instruction word, with accessors for
/// the standard CHIP-8 operand fields.
///
/// ```text
///  15    12 11     8 7      4 3      0
/// +--------+--------+--------+--------+
/// |  high  |   x    |   y    |   n    |
/// +--------+--------+--------+--------+
///          |<---------- nnn --------->|
///                   |<----- kk ------>|
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combine two bytes from memory, big-endian.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode(((left as u16) << 8) | right as u16)
    }

    /// The raw word.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// The word as its high and low byte.
    pub fn as_two_u8(self) -> (u8, u8) {
        ((self.0 >> 8) as u8, (self.0 & 0x00FF) as u8)
    }

    /// The four nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (
            ((self.0 >> 12) & 0xF) as u8,
            ((self.0 >> 8) & 0xF) as u8,
            ((self.0 >> 4) & 0xF) as u8,
            (self.0 & 0xF) as u8,
        )
    }

    /// `nnn`: the lowest 12 bits, an address.
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }

    /// `x`: bits 8-11, a register index.
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// `y`: bits 4-7, a register index.
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// `kk`: the lowest 8 bits, an immediate byte.
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// `n`: the lowest 4 bits, a sprite height.
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Self {
        Opcode(value)
    }
}
