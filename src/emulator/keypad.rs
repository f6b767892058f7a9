pub const NUM_KEYS: usize = 16;

/// Pressed state of the hexadecimal keys 0x0-0xF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Keys outside 0x0-0xF are ignored.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(slot) => *slot = pressed,
            None => log::warn!("Ignoring state change of nonexistent key {:#x}", key),
        }
    }

    /// Only the low nibble of `key` is significant.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// The lowest numbered key that is currently down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }
}
