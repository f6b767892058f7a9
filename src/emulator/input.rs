use std::collections::VecDeque;

/// A change in the pressed state of one of the keys 0x0-0xF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(u8),
    Released(u8),
}

/// Represents an input device that reports key up/down events.
/// Polled by the runner between steps until it returns `None`.
pub trait EmulatorInput {
    fn poll(&mut self) -> Option<KeyEvent>;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> Option<KeyEvent> {
        None
    }
}

/// Presses a fixed set of keys once and holds them down.
pub struct HeldKeys {
    pending: VecDeque<u8>,
}

impl HeldKeys {
    pub fn new<I: IntoIterator<Item = u8>>(keys: I) -> HeldKeys {
        HeldKeys {
            pending: keys.into_iter().collect(),
        }
    }
}

impl EmulatorInput for HeldKeys {
    fn poll(&mut self) -> Option<KeyEvent> {
        self.pending.pop_front().map(KeyEvent::Pressed)
    }
}

/// Replays a queue of events, for scripted runs.
impl EmulatorInput for VecDeque<KeyEvent> {
    fn poll(&mut self) -> Option<KeyEvent> {
        self.pop_front()
    }
}

/// Map a character on a QWERTY keyboard to the keypad key at
/// the same position.
///
/// ```text
/// Keypad       Keyboard
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D      Q W E R
/// 7 8 9 E  =>  A S D F
/// A 0 B F      Z X C V
/// ```
pub fn key_for_char(c: char) -> Option<u8> {
    let key = match c.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(key)
}
