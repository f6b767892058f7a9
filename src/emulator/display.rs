use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// The 64x32 monochrome frame buffer, row-major, indexed as `x + y * 64`.
#[derive(Clone, PartialEq, Eq)]
pub struct Display {
    pixels: [bool; SCREEN_SIZE],
}

impl Display {
    pub fn new() -> Display {
        Display {
            pixels: [false; SCREEN_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [false; SCREEN_SIZE];
    }

    /// Out of range indices read as unlit.
    pub fn get_pixel(&self, index: usize) -> bool {
        self.pixels.get(index).copied().unwrap_or(false)
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < SCREEN_WIDTH && y < SCREEN_HEIGHT && self.pixels[x + y * SCREEN_WIDTH]
    }

    /// Developer override, ignores out of range indices.
    pub fn set_pixel(&mut self, index: usize, lit: bool) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = lit;
        }
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// XOR `rows` onto the screen with the top-left corner at (`x`, `y`).
    ///
    /// The origin wraps around the screen, the sprite itself is clipped at
    /// the right and bottom edges. Returns true if a lit pixel was erased.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let x0 = x as usize % SCREEN_WIDTH;
        let y0 = y as usize % SCREEN_HEIGHT;

        let mut collision = false;
        for (dy, row) in rows.iter().enumerate() {
            let py = y0 + dy;
            if py >= SCREEN_HEIGHT {
                break;
            }
            for dx in 0..8 {
                let px = x0 + dx;
                if px >= SCREEN_WIDTH {
                    break;
                }
                if row >> (7 - dx) & 1 == 0 {
                    continue;
                }
                let pixel = &mut self.pixels[px + py * SCREEN_WIDTH];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        collision
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.chunks(SCREEN_WIDTH) {
            for lit in row {
                write!(f, "{}", if *lit { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
