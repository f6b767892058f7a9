use crate::emulator::display::Display;
use std::io::{self, Write};

/// Represents a screen that is handed the frame buffer once per frame.
pub trait EmulatorOutput {
    fn present(&mut self, display: &Display) -> io::Result<()>;
}

/// A simple output device that only counts frames.
#[derive(Debug, Default)]
pub struct DummyOutput {
    frames: u64,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl EmulatorOutput for DummyOutput {
    fn present(&mut self, _: &Display) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}

/// Writes each changed frame as text, `#` for lit pixels.
pub struct TextOutput<W: Write> {
    writer: W,
    last: Option<Display>,
}

impl<W: Write> TextOutput<W> {
    pub fn new(writer: W) -> TextOutput<W> {
        TextOutput { writer, last: None }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EmulatorOutput for TextOutput<W> {
    fn present(&mut self, display: &Display) -> io::Result<()> {
        if self.last.as_ref() == Some(display) {
            return Ok(());
        }
        write!(self.writer, "{}", display)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        self.last = Some(display.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_frames_are_written_once() {
        let mut output = TextOutput::new(Vec::new());
        let mut display = Display::new();
        output.present(&display).unwrap();
        output.present(&display).unwrap();
        display.set_pixel(0, true);
        output.present(&display).unwrap();

        let text = String::from_utf8(output.into_inner()).unwrap();
        let frames: Vec<&str> = text.split("\n\n").filter(|f| !f.is_empty()).collect();
        assert_eq!(frames.len(), 2);
        assert!(frames[1].starts_with('#'));
    }
}
