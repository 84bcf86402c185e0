use crossterm::style::Stylize; // Importing Stylize from crossterm to color text
use std::io::{self, Write}; // Importing io and the Write trait for terminal output

// Colors used for terminal status lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Blue,
    Cyan,
    Yellow,
    Green,
    Red,
}

// Wrap text in the ANSI escape codes for the given tint
pub fn paint(text: &str, tint: Tint) -> String {
    let styled = match tint {
        Tint::Blue => text.blue(),
        Tint::Cyan => text.cyan(),
        Tint::Yellow => text.yellow(),
        Tint::Green => text.green(),
        Tint::Red => text.red(),
    };
    styled.to_string()
}

// Struct to print status lines, colored only when enabled
pub struct Painter {
    enabled: bool, // Whether escape codes are emitted
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // Color the text if enabled, otherwise hand it back unchanged
    pub fn paint(&self, text: &str, tint: Tint) -> String {
        if self.enabled {
            paint(text, tint)
        } else {
            text.to_string()
        }
    }

    // Print a single line to stdout
    pub fn line(&self, text: &str, tint: Tint) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", self.paint(text, tint))
    }

    // Print a blank line to stdout
    pub fn blank(&self) -> io::Result<()> {
        writeln!(io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_painter_returns_plain_text() {
        let painter = Painter::new(false);
        assert_eq!(painter.paint("Writing to: out.txt", Tint::Yellow), "Writing to: out.txt");
        assert!(!painter.is_enabled());
    }

    #[test]
    fn test_paint_keeps_the_text() {
        let painted = paint("File processed successfully!", Tint::Green);
        assert!(painted.contains("File processed successfully!"));
    }
}
