//! Report printer: section headers, status glyphs and optional colour.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub struct Printer<W: Write> {
    out: W,
    color: bool,
}

impl Printer<Stdout> {
    /// Colour is used only when enabled and stdout is a terminal.
    pub fn stdout(color: bool) -> Self {
        let out = io::stdout();
        let color = color && out.is_terminal();
        Self { out, color }
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    pub fn section(&mut self, title: &str) -> Result<()> {
        let header = format!("=== {title} ===");
        if self.color {
            writeln!(self.out, "\n{}", header.cyan().bold())?;
        } else {
            writeln!(self.out, "\n{header}")?;
        }
        Ok(())
    }

    pub fn success(&mut self, text: &str) -> Result<()> {
        if self.color {
            writeln!(self.out, "✅ {}", text.green())?;
        } else {
            writeln!(self.out, "✅ {text}")?;
        }
        Ok(())
    }

    pub fn failure(&mut self, text: &str) -> Result<()> {
        if self.color {
            writeln!(self.out, "❌ {}", text.red())?;
        } else {
            writeln!(self.out, "❌ {text}")?;
        }
        Ok(())
    }

    pub fn heading(&mut self, text: &str) -> Result<()> {
        if self.color {
            writeln!(self.out, "{}", text.yellow())?;
        } else {
            writeln!(self.out, "{text}")?;
        }
        Ok(())
    }

    /// Verbatim excerpt followed by a blank line.
    pub fn block(&mut self, text: &str) -> Result<()> {
        // Only the final newline goes; trailing spaces are part of the excerpt
        let text = text.strip_suffix('\n').unwrap_or(text);
        writeln!(self.out, "{text}\n")?;
        Ok(())
    }

    pub fn bullet(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "- {text}")?;
        Ok(())
    }

    pub fn numbered(&mut self, items: &[&str]) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.out, "{}. {item}", i + 1)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
