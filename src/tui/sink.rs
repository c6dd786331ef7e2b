use crate::rasterizer::{CellGrid, ShadedCell};
use crossterm::{
    cursor::{MoveTo, Show},
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Result, Stdout, Write};

/// Anything that can display a grid of shaded cells
pub trait FrameSink {
    /// One-time setup before the first frame
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }
    fn present(&mut self, grid: &CellGrid) -> Result<()>;
    /// Whether the viewer asked to stop
    fn poll_quit(&mut self) -> Result<bool> {
        Ok(false)
    }
    /// Teardown after the last frame
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes frames as raw lines with ANSI escape codes.
/// Clears the screen once, then homes the cursor and overwrites every row each frame
pub struct AnsiSink<W: Write> {
    out: W,
    bold: bool,
}

impl AnsiSink<Stdout> {
    pub fn stdout(bold: bool) -> Self {
        Self::new(stdout(), bold)
    }
}

impl<W: Write> AnsiSink<W> {
    pub fn new(out: W, bold: bool) -> Self {
        Self { out, bold }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Printable text for one row, bright cells wrapped in bold and reset
    pub fn row_to_string(&self, row: &[ShadedCell]) -> String {
        let mut line = String::with_capacity(row.len());
        for cell in row {
            if self.bold && cell.highlighted {
                line.push_str(&cell.symbol.bold().to_string());
            } else {
                line.push(cell.symbol);
            }
        }
        line
    }
}

impl<W: Write> FrameSink for AnsiSink<W> {
    fn begin(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        self.out.flush()
    }

    fn present(&mut self, grid: &CellGrid) -> Result<()> {
        // Build every row before anything is written
        let lines: Vec<String> = grid.rows().map(|row| self.row_to_string(row)).collect();
        queue!(self.out, MoveTo(0, 0))?;
        for line in lines {
            queue!(self.out, Print(line), Print('\n'))?;
        }
        self.out.flush()
    }

    fn finish(&mut self) -> Result<()> {
        queue!(self.out, Show)?;
        self.out.flush()
    }
}

/// Keeps every frame as plain text, for running without a terminal
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<String>>,
    pub began: bool,
    pub finished: bool,
    quit_after: Option<usize>,
}

impl RecordingSink {
    /// Ask to stop once `frames` frames have been recorded
    pub fn quit_after(frames: usize) -> Self {
        Self {
            quit_after: Some(frames),
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames.last().map(|f| &f[..])
    }
}

impl FrameSink for RecordingSink {
    fn begin(&mut self) -> Result<()> {
        self.began = true;
        Ok(())
    }
    fn present(&mut self, grid: &CellGrid) -> Result<()> {
        self.frames.push(grid.to_lines());
        Ok(())
    }
    fn poll_quit(&mut self) -> Result<bool> {
        Ok(self
            .quit_after
            .is_some_and(|limit| self.frames.len() >= limit))
    }
    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
