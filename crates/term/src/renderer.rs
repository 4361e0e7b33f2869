//! TerminalRenderer: flushes a pixel framebuffer to a real terminal.
//!
//! Pixels go out two per cell as `▀` (fg = top pixel, bg = bottom pixel). After
//! the first frame only the cells that changed are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellPair, FrameBuffer, Rgb};

const UPPER_HALF: char = '▀';

pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Renderer writing to an arbitrary sink instead of stdout.
    pub fn with_output(out: Box<dyn Write + Send>) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The caller keeps one `FrameBuffer` and passes it in every frame; after
    /// the call it holds the previous frame and is overwritten by the next
    /// paint pass.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(Rgb, Rgb)> = None;
    for row in 0..fb.rows() {
        for col in 0..fb.width() {
            print_cell_into(out, fb.cell(col, row), &mut current)?;
        }
        if row + 1 < fb.rows() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs of cells) into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<(Rgb, Rgb)> = None;

    for_each_changed_run(prev, next, |col, row, len| {
        out.queue(cursor::MoveTo(col, row))?;
        for dx in 0..len {
            print_cell_into(out, next.cell(col + dx, row), &mut current)?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn print_cell_into(out: &mut Vec<u8>, cell: CellPair, current: &mut Option<(Rgb, Rgb)>) -> Result<()> {
    let colors = (cell.top, cell.bottom);
    if *current != Some(colors) {
        out.queue(SetForegroundColor(rgb_to_color(cell.top)))?;
        out.queue(SetBackgroundColor(rgb_to_color(cell.bottom)))?;
        *current = Some(colors);
    }
    // Uniform cells are plain spaces on the background color.
    let ch = if cell.top == cell.bottom { ' ' } else { UPPER_HALF };
    out.queue(Print(ch))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for row in 0..next.rows() {
            f(0, row, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for row in 0..next.rows() {
        let mut col = 0;
        while col < w {
            if prev.cell(col, row) == next.cell(col, row) {
                col += 1;
                continue;
            }

            let start = col;
            col += 1;
            while col < w && prev.cell(col, row) != next.cell(col, row) {
                col += 1;
            }
            f(start, row, col - start)?;
        }
    }

    Ok(())
}
