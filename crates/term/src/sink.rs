//! Render sinks: the interactive terminal and a JSON-lines stream.

use std::io::Write;

use anyhow::Result;

use crate::core::{Frame, RenderSink};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Paints frames on the terminal through a diffing renderer.
pub struct TerminalSink {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalSink {
    pub fn new(renderer: TerminalRenderer, view: GameView) -> Self {
        Self {
            renderer,
            view,
            fb: FrameBuffer::new(0, 0),
        }
    }

    pub fn renderer(&self) -> &TerminalRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer {
        &mut self.renderer
    }

    /// Drop the previous frame so the next render repaints everything.
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }
}

impl RenderSink for TerminalSink {
    type Error = anyhow::Error;

    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(frame, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

/// Writes every frame as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    type Error = anyhow::Error;

    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, &frame.to_snapshot())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }
}
