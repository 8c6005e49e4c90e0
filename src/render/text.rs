use std::fmt::Write as _;
use std::io;

use crate::foundation::error::VizResult;
use crate::playback::sink::{PlaybackFrame, PlaybackSink, PlaybackStatus};
use crate::render::primitives::{
    Bar, Cell, FrameBody, FrameRenderer, Highlight, PlacedNode, VisualFrame, to_visual,
};
use crate::step::model::{Peg, Pegs, StructureKind};

/// Draws frames as plain text for a terminal.
#[derive(Clone, Copy, Debug)]
pub struct TextRenderer {
    /// Width in characters of the tallest bar.
    pub bar_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { bar_width: 30 }
    }
}

fn marker(h: Highlight) -> &'static str {
    match h {
        Highlight::None => "",
        Highlight::Dimmed => "  .",
        Highlight::Compare => "  <- compare",
        Highlight::Swap => "  <- swapped",
        Highlight::Placed => "  <- placed",
        Highlight::Pivot => "  <- pivot",
        Highlight::Key => "  <- key",
        Highlight::Sorted => "  (sorted)",
        Highlight::Found => "  <- found",
        Highlight::Active => "  <-",
        Highlight::Waiting => "  (waiting)",
        Highlight::BaseCase => "  (base case)",
        Highlight::Done => "  (done)",
        Highlight::Queued => "  (queued)",
    }
}

impl TextRenderer {
    fn bars(&self, out: &mut String, bars: &[Bar]) {
        let width = bars
            .iter()
            .map(|b| b.value.to_string().len())
            .max()
            .unwrap_or(1);
        for b in bars {
            let len = ((b.height * self.bar_width as f32).round() as usize).max(1);
            let fill = if b.highlight == Highlight::Dimmed {
                "."
            } else {
                "#"
            };
            let _ = writeln!(
                out,
                "{:>width$} |{}{}",
                b.value,
                fill.repeat(len),
                marker(b.highlight)
            );
        }
    }

    fn tree(&self, out: &mut String, nodes: &[PlacedNode], stack: &[String], pegs: Option<&Pegs>) {
        for n in nodes {
            let indent = "  ".repeat(n.depth as usize);
            let _ = writeln!(out, "{indent}{}{}", n.label, marker(n.highlight));
        }
        if !stack.is_empty() {
            let _ = writeln!(out, "stack: {}", stack.join(" > "));
        }
        if let Some(pegs) = pegs {
            for peg in [Peg::A, Peg::B, Peg::C] {
                let disks: Vec<String> = pegs.rod(peg).iter().map(u32::to_string).collect();
                let _ = writeln!(out, "{}: {}", peg.name(), disks.join(" "));
            }
        }
    }

    fn cells(&self, out: &mut String, kind: StructureKind, cells: &[Cell], capacity: usize) {
        if cells.is_empty() {
            let _ = writeln!(out, "(empty {}, capacity {capacity})", kind.label().to_lowercase());
            return;
        }
        let sep = match kind {
            StructureKind::LinkedList => " -> ",
            StructureKind::Stack | StructureKind::Queue => " ",
        };
        let boxes: Vec<String> = cells
            .iter()
            .map(|c| {
                if c.highlight == Highlight::Active {
                    format!("*[{}]*", c.value)
                } else {
                    format!("[{}]", c.value)
                }
            })
            .collect();
        let tail_tag = if kind == StructureKind::LinkedList {
            " -> null"
        } else {
            ""
        };
        let _ = writeln!(out, "{}{tail_tag}", boxes.join(sep));

        let (head, tail) = match kind {
            StructureKind::Stack => ("bottom", "top"),
            StructureKind::Queue => ("front", "rear"),
            StructureKind::LinkedList => ("head", "tail"),
        };
        let mut labels = Vec::new();
        if cells.first().is_some_and(|c| c.head) {
            labels.push(format!("{head}: {}", cells[0].value));
        }
        if let Some(last) = cells.last().filter(|c| c.tail) {
            labels.push(format!("{tail}: {}", last.value));
        }
        let _ = writeln!(out, "{}  ({}/{capacity})", labels.join(", "), cells.len());
    }
}

impl FrameRenderer for TextRenderer {
    type Output = String;

    fn render(&mut self, frame: &VisualFrame) -> VizResult<String> {
        let mut out = String::new();
        match &frame.body {
            FrameBody::Bars { bars, merge } => {
                self.bars(&mut out, bars);
                if let Some(runs) = merge {
                    let _ = writeln!(out, "left run:");
                    self.bars(&mut out, &runs.left);
                    let _ = writeln!(out, "right run:");
                    self.bars(&mut out, &runs.right);
                }
            }
            FrameBody::Tree {
                nodes,
                stack,
                pegs,
                ..
            } => self.tree(&mut out, nodes, stack, pegs.as_ref()),
            FrameBody::Cells {
                kind,
                cells,
                capacity,
            } => self.cells(&mut out, *kind, cells, *capacity),
        }
        let _ = writeln!(out, "> {}", frame.caption);
        Ok(out)
    }
}

/// Playback subscriber that prints each frame to a writer.
///
/// Sinks cannot fail, so the first render or write error is kept for [`TextSink::take_error`]
/// and later frames are dropped.
#[derive(Debug)]
pub struct TextSink<W: io::Write, R = TextRenderer> {
    out: W,
    renderer: R,
    error: Option<io::Error>,
}

impl<W: io::Write> TextSink<W> {
    /// Sink writing to `out` with the default [`TextRenderer`].
    pub fn new(out: W) -> Self {
        Self::with_renderer(out, TextRenderer::default())
    }
}

impl<W: io::Write, R: FrameRenderer<Output = String>> TextSink<W, R> {
    /// Sink writing frames drawn by `renderer` to `out`.
    pub fn with_renderer(out: W, renderer: R) -> Self {
        Self {
            out,
            renderer,
            error: None,
        }
    }

    /// First render or write error, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Whether a render or write error is pending.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "text sink write failed");
            self.error = Some(e);
        }
    }
}

impl<W: io::Write, R: FrameRenderer<Output = String>> PlaybackSink for TextSink<W, R> {
    fn on_step(&mut self, frame: &PlaybackFrame<'_>) {
        if self.error.is_some() {
            return;
        }
        let visual = to_visual(frame.step);
        let body = match self.renderer.render(&visual) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, index = frame.index, "text sink render failed");
                self.error = Some(io::Error::other(e));
                return;
            }
        };
        let text = format!(
            "--- step {}/{} [{}]\n{body}",
            frame.index + 1,
            frame.total,
            frame.step.kind()
        );
        self.write(&text);
    }

    fn on_status(&mut self, status: PlaybackStatus) {
        if status == PlaybackStatus::Finished {
            self.write("--- finished\n");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
