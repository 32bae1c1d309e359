//! The `DocumentWriter` seam between the serializer and a concrete output format.
//!
//! Coordinates are millimetres with the origin at the top-left corner of the page
//! and y growing downward, matching the serializer's cursor. Text positions are
//! baselines. Converting to a format's native space is the writer's job.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::layout::font_metrics::FontFace;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("block {0} has a non-finite position")]
    NonFinitePosition(Uuid),

    #[error("document writer failed: {0}")]
    Writer(String),

    #[error("export task failed: {0}")]
    Task(String),
}

/// The two faces the exporter draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportFont {
    Helvetica,
    HelveticaBold,
}

impl ExportFont {
    /// Metric table used to wrap and measure text set in this font.
    pub fn metric_face(self) -> FontFace {
        match self {
            ExportFont::Helvetica => FontFace::Helvetica,
            ExportFont::HelveticaBold => FontFace::HelveticaBold,
        }
    }
}

/// A clickable rectangle, top-left anchored, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Receives positioned drawing commands from the serializer.
///
/// The first page exists before any command arrives; `add_page` appends a new one
/// and makes it current. Any error aborts the export.
pub trait DocumentWriter {
    fn set_font(&mut self, font: ExportFont, size_pt: f64) -> Result<(), ExportError>;

    fn add_page(&mut self) -> Result<(), ExportError>;

    /// Draws `text` with its baseline starting at `(x, y)` on the current page.
    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), ExportError>;

    /// Adds a URI link region on the current page.
    fn link(&mut self, rect: LinkRect, url: &str) -> Result<(), ExportError>;

    fn finish(self) -> Result<Bytes, ExportError>
    where
        Self: Sized;
}

// ────────────────────────────────────────────────────────────────────────────
// Recording writer (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetFont(ExportFont, f64),
    AddPage,
    Text { x: f64, y: f64, text: String },
    Link { rect: LinkRect, url: String },
}

/// Captures every command so tests can assert on layout decisions directly.
/// `fail_after` makes the writer error on the n-th command (0-based).
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub commands: Vec<Command>,
    pub fail_after: Option<usize>,
}

#[cfg(test)]
impl RecordingWriter {
    fn record(&mut self, command: Command) -> Result<(), ExportError> {
        if self.fail_after == Some(self.commands.len()) {
            return Err(ExportError::Writer("recording writer failure".to_string()));
        }
        self.commands.push(command);
        Ok(())
    }

    pub fn texts(&self) -> Vec<(f64, f64, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { x, y, text } => Some((*x, *y, text.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn links(&self) -> Vec<(LinkRect, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Link { rect, url } => Some((*rect, url.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn page_breaks(&self) -> usize {
        self.commands.iter().filter(|c| **c == Command::AddPage).count()
    }
}

#[cfg(test)]
impl DocumentWriter for RecordingWriter {
    fn set_font(&mut self, font: ExportFont, size_pt: f64) -> Result<(), ExportError> {
        self.record(Command::SetFont(font, size_pt))
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        self.record(Command::AddPage)
    }

    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), ExportError> {
        self.record(Command::Text {
            x,
            y,
            text: text.to_string(),
        })
    }

    fn link(&mut self, rect: LinkRect, url: &str) -> Result<(), ExportError> {
        self.record(Command::Link {
            rect,
            url: url.to_string(),
        })
    }

    fn finish(self) -> Result<Bytes, ExportError> {
        Ok(Bytes::new())
    }
}
