//! Style tiers: the exporter collapses arbitrary canvas font sizes into four
//! typographic levels with a fixed vertical rhythm.

use serde::Serialize;

use crate::export::writer::ExportFont;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Header,
    SectionHeader,
    SubHeader,
    Body,
}

/// Export typography for one tier. Spacing is in millimetres, size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStyle {
    pub size_pt: f64,
    pub font: ExportFont,
    pub space_before: f64,
    pub space_after: f64,
}

impl Tier {
    /// Classifies a block by its canvas font size.
    pub fn classify(font_size: f64) -> Self {
        if font_size >= 24.0 {
            Tier::Header
        } else if font_size >= 18.0 {
            Tier::SectionHeader
        } else if font_size >= 14.0 {
            Tier::SubHeader
        } else {
            Tier::Body
        }
    }

    pub fn style(self) -> TierStyle {
        match self {
            Tier::Header => TierStyle {
                size_pt: 18.0,
                font: ExportFont::HelveticaBold,
                space_before: 6.0,
                space_after: 4.0,
            },
            Tier::SectionHeader => TierStyle {
                size_pt: 14.0,
                font: ExportFont::HelveticaBold,
                space_before: 5.0,
                space_after: 3.0,
            },
            Tier::SubHeader => TierStyle {
                size_pt: 11.0,
                font: ExportFont::HelveticaBold,
                space_before: 3.0,
                space_after: 2.0,
            },
            Tier::Body => TierStyle {
                size_pt: 10.0,
                font: ExportFont::Helvetica,
                space_before: 1.0,
                space_after: 1.0,
            },
        }
    }

    /// Space inserted before a block of this tier. A header that opens the
    /// document sits directly on the top margin.
    pub fn space_before(self, is_first: bool) -> f64 {
        match self {
            Tier::Header if is_first => 0.0,
            _ => self.style().space_before,
        }
    }
}
