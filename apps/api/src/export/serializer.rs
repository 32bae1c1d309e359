//! Flow-to-paginated-document serializer.
//!
//! Canvas blocks carry absolute coordinates and free font sizes. The serializer
//! orders them top to bottom, maps each onto a style tier, re-flows its text into
//! the page's content width and streams the result into a [`DocumentWriter`]. Profile
//! URLs are shown as platform labels with a link region laid exactly over each label.
//!
//! The serializer is synchronous and never touches the editor: it borrows a block
//! slice and only talks to the writer.

use serde::Serialize;

use crate::export::tier::{Tier, TierStyle};
use crate::export::writer::{DocumentWriter, ExportError, LinkRect};
use crate::layout::font_metrics::get_metrics;
use crate::links::rewrite::rewrite_for_display;
use crate::models::block::TextBlock;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// Extra room kept free above the bottom margin before a page break.
    pub bottom_reserve: f64,
    /// Cursor advance for a blank source line.
    pub empty_line_advance: f64,
    /// Physical line height as a multiple of the export size in points.
    pub line_height_factor: f64,
}

impl PageLayout {
    pub fn a4() -> Self {
        PageLayout {
            page_width: 210.0,
            page_height: 297.0,
            margin: 20.0,
            bottom_reserve: 15.0,
            empty_line_advance: 2.0,
            line_height_factor: 0.4,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// A line is moved to a new page when the cursor is strictly past this.
    pub fn break_threshold(&self) -> f64 {
        self.page_height - self.margin - self.bottom_reserve
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SerializeSummary {
    pub pages: usize,
    pub lines: usize,
    pub links: usize,
}

/// Serializes `blocks` into `writer`. Does not call [`DocumentWriter::finish`].
pub fn serialize<W: DocumentWriter>(
    blocks: &[TextBlock],
    layout: &PageLayout,
    writer: &mut W,
) -> Result<SerializeSummary, ExportError> {
    if let Some(block) = blocks
        .iter()
        .find(|b| !(b.position.x.is_finite() && b.position.y.is_finite()))
    {
        return Err(ExportError::NonFinitePosition(block.id));
    }

    // Stable: blocks on the same y keep insertion order.
    let mut ordered: Vec<&TextBlock> = blocks.iter().collect();
    ordered.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));

    let mut flow = PageFlow {
        layout,
        cursor: layout.margin,
        summary: SerializeSummary {
            pages: 1,
            lines: 0,
            links: 0,
        },
    };

    for (index, block) in ordered.into_iter().enumerate() {
        let tier = Tier::classify(block.font_size);
        let style = tier.style();

        writer.set_font(style.font, style.size_pt)?;
        flow.cursor += tier.space_before(index == 0);

        for line in block.text.split('\n') {
            let line = line.trim();
            if line.is_empty() {
                flow.cursor += layout.empty_line_advance;
            } else {
                flow.emit_line(line, &style, writer)?;
            }
        }

        flow.cursor += style.space_after;
    }

    Ok(flow.summary)
}

/// Vertical cursor state across blocks and pages.
struct PageFlow<'a> {
    layout: &'a PageLayout,
    /// Baseline of the next physical line, in millimetres from the page top.
    cursor: f64,
    summary: SerializeSummary,
}

impl PageFlow<'_> {
    fn emit_line<W: DocumentWriter>(
        &mut self,
        line: &str,
        style: &TierStyle,
        writer: &mut W,
    ) -> Result<(), ExportError> {
        let display = rewrite_for_display(line);
        let text = display.rewritten.as_str();
        let metrics = get_metrics(style.font.metric_face());
        let size_mm = style.size_pt * MM_PER_PT;
        let line_height = style.size_pt * self.layout.line_height_factor;
        let margin = self.layout.margin;

        for range in metrics.wrap(text, size_mm, self.layout.content_width()) {
            if self.cursor > self.layout.break_threshold() {
                writer.add_page()?;
                self.cursor = margin;
                self.summary.pages += 1;
            }

            let baseline = self.cursor;
            writer.text(margin, baseline, &text[range.clone()])?;

            for link in &display.links {
                let start = link.label_range.start.max(range.start);
                let end = link.label_range.end.min(range.end);
                if start >= end {
                    continue;
                }
                let rect = LinkRect {
                    x: margin + metrics.measure_at(&text[range.start..start], size_mm),
                    y: baseline - line_height,
                    width: metrics.measure_at(&text[start..end], size_mm),
                    height: line_height,
                };
                writer.link(rect, &link.link.canonical_url)?;
                self.summary.links += 1;
            }

            self.cursor += line_height;
            self.summary.lines += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::writer::{Command, ExportFont, RecordingWriter};
    use crate::geometry::Point;
    use crate::layout::font_metrics::FontFace;
    use crate::models::block::FontStyle;
    use uuid::Uuid;

    fn make_block(text: &str, y: f64, font_size: f64) -> TextBlock {
        TextBlock {
            id: Uuid::new_v4(),
            text: text.to_string(),
            position: Point::new(50.0, y),
            box_width: 700.0,
            font_size,
            font_family: "Arial".to_string(),
            font_style: FontStyle::Normal,
            fill_color: "black".to_string(),
            section_type: "body".to_string(),
            rendered_height: None,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn run(blocks: &[TextBlock], layout: &PageLayout) -> (RecordingWriter, SerializeSummary) {
        let mut writer = RecordingWriter::default();
        let summary = serialize(blocks, layout, &mut writer).unwrap();
        (writer, summary)
    }

    #[test]
    fn test_reading_order_follows_y() {
        let blocks = vec![
            make_block("C", 300.0, 12.0),
            make_block("A", 50.0, 12.0),
            make_block("B", 150.0, 12.0),
        ];
        let (writer, summary) = run(&blocks, &PageLayout::a4());
        let order: Vec<&str> = writer.texts().iter().map(|t| t.2).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(summary.lines, 3);
    }

    #[test]
    fn test_equal_y_keeps_insertion_order() {
        let blocks = vec![make_block("first", 100.0, 12.0), make_block("second", 100.0, 12.0)];
        let (writer, _) = run(&blocks, &PageLayout::a4());
        let order: Vec<&str> = writer.texts().iter().map(|t| t.2).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_single_page_break_resets_cursor_to_margin() {
        let text = (0..70)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let (writer, summary) = run(&[make_block(&text, 0.0, 12.0)], &PageLayout::a4());

        // Body lines are 4mm apart starting at 21: the cursor first passes 262
        // before the 62nd line.
        assert_eq!(writer.page_breaks(), 1);
        assert_eq!(summary.pages, 2);

        let break_at = writer
            .commands
            .iter()
            .position(|c| *c == Command::AddPage)
            .unwrap();
        match &writer.commands[break_at + 1] {
            Command::Text { y, text, .. } => {
                assert_eq!(text, "line 61");
                assert_close(*y, 20.0);
            }
            other => panic!("expected text after page break, got {other:?}"),
        }

        let texts = writer.texts();
        assert_close(texts[60].1, 21.0 + 60.0 * 4.0);
        assert!(texts[60].1 <= PageLayout::a4().break_threshold());
    }

    #[test]
    fn test_first_header_sits_on_margin() {
        let blocks = vec![make_block("Jane Doe", 50.0, 32.0), make_block("Second", 90.0, 28.0)];
        let (writer, _) = run(&blocks, &PageLayout::a4());
        let texts = writer.texts();
        assert_close(texts[0].1, 20.0);
        // 20 + 7.2 line + 4 after + 6 before
        assert_close(texts[1].1, 37.2);
        assert_eq!(writer.commands[0], Command::SetFont(ExportFont::HelveticaBold, 18.0));
    }

    #[test]
    fn test_empty_lines_advance_by_two() {
        let (writer, summary) = run(&[make_block("a\n   \nb", 0.0, 12.0)], &PageLayout::a4());
        let texts = writer.texts();
        assert_eq!(texts.len(), 2);
        assert_close(texts[0].1, 21.0);
        assert_close(texts[1].1, 27.0);
        assert_eq!(summary.lines, 2);
    }

    #[test]
    fn test_link_region_covers_label() {
        let (writer, summary) = run(
            &[make_block("Code: github.com/joe", 0.0, 12.0)],
            &PageLayout::a4(),
        );
        assert_eq!(writer.texts()[0].2, "Code: GitHub");
        assert_eq!(summary.links, 1);

        let links = writer.links();
        let (rect, url) = links[0];
        assert_eq!(url, "https://github.com/joe");

        let metrics = get_metrics(FontFace::Helvetica);
        let size_mm = 10.0 * MM_PER_PT;
        assert_close(rect.x, 20.0 + metrics.measure_at("Code: ", size_mm));
        assert_close(rect.width, metrics.measure_at("GitHub", size_mm));
        assert_close(rect.y, 21.0 - 4.0);
        assert_close(rect.height, 4.0);
    }

    #[test]
    fn test_label_split_by_wrap_yields_region_per_part() {
        // 18mm of content width: "Stack" and "Overflow" fit alone, not together.
        let layout = PageLayout {
            page_width: 58.0,
            ..PageLayout::a4()
        };
        let (writer, summary) = run(
            &[make_block("stackoverflow.com/users/42", 0.0, 12.0)],
            &layout,
        );
        let texts: Vec<&str> = writer.texts().iter().map(|t| t.2).collect();
        assert_eq!(texts, vec!["Stack", "Overflow"]);
        assert_eq!(summary.links, 2);

        let links = writer.links();
        assert!(links.iter().all(|(_, url)| *url == "https://stackoverflow.com/users/42"));
        assert_close(links[1].0.x, 20.0);
        assert_close(links[1].0.y, links[0].0.y + 4.0);
    }

    #[test]
    fn test_writer_error_aborts() {
        let mut writer = RecordingWriter {
            fail_after: Some(1),
            ..Default::default()
        };
        let result = serialize(&[make_block("a\nb", 0.0, 12.0)], &PageLayout::a4(), &mut writer);
        assert!(matches!(result, Err(ExportError::Writer(_))));
        assert_eq!(writer.commands.len(), 1);
    }

    #[test]
    fn test_non_finite_position_is_rejected() {
        let mut block = make_block("x", 0.0, 12.0);
        block.position.y = f64::NAN;
        let mut writer = RecordingWriter::default();
        let result = serialize(&[block], &PageLayout::a4(), &mut writer);
        assert!(matches!(result, Err(ExportError::NonFinitePosition(_))));
        assert!(writer.commands.is_empty());
    }

    #[test]
    fn test_empty_document_is_one_blank_page() {
        let (writer, summary) = run(&[], &PageLayout::a4());
        assert!(writer.commands.is_empty());
        assert_eq!(summary, SerializeSummary { pages: 1, lines: 0, links: 0 });
    }
}
