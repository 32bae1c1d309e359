// Paginated Document Serializer
// Implements: reading-order reconstruction, style tiers, re-flow and pagination, link regions,
// and the PDF writer behind the export endpoint.
// Serialization is CPU-bound: call render_pdf from tokio::task::spawn_blocking.

pub mod handlers;
pub mod pdf;
pub mod serializer;
pub mod tier;
pub mod writer;

use bytes::Bytes;
use tracing::debug;

pub use serializer::{serialize, PageLayout, SerializeSummary};
pub use writer::{DocumentWriter, ExportError};

use crate::export::pdf::PdfDocumentWriter;
use crate::models::block::TextBlock;

/// Serializes `blocks` into a finished PDF.
pub fn render_pdf(
    blocks: &[TextBlock],
    layout: &PageLayout,
) -> Result<(Bytes, SerializeSummary), ExportError> {
    let mut writer = PdfDocumentWriter::new(layout.page_width, layout.page_height);
    let summary = serialize(blocks, layout, &mut writer)?;
    debug!(
        pages = writer.page_count(),
        lines = summary.lines,
        "Document serialized"
    );
    let bytes = writer.finish()?;
    Ok((bytes, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
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
            section_type: "contact".to_string(),
            rendered_height: None,
        }
    }

    #[test]
    fn test_render_pdf_default_resume() {
        let blocks = vec![
            make_block("Your Name", 50.0, 32.0),
            make_block("Software Developer", 90.0, 18.0),
            make_block(
                "email@example.com | (123) 456-7890 | linkedin.com/in/yourname",
                120.0,
                14.0,
            ),
        ];
        let (bytes, summary) = render_pdf(&blocks, &PageLayout::a4()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.links, 1);
    }
}
