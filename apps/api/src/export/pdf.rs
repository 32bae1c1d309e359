//! PDF implementation of [`DocumentWriter`] on top of `pdf-writer`.
//!
//! Pages are buffered as content streams and assembled into a document in `finish`.
//! Text is set in the base-14 Helvetica faces with WinAnsi encoding, so nothing is
//! embedded and characters outside WinAnsi come out as `?`.

use bytes::Bytes;
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::export::writer::{DocumentWriter, ExportError, ExportFont, LinkRect};

const PT_PER_MM: f64 = 72.0 / 25.4;

const REGULAR_RESOURCE: &[u8] = b"F1";
const BOLD_RESOURCE: &[u8] = b"F2";

struct PageBuffer {
    content: Content,
    links: Vec<(Rect, String)>,
}

impl PageBuffer {
    fn new() -> Self {
        PageBuffer {
            content: Content::new(),
            links: Vec::new(),
        }
    }
}

pub struct PdfDocumentWriter {
    page_width: f64,
    page_height: f64,
    pages: Vec<PageBuffer>,
    font: Option<(ExportFont, f32)>,
}

impl PdfDocumentWriter {
    /// A document with one empty page of `page_width` × `page_height` millimetres.
    pub fn new(page_width: f64, page_height: f64) -> Self {
        PdfDocumentWriter {
            page_width,
            page_height,
            pages: vec![PageBuffer::new()],
            font: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&mut self) -> &mut PageBuffer {
        if self.pages.is_empty() {
            self.pages.push(PageBuffer::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Top-down millimetres to bottom-up points.
    fn to_pdf_point(&self, x: f64, y: f64) -> Result<(f32, f32), ExportError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(ExportError::Writer(format!(
                "non-finite coordinate ({x}, {y})"
            )));
        }
        Ok((
            (x * PT_PER_MM) as f32,
            ((self.page_height - y) * PT_PER_MM) as f32,
        ))
    }
}

impl DocumentWriter for PdfDocumentWriter {
    fn set_font(&mut self, font: ExportFont, size_pt: f64) -> Result<(), ExportError> {
        if !(size_pt.is_finite() && size_pt > 0.0) {
            return Err(ExportError::Writer(format!("invalid font size {size_pt}")));
        }
        self.font = Some((font, size_pt as f32));
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        self.pages.push(PageBuffer::new());
        Ok(())
    }

    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), ExportError> {
        let (font, size) = self
            .font
            .ok_or_else(|| ExportError::Writer("text drawn before a font was set".to_string()))?;
        let (px, py) = self.to_pdf_point(x, y)?;
        let encoded = encode_win_ansi(text);

        self.current_page()
            .content
            .begin_text()
            .set_font(Name(resource_name(font)), size)
            .next_line(px, py)
            .show(Str(&encoded))
            .end_text();
        Ok(())
    }

    fn link(&mut self, rect: LinkRect, url: &str) -> Result<(), ExportError> {
        let (x1, y_top) = self.to_pdf_point(rect.x, rect.y)?;
        let (x2, y_bottom) = self.to_pdf_point(rect.x + rect.width, rect.y + rect.height)?;
        self.current_page()
            .links
            .push((Rect::new(x1, y_bottom, x2, y_top), url.to_string()));
        Ok(())
    }

    fn finish(self) -> Result<Bytes, ExportError> {
        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let media_box = Rect::new(
            0.0,
            0.0,
            (self.page_width * PT_PER_MM) as f32,
            (self.page_height * PT_PER_MM) as f32,
        );

        let mut page_ids = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let page_id = alloc();
            let content_id = alloc();

            let mut annot_ids = Vec::with_capacity(page.links.len());
            for (rect, url) in &page.links {
                let annot_id = alloc();
                let mut annot = pdf.annotation(annot_id);
                annot
                    .subtype(AnnotationType::Link)
                    .rect(*rect)
                    .border(0.0, 0.0, 0.0, None);
                annot
                    .action()
                    .action_type(ActionType::Uri)
                    .uri(Str(url.as_bytes()));
                annot_ids.push(annot_id);
            }

            pdf.stream(content_id, &page.content.finish());

            let mut page_writer = pdf.page(page_id);
            page_writer
                .media_box(media_box)
                .parent(pages_id)
                .contents(content_id);
            if !annot_ids.is_empty() {
                page_writer.annotations(annot_ids.iter().copied());
            }
            page_writer
                .resources()
                .fonts()
                .pair(Name(REGULAR_RESOURCE), regular_id)
                .pair(Name(BOLD_RESOURCE), bold_id);

            page_ids.push(page_id);
        }

        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        Ok(Bytes::from(pdf.finish()))
    }
}

fn resource_name(font: ExportFont) -> &'static [u8] {
    match font {
        ExportFont::Helvetica => REGULAR_RESOURCE,
        ExportFont::HelveticaBold => BOLD_RESOURCE,
    }
}

/// Encodes `text` for a WinAnsiEncoding simple font.
///
/// Latin-1 maps straight through; the common typographic punctuation lives in
/// 0x80..=0x9F. Anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Abc 1"), b"Abc 1".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("• – —"), vec![0x95, b' ', 0x96, b' ', 0x97]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_finish_emits_pages_fonts_and_links() {
        let mut writer = PdfDocumentWriter::new(210.0, 297.0);
        writer.set_font(ExportFont::HelveticaBold, 18.0).unwrap();
        writer.text(20.0, 20.0, "Jane Doe").unwrap();
        writer.add_page().unwrap();
        writer.set_font(ExportFont::Helvetica, 10.0).unwrap();
        writer
            .link(
                LinkRect {
                    x: 20.0,
                    y: 17.0,
                    width: 12.0,
                    height: 4.0,
                },
                "https://github.com/joe",
            )
            .unwrap();
        writer.text(20.0, 21.0, "GitHub").unwrap();
        assert_eq!(writer.page_count(), 2);

        let bytes = writer.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(contains(&bytes, b"https://github.com/joe"));
        assert!(contains(&bytes, b"(Jane Doe) Tj"));
    }

    #[test]
    fn test_text_before_font_fails() {
        let mut writer = PdfDocumentWriter::new(210.0, 297.0);
        assert!(matches!(
            writer.text(20.0, 20.0, "x"),
            Err(ExportError::Writer(_))
        ));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let writer = PdfDocumentWriter::new(210.0, 297.0);
        let (x, y) = writer.to_pdf_point(0.0, 297.0).unwrap();
        assert_eq!((x, y), (0.0, 0.0));
        let (_, top) = writer.to_pdf_point(0.0, 0.0).unwrap();
        assert!((top - 841.89).abs() < 0.01);
    }
}
