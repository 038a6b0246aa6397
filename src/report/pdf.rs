//! Lays out text lines on A4 pages using the base-14 Helvetica fonts.

use crate::report::text::{LineStyle, TextLine};
use crate::utils::error::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;

const BODY_FONT: &str = "F1";
const BODY_SIZE: f32 = 12.0;
const BODY_LEADING: f32 = 16.0;

const HEADING_FONT: &str = "F2";
const HEADING_SIZE: f32 = 18.0;
const HEADING_LEADING: f32 = 26.0;

// Helvetica 平均字寬約為 0.5 em
const AVG_CHAR_WIDTH: f32 = 0.5;

/// 將文字行排版成 PDF，回傳檔案位元組
pub fn render_pdf(lines: &[TextLine], title: &str) -> Result<Vec<u8>> {
    let pages = layout_pages(lines);
    tracing::debug!("🖨️ Laid out {} line(s) on {} page(s)", lines.len(), pages.len());

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let heading_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            BODY_FONT => body_font_id,
            HEADING_FONT => heading_font_id,
        },
    });

    let mut page_ids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("pokemon-report ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn layout_pages(lines: &[TextLine]) -> Vec<Vec<Operation>> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages = Vec::new();
    let mut operations = Vec::new();
    let mut y = top;

    for line in lines {
        let (font, size, leading) = match line.style {
            LineStyle::Heading => (HEADING_FONT, HEADING_SIZE, HEADING_LEADING),
            LineStyle::Body => (BODY_FONT, BODY_SIZE, BODY_LEADING),
        };

        for chunk in wrap_text(&line.text, max_chars(size)) {
            if y - leading < MARGIN {
                pages.push(std::mem::take(&mut operations));
                y = top;
            }
            y -= leading;
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![font.into(), size.into()]),
                Operation::new("Td", vec![MARGIN.into(), y.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(&chunk), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ]);
        }
    }

    if !operations.is_empty() || pages.is_empty() {
        pages.push(operations);
    }
    pages
}

fn max_chars(font_size: f32) -> usize {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    ((usable / (font_size * AVG_CHAR_WIDTH)) as usize).max(1)
}

/// 依字數貪婪斷行；過長的單字會被硬切
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Latin-1 passes through; the WinAnsi punctuation block is mapped; anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_text(doc: &Document, page: u32) -> String {
        let pages = doc.get_pages();
        let content = doc.get_page_content(pages[&page]).unwrap();
        String::from_utf8_lossy(&content).into_owned()
    }

    #[test]
    fn test_render_single_page() {
        let lines = vec![
            TextLine::heading("Pikkachu"),
            TextLine::body("Height: 40"),
            TextLine::body("Abilities: static, lightning-rod"),
        ];

        let bytes = render_pdf(&lines, "Pikkachu").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let text = page_text(&doc, 1);
        assert!(text.contains("Pikkachu"));
        assert!(text.contains("Height: 40"));
        assert!(text.contains("static, lightning-rod"));
        assert!(text.contains("/F2"));
    }

    #[test]
    fn test_render_paginates_long_reports() {
        let lines: Vec<TextLine> = (1..=120)
            .map(|i| TextLine::body(format!("Line {}", i)))
            .collect();

        let bytes = render_pdf(&lines, "Long").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        assert!(doc.get_pages().len() >= 3);
        assert!(page_text(&doc, 1).contains("Line 1"));
        assert!(!page_text(&doc, 1).contains("Line 120"));
    }

    #[test]
    fn test_render_empty_produces_blank_page() {
        let bytes = render_pdf(&[], "Empty").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("static lightning-rod", 13), vec!["static", "lightning-rod"]);
        assert_eq!(wrap_text("a b c", 5), vec!["a b c"]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Pok\u{e9}mon"), b"Pok\xe9mon".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} x"), vec![0x95, b' ', b'x']);
        assert_eq!(encode_win_ansi("\u{30D4}"), b"?".to_vec());
    }
}
