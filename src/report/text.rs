//! Flattens report HTML into styled text lines for the PDF layout.

use regex::{Captures, Regex};
use std::sync::LazyLock;

const HEADING_MARK: char = '\u{1}';

static HIDDEN_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<head\b.*?</head\s*>|<style\b.*?</style\s*>|<script\b.*?</script\s*>|<!--.*?-->")
        .expect("hidden block pattern is valid")
});
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static HEADINGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h[1-3]\b[^>]*>(.*?)</h[1-3]\s*>").expect("heading pattern is valid")
});
static LIST_ITEMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("list item pattern is valid"));
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|ul|ol|dl|dt|dd|tr|table|section|header|footer|h[4-6])\s*>")
        .expect("line break pattern is valid")
});
static CELL_ENDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</t[dh]\s*>").expect("cell pattern is valid"));
static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static NUMERIC_ENTITIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(x[0-9A-Fa-f]+|[0-9]+);").expect("numeric entity pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub style: LineStyle,
}

impl TextLine {
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Heading,
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Body,
        }
    }
}

/// 將 HTML 轉為逐行文字：區塊元素換行、`<h1>`~`<h3>` 視為標題
pub fn html_to_lines(html: &str) -> Vec<TextLine> {
    let visible = HIDDEN_BLOCKS.replace_all(html, "");
    // 原始換行與空白一樣只是分隔字元
    let flattened = WHITESPACE.replace_all(&visible, " ");
    let marked = HEADINGS.replace_all(&flattened, |caps: &Captures| {
        format!("\n{}{}\n", HEADING_MARK, &caps[1])
    });
    let listed = LIST_ITEMS.replace_all(&marked, "\n\u{2022} ");
    let broken = LINE_BREAKS.replace_all(&listed, "\n");
    let celled = CELL_ENDS.replace_all(&broken, "  ");
    let stripped = TAGS.replace_all(&celled, "");

    stripped
        .lines()
        .filter_map(|raw| {
            let collapsed = decode_entities(&raw.split_whitespace().collect::<Vec<_>>().join(" "));
            match collapsed.strip_prefix(HEADING_MARK) {
                Some(heading) => {
                    let heading = heading.trim();
                    (!heading.is_empty()).then(|| TextLine::heading(heading))
                }
                None => (!collapsed.is_empty()).then(|| TextLine::body(collapsed)),
            }
        })
        .collect()
}

pub fn decode_entities(text: &str) -> String {
    let decoded = NUMERIC_ENTITIES.replace_all(text, |caps: &Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let html = r#"<html><head><title>ignored</title><style>h1 { color: red; }</style></head>
<body>
  <h1 class="title">Pikkachu</h1>
  <p>Height: 40</p><p>Weight:
     60</p>
</body></html>"#;

        let lines = html_to_lines(html);
        assert_eq!(
            lines,
            vec![
                TextLine::heading("Pikkachu"),
                TextLine::body("Height: 40"),
                TextLine::body("Weight: 60"),
            ]
        );
    }

    #[test]
    fn test_list_items_and_breaks() {
        let html = "<ul><li>static</li><li>lightning-rod</li></ul>first<br>second<br/>";
        let texts: Vec<String> = html_to_lines(html).into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["\u{2022} static", "\u{2022} lightning-rod", "first", "second"]);
    }

    #[test]
    fn test_table_cells_stay_on_one_line() {
        let html = "<table><tr><th>Height</th><td>40</td></tr></table>";
        let lines = html_to_lines(html);
        assert_eq!(lines, vec![TextLine::body("Height 40")]);
    }

    #[test]
    fn test_entities_are_decoded_after_tags() {
        let html = "<p>&lt;b&gt;Pika &amp; Chu&#33; &#x263A;</p>";
        let lines = html_to_lines(html);
        assert_eq!(lines, vec![TextLine::body("<b>Pika & Chu! \u{263A}")]);
    }
}
