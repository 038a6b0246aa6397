use crate::utils::error::{ReportError, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/report.html");

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// HTML 報告模板，佔位符格式為 `{{ key }}`
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    source: String,
}

impl ReportTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// 從檔案載入模板
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        tracing::debug!("📄 Loaded template from {}", path.as_ref().display());
        Ok(Self::new(source))
    }

    /// Keys referenced by the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(&self.source)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// 以 `values` 填入模板；值中的 `&`、`<`、`>` 會被跳脫
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String> {
        let opened = self.source.matches("{{").count();
        let matched = PLACEHOLDER.find_iter(&self.source).count();
        if opened != matched {
            return Err(ReportError::TemplateError {
                message: format!(
                    "{} malformed placeholder(s); expected the form {{{{ key }}}}",
                    opened - matched.min(opened)
                ),
            });
        }

        let unknown: Vec<&str> = self
            .placeholders()
            .into_iter()
            .filter(|key| !values.contains_key(key))
            .collect();
        if !unknown.is_empty() {
            return Err(ReportError::TemplateError {
                message: format!("unknown placeholder(s): {}", unknown.join(", ")),
            });
        }

        let rendered = PLACEHOLDER.replace_all(&self.source, |caps: &Captures| {
            values
                .get(&caps[1])
                .map(|value| escape_html(value))
                .unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// Placeholders only sit in text content, so quotes are left as-is.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
