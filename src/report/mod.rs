pub mod pdf;
pub mod template;
pub mod text;

pub use template::ReportTemplate;

use crate::domain::model::PokemonRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_HTML_FILE: &str = "report.html";

/// 將查詢結果與翻譯名稱套入模板，輸出 HTML 與 PDF
pub struct ReportGenerator<S: Storage> {
    storage: S,
    template: ReportTemplate,
    html_file: String,
}

impl<S: Storage> ReportGenerator<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            template: ReportTemplate::default(),
            html_file: DEFAULT_HTML_FILE.to_string(),
        }
    }

    pub fn with_template(mut self, template: ReportTemplate) -> Self {
        self.template = template;
        self
    }

    /// Intermediate HTML location, relative to the storage root.
    pub fn with_html_file(mut self, html_file: impl Into<String>) -> Self {
        self.html_file = html_file.into();
        self
    }

    pub fn html_path(&self) -> PathBuf {
        self.storage.resolve(&self.html_file)
    }

    /// 產生 HTML 字串，不寫檔
    pub fn build_html(&self, record: &PokemonRecord, display_name: &str) -> Result<String> {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        let values = HashMap::from([
            ("display_name", display_name.to_string()),
            ("pokemon", record.name.clone()),
            ("height", record.height.to_string()),
            ("weight", record.weight.to_string()),
            ("abilities", record.abilities_display()),
            ("generated_at", generated_at),
        ]);
        self.template.render(&values)
    }

    pub async fn render_html(&self, record: &PokemonRecord, display_name: &str) -> Result<PathBuf> {
        let html = self.build_html(record, display_name)?;
        self.storage
            .write_file(&self.html_file, html.as_bytes())
            .await?;

        let html_path = self.html_path();
        tracing::info!("📝 HTML report written to {}", html_path.display());
        Ok(html_path)
    }

    /// 先輸出 HTML，再讀回轉成 PDF；中繼 HTML 檔保留不刪
    pub async fn render_pdf(
        &self,
        record: &PokemonRecord,
        display_name: &str,
        output: &str,
    ) -> Result<PathBuf> {
        let pdf_path = self.storage.resolve(output);
        if pdf_path == self.html_path() {
            return Err(ReportError::ConfigValidationError {
                field: "output".to_string(),
                message: format!(
                    "PDF output '{}' would overwrite the intermediate HTML file",
                    output
                ),
            });
        }

        self.render_html(record, display_name).await?;

        let html_bytes = self.storage.read_file(&self.html_file).await?;
        let html = String::from_utf8_lossy(&html_bytes);
        let lines = text::html_to_lines(&html);

        let pdf_bytes = pdf::render_pdf(&lines, display_name)?;
        self.storage.write_file(output, &pdf_bytes).await?;

        tracing::info!(
            "🖨️ PDF report written to {} ({} bytes)",
            pdf_path.display(),
            pdf_bytes.len()
        );
        Ok(pdf_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use tempfile::TempDir;

    fn pikachu() -> PokemonRecord {
        PokemonRecord {
            name: "pikachu".to_string(),
            height: 40,
            weight: 60,
            abilities: vec!["static".to_string(), "lightning-rod".to_string()],
        }
    }

    fn generator(temp_dir: &TempDir) -> ReportGenerator<LocalStorage> {
        ReportGenerator::new(LocalStorage::new(temp_dir.path().to_str().unwrap()))
    }

    #[tokio::test]
    async fn test_render_html_contains_report_data() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(&temp_dir);

        let html_path = generator.render_html(&pikachu(), "Pikkachu").await.unwrap();

        assert_eq!(html_path, temp_dir.path().join(DEFAULT_HTML_FILE));
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("Pikkachu"));
        assert!(html.contains("Height: 40"));
        assert!(html.contains("Weight: 60"));
        assert!(html.contains("static, lightning-rod"));
    }

    #[tokio::test]
    async fn test_render_html_keeps_translated_name_literal() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(&temp_dir);

        let html_path = generator
            .render_html(&pikachu(), "Pikachu's \"Chu\"")
            .await
            .unwrap();

        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("<h1>Pikachu's \"Chu\"</h1>"));
    }

    #[tokio::test]
    async fn test_render_pdf_writes_requested_path() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(&temp_dir);

        let pdf_path = generator
            .render_pdf(&pikachu(), "Pikkachu", "report_test.pdf")
            .await
            .unwrap();

        assert_eq!(pdf_path, temp_dir.path().join("report_test.pdf"));
        assert!(pdf_path.exists());

        let doc = lopdf::Document::load(&pdf_path).unwrap();
        let pages = doc.get_pages();
        let content = doc.get_page_content(pages[&1]).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("Pikkachu"));
        assert!(text.contains("Abilities: static, lightning-rod"));

        // 中繼 HTML 保留在磁碟上
        assert!(generator.html_path().exists());
    }

    #[tokio::test]
    async fn test_render_pdf_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(&temp_dir).with_html_file("html/pikachu.html");
        std::fs::write(temp_dir.path().join("out.pdf"), b"stale").unwrap();

        generator
            .render_pdf(&pikachu(), "Pikkachu", "out.pdf")
            .await
            .unwrap();

        let bytes = std::fs::read(temp_dir.path().join("out.pdf")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(temp_dir.path().join("html/pikachu.html").exists());
    }

    #[tokio::test]
    async fn test_custom_template_error_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let generator =
            generator(&temp_dir).with_template(ReportTemplate::new("<p>{{ shininess }}</p>"));

        let err = generator
            .render_pdf(&pikachu(), "Pikkachu", "out.pdf")
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::TemplateError { .. }));
        assert!(!temp_dir.path().join("out.pdf").exists());
        assert!(!generator.html_path().exists());
    }

    #[tokio::test]
    async fn test_render_pdf_refuses_to_overwrite_html() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(&temp_dir);

        let err = generator
            .render_pdf(&pikachu(), "Pikkachu", DEFAULT_HTML_FILE)
            .await
            .unwrap_err();

        match err {
            ReportError::ConfigValidationError { field, .. } => assert_eq!(field, "output"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!generator.html_path().exists());
    }
}
