use crate::core::{NameTranslator, PokemonLookup, ReportOutcome, ReportRequest, Storage};
use crate::report::ReportGenerator;
use crate::utils::error::Result;

/// 查詢 → 翻譯 → 產生報告
pub struct ReportEngine<L: PokemonLookup, T: NameTranslator, S: Storage> {
    lookup: L,
    translator: T,
    generator: ReportGenerator<S>,
}

impl<L: PokemonLookup, T: NameTranslator, S: Storage> ReportEngine<L, T, S> {
    pub fn new(lookup: L, translator: T, generator: ReportGenerator<S>) -> Self {
        Self {
            lookup,
            translator,
            generator,
        }
    }

    pub async fn run(&self, request: &ReportRequest) -> Result<ReportOutcome> {
        tracing::info!("🚀 Building report for '{}'", request.pokemon);

        let record = match self.lookup.get_info(&request.pokemon).await? {
            Some(record) => record,
            None => {
                tracing::info!("🔍 No pokemon named '{}'", request.pokemon);
                return Ok(ReportOutcome::NotFound);
            }
        };

        let subject = request
            .translate_subject
            .as_deref()
            .unwrap_or(&record.name);
        let display_name = self.translator.translate(subject).await?;

        let pdf_path = self
            .generator
            .render_pdf(&record, &display_name, &request.output)
            .await?;

        tracing::info!("✅ Report for '{}' complete", record.name);
        Ok(ReportOutcome::Saved {
            output: request.output.clone(),
            pdf_path,
            html_path: self.generator.html_path(),
        })
    }
}
