use std::fmt;
use std::path::PathBuf;

/// 查詢服務回傳的寶可夢資料，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonRecord {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub abilities: Vec<String>,
}

impl PokemonRecord {
    /// 以 ", " 串接能力名稱，保留原始順序
    pub fn abilities_display(&self) -> String {
        self.abilities.join(", ")
    }
}

/// 一次報告產生所需的輸入
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub pokemon: String,
    /// Fixed subject for the translator; the looked-up name is used when unset.
    pub translate_subject: Option<String>,
    /// PDF path relative to the storage root.
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Saved {
        output: String,
        pdf_path: PathBuf,
        html_path: PathBuf,
    },
    NotFound,
}

impl fmt::Display for ReportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportOutcome::Saved { output, .. } => write!(f, "PDF report saved as {}", output),
            ReportOutcome::NotFound => write!(f, "Pokemon not found."),
        }
    }
}
