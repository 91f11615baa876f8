use crate::emitter::SplitStats;
use serde::Serialize;
use std::path::PathBuf;

/// What a run produced, printed with `--report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub definition: PathBuf,
    pub declarations: PathBuf,
    pub attributes: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_source: Option<PathBuf>,
    #[serde(flatten)]
    pub stats: SplitStats,
}

impl RunSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
