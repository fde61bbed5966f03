use lotofacil_data::models::RecordDefect;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("Tirage {sequence_id} invalide : {defect}")]
    MalformedRecord {
        sequence_id: u32,
        defect: RecordDefect,
    },

    #[error("Concours {sequence_id} présent plusieurs fois")]
    DuplicateSequenceId { sequence_id: u32 },
}

impl AnalysisError {
    pub fn sequence_id(&self) -> u32 {
        match self {
            AnalysisError::MalformedRecord { sequence_id, .. }
            | AnalysisError::DuplicateSequenceId { sequence_id } => *sequence_id,
        }
    }
}
