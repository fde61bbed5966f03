use std::collections::HashMap;

use lotofacil_data::models::{DrawRecord, RawDraw};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Politique appliquée aux enregistrements invalides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Le premier enregistrement invalide interrompt l'analyse.
    #[default]
    Strict,
    /// Les enregistrements invalides sont écartés et comptabilisés.
    Lenient,
}

#[derive(Debug, Clone, Default)]
pub struct ValidatedDraws {
    pub draws: Vec<DrawRecord>,
    pub defects: Vec<AnalysisError>,
}

impl ValidatedDraws {
    pub fn skipped(&self) -> usize {
        self.defects.len()
    }
}

fn reject(
    mode: ValidationMode,
    defects: &mut Vec<AnalysisError>,
    error: AnalysisError,
) -> Result<(), AnalysisError> {
    match mode {
        ValidationMode::Strict => Err(error),
        ValidationMode::Lenient => {
            log::warn!("Tirage ignoré : {}", error);
            defects.push(error);
            Ok(())
        }
    }
}

/// Contrôle d'abord chaque enregistrement isolément, puis l'unicité des
/// concours parmi les tirages bien formés. Un concours présent plusieurs
/// fois est écarté en entier : aucune occurrence n'est privilégiée, le
/// résultat ne dépend donc pas de l'ordre d'entrée. Un enregistrement mal
/// formé ne réserve pas son numéro de concours.
pub fn validate(raw: &[RawDraw], mode: ValidationMode) -> Result<ValidatedDraws, AnalysisError> {
    let mut defects = Vec::new();
    let mut well_formed = Vec::with_capacity(raw.len());
    let mut occurrences: HashMap<u32, usize> = HashMap::with_capacity(raw.len());

    for candidate in raw {
        match DrawRecord::from_raw(candidate) {
            Ok(draw) => {
                *occurrences.entry(draw.sequence_id()).or_default() += 1;
                well_formed.push(draw);
            }
            Err(defect) => reject(
                mode,
                &mut defects,
                AnalysisError::MalformedRecord {
                    sequence_id: candidate.sequence_id,
                    defect,
                },
            )?,
        }
    }

    let mut draws = Vec::with_capacity(well_formed.len());
    for draw in well_formed {
        let duplicated = occurrences
            .get(&draw.sequence_id())
            .is_some_and(|&count| count > 1);
        if duplicated {
            reject(
                mode,
                &mut defects,
                AnalysisError::DuplicateSequenceId {
                    sequence_id: draw.sequence_id(),
                },
            )?;
        } else {
            draws.push(draw);
        }
    }

    Ok(ValidatedDraws { draws, defects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotofacil_data::models::RecordDefect;

    fn raw(id: u32, lo: i64) -> RawDraw {
        RawDraw::new(id, "01/01/2024", (lo..lo + 15).collect())
    }

    #[test]
    fn test_all_valid() {
        let input = vec![raw(1, 1), raw(2, 11), raw(3, 5)];
        let result = validate(&input, ValidationMode::Strict).unwrap();
        assert_eq!(result.draws.len(), 3);
        assert_eq!(result.skipped(), 0);
    }

    #[test]
    fn test_strict_fails_on_malformed() {
        let mut bad = raw(2, 1);
        bad.numbers.pop();
        let input = vec![raw(1, 1), bad, raw(3, 1)];
        let err = validate(&input, ValidationMode::Strict).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MalformedRecord {
                sequence_id: 2,
                defect: RecordDefect::WrongCount(14),
            }
        );
    }

    #[test]
    fn test_strict_fails_on_duplicate_id() {
        let input = vec![raw(1, 1), raw(1, 11)];
        let err = validate(&input, ValidationMode::Strict).unwrap_err();
        assert_eq!(err, AnalysisError::DuplicateSequenceId { sequence_id: 1 });
    }

    #[test]
    fn test_lenient_skips_and_reports() {
        let mut out_of_range = raw(2, 1);
        out_of_range.numbers[0] = 40;
        let input = vec![raw(1, 1), out_of_range, raw(1, 11), raw(3, 11)];

        let result = validate(&input, ValidationMode::Lenient).unwrap();
        assert_eq!(result.draws.len(), 1);
        assert_eq!(result.draws[0].sequence_id(), 3);
        assert_eq!(result.skipped(), 3);
        assert_eq!(result.defects[0].sequence_id(), 2);
        assert_eq!(
            &result.defects[1..],
            &[
                AnalysisError::DuplicateSequenceId { sequence_id: 1 },
                AnalysisError::DuplicateSequenceId { sequence_id: 1 },
            ]
        );
    }

    #[test]
    fn test_lenient_duplicate_ignores_input_order() {
        let input = vec![raw(5, 1), raw(5, 11), raw(6, 3)];
        let mut reversed = input.clone();
        reversed.reverse();

        let forward = validate(&input, ValidationMode::Lenient).unwrap();
        let backward = validate(&reversed, ValidationMode::Lenient).unwrap();
        assert_eq!(forward.draws, backward.draws);
        assert_eq!(forward.draws.len(), 1);
        assert_eq!(forward.draws[0].sequence_id(), 6);
        assert_eq!(forward.skipped(), 2);
    }

    #[test]
    fn test_strict_reports_malformed_before_duplicates() {
        let mut bad = raw(9, 1);
        bad.numbers.push(16);
        let input = vec![raw(1, 1), raw(1, 11), bad];
        let err = validate(&input, ValidationMode::Strict).unwrap_err();
        assert_eq!(err.sequence_id(), 9);
    }

    #[test]
    fn test_malformed_does_not_reserve_id() {
        let mut bad = raw(5, 1);
        bad.numbers[1] = bad.numbers[0];
        let input = vec![bad, raw(5, 1)];
        let result = validate(&input, ValidationMode::Lenient).unwrap();
        assert_eq!(result.draws.len(), 1);
        assert_eq!(result.skipped(), 1);
    }

    #[test]
    fn test_empty_input() {
        let result = validate(&[], ValidationMode::Strict).unwrap();
        assert!(result.draws.is_empty());
        assert!(result.defects.is_empty());
    }
}
