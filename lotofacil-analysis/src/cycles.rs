use lotofacil_data::models::{DrawRecord, POOL_SIZE, sorted_by_sequence};
use serde::Serialize;

/// Suite de tirages consécutifs dont l'union couvre les 25 numéros (cycle
/// fermé), ou cycle en cours tant que la couverture n'est pas complète.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub cycle_number: u32,
    pub start_sequence_id: u32,
    /// `None` tant que le cycle est ouvert.
    pub end_sequence_id: Option<u32>,
    pub length: u32,
    pub missing_numbers: Vec<u8>,
}

impl Cycle {
    pub fn is_open(&self) -> bool {
        self.end_sequence_id.is_none()
    }
}

/// Ensemble de numéros 1..=25 sous forme de masque de bits.
#[derive(Debug, Clone, Copy, Default)]
struct NumberSet(u32);

impl NumberSet {
    const FULL: u32 = ((1 << POOL_SIZE) - 1) << 1;

    fn extend(&mut self, numbers: &[u8]) {
        for &n in numbers {
            self.0 |= 1 << n;
        }
    }

    fn is_full(&self) -> bool {
        self.0 == Self::FULL
    }

    fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn missing(&self) -> Vec<u8> {
        (1..=POOL_SIZE).filter(|&n| self.0 & (1 << n) == 0).collect()
    }
}

/// Parcourt les tirages par concours croissant. Un cycle se ferme dès que
/// les 25 numéros sont sortis ; le suivant démarre au concours du tirage
/// suivant, même si la numérotation présente un trou.
pub fn detect_cycles(draws: &[DrawRecord]) -> Vec<Cycle> {
    let draws = sorted_by_sequence(draws);
    let (Some(first), Some(last)) = (draws.first(), draws.last()) else {
        return Vec::new();
    };

    let mut cycles = Vec::new();
    let mut seen = NumberSet::default();
    let mut cycle_start = first.sequence_id();
    let mut cycle_number = 1u32;

    for (i, draw) in draws.iter().enumerate() {
        seen.extend(draw.numbers());
        if !seen.is_full() {
            continue;
        }

        let end = draw.sequence_id();
        log::debug!("Cycle {} fermé : {} → {}", cycle_number, cycle_start, end);
        cycles.push(Cycle {
            cycle_number,
            start_sequence_id: cycle_start,
            end_sequence_id: Some(end),
            length: end - cycle_start + 1,
            missing_numbers: Vec::new(),
        });

        cycle_number += 1;
        seen = NumberSet::default();
        if let Some(next) = draws.get(i + 1) {
            cycle_start = next.sequence_id();
        }
    }

    if !seen.is_empty() {
        cycles.push(Cycle {
            cycle_number,
            start_sequence_id: cycle_start,
            end_sequence_id: None,
            length: last.sequence_id() - cycle_start + 1,
            missing_numbers: seen.missing(),
        });
    }

    cycles
}
