use lotofacil_data::models::{DrawRecord, POOL_SIZE, sorted_by_sequence};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberStatistic {
    pub number: u8,
    pub frequency: u32,
    /// Dernier concours contenant le numéro, 0 s'il n'est jamais sorti.
    pub last_appearance: u32,
    pub delay: u32,
}

/// Fréquence et retard de chaque numéro 1..=25, dans l'ordre des numéros.
///
/// Un numéro jamais tiré garde `last_appearance = 0` : son retard vaut alors
/// le dernier numéro de concours, ce qui le classe parmi les plus en retard.
pub fn compute_number_stats(draws: &[DrawRecord]) -> Vec<NumberStatistic> {
    let draws = sorted_by_sequence(draws);
    let size = POOL_SIZE as usize;

    let mut frequency = vec![0u32; size];
    let mut last_seen = vec![0u32; size];

    for draw in draws.iter() {
        for &n in draw.numbers() {
            let idx = (n - 1) as usize;
            frequency[idx] += 1;
            last_seen[idx] = draw.sequence_id();
        }
    }

    let last_id = draws.last().map(DrawRecord::sequence_id).unwrap_or(0);

    (1..=POOL_SIZE)
        .map(|number| {
            let idx = (number - 1) as usize;
            NumberStatistic {
                number,
                frequency: frequency[idx],
                last_appearance: last_seen[idx],
                delay: last_id - last_seen[idx],
            }
        })
        .collect()
}
