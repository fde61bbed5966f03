use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nombre de numéros candidats (1-25).
pub const POOL_SIZE: u8 = 25;

/// Nombre de numéros tirés à chaque concours.
pub const PICK_COUNT: usize = 15;

pub const PRIMES: [u8; 9] = [2, 3, 5, 7, 11, 13, 17, 19, 23];
pub const FIBONACCI: [u8; 7] = [1, 2, 3, 5, 8, 13, 21];

pub fn is_prime(n: u8) -> bool {
    PRIMES.contains(&n)
}

pub fn is_fibonacci(n: u8) -> bool {
    FIBONACCI.contains(&n)
}

/// Tirage tel que livré par l'import, avant toute validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDraw {
    pub sequence_id: u32,
    pub date: String,
    pub numbers: Vec<i64>,
}

impl RawDraw {
    pub fn new(sequence_id: u32, date: impl Into<String>, numbers: Vec<i64>) -> Self {
        Self {
            sequence_id,
            date: date.into(),
            numbers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum RecordDefect {
    #[error("{0} numéros au lieu de 15")]
    WrongCount(usize),
    #[error("numéro {0} hors limites (1-25)")]
    OutOfRange(i64),
    #[error("numéro en double : {0}")]
    DuplicateNumber(u8),
    #[error("numéro de concours nul")]
    ZeroSequenceId,
}

/// Tirage validé : 15 numéros distincts dans [1, 25], triés.
/// Les champs ne sont accessibles qu'en lecture une fois construit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawRecord {
    sequence_id: u32,
    date: String,
    numbers: [u8; PICK_COUNT],
}

impl DrawRecord {
    pub fn new(
        sequence_id: u32,
        date: impl Into<String>,
        numbers: &[i64],
    ) -> Result<Self, RecordDefect> {
        if sequence_id == 0 {
            return Err(RecordDefect::ZeroSequenceId);
        }
        let numbers = validate_numbers(numbers)?;
        Ok(Self {
            sequence_id,
            date: date.into(),
            numbers,
        })
    }

    pub fn from_raw(raw: &RawDraw) -> Result<Self, RecordDefect> {
        Self::new(raw.sequence_id, raw.date.clone(), &raw.numbers)
    }

    pub fn sequence_id(&self) -> u32 {
        self.sequence_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.numbers
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.binary_search(&number).is_ok()
    }

    pub fn sum(&self) -> u32 {
        self.numbers.iter().map(|&n| n as u32).sum()
    }

    pub fn odd_count(&self) -> u32 {
        self.numbers.iter().filter(|&&n| n % 2 == 1).count() as u32
    }

    pub fn even_count(&self) -> u32 {
        PICK_COUNT as u32 - self.odd_count()
    }
}

pub fn validate_numbers(numbers: &[i64]) -> Result<[u8; PICK_COUNT], RecordDefect> {
    if numbers.len() != PICK_COUNT {
        return Err(RecordDefect::WrongCount(numbers.len()));
    }

    let mut seen = [false; POOL_SIZE as usize + 1];
    let mut validated = [0u8; PICK_COUNT];

    for (slot, &n) in validated.iter_mut().zip(numbers) {
        if !(1..=POOL_SIZE as i64).contains(&n) {
            return Err(RecordDefect::OutOfRange(n));
        }
        let n = n as u8;
        if seen[n as usize] {
            return Err(RecordDefect::DuplicateNumber(n));
        }
        seen[n as usize] = true;
        *slot = n;
    }

    validated.sort_unstable();
    Ok(validated)
}

/// Renvoie les tirages par numéro de concours croissant, sans copie s'ils le sont déjà.
pub fn sorted_by_sequence(draws: &[DrawRecord]) -> Cow<'_, [DrawRecord]> {
    if draws
        .windows(2)
        .all(|w| w[0].sequence_id <= w[1].sequence_id)
    {
        Cow::Borrowed(draws)
    } else {
        let mut sorted = draws.to_vec();
        sorted.sort_by_key(|d| d.sequence_id);
        Cow::Owned(sorted)
    }
}

/// Historique déterministe de `n` tirages valides, concours 1..=n.
pub fn make_test_draws(n: usize) -> Vec<DrawRecord> {
    (0..n)
        .map(|i| {
            let mut numbers = [0u8; PICK_COUNT];
            for (k, slot) in numbers.iter_mut().enumerate() {
                *slot = ((i * 7 + k) % POOL_SIZE as usize) as u8 + 1;
            }
            numbers.sort_unstable();
            DrawRecord {
                sequence_id: i as u32 + 1,
                date: format!("{:02}/01/2024", (i % 28) + 1),
                numbers,
            }
        })
        .collect()
}
