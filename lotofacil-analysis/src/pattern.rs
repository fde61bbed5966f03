use lotofacil_data::models::{DrawRecord, is_fibonacci, is_prime, sorted_by_sequence};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PatternAnalysis {
    pub sum: u32,
    pub even: u32,
    pub odd: u32,
    pub primes: u32,
    pub fibonacci: u32,
    /// Numéros communs avec le tirage précédent.
    pub repeated: u32,
}

pub fn classify_draw(draw: &DrawRecord, previous: Option<&DrawRecord>) -> PatternAnalysis {
    let count = |pred: fn(u8) -> bool| draw.numbers().iter().filter(|&&n| pred(n)).count() as u32;

    let repeated = previous
        .map(|prev| draw.numbers().iter().filter(|&&n| prev.contains(n)).count() as u32)
        .unwrap_or(0);

    PatternAnalysis {
        sum: draw.sum(),
        even: draw.even_count(),
        odd: draw.odd_count(),
        primes: count(is_prime),
        fibonacci: count(is_fibonacci),
        repeated,
    }
}

/// Classe le tirage le plus récent, comparé à son prédécesseur s'il existe.
pub fn analyze_last_draw(draws: &[DrawRecord]) -> Option<PatternAnalysis> {
    let draws = sorted_by_sequence(draws);
    let (last, earlier) = draws.split_last()?;
    Some(classify_draw(last, earlier.last()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(id: u32, lo: i64) -> DrawRecord {
        DrawRecord::new(id, "", &(lo..lo + 15).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_first_fifteen() {
        let p = analyze_last_draw(&[draw(1, 1)]).unwrap();
        assert_eq!(
            p,
            PatternAnalysis {
                sum: 120,
                even: 7,
                odd: 8,
                primes: 6,
                fibonacci: 6,
                repeated: 0,
            }
        );
    }

    #[test]
    fn test_repeated_from_previous() {
        let p = analyze_last_draw(&[draw(1, 1), draw(2, 11)]).unwrap();
        assert_eq!(p.repeated, 5);
        assert_eq!(p.sum, 270);
        assert_eq!(p.odd, 8);
        assert_eq!(p.even, 7);
        assert_eq!(p.primes, 5);
        assert_eq!(p.fibonacci, 2);
    }

    #[test]
    fn test_uses_most_recent_pair() {
        let p = analyze_last_draw(&[draw(9, 2), draw(3, 1), draw(7, 11)]).unwrap();
        // dernier = concours 9 (2..=16), précédent = concours 7 (11..=25)
        assert_eq!(p.sum, (2..=16).sum::<u32>());
        assert_eq!(p.repeated, 6);
    }

    #[test]
    fn test_empty() {
        assert_eq!(analyze_last_draw(&[]), None);
    }

    #[test]
    fn test_parity_adds_up() {
        let p = classify_draw(&draw(1, 6), None);
        assert_eq!(p.even + p.odd, 15);
    }
}
