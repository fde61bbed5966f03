use std::fmt;

use serde::Serialize;

use crate::cycles::Cycle;
use crate::frequency::NumberStatistic;
use crate::pattern::PatternAnalysis;

/// Au-delà de cette longueur, un cycle encore ouvert est signalé.
pub const LONG_CYCLE_THRESHOLD: u32 = 4;
/// Retard (en concours) au-delà duquel un numéro devient critique.
pub const CRITICAL_DELAY_THRESHOLD: u32 = 10;
pub const SUM_LOWER_BOUND: u32 = 160;
pub const SUM_UPPER_BOUND: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    LongOpenCycle { length: u32, missing: Vec<u8> },
    CriticalDelay { number: u8, delay: u32 },
    SumAnomaly { sum: u32 },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::LongOpenCycle { length, missing } => {
                let missing = missing
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "⚠️ Le cycle en cours est long ({length} tirages). Numéros manquants : {missing}."
                )
            }
            Alert::CriticalDelay { number, delay } => {
                write!(f, "🚨 Numéro {number} critique ! En retard depuis {delay} concours.")
            }
            Alert::SumAnomaly { sum } => write!(
                f,
                "📉 Somme du dernier tirage ({sum}) hors de la plage habituelle ({SUM_LOWER_BOUND}-{SUM_UPPER_BOUND})."
            ),
        }
    }
}

/// Applique les règles dans un ordre fixe : cycle ouvert, retards critiques
/// (dans l'ordre de `most_overdue`), puis somme du dernier tirage.
pub fn generate_alerts(
    cycles: &[Cycle],
    most_overdue: &[NumberStatistic],
    last_pattern: Option<&PatternAnalysis>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(current) = cycles.last().filter(|c| c.is_open()) {
        if current.length > LONG_CYCLE_THRESHOLD {
            alerts.push(Alert::LongOpenCycle {
                length: current.length,
                missing: current.missing_numbers.clone(),
            });
        }
    }

    alerts.extend(
        most_overdue
            .iter()
            .filter(|s| s.delay > CRITICAL_DELAY_THRESHOLD)
            .map(|s| Alert::CriticalDelay {
                number: s.number,
                delay: s.delay,
            }),
    );

    if let Some(pattern) = last_pattern {
        if !(SUM_LOWER_BOUND..=SUM_UPPER_BOUND).contains(&pattern.sum) {
            alerts.push(Alert::SumAnomaly { sum: pattern.sum });
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_cycle(length: u32, missing: Vec<u8>) -> Cycle {
        Cycle {
            cycle_number: 3,
            start_sequence_id: 100,
            end_sequence_id: None,
            length,
            missing_numbers: missing,
        }
    }

    fn stat(number: u8, delay: u32) -> NumberStatistic {
        NumberStatistic {
            number,
            frequency: 1,
            last_appearance: 1,
            delay,
        }
    }

    fn pattern(sum: u32) -> PatternAnalysis {
        PatternAnalysis {
            sum,
            ..PatternAnalysis::default()
        }
    }

    #[test]
    fn test_long_open_cycle() {
        let alerts = generate_alerts(&[open_cycle(5, vec![4, 19])], &[], None);
        assert_eq!(
            alerts,
            vec![Alert::LongOpenCycle {
                length: 5,
                missing: vec![4, 19],
            }]
        );
        assert_eq!(
            alerts[0].to_string(),
            "⚠️ Le cycle en cours est long (5 tirages). Numéros manquants : 4, 19."
        );
    }

    #[test]
    fn test_open_cycle_at_threshold_is_quiet() {
        assert!(generate_alerts(&[open_cycle(4, vec![1])], &[], None).is_empty());
    }

    #[test]
    fn test_closed_trailing_cycle_is_quiet() {
        let closed = Cycle {
            end_sequence_id: Some(120),
            length: 21,
            missing_numbers: vec![],
            ..open_cycle(0, vec![])
        };
        assert!(generate_alerts(&[open_cycle(9, vec![1]), closed], &[], None).is_empty());
    }

    #[test]
    fn test_critical_delays_keep_given_order() {
        let overdue = [stat(7, 14), stat(3, 11), stat(12, 10), stat(1, 2)];
        let alerts = generate_alerts(&[], &overdue, None);
        assert_eq!(
            alerts,
            vec![
                Alert::CriticalDelay { number: 7, delay: 14 },
                Alert::CriticalDelay { number: 3, delay: 11 },
            ]
        );
        assert_eq!(
            alerts[0].to_string(),
            "🚨 Numéro 7 critique ! En retard depuis 14 concours."
        );
    }

    #[test]
    fn test_sum_bounds_are_inclusive() {
        assert!(generate_alerts(&[], &[], Some(&pattern(160))).is_empty());
        assert!(generate_alerts(&[], &[], Some(&pattern(240))).is_empty());
        assert_eq!(
            generate_alerts(&[], &[], Some(&pattern(159))),
            vec![Alert::SumAnomaly { sum: 159 }]
        );
        assert_eq!(
            generate_alerts(&[], &[], Some(&pattern(241))),
            vec![Alert::SumAnomaly { sum: 241 }]
        );
    }

    #[test]
    fn test_no_pattern_no_sum_alert() {
        assert!(generate_alerts(&[], &[], None).is_empty());
    }

    #[test]
    fn test_rule_order() {
        let alerts = generate_alerts(
            &[open_cycle(6, vec![25])],
            &[stat(25, 30)],
            Some(&pattern(300)),
        );
        assert!(matches!(alerts[0], Alert::LongOpenCycle { .. }));
        assert!(matches!(alerts[1], Alert::CriticalDelay { number: 25, .. }));
        assert!(matches!(alerts[2], Alert::SumAnomaly { sum: 300 }));
    }
}
