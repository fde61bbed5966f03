use std::cmp::Ordering;

use lotofacil_data::models::{DrawRecord, RawDraw, sorted_by_sequence};
use serde::{Deserialize, Serialize};

use crate::alerts::generate_alerts;
use crate::cycles::{Cycle, detect_cycles};
use crate::error::AnalysisError;
use crate::frequency::{NumberStatistic, compute_number_stats};
use crate::pattern::{PatternAnalysis, analyze_last_draw};
use crate::validator::{ValidationMode, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub mode: ValidationMode,
    /// Limite l'analyse aux `n` tirages les plus récents.
    pub window: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OddEvenRatio {
    pub odd: u64,
    pub even: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisSummary {
    pub total_draws: usize,
    pub most_frequent: Vec<NumberStatistic>,
    pub least_frequent: Vec<NumberStatistic>,
    pub most_overdue: Vec<NumberStatistic>,
    pub odd_even_ratio: OddEvenRatio,
    pub average_sum: f64,
    pub cycles: Vec<Cycle>,
    pub last_draw_pattern: PatternAnalysis,
    /// Tirage le plus récent de l'historique analysé.
    pub last_draw: Option<DrawRecord>,
    pub alerts: Vec<String>,
}

impl AnalysisSummary {
    pub fn current_cycle(&self) -> Option<&Cycle> {
        self.cycles.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    /// Enregistrements écartés en mode tolérant.
    pub defects: Vec<AnalysisError>,
    /// Tirages effectivement analysés, par concours croissant, fenêtre appliquée.
    #[serde(skip)]
    pub draws: Vec<DrawRecord>,
}

impl AnalysisReport {
    pub fn skipped(&self) -> usize {
        self.defects.len()
    }
}

/// Point d'entrée du moteur : validation, tri, fenêtre puis synthèse.
pub fn analyze(raw: &[RawDraw], options: AnalysisOptions) -> Result<AnalysisReport, AnalysisError> {
    let validated = validate(raw, options.mode)?;
    if options.mode == ValidationMode::Lenient && validated.skipped() > 0 {
        log::warn!("{} enregistrements écartés", validated.skipped());
    }

    let mut draws = validated.draws;
    draws.sort_by_key(DrawRecord::sequence_id);

    if let Some(window) = options.window {
        if draws.len() > window {
            let excess = draws.len() - window;
            draws.drain(..excess);
            log::debug!("Fenêtre de {} tirages ({} plus anciens exclus)", window, excess);
        }
    }

    Ok(AnalysisReport {
        summary: summarize(&draws),
        defects: validated.defects,
        draws,
    })
}

fn ranked<F>(stats: &[NumberStatistic], order: F) -> Vec<NumberStatistic>
where
    F: Fn(&NumberStatistic, &NumberStatistic) -> Ordering,
{
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| order(a, b).then(a.number.cmp(&b.number)));
    sorted
}

/// Construit la synthèse à partir de tirages déjà validés (concours uniques).
pub fn summarize(draws: &[DrawRecord]) -> AnalysisSummary {
    let draws = sorted_by_sequence(draws);
    if draws.is_empty() {
        return AnalysisSummary::default();
    }

    // Les trois analyseurs lisent la même séquence et produisent des sorties disjointes.
    let ((stats, cycles), last_pattern) = rayon::join(
        || rayon::join(|| compute_number_stats(&draws), || detect_cycles(&draws)),
        || analyze_last_draw(&draws),
    );

    let most_frequent = ranked(&stats, |a, b| b.frequency.cmp(&a.frequency));
    let least_frequent = ranked(&stats, |a, b| a.frequency.cmp(&b.frequency));
    let most_overdue = ranked(&stats, |a, b| b.delay.cmp(&a.delay));

    let alerts: Vec<String> = generate_alerts(&cycles, &most_overdue, last_pattern.as_ref())
        .iter()
        .map(ToString::to_string)
        .collect();

    let total_draws = draws.len();
    let odd: u64 = draws.iter().map(|d| u64::from(d.odd_count())).sum();
    let even: u64 = draws.iter().map(|d| u64::from(d.even_count())).sum();
    let total_sum: u64 = draws.iter().map(|d| d.sum() as u64).sum();

    log::info!(
        "{} tirages analysés : {} cycles, {} alertes",
        total_draws,
        cycles.len(),
        alerts.len()
    );

    AnalysisSummary {
        total_draws,
        most_frequent,
        least_frequent,
        most_overdue,
        odd_even_ratio: OddEvenRatio { odd, even },
        average_sum: total_sum as f64 / total_draws as f64,
        cycles,
        last_draw_pattern: last_pattern.unwrap_or_default(),
        last_draw: draws.last().cloned(),
        alerts,
    }
}
