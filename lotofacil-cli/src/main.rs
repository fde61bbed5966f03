mod advisory;
mod display;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use lotofacil_analysis::validator::validate;
use lotofacil_analysis::{AnalysisOptions, AnalysisReport, ValidationMode, analyze};
use lotofacil_data::import::{ImportResult, import_csv};

use crate::display::{
    display_cycles, display_defects, display_import_summary, display_stats, display_summary,
    display_trend,
};

#[derive(Parser)]
#[command(name = "lotofacil", about = "Analyseur statistique des tirages Lotofácil")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Source {
    /// Chemin vers l'export CSV des résultats
    #[arg(short, long, default_value = "assets/lotofacil.csv")]
    file: PathBuf,

    /// Séparateur de colonnes
    #[arg(short, long, default_value = ";")]
    delimiter: char,

    /// Politique face aux tirages invalides
    #[arg(short, long, default_value = "lenient")]
    mode: ValidationMode,

    /// Ne garder que les N tirages les plus récents
    #[arg(short, long)]
    window: Option<usize>,
}

impl Source {
    fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            mode: self.mode,
            window: self.window,
        }
    }

    fn import(&self) -> Result<ImportResult> {
        let delimiter = u8::try_from(self.delimiter)
            .context("Le séparateur doit être un caractère ASCII")?;
        let imported = import_csv(&self.file, delimiter)?;
        log::debug!(
            "{} tirages lus depuis {}",
            imported.draws.len(),
            self.file.display()
        );
        Ok(imported)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Synthèse complète : classements, cycle en cours, dernier tirage, alertes
    Summary {
        #[command(flatten)]
        source: Source,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Fréquences et retards des 25 numéros
    Stats {
        #[command(flatten)]
        source: Source,
    },

    /// Historique des cycles
    Cycles {
        #[command(flatten)]
        source: Source,

        /// Nombre de cycles à afficher
        #[arg(short, long, default_value = "20")]
        last: usize,
    },

    /// Évolution de la somme des derniers tirages
    Trend {
        #[command(flatten)]
        source: Source,

        /// Nombre de tirages à tracer
        #[arg(short, long, default_value = "50")]
        last: usize,
    },

    /// Vérifier le fichier sans l'analyser
    Validate {
        #[command(flatten)]
        source: Source,
    },

    /// Générer le bloc de contexte pour un assistant externe
    Context {
        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Summary { source, json } => cmd_summary(&source, json),
        Command::Stats { source } => cmd_stats(&source),
        Command::Cycles { source, last } => cmd_cycles(&source, last),
        Command::Trend { source, last } => cmd_trend(&source, last),
        Command::Validate { source } => cmd_validate(&source),
        Command::Context { source } => cmd_context(&source),
    }
}

fn load(source: &Source) -> Result<AnalysisReport> {
    let imported = source.import()?;
    let report = analyze(&imported.draws, source.options())
        .with_context(|| format!("Analyse impossible de {}", source.file.display()))?;
    if report.skipped() > 0 {
        eprintln!("{} tirages invalides ignorés", report.skipped());
    }
    Ok(report)
}

fn cmd_summary(source: &Source, json: bool) -> Result<()> {
    let report = load(source)?;
    if json {
        let out = serde_json::to_string_pretty(&report)
            .context("Sérialisation JSON du rapport")?;
        println!("{out}");
    } else {
        display_summary(&report.summary);
    }
    Ok(())
}

fn cmd_stats(source: &Source) -> Result<()> {
    let report = load(source)?;
    display_stats(&report.summary);
    Ok(())
}

fn cmd_cycles(source: &Source, last: usize) -> Result<()> {
    let report = load(source)?;
    display_cycles(&report.summary.cycles, last);
    Ok(())
}

/// (concours, somme) des `last` derniers tirages analysés.
fn trend_points(report: &AnalysisReport, last: usize) -> Vec<(u32, u32)> {
    let start = report.draws.len().saturating_sub(last);
    report.draws[start..]
        .iter()
        .map(|d| (d.sequence_id(), d.sum()))
        .collect()
}

fn cmd_trend(source: &Source, last: usize) -> Result<()> {
    let report = load(source)?;
    display_trend(&trend_points(&report, last), report.summary.average_sum);
    Ok(())
}

fn cmd_validate(source: &Source) -> Result<()> {
    let imported = source.import()?;
    display_import_summary(&imported);

    let validated = validate(&imported.draws, ValidationMode::Lenient)
        .context("Validation des tirages")?;
    println!("  Tirages valides   : {}", validated.draws.len());
    display_defects(&validated.defects);
    Ok(())
}

fn cmd_context(source: &Source) -> Result<()> {
    let report = load(source)?;
    println!("{}", advisory::render_context(&report.summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotofacil_data::models::RawDraw;

    fn raw(id: u32, lo: i64) -> RawDraw {
        RawDraw::new(id, "", (lo..lo + 15).collect())
    }

    #[test]
    fn test_trend_points_follow_window() {
        let input: Vec<RawDraw> = (1..=20).rev().map(|id| raw(id, (id as i64 % 10) + 1)).collect();
        let options = AnalysisOptions {
            mode: ValidationMode::Strict,
            window: Some(6),
        };
        let report = analyze(&input, options).unwrap();

        let points = trend_points(&report, 4);
        let ids: Vec<u32> = points.iter().map(|&(id, _)| id).collect();
        assert_eq!(ids, vec![17, 18, 19, 20]);
        // Concours 20 : 1..=15
        assert_eq!(points[3].1, 120);

        let all = trend_points(&report, 50);
        assert_eq!(all.len(), 6);
        let average = all.iter().map(|&(_, s)| s as f64).sum::<f64>() / 6.0;
        assert!((report.summary.average_sum - average).abs() < 1e-10);
    }
}
