use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::{Chart, Plot, Shape};

use lotofacil_analysis::AnalysisError;
use lotofacil_analysis::AnalysisSummary;
use lotofacil_analysis::cycles::Cycle;
use lotofacil_analysis::frequency::NumberStatistic;
use lotofacil_data::import::ImportResult;
use lotofacil_data::models::{DrawRecord, POOL_SIZE};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Tirages reconnus  : {}", result.draws.len());
    println!("  Lignes ignorées   : {}", result.ignored);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_defects(defects: &[AnalysisError]) {
    if defects.is_empty() {
        println!("\n✅ Tous les tirages sont valides.");
        return;
    }

    println!("\n❌ {} tirages invalides\n", defects.len());
    let mut table = new_table(vec!["Concours", "Défaut"]);
    for defect in defects {
        table.add_row(vec![defect.sequence_id().to_string(), defect.to_string()]);
    }
    println!("{table}");
}

fn display_ranking(title: &str, stats: &[NumberStatistic], top: usize) {
    println!("\n── {title} ──");
    let mut table = new_table(vec!["Numéro", "Fréquence", "Dernier concours", "Retard"]);
    for stat in stats.iter().take(top) {
        table.add_row(vec![
            format!("{:2}", stat.number),
            stat.frequency.to_string(),
            stat.last_appearance.to_string(),
            stat.delay.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_summary(summary: &AnalysisSummary) {
    if summary.total_draws == 0 {
        println!("Aucun tirage à analyser.");
        return;
    }

    println!("\n📊 Synthèse sur {} concours\n", summary.total_draws);
    println!("  Somme moyenne     : {:.1}", summary.average_sum);
    println!(
        "  Impairs / pairs   : {} / {}",
        summary.odd_even_ratio.odd, summary.odd_even_ratio.even
    );

    display_ranking("Les plus fréquents", &summary.most_frequent, 5);
    display_ranking("Les moins fréquents", &summary.least_frequent, 5);
    display_ranking("Les plus en retard", &summary.most_overdue, 5);

    if let Some(cycle) = summary.current_cycle() {
        println!("\n── Cycle #{} ──", cycle.cycle_number);
        match cycle.end_sequence_id {
            Some(end) => println!(
                "  Fermé au concours {} après {} concours",
                end, cycle.length
            ),
            None => println!(
                "  En cours depuis {} concours, manquants : {}",
                cycle.length,
                join_numbers(&cycle.missing_numbers)
            ),
        }
    }

    if let Some(draw) = &summary.last_draw {
        display_last_draw(draw);
    }

    let p = &summary.last_draw_pattern;
    println!("\n── Profil du dernier tirage ──");
    let mut table = new_table(vec![
        "Somme", "Pairs", "Impairs", "Premiers", "Fibonacci", "Répétés",
    ]);
    table.add_row(vec![
        p.sum.to_string(),
        p.even.to_string(),
        p.odd.to_string(),
        p.primes.to_string(),
        p.fibonacci.to_string(),
        p.repeated.to_string(),
    ]);
    println!("{table}");

    display_alerts(&summary.alerts);
}

pub fn display_alerts(alerts: &[String]) {
    if alerts.is_empty() {
        println!("\nAucune alerte.");
        return;
    }
    println!("\n🔔 Alertes\n");
    for alert in alerts {
        println!("  {alert}");
    }
}

pub fn display_stats(summary: &AnalysisSummary) {
    if summary.total_draws == 0 {
        println!("Aucun tirage à analyser.");
        return;
    }

    println!("\n📊 Statistiques sur les {} derniers tirages", summary.total_draws);
    display_ranking("Numéros (1-25)", &summary.most_frequent, POOL_SIZE as usize);
    display_heatmap(&summary.most_frequent);
    display_frequency_chart(&summary.most_frequent);
}

/// Résultat du concours : grille du pool, numéros tirés en surbrillance.
pub fn display_last_draw(draw: &DrawRecord) {
    if draw.date().is_empty() {
        println!("\n── Résultat du concours #{} ──", draw.sequence_id());
    } else {
        println!(
            "\n── Résultat du concours #{} ({}) ──",
            draw.sequence_id(),
            draw.date()
        );
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let pool: Vec<u8> = (1..=POOL_SIZE).collect();
    for row in pool.chunks(5) {
        let cells: Vec<Cell> = row
            .iter()
            .map(|&n| {
                let cell = Cell::new(format!("{:2}", n));
                if draw.contains(n) {
                    cell.fg(Color::Green).add_attribute(Attribute::Bold)
                } else {
                    cell.fg(Color::DarkGrey)
                }
            })
            .collect();
        table.add_row(cells);
    }
    println!("{table}");
    println!("  {}", join_numbers(draw.numbers()));
}

pub fn display_frequency_chart(stats: &[NumberStatistic]) {
    if stats.is_empty() {
        return;
    }

    let mut points: Vec<(f32, f32)> = stats
        .iter()
        .map(|s| (s.number as f32, s.frequency as f32))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    println!("\n== Fréquence générale ==\n");
    let shape = Shape::Bars(&points);
    let mut chart = Chart::new(120, 40, 1.0, POOL_SIZE as f32);
    println!("{}", chart.lineplot(&shape));
}

/// Grille 5×5 du pool, colorée selon la fréquence relative de chaque numéro.
pub fn display_heatmap(stats: &[NumberStatistic]) {
    if stats.is_empty() {
        return;
    }

    let mut by_number = stats.to_vec();
    by_number.sort_by_key(|s| s.number);

    let min = by_number.iter().map(|s| s.frequency).min().unwrap_or(0);
    let max = by_number.iter().map(|s| s.frequency).max().unwrap_or(0);
    let range = (max - min) as f64;

    println!("\n── Carte de chaleur ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for row in by_number.chunks(5) {
        let cells: Vec<Cell> = row
            .iter()
            .map(|s| {
                let level = if range > 0.0 {
                    (s.frequency - min) as f64 / range
                } else {
                    0.5
                };
                let color = if level > 2.0 / 3.0 {
                    Color::Green
                } else if level < 1.0 / 3.0 {
                    Color::Red
                } else {
                    Color::White
                };
                Cell::new(format!("{:2} ({}x)", s.number, s.frequency)).fg(color)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn display_cycles(cycles: &[Cycle], last: usize) {
    if cycles.is_empty() {
        println!("Aucun cycle.");
        return;
    }

    let recent = &cycles[cycles.len().saturating_sub(last)..];

    println!("\n🔄 Cycles ({} sur {})\n", recent.len(), cycles.len());
    let mut table = new_table(vec!["#", "Début", "Fin", "Longueur", "Manquants"]);
    for cycle in recent {
        let end = cycle
            .end_sequence_id
            .map(|e| e.to_string())
            .unwrap_or_else(|| "en cours".to_string());
        let missing = if cycle.missing_numbers.is_empty() {
            "—".to_string()
        } else {
            join_numbers(&cycle.missing_numbers)
        };
        table.add_row(vec![
            cycle.cycle_number.to_string(),
            cycle.start_sequence_id.to_string(),
            end,
            cycle.length.to_string(),
            missing,
        ]);
    }
    println!("{table}");

    let points: Vec<(f32, f32)> = recent
        .iter()
        .map(|c| (c.cycle_number as f32, c.length as f32))
        .collect();
    if points.len() < 2 {
        return;
    }

    println!("\n== Longueur des cycles ==\n");
    let x_min = points[0].0;
    let x_max = points[points.len() - 1].0;
    let shape = Shape::Bars(&points);
    let mut chart = Chart::new(120, 40, x_min, x_max);
    println!("{}", chart.lineplot(&shape));
}

/// `sums` : (concours, somme) par ordre chronologique.
pub fn display_trend(sums: &[(u32, u32)], average_sum: f64) {
    if sums.len() < 2 {
        println!("  (Pas assez de tirages pour tracer une courbe)");
        return;
    }

    println!(
        "\n== Somme des {} derniers tirages (moyenne historique {:.0}) ==\n",
        sums.len(),
        average_sum
    );

    let points: Vec<(f32, f32)> = sums.iter().map(|&(id, s)| (id as f32, s as f32)).collect();
    let x_min = points[0].0;
    let x_max = points[points.len() - 1].0;
    let average = [(x_min, average_sum as f32), (x_max, average_sum as f32)];

    let sums_shape = Shape::Lines(&points);
    let average_shape = Shape::Lines(&average);
    let mut chart = Chart::new(120, 40, x_min, x_max);
    println!(
        "{}",
        chart.lineplot(&sums_shape).lineplot(&average_shape)
    );
}
