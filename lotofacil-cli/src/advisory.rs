use lotofacil_analysis::AnalysisSummary;
use lotofacil_analysis::frequency::NumberStatistic;

fn top_numbers(stats: &[NumberStatistic]) -> String {
    stats
        .iter()
        .take(5)
        .map(|s| s.number.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cycle_section(summary: &AnalysisSummary) -> String {
    let Some(cycle) = summary.current_cycle() else {
        return String::new();
    };
    let missing = if cycle.is_open() {
        cycle
            .missing_numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "Aucun (cycle fermé)".to_string()
    };
    format!(
        "4. CYCLES :\n   - Cycle actuel : #{}\n   - Longueur actuelle : {} concours\n   - Manquants : [{}]\n\n",
        cycle.cycle_number, cycle.length, missing
    )
}

/// Bloc de contexte transmis tel quel à un assistant de rédaction externe.
/// Aucun appel réseau n'est fait ici.
pub fn render_context(summary: &AnalysisSummary) -> String {
    if summary.total_draws == 0 {
        return "DONNÉES STATISTIQUES DE LA LOTOFÁCIL : aucun tirage chargé.\n".to_string();
    }

    let overdue = summary
        .most_overdue
        .iter()
        .take(5)
        .map(|s| format!("Numéro {} ({}x)", s.number, s.delay))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!(
        "DONNÉES STATISTIQUES DE LA LOTOFÁCIL (Total : {} concours) :\n\n\
         1. NUMÉROS CHAUDS (Top 5) : {}\n\
         2. NUMÉROS FROIDS (Top 5) : {}\n\
         3. RETARDS CRITIQUES : {}\n\n",
        summary.total_draws,
        top_numbers(&summary.most_frequent),
        top_numbers(&summary.least_frequent),
        overdue
    );

    out.push_str(&cycle_section(summary));

    let p = &summary.last_draw_pattern;
    out.push_str(&format!(
        "5. PROFIL DU DERNIER TIRAGE :\n\
         \x20  - Somme : {} (moyenne générale : {:.0})\n\
         \x20  - Pairs : {} | Impairs : {}\n\
         \x20  - Premiers : {}\n\
         \x20  - Fibonacci : {}\n\
         \x20  - Répétés du précédent : {}\n",
        p.sum, summary.average_sum, p.even, p.odd, p.primes, p.fibonacci, p.repeated
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotofacil_analysis::summarize;
    use lotofacil_data::models::{DrawRecord, make_test_draws};

    #[test]
    fn test_context_open_cycle() {
        let draw = DrawRecord::new(1, "", &(1..=15).collect::<Vec<i64>>()).unwrap();
        let context = render_context(&summarize(&[draw]));
        assert!(context.contains("Total : 1 concours"));
        assert!(context.contains("1. NUMÉROS CHAUDS (Top 5) : 1, 2, 3, 4, 5"));
        assert!(context.contains("2. NUMÉROS FROIDS (Top 5) : 16, 17, 18, 19, 20"));
        assert!(context.contains("Manquants : [16, 17, 18, 19, 20, 21, 22, 23, 24, 25]"));
        assert!(context.contains("Somme : 120 (moyenne générale : 120)"));
        assert!(context.contains("\n   - Pairs : 7 | Impairs : 8\n"));
        assert!(context.contains("\n4. CYCLES :\n   - Cycle actuel : #1\n"));
        assert!(context.ends_with("Répétés du précédent : 0\n"));
    }

    #[test]
    fn test_context_closed_cycle() {
        let draws = vec![
            DrawRecord::new(1, "", &(1..=15).collect::<Vec<i64>>()).unwrap(),
            DrawRecord::new(2, "", &(11..=25).collect::<Vec<i64>>()).unwrap(),
        ];
        let context = render_context(&summarize(&draws));
        assert!(context.contains("Aucun (cycle fermé)"));
        assert!(context.contains("Répétés du précédent : 5"));
    }

    #[test]
    fn test_context_empty() {
        let context = render_context(&summarize(&[]));
        assert!(context.contains("aucun tirage"));
    }

    #[test]
    fn test_context_lists_overdue() {
        let context = render_context(&summarize(&make_test_draws(30)));
        assert!(context.contains("3. RETARDS CRITIQUES : Numéro"));
    }
}
