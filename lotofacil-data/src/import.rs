use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Days, NaiveDate};

use crate::models::{PICK_COUNT, RawDraw};

/// Concours, date, puis au moins 15 cellules de boules.
const MIN_COLUMNS: usize = 2 + PICK_COUNT;

#[derive(Debug, Default)]
pub struct ImportResult {
    pub draws: Vec<RawDraw>,
    pub total_records: u32,
    pub ignored: u32,
    pub errors: u32,
}

fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok()
}

/// Les exports tableur livrent parfois la date en numéro de série Excel
/// (jours depuis le 30/12/1899). On la reformate en JJ/MM/AAAA, sinon le
/// texte est conservé tel quel.
pub fn parse_sheet_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains(['/', '-']) {
        return raw.to_string();
    }

    let Some(serial) = parse_decimal(raw) else {
        return raw.to_string();
    };
    if !serial.is_finite() || serial < 1.0 {
        return raw.to_string();
    }

    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_days(Days::new(serial.trunc() as u64)))
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Une ligne est un tirage si elle commence par un numéro de concours et
/// contient au moins 15 entiers après la date. Les 15 premiers sont retenus ;
/// leur validité (plage, doublons) est contrôlée par le moteur d'analyse.
fn parse_record(record: &csv::StringRecord) -> Option<RawDraw> {
    if record.len() < MIN_COLUMNS {
        return None;
    }

    let sequence_id = record.get(0)?.trim().parse::<u32>().ok()?;
    let date = parse_sheet_date(record.get(1)?);

    let numbers: Vec<i64> = record
        .iter()
        .skip(2)
        .filter_map(|cell| cell.trim().parse::<i64>().ok())
        .take(PICK_COUNT)
        .collect();

    if numbers.len() < PICK_COUNT {
        return None;
    }

    Some(RawDraw {
        sequence_id,
        date,
        numbers,
    })
}

pub fn read_draws<R: Read>(input: R, delimiter: u8) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut result = ImportResult::default();

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record) {
                Some(draw) => result.draws.push(draw),
                None => {
                    log::debug!("Ligne {} ignorée (pas un tirage)", result.total_records);
                    result.ignored += 1;
                }
            },
            Err(e) => {
                log::warn!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    if result.draws.is_empty() {
        bail!(
            "Aucun tirage reconnu sur {} lignes. Vérifiez qu'il s'agit de l'historique officiel de la Lotofácil.",
            result.total_records
        );
    }

    log::info!(
        "{} tirages lus ({} lignes ignorées, {} erreurs)",
        result.draws.len(),
        result.ignored,
        result.errors
    );
    Ok(result)
}

pub fn import_csv(path: &Path, delimiter: u8) -> Result<ImportResult> {
    let file = File::open(path).with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    read_draws(file, delimiter).with_context(|| format!("Échec de l'import de {:?}", path))
}
