use crate::card::CardEntry;
use crate::shuffler::GroupReport;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonDeck<'a> {
    deck: &'a [CardEntry],
    sideboard: &'a [String],
}

/// Arena import format, sideboard block passed through untouched
pub fn render_text(entries: &[CardEntry], sideboard: &[String]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{}", entry);
    }
    if !sideboard.is_empty() {
        out.push('\n');
        for line in sideboard {
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}

pub fn render_json(entries: &[CardEntry], sideboard: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonDeck {
        deck: entries,
        sideboard,
    })
}

pub fn render_report(reports: &[GroupReport], trials: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Opening hand land copies over {} rebuilds:\n", trials);
    let _ = writeln!(
        out,
        "  {:28} {:>8} {:>6} {:>9} {:>9}",
        "Land", "Zone", "Copies", "Rebuilt", "Shuffled"
    );
    let _ = writeln!(out, "  {:-<64}", "");
    for report in reports {
        let _ = writeln!(
            out,
            "  {:28} {:>8} {:>6} {:>9.2} {:>9.2}",
            report.label,
            report.zone.as_str(),
            report.copies,
            report.mean_in_hand,
            report.uniform_in_hand
        );
    }
    out
}
