use serde::{Deserialize, Serialize};

use crate::prediction::two_decimals;

/// Entries at an index below this are drawn emphasized.
pub const EMPHASIZED_BARS: usize = 3;

/// One backend-supplied importance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub label: String,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub percent: String,
    pub cells: usize,
    pub emphasized: bool,
}

/// Lays the entries out as horizontal bars in backend order. `width` is the
/// number of cells a bar of importance 1.0 fills.
pub fn bars(entries: &[FeatureImportance], width: usize) -> Vec<Bar> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let share = entry.importance.clamp(0.0, 1.0);
            Bar {
                label: entry.label.clone(),
                percent: format!("{}%", two_decimals(entry.importance * 100.0)),
                cells: (share * width as f64).round() as usize,
                emphasized: index < EMPHASIZED_BARS,
            }
        })
        .collect()
}

pub fn render(entries: &[FeatureImportance], width: usize) -> Vec<String> {
    let bars = bars(entries, width);
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    bars.iter()
        .map(|bar| {
            let (marker, fill) = if bar.emphasized { ('>', '█') } else { (' ', '▒') };
            format!(
                "{marker} {:<label_width$} {:<width$} {}",
                bar.label,
                fill.to_string().repeat(bar.cells),
                bar.percent,
            )
        })
        .collect()
}
