//! 突破日終端預覽

use std::fmt::Write;

use crate::domain_types::EnrichedRow;

/// 預設預覽列數
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

const COLUMNS: [(&str, usize); 7] = [
    ("Date", 10),
    ("Adj Close", 12),
    ("Volume", 14),
    ("20DayAvgVolume", 16),
    ("PriceChange", 12),
    ("Return", 10),
    ("Breakout", 8),
];

/// 將前 `limit` 列格式化為對齊的文字表格
pub fn preview(rows: &[EnrichedRow], limit: usize) -> String {
    let mut out = String::new();

    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(name, width)| format!("{:>width$}", name, width = width))
        .collect();
    let _ = writeln!(out, "{}", header.join(" "));

    for row in rows.iter().take(limit) {
        let cells = [
            row.date.to_string(),
            format!("{:.2}", row.adjusted_close),
            row.volume.to_string(),
            format!("{:.0}", row.baseline_volume),
            format_pct(row.price_change_pct),
            format_pct(row.forward_return),
            row.breakout.to_string(),
        ];
        let line: Vec<String> = cells
            .iter()
            .zip(COLUMNS.iter())
            .map(|(cell, (_, width))| format!("{:>width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }

    if rows.len() > limit {
        let _ = writeln!(out, "... {} more row(s)", rows.len() - limit);
    }

    out
}

fn format_pct(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}%", value * 100.0)
    }
}
