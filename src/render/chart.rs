//! Text charts for per-language totals.

use std::fmt::Write as _;

use crate::analysis::LanguageTotals;

use super::{PALETTE, Painter};

/// Width of the longest bar, in cells.
const BAR_WIDTH: usize = 30;

const BLOCK: char = '█';

fn bar(len: usize) -> String {
    std::iter::repeat_n(BLOCK, len).collect()
}

fn label_width(totals: &LanguageTotals) -> usize {
    totals
        .iter()
        .map(|e| e.language.chars().count())
        .max()
        .unwrap_or(0)
}

/// Scales `value` against `max`; non-zero values always get at least one cell.
fn scaled(value: u64, max: u64) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    let cells = (value as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
    cells.clamp(1, BAR_WIDTH)
}

/// Horizontal bar chart, one row per language, scaled to the largest value.
pub fn bar_chart(totals: &LanguageTotals, painter: Painter) -> String {
    let width = label_width(totals);
    let max = totals.max();
    let mut out = String::new();

    for (i, entry) in totals.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let _ = writeln!(
            out,
            "  {:<width$}  {} {}",
            entry.language,
            painter.paint(color, bar(scaled(entry.value, max))),
            entry.value,
        );
    }

    out
}

/// Share of the total per language, like the slices of a pie.
pub fn breakdown_chart(totals: &LanguageTotals, painter: Painter) -> String {
    let width = label_width(totals);
    let total = totals.total();
    let mut out = String::new();

    for (i, entry) in totals.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let share = totals.share(&entry.language).unwrap_or(0.0);
        let cells = scaled(entry.value, total);
        // Padded by hand: colour codes would throw off format width.
        let _ = writeln!(
            out,
            "  {:<width$}  {}{} {:>5.1}%  ({} KB)",
            entry.language,
            painter.paint(color, bar(cells)),
            " ".repeat(BAR_WIDTH - cells),
            share * 100.0,
            entry.value,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(&str, u64)]) -> LanguageTotals {
        let mut totals = LanguageTotals::new();
        for (language, value) in entries {
            totals.add(language, *value);
        }
        totals
    }

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(0, 10), 0);
        assert_eq!(scaled(10, 0), 0);
        assert_eq!(scaled(10, 10), BAR_WIDTH);
        assert_eq!(scaled(5, 10), BAR_WIDTH / 2);
        // Tiny but non-zero values stay visible.
        assert_eq!(scaled(1, 10_000), 1);
    }

    #[test]
    fn test_bar_chart_rows_in_order() {
        let out = bar_chart(&totals(&[("Rust", 4), ("Go", 2)]), Painter::new(false));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].trim_start().starts_with("Rust"));
        assert!(lines[0].ends_with(" 4"));
        assert_eq!(lines[0].matches(BLOCK).count(), BAR_WIDTH);
        assert!(lines[1].trim_start().starts_with("Go"));
        assert_eq!(lines[1].matches(BLOCK).count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_breakdown_percentages() {
        let out = breakdown_chart(&totals(&[("Go", 15), ("C", 5)]), Painter::new(false));

        assert!(out.contains("75.0%"));
        assert!(out.contains("25.0%"));
        assert!(out.contains("(15 KB)"));
    }

    #[test]
    fn test_breakdown_zero_total() {
        let out = breakdown_chart(&totals(&[("Go", 0)]), Painter::new(false));
        assert!(out.contains("0.0%"));
        assert_eq!(out.matches(BLOCK).count(), 0);
    }
}
