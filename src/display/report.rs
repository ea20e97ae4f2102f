//! Monthly summary and chart formatting for terminal output

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::chart::{ChartAnimationEngine, ChartFrame, Fill};
use crate::models::{CategoryTotals, MonthlySummary, Yen};

use super::transaction::format_month_heading;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar proportional to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

fn category_table(totals: &CategoryTotals) -> String {
    let total = totals.total().units() as f64;
    let rows: Vec<CategoryRow> = totals
        .iter()
        .map(|entry| {
            let value = entry.amount.units() as f64;
            CategoryRow {
                category: entry.category.clone(),
                amount: entry.amount.to_string(),
                share: format_percentage(value / total * 100.0),
                bar: format_bar(value, total, 20),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()));
    table.to_string()
}

/// Multi-section text report for one month
pub fn format_monthly_summary(summary: &MonthlySummary) -> String {
    let mut output = String::new();
    let heading = format_month_heading(summary.year, summary.month);
    output.push_str(&format!("{} の収支\n", heading));
    output.push_str(&separator(32));
    output.push('\n');
    output.push_str(&format!("収入: {:>14}\n", summary.balance.income.format_signed()));
    output.push_str(&format!("支出: {:>14}\n", (-summary.balance.expense).format_signed()));
    output.push_str(&format!("収支: {:>14}\n", summary.balance.net().format_signed()));

    for (title, totals) in [
        ("支出の内訳", &summary.expense_by_category),
        ("収入の内訳", &summary.income_by_category),
    ] {
        output.push('\n');
        output.push_str(title);
        output.push('\n');
        if totals.is_empty() {
            output.push_str("  (なし)\n");
        } else {
            output.push_str(&category_table(totals));
            output.push('\n');
        }
    }

    output
}

/// Text rendering of a chart's current picture
///
/// Shows the center label and, for category charts, the legend with each
/// label's color and share. Empty months show the no-data message.
pub fn format_chart(engine: &ChartAnimationEngine) -> String {
    if let Some(message) = engine.no_data_message() {
        return format!("{}\n", message);
    }

    match engine.last_frame() {
        Some(frame) => format_chart_frame(frame),
        None => String::new(),
    }
}

fn format_chart_frame(frame: &ChartFrame) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} [{}]\n",
        format_month_heading(frame.year, frame.month),
        frame.kind.label()
    ));

    if let Some(center) = &frame.center {
        output.push_str(&format!("{}\n", center));
    }

    let total: Yen = frame.legend.iter().map(|entry| entry.amount).sum();
    for entry in &frame.legend {
        let share = entry.amount.units() as f64 / total.units().max(1) as f64 * 100.0;
        output.push_str(&format!(
            "  ■ {} {} {} ({})\n",
            entry.color,
            entry.label,
            entry.amount,
            format_percentage(share)
        ));
    }

    // Balance charts carry no legend; list their two segments instead
    if frame.legend.is_empty() {
        for segment in &frame.segments {
            if let Fill::Color(color) = segment.fill {
                let amount = Yen::new(segment.value.round() as i64);
                output.push_str(&format!("  ■ {} {} {}\n", color, segment.label, amount));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, StepScheduler};
    use crate::models::{BalanceSummary, CategoryTotal, HexColor, TransactionKind};

    struct NoColors;

    impl crate::chart::ColorSource for NoColors {
        fn category_color(&self, _kind: TransactionKind, _label: &str) -> Option<HexColor> {
            None
        }
    }

    fn summary() -> MonthlySummary {
        MonthlySummary {
            year: 2024,
            month: 5,
            expense_by_category: CategoryTotals::from_first_seen(vec![CategoryTotal {
                category: "食費".to_string(),
                amount: Yen::new(1500),
            }]),
            income_by_category: CategoryTotals::default(),
            balance: BalanceSummary {
                income: Yen::new(0),
                expense: Yen::new(1500),
            },
        }
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(format_bar(0.0, 10.0, 3), "░░░");
    }

    #[test]
    fn test_monthly_summary_text() {
        let text = format_monthly_summary(&summary());
        assert!(text.contains("2024年5月"));
        assert!(text.contains("-¥1,500"));
        assert!(text.contains("食費"));
        assert!(text.contains("(なし)"));
    }

    #[test]
    fn test_settled_chart_text() {
        let mut engine = ChartAnimationEngine::new(ChartKind::Expense);
        let mut steps = StepScheduler::new();
        engine.show_summary(&summary(), &NoColors, &mut steps);
        while let Some(tick) = steps.pop() {
            engine.on_tick(tick, &mut steps);
        }

        let text = format_chart(&engine);
        assert!(text.contains("支出合計 -¥1,500"));
        assert!(text.contains("#cccccc 食費"));
        assert!(text.contains("100%"));
    }

    #[test]
    fn test_no_data_chart_text() {
        let mut engine = ChartAnimationEngine::new(ChartKind::Income);
        let mut steps = StepScheduler::new();
        engine.show_summary(&summary(), &NoColors, &mut steps);

        assert_eq!(format_chart(&engine), "2024年5月の収入データはありません\n");
    }
}
