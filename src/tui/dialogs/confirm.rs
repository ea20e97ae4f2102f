//! Delete-day confirmation
//!
//! Lists the entries that will go before asking, so the user sees exactly
//! what `y` removes.

use chrono::NaiveDate;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::display::transaction::format_transaction_card;
use crate::models::{Transaction, Yen};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::amount_color;

/// Cards shown before the rest is summarized as "ほか n件"
const PREVIEW_LIMIT: usize = 5;

/// What the dialog shows for one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePreview {
    pub cards: Vec<(String, bool)>,
    pub hidden: usize,
    pub net: Yen,
}

impl DeletePreview {
    pub fn new(transactions: &[&Transaction]) -> Self {
        let cards = transactions
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|txn| (format_transaction_card(txn), txn.is_income()))
            .collect();
        Self {
            cards,
            hidden: transactions.len().saturating_sub(PREVIEW_LIMIT),
            net: transactions.iter().map(|txn| txn.signed_amount()).sum(),
        }
    }

    pub fn count(&self) -> usize {
        self.cards.len() + self.hidden
    }
}

pub fn render(frame: &mut Frame, app: &App, date: NaiveDate) {
    let transactions = app.household.ledger().transactions_for_day(date);
    let preview = DeletePreview::new(&transactions);

    let mut lines = vec![Line::from(Span::styled(
        format!("{}の取引{}件を削除しますか？", date.format("%Y-%m-%d"), preview.count()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    for (text, is_income) in &preview.cards {
        lines.push(Line::from(Span::styled(
            format!("  {}", text),
            Style::default().fg(amount_color(*is_income)),
        )));
    }
    if preview.hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("  ほか{}件", preview.hidden),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(format!("  合計 {}", preview.net.format_signed())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" 削除  "),
        Span::styled("n/Esc", Style::default().fg(Color::Cyan)),
        Span::raw(" やめる"),
    ]));

    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(46, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" 取引の削除 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_preview_nets_the_day() {
        let salary = Transaction::new(2500, "給与", may(1), TransactionKind::Income).unwrap();
        let lunch = Transaction::new(1000, "食費", may(1), TransactionKind::Expense).unwrap();

        let preview = DeletePreview::new(&[&salary, &lunch]);
        assert_eq!(preview.count(), 2);
        assert_eq!(preview.hidden, 0);
        assert_eq!(preview.net, Yen::new(1500));
        assert_eq!(preview.cards[0], ("5月1日  給与  +¥2,500".to_string(), true));
        assert!(!preview.cards[1].1);
    }

    #[test]
    fn test_preview_truncates_long_days() {
        let entries: Vec<Transaction> = (1..=7)
            .map(|i| Transaction::new(i * 100, "食費", may(2), TransactionKind::Expense).unwrap())
            .collect();
        let refs: Vec<&Transaction> = entries.iter().collect();

        let preview = DeletePreview::new(&refs);
        assert_eq!(preview.cards.len(), 5);
        assert_eq!(preview.hidden, 2);
        assert_eq!(preview.count(), 7);
        assert_eq!(preview.net, Yen::new(-2800));
    }
}
