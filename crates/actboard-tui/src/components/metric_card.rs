//! Summary metric cards above the monthly table

use actboard_core::format::format_number;
use actboard_core::MetricTotals;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One card: title, value and colour
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub color: Color,
}

impl MetricCard {
    /// The four cards for `metrics`, in display order
    pub fn from_totals(metrics: &MetricTotals) -> [MetricCard; 4] {
        [
            MetricCard {
                title: "Total Target",
                value: format_number(metrics.target),
                color: Color::Blue,
            },
            MetricCard {
                title: "Total Achieved",
                value: format_number(metrics.achieved),
                color: Color::Green,
            },
            MetricCard {
                title: "Total Remaining",
                value: format_number(metrics.remaining),
                color: Color::Yellow,
            },
            MetricCard {
                title: "Total Agents",
                value: metrics.count.to_string(),
                color: Color::Magenta,
            },
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.color).bold(),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value_widget = Paragraph::new(Line::from(Span::styled(
            self.value.as_str(),
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(value_widget, inner);
    }
}

/// Render the metric row, one equal-width card per metric
pub fn render_metric_row(frame: &mut Frame, area: Rect, metrics: &MetricTotals) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for (card, chunk) in MetricCard::from_totals(metrics).iter().zip(chunks.iter()) {
        card.render(frame, *chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_from_totals() {
        let cards = MetricCard::from_totals(&MetricTotals {
            target: 12500.0,
            achieved: 6000.5,
            remaining: 6499.5,
            count: 3,
        });

        let titles: Vec<_> = cards.iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec!["Total Target", "Total Achieved", "Total Remaining", "Total Agents"]
        );
        assert_eq!(cards[0].value, "12,500");
        assert_eq!(cards[1].value, "6,000.5");
        assert_eq!(cards[3].value, "3");
    }
}
