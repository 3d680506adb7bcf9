//! Projected table rendering with a sticky totals footer

use super::search_bar::highlight_matches;
use actboard_core::table::{Cell as ProjectedCell, ColumnKey, TableProjection};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// Column width hint by key
fn width_for(key: ColumnKey) -> Constraint {
    match key {
        ColumnKey::EmpId => Constraint::Length(8),
        ColumnKey::AgentName => Constraint::Min(16),
        _ => Constraint::Length(11),
    }
}

fn to_line(cell: &ProjectedCell, highlight: Option<&str>) -> Line<'static> {
    match cell {
        ProjectedCell::Number { display, .. } => {
            Line::from(display.clone()).alignment(Alignment::Right)
        }
        ProjectedCell::Text { text } => match highlight {
            Some(query) => Line::from(highlight_matches(text, query)),
            None => Line::from(text.clone()),
        },
        ProjectedCell::Label { text } => Line::from(Span::styled(
            text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        ProjectedCell::Blank => Line::default(),
    }
}

/// Render `table` inside a titled block.
///
/// `query` highlights matches in the agent name column.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    table: &TableProjection,
    query: &str,
    state: &mut TableState,
) {
    let name_col = table.column_index(ColumnKey::AgentName);
    let highlight = (!query.is_empty()).then_some(query);

    let header = Row::new(table.header.iter().map(|h| {
        let line = Line::from(h.label.clone());
        let line = if h.key.is_identifier() {
            line
        } else {
            line.alignment(Alignment::Right)
        };
        Cell::from(line)
    }))
    .style(Style::default().fg(Color::Cyan).bold())
    .bottom_margin(1);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            Row::new(row.iter().enumerate().map(|(i, cell)| {
                let hl = if Some(i) == name_col { highlight } else { None };
                Cell::from(to_line(cell, hl))
            }))
        })
        .collect();

    let footer = Row::new(table.totals.iter().map(|c| Cell::from(to_line(c, None))))
        .style(Style::default().fg(Color::Yellow).bold())
        .top_margin(1);

    let widths: Vec<Constraint> = table.header.iter().map(|h| width_for(h.key)).collect();

    let mut block_title = vec![Span::styled(
        format!(" {} ", title),
        Style::default().fg(Color::White).bold(),
    )];
    if table.rows.is_empty() {
        block_title.push(Span::styled("(no rows) ", Style::default().fg(Color::DarkGray)));
    } else {
        block_title.push(Span::styled(
            format!("({}) ", table.row_count()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let widget = Table::new(rows, widths)
        .header(header)
        .footer(footer)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Line::from(block_title)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("› ");

    frame.render_stateful_widget(widget, area, state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_right_aligned() {
        let line = to_line(&ProjectedCell::number(1234.0), None);
        assert_eq!(line.alignment, Some(Alignment::Right));
        assert_eq!(line.to_string(), "1,234");
    }

    #[test]
    fn test_blank_and_label() {
        assert_eq!(to_line(&ProjectedCell::Blank, None).to_string(), "");
        let label = ProjectedCell::Label {
            text: "Totals".into(),
        };
        assert_eq!(to_line(&label, None).to_string(), "Totals");
    }

    #[test]
    fn test_text_highlight() {
        let cell = ProjectedCell::Text {
            text: "Alice Moreau".into(),
        };
        assert_eq!(to_line(&cell, Some("ali")).spans.len(), 2);
        assert_eq!(to_line(&cell, None).spans.len(), 1);
    }
}
