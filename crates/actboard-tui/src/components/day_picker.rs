//! "Select Date" popup listing the days of the loaded month

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub const DAY_PICKER_TITLE: &str = "Select Date";

#[derive(Debug, Default)]
pub struct DayPicker {
    pub open: bool,
    state: ListState,
}

impl DayPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with the first day selected; stays closed when there are no days
    pub fn open(&mut self, day_count: usize) {
        if day_count == 0 {
            return;
        }
        self.open = true;
        self.state.select(Some(0));
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn move_down(&mut self, day_count: usize) {
        if day_count == 0 {
            return;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 < day_count => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(next));
    }

    pub fn move_up(&mut self) {
        let prev = self.state.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.state.select(Some(prev));
    }

    /// The highlighted day, if any
    pub fn selected<'a>(&self, days: &'a [String]) -> Option<&'a str> {
        self.state
            .selected()
            .and_then(|i| days.get(i))
            .map(String::as_str)
    }

    /// Compact field shown in the controls row
    pub fn render_field(&self, frame: &mut Frame, area: Rect, day_count: usize) {
        let hint = if day_count == 0 {
            Span::styled("no days", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                format!("{} days (d)", day_count),
                Style::default().fg(Color::White),
            )
        };
        let border = if self.open { Color::Cyan } else { Color::DarkGray };

        let field = Paragraph::new(Line::from(hint)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(Span::styled(
                    format!(" {} ", DAY_PICKER_TITLE),
                    Style::default().fg(Color::White).bold(),
                )),
        );
        frame.render_widget(field, area);
    }

    /// Popup list, centred over `area`
    pub fn render_popup(&mut self, frame: &mut Frame, area: Rect, days: &[String]) {
        if !self.open {
            return;
        }

        let height = (days.len() as u16 + 2).min(area.height.saturating_sub(2)).max(3);
        let popup = centered(area, 30, height);

        let items: Vec<ListItem> = days.iter().map(|d| ListItem::new(d.as_str())).collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", DAY_PICKER_TITLE)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(list, popup, &mut self.state);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
