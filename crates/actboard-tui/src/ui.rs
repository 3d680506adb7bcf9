//! TUI rendering logic

use crate::app::{App, InputMode};
use crate::components::{render_metric_row, render_table};
use actboard_core::{DashboardSnapshot, DataProvider};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const APP_TITLE: &str = "Activation Dashboard";

/// Main UI renderer
#[derive(Debug, Default)]
pub struct Ui;

impl Ui {
    pub fn new() -> Self {
        Self
    }

    /// Render the full UI
    pub fn render<P: DataProvider + 'static>(&mut self, frame: &mut Frame, app: &mut App<P>) {
        let size = frame.area();
        let snapshot = app.store.snapshot();
        app.spinner.tick();

        // Nothing to show yet: first fetch still running
        if snapshot.loading && snapshot.dataset_month.is_none() {
            self.render_loading_screen(frame, size, app, &snapshot);
            return;
        }

        let mut constraints = vec![
            Constraint::Length(3), // Header: title + month selector
            Constraint::Length(3), // Controls: day picker + search, or back button
        ];
        if snapshot.metrics.is_some() {
            constraints.push(Constraint::Length(3)); // Metric cards
        }
        constraints.push(Constraint::Min(0)); // Table
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        self.render_header(frame, chunks[0], app, &snapshot);
        self.render_controls(frame, chunks[1], app, &snapshot);

        let mut idx = 2;
        if let Some(metrics) = &snapshot.metrics {
            render_metric_row(frame, chunks[idx], metrics);
            idx += 1;
        }

        let query = if snapshot.is_daily() { "" } else { snapshot.query.as_str() };
        render_table(
            frame,
            chunks[idx],
            &snapshot.table_title(),
            &snapshot.table,
            query,
            &mut app.table_state,
        );

        self.render_status_bar(frame, chunks[idx + 1], app, &snapshot);

        // Day picker popup (overlay on top of everything)
        app.day_picker
            .render_popup(frame, size, &snapshot.available_days);
    }

    fn render_loading_screen<P: DataProvider + 'static>(
        &self,
        frame: &mut Frame,
        area: Rect,
        app: &App<P>,
        snapshot: &DashboardSnapshot,
    ) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(5),
                Constraint::Percentage(40),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(vertical[1]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {} ", APP_TITLE),
                Style::default().fg(Color::Cyan).bold(),
            ));

        let inner = block.inner(horizontal[1]);
        frame.render_widget(block, horizontal[1]);

        let lines = vec![
            Line::from(vec![
                app.spinner.render(),
                Span::raw("  "),
                Span::styled(
                    format!("Loading {}...", snapshot.month),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Press 'q' to quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn render_header<P: DataProvider + 'static>(
        &self,
        frame: &mut Frame,
        area: Rect,
        app: &App<P>,
        snapshot: &DashboardSnapshot,
    ) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("◈ ", Style::default().fg(Color::Cyan)),
            Span::styled(APP_TITLE, Style::default().fg(Color::White).bold()),
        ]));
        frame.render_widget(title, columns[0]);

        let mut selector = vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                snapshot.month.name(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ];
        if snapshot.loading {
            selector.push(Span::raw(" "));
            selector.push(app.spinner.render());
        }
        let selector = Paragraph::new(Line::from(selector)).alignment(Alignment::Right);
        frame.render_widget(selector, columns[1]);
    }

    fn render_controls<P: DataProvider + 'static>(
        &self,
        frame: &mut Frame,
        area: Rect,
        app: &App<P>,
        snapshot: &DashboardSnapshot,
    ) {
        if snapshot.is_daily() {
            let back = Paragraph::new(Line::from(vec![
                Span::styled("‹ ", Style::default().fg(Color::Cyan)),
                Span::styled("Back to Monthly View", Style::default().fg(Color::White)),
                Span::styled("  (Esc / b)", Style::default().fg(Color::DarkGray)),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(back, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(area);

        app.day_picker
            .render_field(frame, chunks[0], snapshot.available_days.len());
        app.search_bar.render(frame, chunks[1], &snapshot.query);
    }

    fn render_status_bar<P: DataProvider + 'static>(
        &self,
        frame: &mut Frame,
        area: Rect,
        app: &App<P>,
        snapshot: &DashboardSnapshot,
    ) {
        let line = if let Some(msg) = app.status_message.as_ref().or(snapshot.last_error.as_ref())
        {
            Line::from(vec![
                Span::styled(" ✗ ", Style::default().fg(Color::Red).bold()),
                Span::styled(msg.clone(), Style::default().fg(Color::Red)),
            ])
        } else if snapshot.is_stale() {
            let held = snapshot
                .dataset_month
                .map(|m| m.name())
                .unwrap_or_default();
            Line::from(Span::styled(
                format!(" ⚠ showing {} data while {} loads", held, snapshot.month),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                key_hints(app.input_mode, snapshot.is_daily()),
                Style::default().fg(Color::DarkGray),
            ))
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn key_hints(mode: InputMode, daily: bool) -> &'static str {
    match mode {
        InputMode::Search => " type to filter · Enter keep · Esc clear",
        InputMode::DayPicker => " ↑/↓ move · Enter select · Esc cancel",
        InputMode::Normal if daily => " ←/→ month · Esc/b back · ↑/↓ scroll · r reload · q quit",
        InputMode::Normal => {
            " ←/→ month · d day · / search · ↑/↓ scroll · r reload · q quit"
        }
    }
}
