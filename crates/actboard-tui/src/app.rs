//! TUI Application state and key handling

use crate::components::{DayPicker, SearchBar, Spinner};
use actboard_core::{DashboardEvent, DashboardStore, DataProvider, Month};
use crossterm::event::KeyCode;
use ratatui::widgets::TableState;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Where key presses go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    DayPicker,
}

/// TUI Application state
pub struct App<P> {
    pub store: Arc<DashboardStore<P>>,

    /// Event receiver for store updates
    pub event_rx: broadcast::Receiver<DashboardEvent>,

    pub input_mode: InputMode,
    pub search_bar: SearchBar,
    pub day_picker: DayPicker,
    pub spinner: Spinner,
    pub table_state: TableState,

    pub should_quit: bool,

    /// Error/warning message to display
    pub status_message: Option<String>,
}

impl<P: DataProvider + 'static> App<P> {
    pub fn new(store: Arc<DashboardStore<P>>) -> Self {
        let event_rx = store.event_bus().subscribe();

        Self {
            store,
            event_rx,
            input_mode: InputMode::Normal,
            search_bar: SearchBar::new(),
            day_picker: DayPicker::new(),
            spinner: Spinner::new(),
            table_state: TableState::default(),
            should_quit: false,
            status_message: None,
        }
    }

    /// Handle keyboard input
    /// Returns true if the key was handled
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::DayPicker => self.handle_picker_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) -> bool {
        let daily = self.store.view().is_daily();

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('[') => {
                let month = self.store.selected_month().prev();
                self.switch_month(month);
            }
            KeyCode::Right | KeyCode::Char(']') => {
                let month = self.store.selected_month().next();
                self.switch_month(month);
            }
            KeyCode::F(5) | KeyCode::Char('r') => {
                let month = self.store.selected_month();
                self.switch_month(month);
            }
            KeyCode::Char('/') if !daily => {
                self.input_mode = InputMode::Search;
                self.search_bar.active = true;
            }
            KeyCode::Char('d') if !daily => {
                let count = self.store.available_days().len();
                self.day_picker.open(count);
                if self.day_picker.open {
                    self.input_mode = InputMode::DayPicker;
                } else {
                    self.status_message = Some("No days available for this month".to_string());
                }
            }
            KeyCode::Esc | KeyCode::Char('b') if daily => {
                self.store.back_to_monthly();
                self.table_state = TableState::default();
            }
            KeyCode::Down | KeyCode::Char('j') => self.table_state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.table_state.select_previous(),
            KeyCode::Home | KeyCode::Char('g') => self.table_state.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.table_state.select_last(),
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                let mut query = self.store.view().search_query().to_string();
                query.push(c);
                self.store.set_search_query(query);
                self.table_state = TableState::default();
            }
            KeyCode::Backspace => {
                let mut query = self.store.view().search_query().to_string();
                query.pop();
                self.store.set_search_query(query);
                self.table_state = TableState::default();
            }
            KeyCode::Enter => self.leave_search(),
            KeyCode::Esc => {
                self.store.set_search_query("");
                self.leave_search();
            }
            _ => return false,
        }
        true
    }

    fn leave_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_bar.active = false;
    }

    fn handle_picker_key(&mut self, key: KeyCode) -> bool {
        let days = self.store.available_days();
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.day_picker.move_down(days.len()),
            KeyCode::Up | KeyCode::Char('k') => self.day_picker.move_up(),
            KeyCode::Enter => {
                if let Some(day) = self.day_picker.selected(&days) {
                    self.store.select_day(day);
                    self.table_state = TableState::default();
                }
                self.close_picker();
            }
            KeyCode::Esc | KeyCode::Char('q') => self.close_picker(),
            _ => return false,
        }
        true
    }

    fn close_picker(&mut self) {
        self.day_picker.close();
        self.input_mode = InputMode::Normal;
    }

    /// Change month and fetch it in the background.
    ///
    /// The view switches immediately; a slower fetch for a month the user
    /// already left is discarded by the store.
    pub fn switch_month(&mut self, month: Month) {
        self.close_picker();
        self.table_state = TableState::default();
        self.status_message = None;

        let ticket = self.store.select_month(month);
        debug!(month = %month, generation = ticket.generation, "Spawning month load");

        let store = self.store.clone();
        tokio::spawn(async move {
            store.load(ticket).await;
        });
    }

    /// Check for store events (non-blocking)
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                DashboardEvent::LoadFailed { month, message } => {
                    self.status_message = Some(format!("{}: {}", month, message));
                }
                DashboardEvent::DatasetLoaded { .. } => {
                    self.status_message = None;
                }
                DashboardEvent::LoadStarted { .. }
                | DashboardEvent::LoadSuperseded { .. }
                | DashboardEvent::ViewChanged => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actboard_core::{InMemoryProvider, LoadOutcome, MonthDataset, ViewConfig};
    use chrono::NaiveDate;

    async fn app() -> App<InMemoryProvider> {
        let provider = InMemoryProvider::demo(2024).with_month(Month::March, MonthDataset::default());
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let store = Arc::new(DashboardStore::new(provider, ViewConfig::new(today)));
        assert_eq!(store.initial_load().await, LoadOutcome::Applied);
        App::new(store)
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = app().await;
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_search_typing_updates_store() {
        let mut app = app().await;
        app.handle_key(KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);

        for c in "Bob".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        // 'q' is text while searching
        app.handle_key(KeyCode::Char('q'));
        app.handle_key(KeyCode::Backspace);
        assert!(!app.should_quit);
        assert_eq!(app.store.view().search_query(), "Bob");
        assert_eq!(app.store.snapshot().table.row_count(), 1);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.view().search_query(), "Bob");
    }

    #[tokio::test]
    async fn test_escape_clears_search() {
        let mut app = app().await;
        app.handle_key(KeyCode::Char('/'));
        app.handle_key(KeyCode::Char('x'));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.store.view().search_query(), "");
        assert!(!app.search_bar.active);
    }

    #[tokio::test]
    async fn test_day_picker_drill_down_and_back() {
        let mut app = app().await;
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::DayPicker);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.view().selected_day(), Some("2024-05-02"));

        // search is not available in daily view
        assert!(!app.handle_key(KeyCode::Char('/')));

        app.handle_key(KeyCode::Char('b'));
        assert_eq!(app.store.view().selected_day(), None);
    }

    #[tokio::test]
    async fn test_day_picker_without_days() {
        let mut app = app().await;
        app.store.switch_month(Month::March).await;

        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.status_message.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_month_keys_switch_and_load() {
        let mut app = app().await;
        app.store.select_day("2024-05-01");

        app.handle_key(KeyCode::Right);
        assert_eq!(app.store.selected_month(), Month::June);
        assert_eq!(app.store.view().selected_day(), None);
        assert!(app.store.is_loading());

        // let the spawned load run
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(!app.store.is_loading());
        assert_eq!(app.store.dataset_month(), Some(Month::June));

        app.handle_key(KeyCode::Char('['));
        app.handle_key(KeyCode::Char('['));
        assert_eq!(app.store.selected_month(), Month::April);
    }

    #[tokio::test]
    async fn test_failed_load_sets_status() {
        let provider = InMemoryProvider::new();
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let store = Arc::new(DashboardStore::new(provider, ViewConfig::new(today)));
        let mut app = App::new(store.clone());

        store.initial_load().await;
        app.poll_events();
        let status = app.status_message.unwrap();
        assert!(status.starts_with("May: "));
    }
}
