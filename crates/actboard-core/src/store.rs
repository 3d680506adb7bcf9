//! Dashboard store with parking_lot::RwLock and generation-tagged reloads
//!
//! Every month change bumps a request generation. A fetch result is only
//! applied if its generation is still the latest when it completes, so a
//! slow response for a month the user already left is dropped.

use crate::dashboard::{compose, DashboardSnapshot};
use crate::event::{DashboardEvent, EventBus};
use crate::models::{Month, MonthDataset};
use crate::provider::DataProvider;
use crate::view::{ViewConfig, ViewState};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handle for one requested fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub month: Month,
}

/// What happened to a completed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Result applied to the store
    Applied,
    /// A newer request exists; result discarded
    Superseded,
    /// Latest request failed; previous dataset kept
    Failed(String),
}

#[derive(Debug)]
struct StoreState {
    view: ViewState,
    dataset: Option<Arc<MonthDataset>>,
    dataset_month: Option<Month>,
    loading: bool,
    last_error: Option<String>,
}

/// Central state for the dashboard
///
/// Thread-safe; share it as `Arc<DashboardStore<P>>` and run `load` on a
/// background task. No lock is held across an await point.
pub struct DashboardStore<P> {
    provider: P,
    state: RwLock<StoreState>,
    /// Latest issued request generation
    generation: AtomicU64,
    event_bus: EventBus,
}

impl<P: DataProvider> DashboardStore<P> {
    pub fn new(provider: P, config: ViewConfig) -> Self {
        Self {
            provider,
            state: RwLock::new(StoreState {
                view: ViewState::new(config),
                dataset: None,
                dataset_month: None,
                loading: false,
                last_error: None,
            }),
            generation: AtomicU64::new(0),
            event_bus: EventBus::default_capacity(),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn view(&self) -> ViewState {
        self.state.read().view.clone()
    }

    pub fn selected_month(&self) -> Month {
        self.state.read().view.selected_month()
    }

    pub fn dataset_month(&self) -> Option<Month> {
        self.state.read().dataset_month
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Switch month and issue a new request generation.
    ///
    /// The view changes immediately; call [`load`](Self::load) with the
    /// returned ticket to fetch the data.
    pub fn select_month(&self, month: Month) -> LoadTicket {
        let ticket = {
            let mut state = self.state.write();
            state.view.select_month(month);
            state.loading = true;
            // Bumped under the write lock so `load` sees a consistent order
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            LoadTicket { generation, month }
        };

        debug!(month = %month, generation = ticket.generation, "Month selected");
        self.event_bus.publish(DashboardEvent::LoadStarted {
            month,
            generation: ticket.generation,
        });
        ticket
    }

    /// Fetch the ticket's month and apply it if the ticket is still current
    pub async fn load(&self, ticket: LoadTicket) -> LoadOutcome {
        let result = self.provider.fetch(ticket.month).await;

        if let Ok(dataset) = &result {
            let report = dataset.validate();
            let (warnings, errors) = report.issue_count();
            for issue in &report.issues {
                debug!(source = %issue.source, severity = ?issue.severity, "{}", issue.message);
            }
            if !report.is_clean() {
                warn!(month = %ticket.month, warnings, errors, "Dataset has data-quality issues");
            }
        }

        let (outcome, event) = {
            let mut state = self.state.write();
            if ticket.generation != self.current_generation() {
                (
                    LoadOutcome::Superseded,
                    DashboardEvent::LoadSuperseded {
                        month: ticket.month,
                        generation: ticket.generation,
                    },
                )
            } else {
                state.loading = false;
                match result {
                    Ok(dataset) => {
                        info!(
                            month = %ticket.month,
                            generation = ticket.generation,
                            agents = dataset.monthly.len(),
                            days = dataset.daily.len(),
                            "Dataset loaded"
                        );
                        state.dataset = Some(Arc::new(dataset));
                        state.dataset_month = Some(ticket.month);
                        state.last_error = None;
                        (
                            LoadOutcome::Applied,
                            DashboardEvent::DatasetLoaded {
                                month: ticket.month,
                                generation: ticket.generation,
                            },
                        )
                    }
                    Err(e) => {
                        warn!(month = %ticket.month, error = %e, "Failed to load dataset");
                        let message = match e.suggestion() {
                            Some(hint) => format!("{} ({})", e, hint),
                            None => e.to_string(),
                        };
                        state.last_error = Some(message.clone());
                        (
                            LoadOutcome::Failed(message.clone()),
                            DashboardEvent::LoadFailed {
                                month: ticket.month,
                                message,
                            },
                        )
                    }
                }
            }
        };

        if outcome == LoadOutcome::Superseded {
            debug!(
                month = %ticket.month,
                generation = ticket.generation,
                "Discarding superseded load"
            );
        }
        self.event_bus.publish(event);
        outcome
    }

    /// `select_month` followed by `load`
    pub async fn switch_month(&self, month: Month) -> LoadOutcome {
        let ticket = self.select_month(month);
        self.load(ticket).await
    }

    /// Load the currently selected month
    pub async fn initial_load(&self) -> LoadOutcome {
        let month = self.selected_month();
        info!(month = %month, "Starting initial data load");
        self.switch_month(month).await
    }

    /// Drill into a day; no refetch
    pub fn select_day(&self, day: impl Into<String>) {
        self.state.write().view.select_day(day);
        self.event_bus.publish(DashboardEvent::ViewChanged);
    }

    pub fn back_to_monthly(&self) {
        self.state.write().view.back_to_monthly();
        self.event_bus.publish(DashboardEvent::ViewChanged);
    }

    pub fn set_search_query(&self, text: impl Into<String>) {
        self.state.write().view.set_search_query(text);
        self.event_bus.publish(DashboardEvent::ViewChanged);
    }

    /// Days of the held dataset, ascending
    pub fn available_days(&self) -> Vec<String> {
        let state = self.state.read();
        state.view.available_days(state.dataset.as_deref())
    }

    /// Render-ready state for the current selection
    pub fn snapshot(&self) -> DashboardSnapshot {
        let (view, dataset, dataset_month, loading, last_error) = {
            let state = self.state.read();
            (
                state.view.clone(),
                state.dataset.clone(),
                state.dataset_month,
                state.loading,
                state.last_error.clone(),
            )
        };

        let mut snapshot = compose(&view, dataset.as_deref());
        snapshot.loading = loading;
        snapshot.dataset_month = dataset_month;
        snapshot.last_error = last_error;
        snapshot
    }
}
