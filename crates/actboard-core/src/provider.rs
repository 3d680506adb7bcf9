//! Month dataset sources
//!
//! `JsonDirProvider` reads one JSON file per month from a directory.
//! `InMemoryProvider` serves fixed datasets (tests and `--demo`).

use crate::error::CoreError;
use crate::models::{AgentDailyRecord, AgentMonthlyRecord, Month, MonthDataset};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Source of per-month datasets
pub trait DataProvider: Send + Sync {
    /// Fetch the full dataset for `month`
    fn fetch(&self, month: Month) -> impl Future<Output = Result<MonthDataset, CoreError>> + Send;

    /// Months this provider can serve, in calendar order
    fn available_months(&self) -> impl Future<Output = Vec<Month>> + Send;
}

/// Reads `<dir>/<month>.json` (lowercase month name)
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    dir: PathBuf,
    /// Maximum retry attempts on parse failure
    max_retries: u32,
    retry_delay: Duration,
}

impl JsonDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_retries: 3,
            retry_delay: Duration::from_millis(100),
        }
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, month: Month) -> PathBuf {
        self.dir.join(format!("{}.json", month.file_stem()))
    }

    /// Load with retry.
    ///
    /// Parse and read failures are retried as the file might be mid-write.
    /// A missing file is reported immediately.
    async fn load(&self, month: Month) -> Result<MonthDataset, CoreError> {
        if !tokio::fs::try_exists(&self.dir).await.unwrap_or(false) {
            return Err(CoreError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }

        let path = self.path_for(month);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(attempt, month = %month, "Retrying dataset parse after delay");
                sleep(self.retry_delay).await;
            }

            match try_parse(&path).await {
                Ok(dataset) => return Ok(dataset),
                Err(e @ CoreError::FileNotFound { .. }) => return Err(e),
                Err(e) => {
                    warn!(attempt, path = %path.display(), error = %e, "Dataset parse attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::FileNotFound { path }))
    }
}

/// Single parse attempt
async fn try_parse(path: &Path) -> Result<MonthDataset, CoreError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| CoreError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
        source: e,
    })
}

impl DataProvider for JsonDirProvider {
    async fn fetch(&self, month: Month) -> Result<MonthDataset, CoreError> {
        self.load(month).await
    }

    async fn available_months(&self) -> Vec<Month> {
        let mut months = Vec::new();
        for &month in Month::all() {
            if tokio::fs::try_exists(self.path_for(month)).await.unwrap_or(false) {
                months.push(month);
            }
        }
        months
    }
}

/// Fixed month → dataset map
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    datasets: HashMap<Month, MonthDataset>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: Month, dataset: MonthDataset) -> Self {
        self.datasets.insert(month, dataset);
        self
    }

    pub fn insert(&mut self, month: Month, dataset: MonthDataset) {
        self.datasets.insert(month, dataset);
    }

    /// Generated sample data for every month of `year`
    pub fn demo(year: i32) -> Self {
        let mut provider = Self::new();
        for &month in Month::all() {
            provider.insert(month, demo_dataset(year, month));
        }
        provider
    }
}

impl DataProvider for InMemoryProvider {
    async fn fetch(&self, month: Month) -> Result<MonthDataset, CoreError> {
        self.datasets
            .get(&month)
            .cloned()
            .ok_or_else(|| CoreError::MonthNotFound {
                month: month.name().to_string(),
            })
    }

    async fn available_months(&self) -> Vec<Month> {
        let mut months: Vec<_> = self.datasets.keys().copied().collect();
        months.sort();
        months
    }
}

const DEMO_AGENTS: [(&str, &str); 6] = [
    ("E101", "Alice Moreau"),
    ("E102", "Bob Stone"),
    ("E103", "Chidi Okafor"),
    ("E104", "Dana Whitfield"),
    ("E105", "Emeka Nwosu"),
    ("E106", "Farah Haddad"),
];

const DEMO_DAYS: u32 = 5;

/// Deterministic sample month: five working days, six agents
fn demo_dataset(year: i32, month: Month) -> MonthDataset {
    let seed = month.index() as u64 + 1;
    let mut monthly: Vec<AgentMonthlyRecord> = DEMO_AGENTS
        .iter()
        .enumerate()
        .map(|(i, (id, name))| AgentMonthlyRecord {
            employee_id: id.to_string(),
            agent_name: name.to_string(),
            target: (40 + (i as u64 * 7 + seed * 3) % 25) as f64,
            ..Default::default()
        })
        .collect();

    let mut daily = BTreeMap::new();
    for day in 1..=DEMO_DAYS {
        let key = format!("{:04}-{:02}-{:02}", year, month.index() + 1, day);
        let rows: Vec<AgentDailyRecord> = DEMO_AGENTS
            .iter()
            .enumerate()
            .map(|(i, (id, name))| {
                let mix = seed * 31 + u64::from(day) * 17 + i as u64 * 13;
                let silver = (mix % 4) as f64;
                let gold = (mix / 4 % 3) as f64;
                let platinum = (mix / 12 % 2) as f64;
                let standard = (mix / 24 % 3) as f64;
                AgentDailyRecord {
                    employee_id: id.to_string(),
                    agent_name: name.to_string(),
                    silver,
                    gold,
                    platinum,
                    standard,
                    total: silver + gold + platinum + standard,
                }
            })
            .collect();

        for (agent, row) in monthly.iter_mut().zip(&rows) {
            agent.silver += row.silver;
            agent.gold += row.gold;
            agent.platinum += row.platinum;
            agent.standard += row.standard;
            agent.achieved += row.total;
        }
        daily.insert(key, rows);
    }

    for agent in &mut monthly {
        agent.remaining = agent.target - agent.achieved;
    }
    MonthDataset::new(monthly, daily)
}
