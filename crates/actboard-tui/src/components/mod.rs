pub mod data_table;
pub mod day_picker;
pub mod metric_card;
pub mod search_bar;
pub mod spinner;

pub use data_table::render_table;
pub use day_picker::DayPicker;
pub use metric_card::{render_metric_row, MetricCard};
pub use search_bar::SearchBar;
pub use spinner::Spinner;
