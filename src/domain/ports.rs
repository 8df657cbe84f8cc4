use crate::domain::model::{Level, SelectOption};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The cascading form session. The orchestrator only ever talks to this
/// interface, so the backend (plain HTTP today) is swappable.
#[async_trait]
pub trait OptionSource: Send + Sync {
    /// Real options currently present at `level`, in document order.
    /// Placeholder entries are never returned.
    async fn list_options(&self, level: Level) -> Result<Vec<SelectOption>>;

    /// Selects an option at `level`, invalidating all descendant levels.
    async fn select(&mut self, level: Level, value: &str) -> Result<()>;

    /// Waits for `level` to be repopulated after its parent was selected.
    /// Polls until real options appear or `timeout` elapses; on timeout,
    /// sleeps one second, re-reads once, and reports whether any real
    /// options exist. A `false` return is not an error: the caller's loop
    /// simply runs zero times.
    async fn await_population(&mut self, level: Level, timeout: Duration) -> Result<bool>;
}

/// Fetches the raw detail payload for one fully specified leaf.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch_details(
        &self,
        project_value: &str,
        tower_value: &str,
        unit_value: &str,
    ) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    /// URL of the form page carrying the cascading selects.
    fn page_url(&self) -> &str;
    /// URL of the ajax endpoint serving option fragments and details.
    fn ajax_url(&self) -> &str;
    /// Action field sent when requesting the tower option fragment.
    fn tower_action(&self) -> &str;
    /// Action field sent when requesting the unit option fragment.
    fn unit_action(&self) -> &str;
    /// Action field sent with the detail request.
    fn detail_action(&self) -> &str;
    fn output_path(&self) -> &str;
    fn navigation_timeout(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
    fn population_timeout(&self) -> Duration;
}
