use crate::domain::model::{Level, SelectOption};
use crate::domain::ports::{ConfigProvider, OptionSource};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const FALLBACK_DELAY: Duration = Duration::from_secs(1);

/// HTTP-backed session against the subvention form.
///
/// The form page populates its tower and unit selects through ajax calls
/// issued by the page script; this session issues the same calls directly.
/// Options per level are cached; selecting a parent invalidates every
/// descendant level until `await_population` refills it.
pub struct FormSession<C: ConfigProvider> {
    config: C,
    client: Client,
    selected: HashMap<Level, String>,
    options: HashMap<Level, Vec<SelectOption>>,
}

impl<C: ConfigProvider> FormSession<C> {
    /// Loads the form page and reads the initial project options. A page
    /// that cannot be loaded is a fatal setup failure.
    pub async fn connect(config: C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        tracing::info!("Loading form page: {}", config.page_url());
        let page = client
            .get(config.page_url())
            .timeout(config.navigation_timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::SetupError {
                message: format!("failed to load form page: {}", e),
            })?
            .text()
            .await
            .map_err(|e| ScrapeError::SetupError {
                message: format!("failed to read form page: {}", e),
            })?;

        let mut options = HashMap::new();
        for level in [Level::Project, Level::Tower, Level::Unit] {
            options.insert(level, parse_select_options(&page, level));
        }
        tracing::debug!(
            "Form page loaded, {} project options",
            options[&Level::Project].len()
        );

        Ok(Self {
            config,
            client,
            selected: HashMap::new(),
            options,
        })
    }

    /// Re-reads one level's options from the remote. Project options come
    /// from the page itself; tower and unit options come from the ajax
    /// fragment endpoint parameterized by the current parent selections.
    async fn refresh(&self, level: Level) -> Result<Vec<SelectOption>> {
        match level {
            Level::Project => {
                let page = self
                    .client
                    .get(self.config.page_url())
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                Ok(parse_select_options(&page, level))
            }
            Level::Tower | Level::Unit => {
                let Some(project) = self.selected.get(&Level::Project) else {
                    return Ok(Vec::new());
                };
                let mut form: Vec<(&str, &str)> = vec![("project_id", project)];
                let action = match level {
                    Level::Tower => self.config.tower_action(),
                    Level::Unit => {
                        let Some(tower) = self.selected.get(&Level::Tower) else {
                            return Ok(Vec::new());
                        };
                        form.push(("tower_id", tower));
                        self.config.unit_action()
                    }
                    Level::Project => unreachable!(),
                };
                form.push(("action", action));

                let fragment = self
                    .client
                    .post(self.config.ajax_url())
                    .header("accept", "*/*")
                    .header("x-requested-with", "XMLHttpRequest")
                    .header("referer", self.config.page_url())
                    .form(&form)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                Ok(parse_option_fragment(&fragment))
            }
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> OptionSource for FormSession<C> {
    async fn list_options(&self, level: Level) -> Result<Vec<SelectOption>> {
        Ok(self.options.get(&level).cloned().unwrap_or_default())
    }

    async fn select(&mut self, level: Level, value: &str) -> Result<()> {
        tracing::debug!("Selecting {} = {}", level.select_id(), value);
        self.selected.insert(level, value.to_string());

        let mut descendant = level.child();
        while let Some(child) = descendant {
            self.options.remove(&child);
            self.selected.remove(&child);
            descendant = child.child();
        }
        Ok(())
    }

    async fn await_population(&mut self, level: Level, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.refresh(level).await {
                Ok(found) if !found.is_empty() => {
                    self.options.insert(level, found);
                    return Ok(true);
                }
                Ok(_) => {}
                // Not populated yet; transport hiccups count the same.
                Err(e) => tracing::debug!("Population poll for {} failed: {}", level.select_id(), e),
            }
            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        // Timed out: one lenient fallback re-read after a short delay,
        // accepting whatever is present, including nothing.
        tokio::time::sleep(FALLBACK_DELAY).await;
        let found = self.refresh(level).await.unwrap_or_default();
        let populated = !found.is_empty();
        self.options.insert(level, found);
        if !populated {
            tracing::warn!(
                "No options appeared for {} within {:?}",
                level.select_id(),
                timeout
            );
        }
        Ok(populated)
    }
}

/// Options of the select with the level's id, placeholder entries excluded.
fn parse_select_options(page_html: &str, level: Level) -> Vec<SelectOption> {
    let document = Html::parse_document(page_html);
    let selector = Selector::parse(&format!("#{} option", level.select_id())).unwrap();
    collect_options(document.select(&selector))
}

/// Options from an ajax fragment, which may be a bare `<option>` list or a
/// whole `<select>` element.
fn parse_option_fragment(fragment_html: &str) -> Vec<SelectOption> {
    let document = Html::parse_fragment(fragment_html);
    let selector = Selector::parse("option").unwrap();
    collect_options(document.select(&selector))
}

fn collect_options<'a>(elements: impl Iterator<Item = scraper::ElementRef<'a>>) -> Vec<SelectOption> {
    elements
        .filter_map(|el| {
            let label = el.text().collect::<String>().trim().to_string();
            let value = el.value().attr("value").unwrap_or(label.as_str());
            if value.is_empty() {
                None
            } else {
                Some(SelectOption::new(value, label.as_str()))
            }
        })
        .collect()
}
