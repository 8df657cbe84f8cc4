use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "amrapali-scrape")]
#[command(about = "Scrapes per-unit subvention details from the Amrapali receiver portal")]
pub struct CliConfig {
    /// Form page carrying the project/tower/unit selects
    #[arg(
        long,
        default_value = "https://receiveramrapali.in/residential/subvention-scheme.php"
    )]
    pub page_url: String,

    /// Ajax endpoint serving option fragments and unit details
    #[arg(
        long,
        default_value = "https://receiveramrapali.in/residential/ajax_add_mobile_change.php"
    )]
    pub ajax_url: String,

    /// Action field for the tower option fragment request
    #[arg(long, default_value = "get_tower")]
    pub tower_action: String,

    /// Action field for the unit option fragment request
    #[arg(long, default_value = "get_unit")]
    pub unit_action: String,

    /// Action field for the detail request
    #[arg(long, default_value = "getdetails_subvention")]
    pub detail_action: String,

    /// Directory the two output files are written to
    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// Timeout for the initial page load, in seconds
    #[arg(long, default_value = "30")]
    pub navigation_timeout_secs: u64,

    /// Timeout for each ajax request, in seconds
    #[arg(long, default_value = "15")]
    pub request_timeout_secs: u64,

    /// How long to wait for a dependent select to repopulate, in seconds
    #[arg(long, default_value = "5")]
    pub population_timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn ajax_url(&self) -> &str {
        &self.ajax_url
    }

    fn tower_action(&self) -> &str {
        &self.tower_action
    }

    fn unit_action(&self) -> &str {
        &self.unit_action
    }

    fn detail_action(&self) -> &str {
        &self.detail_action
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn population_timeout(&self) -> Duration {
        Duration::from_secs(self.population_timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_url("page_url", &self.page_url)?;
        validation::validate_url("ajax_url", &self.ajax_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number(
            "navigation_timeout_secs",
            self.navigation_timeout_secs,
            1,
        )?;
        validation::validate_positive_number("request_timeout_secs", self.request_timeout_secs, 1)?;
        validation::validate_positive_number(
            "population_timeout_secs",
            self.population_timeout_secs,
            1,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> CliConfig {
        CliConfig::parse_from(["amrapali-scrape"])
    }

    #[test]
    fn test_defaults_validate() {
        assert!(default_config().validate().is_ok());
    }

    #[test]
    fn test_bad_url_is_rejected() {
        let mut config = default_config();
        config.page_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = default_config();
        config.population_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
