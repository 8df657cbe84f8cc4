pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::fetch::HttpDetailFetcher;
pub use core::orchestrator::{Orchestrator, OutputPaths};
pub use core::session::FormSession;
pub use core::writer::StreamingWriter;
pub use domain::model::{AcceptedRecord, Level, RejectedRecord, RunSummary, SelectOption};
pub use utils::error::{Result, ScrapeError};
