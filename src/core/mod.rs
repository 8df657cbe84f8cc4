pub mod classify;
pub mod csv_export;
pub mod extract;
pub mod fetch;
pub mod orchestrator;
pub mod session;
pub mod writer;

pub use crate::domain::model::{
    AcceptedRecord, FieldMap, Level, RejectDetails, RejectedRecord, RunSummary, SelectOption,
};
pub use crate::domain::ports::{ConfigProvider, DetailFetcher, OptionSource};
pub use crate::utils::error::Result;
