use crate::core::classify::{classify_payload, Outcome, REASON_FETCH_OR_PARSE};
use crate::core::writer::StreamingWriter;
use crate::domain::model::{
    AcceptedRecord, Level, RejectDetails, RejectedRecord, RunSummary, SelectOption,
};
use crate::domain::ports::{DetailFetcher, OptionSource};
use crate::utils::error::Result;
use crate::utils::validation::sanitize_filename;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Drives the tower/unit enumeration under one chosen project and runs the
/// fetch, extract, classify, persist cycle for every leaf.
///
/// Strictly sequential: one leaf at a time, output order identical to
/// enumeration order (tower-major, unit-minor). Per-leaf failures are
/// downgraded to rejected records and never abort the traversal; only
/// writer I/O failures propagate.
pub struct Orchestrator<S: OptionSource, F: DetailFetcher> {
    session: S,
    fetcher: F,
    population_timeout: Duration,
    summary: RunSummary,
}

/// Output file paths for one project's run, derived from the sanitized
/// project label.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub accepted: PathBuf,
    pub rejected: PathBuf,
}

impl OutputPaths {
    pub fn for_project(output_dir: &Path, project_label: &str) -> Self {
        let prefix = sanitize_filename(project_label);
        Self {
            accepted: output_dir.join(format!("{}_amrapali_data.json", prefix)),
            rejected: output_dir.join(format!("{}_rejected_entries.json", prefix)),
        }
    }
}

impl<S: OptionSource, F: DetailFetcher> Orchestrator<S, F> {
    pub fn new(session: S, fetcher: F, population_timeout: Duration) -> Self {
        Self {
            session,
            fetcher,
            population_timeout,
            summary: RunSummary::default(),
        }
    }

    /// Runs the full traversal for `project` and returns the counters.
    /// Both output files are complete, well-formed arrays on return.
    pub async fn run(mut self, project: &SelectOption, paths: &OutputPaths) -> Result<RunSummary> {
        let mut accepted_out = StreamingWriter::create(&paths.accepted)?;
        let mut rejected_out = StreamingWriter::create(&paths.rejected)?;

        self.session.select(Level::Project, &project.value).await?;
        self.session
            .await_population(Level::Tower, self.population_timeout)
            .await?;
        let towers = self.session.list_options(Level::Tower).await?;
        tracing::info!("Project '{}': {} towers", project.label, towers.len());

        for tower in &towers {
            self.session.select(Level::Tower, &tower.value).await?;
            self.session
                .await_population(Level::Unit, self.population_timeout)
                .await?;
            let units = self.session.list_options(Level::Unit).await?;
            tracing::info!("Tower '{}': {} units", tower.label, units.len());

            for unit in &units {
                self.process_leaf(project, tower, unit, &mut accepted_out, &mut rejected_out)
                    .await?;
            }
        }

        accepted_out.close()?;
        rejected_out.close()?;
        Ok(self.summary)
    }

    /// One leaf cycle. Every failure mode short of a writer error ends in
    /// a rejected record.
    async fn process_leaf(
        &mut self,
        project: &SelectOption,
        tower: &SelectOption,
        unit: &SelectOption,
        accepted_out: &mut StreamingWriter,
        rejected_out: &mut StreamingWriter,
    ) -> Result<()> {
        let outcome = match self
            .fetcher
            .fetch_details(&project.value, &tower.value, &unit.value)
            .await
        {
            Ok(payload) => classify_payload(&payload, &unit.label),
            Err(err) => Outcome::Rejected {
                reason: REASON_FETCH_OR_PARSE.to_string(),
                details: RejectDetails::Text(err.to_string()),
            },
        };

        match outcome {
            Outcome::Accepted(details) => {
                accepted_out.append(&AcceptedRecord {
                    project: project.label.clone(),
                    tower: tower.label.clone(),
                    unit: unit.label.clone(),
                    details,
                })?;
                self.summary.accepted += 1;
                tracing::info!(
                    "Saved entry {}: {} / {} / {}",
                    self.summary.accepted,
                    project.label,
                    tower.label,
                    unit.label
                );
            }
            Outcome::Rejected { reason, details } => {
                rejected_out.append(&RejectedRecord {
                    project: project.label.clone(),
                    tower: tower.label.clone(),
                    unit: unit.label.clone(),
                    reason: reason.clone(),
                    details,
                })?;
                self.summary.rejected += 1;
                tracing::warn!(
                    "Rejected {} / {} / {}: {}",
                    project.label,
                    tower.label,
                    unit.label,
                    reason
                );
            }
        }
        Ok(())
    }
}
