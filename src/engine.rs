use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, error, info};

use crate::classifier::Classifier;
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::report;
use crate::selection::{MetadataStore, ReportSink, SelectionSource};
use crate::walker::Walker;

/// Orchestrates one identification run: probe the classifier version
/// once, walk the selection, then build and persist the report.
pub struct IdentifyEngine {
    classifier: Classifier,
}

/// Summary of a report-producing run.
#[derive(Debug)]
pub struct RunResult {
    pub agent_version: String,
    pub files_visited: usize,
    pub classified: usize,
    pub skipped: usize,
    pub walk_duration: Duration,
    pub report_file_name: String,
    pub report_written: bool,
}

/// Summary of a MIME-tagging run.
#[derive(Debug)]
pub struct TagResult {
    pub files_visited: usize,
    pub tagged: usize,
    pub skipped: usize,
    pub walk_duration: Duration,
}

impl IdentifyEngine {
    pub fn new(classifier_command: &str) -> Self {
        Self {
            classifier: Classifier::new(classifier_command),
        }
    }

    /// Classify every file in the selection and persist the JSON
    /// report.
    ///
    /// Per-file failures are logged and skipped by the walker. A
    /// report persistence failure is logged and reflected in
    /// `report_written`; the classification work is never rolled back.
    pub fn run<W>(&self, workbench: &W, reporter: &dyn ProgressReporter) -> Result<RunResult, Error>
    where
        W: SelectionSource + MetadataStore + ReportSink,
    {
        info!("Running file type identification");
        let agent_version = self.classifier.probe_version();
        debug!("Classifier version: {}", agent_version);

        reporter.on_walk_start(workbench.total_files());
        let walk_start = Instant::now();
        let walker = Walker::new(workbench, workbench, &self.classifier, reporter);
        let (records, outcome) = walker.collect_formats(&agent_version)?;
        let walk_duration = walk_start.elapsed();
        reporter.on_walk_complete(outcome.files_visited, walk_duration.as_secs_f64());
        debug!(
            "Walk completed in {:.2}s — {} files visited, {} classified, {} skipped",
            walk_duration.as_secs_f64(),
            outcome.files_visited,
            outcome.classified,
            outcome.skipped,
        );

        let report_file_name = report::report_file_name(Utc::now());
        let report_written = match report::build_report(&records) {
            Ok(body) => match workbench.write_report(&report_file_name, body.as_bytes()) {
                Ok(()) => true,
                Err(err) => {
                    error!("{}", err);
                    false
                }
            },
            Err(err) => {
                error!("{}", err);
                false
            }
        };

        Ok(RunResult {
            agent_version,
            files_visited: outcome.files_visited,
            classified: outcome.classified,
            skipped: outcome.skipped,
            walk_duration,
            report_file_name,
            report_written,
        })
    }

    /// Tag each file's metadata with its MIME type, with no report.
    pub fn tag_mime<W>(
        &self,
        workbench: &W,
        reporter: &dyn ProgressReporter,
    ) -> Result<TagResult, Error>
    where
        W: SelectionSource + MetadataStore,
    {
        info!("Running MIME type identification");

        reporter.on_walk_start(workbench.total_files());
        let walk_start = Instant::now();
        let walker = Walker::new(workbench, workbench, &self.classifier, reporter);
        let outcome = walker.tag_mime_types()?;
        let walk_duration = walk_start.elapsed();
        reporter.on_walk_complete(outcome.files_visited, walk_duration.as_secs_f64());

        Ok(TagResult {
            files_visited: outcome.files_visited,
            tagged: outcome.classified,
            skipped: outcome.skipped,
            walk_duration,
        })
    }
}
