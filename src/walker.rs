use tracing::{debug, error};

use crate::classifier::{Classifier, OutputMode};
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::report::ClassificationRecord;
use crate::selection::{FileNode, MetadataStore, SelectionNode, SelectionSource};

/// Path of the selection root in the selection layer's convention.
pub const ROOT_PATH: &str = "/";

/// Counts accumulated over one walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    pub files_visited: usize,
    pub classified: usize,
    pub skipped: usize,
}

/// Depth-first traversal of the selection.
///
/// Visits every file exactly once and recurses into every folder
/// exactly once. Per-file failures (metadata access, classification)
/// are logged and skipped; a folder whose listing fails is skipped as
/// a whole while its siblings continue. The progress reporter fires
/// exactly once per file node regardless of outcome.
pub struct Walker<'a> {
    source: &'a dyn SelectionSource,
    store: &'a dyn MetadataStore,
    classifier: &'a Classifier,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> Walker<'a> {
    pub fn new(
        source: &'a dyn SelectionSource,
        store: &'a dyn MetadataStore,
        classifier: &'a Classifier,
        reporter: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            source,
            store,
            classifier,
            reporter,
        }
    }

    /// Walk the selection in format-description mode, collecting one
    /// record per successfully classified file in visitation order.
    pub fn collect_formats(
        &self,
        agent_version: &str,
    ) -> Result<(Vec<ClassificationRecord>, WalkOutcome), Error> {
        let mut records = Vec::new();
        let mut outcome = WalkOutcome::default();
        let roots = self.source.root_nodes()?;
        self.recurse(
            roots,
            ROOT_PATH,
            &mut |file, absolute_path| match self
                .classifier
                .classify(absolute_path, OutputMode::Format)
            {
                Ok(output) => {
                    records.push(ClassificationRecord::new(&file.name, output, agent_version));
                    true
                }
                Err(err) => {
                    error!("Error running classifier for file {}: {}", file.name, err);
                    false
                }
            },
            &mut outcome,
        );
        Ok((records, outcome))
    }

    /// Walk the selection in MIME-type mode, writing each file's MIME
    /// type straight back onto its metadata record. No aggregation.
    pub fn tag_mime_types(&self) -> Result<WalkOutcome, Error> {
        let mut outcome = WalkOutcome::default();
        let roots = self.source.root_nodes()?;
        self.recurse(
            roots,
            ROOT_PATH,
            &mut |file, absolute_path| match self
                .classifier
                .classify(absolute_path, OutputMode::MimeType)
            {
                Ok(mime) => match self.store.set_mime_type(file, &mime) {
                    Ok(()) => true,
                    Err(err) => {
                        error!("Error tagging file {}: {}", file.name, err);
                        false
                    }
                },
                Err(err) => {
                    error!("Error running classifier for file {}: {}", file.name, err);
                    false
                }
            },
            &mut outcome,
        );
        Ok(outcome)
    }

    fn recurse(
        &self,
        nodes: Vec<SelectionNode>,
        path: &str,
        on_file: &mut dyn FnMut(&FileNode, &str) -> bool,
        outcome: &mut WalkOutcome,
    ) {
        for node in nodes {
            match node {
                SelectionNode::File(file) => {
                    outcome.files_visited += 1;
                    debug!("Processing file: {}", file.name);

                    let classified = match self.store.file_path(&file) {
                        Ok(file_path) => {
                            // Concatenation without separator normalization,
                            // matching the selection layer's path convention.
                            let absolute_path = format!(
                                "{}/{}/{}",
                                self.source.selection_root().display(),
                                file_path,
                                file.name
                            );
                            on_file(&file, &absolute_path)
                        }
                        Err(err) => {
                            error!("{}", err);
                            false
                        }
                    };

                    if classified {
                        outcome.classified += 1;
                    } else {
                        outcome.skipped += 1;
                    }

                    // Fires exactly once per file, on success and failure alike.
                    self.reporter.on_file_processed(&file.name, classified);
                }
                SelectionNode::Folder(folder) => {
                    let child_path = format!("{}/{}", path, folder.name);
                    match self.source.list_children(&folder, &child_path) {
                        Ok(children) => self.recurse(children, &child_path, on_file, outcome),
                        Err(err) => error!("{}", err),
                    }
                }
                SelectionNode::Unsupported { name } => {
                    debug!("Skipping unsupported node: {}", name);
                }
            }
        }
    }
}
