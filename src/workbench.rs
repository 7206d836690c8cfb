use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Error;
use crate::selection::{
    FileNode, FolderNode, MetadataStore, ReportSink, SelectionNode, SelectionSource,
};

/// MIME type stamped onto the generated report file.
pub const REPORT_MIME: &str = "text/plain";

/// Local-filesystem workbench: selection source, metadata store and
/// report sink over a directory tree.
///
/// Directory entries are listed name-sorted so the depth-first walk
/// order is reproducible across runs. MIME tags are held in memory
/// and logged; persisting them is the host's concern when a real
/// metadata store is plugged in instead.
pub struct FsWorkbench {
    selection_root: PathBuf,
    report_dir: PathBuf,
    mime_tags: Mutex<HashMap<String, String>>,
}

impl FsWorkbench {
    pub fn new(selection_root: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            selection_root: selection_root.into(),
            report_dir: report_dir.into(),
            mime_tags: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the MIME tags recorded so far, keyed by the
    /// file's `/`-rooted path.
    pub fn mime_tags(&self) -> HashMap<String, String> {
        self.mime_tags.lock().unwrap().clone()
    }

    fn resolve(&self, selection_path: &str) -> PathBuf {
        self.selection_root
            .join(selection_path.trim_start_matches('/'))
    }

    fn read_nodes(&self, selection_path: &str) -> Result<Vec<SelectionNode>, Error> {
        let dir = self.resolve(selection_path);
        let entries = fs::read_dir(&dir).map_err(|err| Error::Selection {
            path: selection_path.to_string(),
            reason: err.to_string(),
        })?;

        let mut nodes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| Error::Selection {
                path: selection_path.to_string(),
                reason: err.to_string(),
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();

            // Follows symlinks, like the classifier's -L flag.
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => {
                    nodes.push(SelectionNode::Folder(FolderNode { name }));
                }
                Ok(_) => {
                    nodes.push(SelectionNode::File(FileNode {
                        name,
                        path: selection_path.to_string(),
                    }));
                }
                // Dangling symlinks and other unreadable entries.
                Err(_) => nodes.push(SelectionNode::Unsupported { name }),
            }
        }

        nodes.sort_by_key(|node| match node {
            SelectionNode::File(file) => file.name.clone(),
            SelectionNode::Folder(folder) => folder.name.clone(),
            SelectionNode::Unsupported { name } => name.clone(),
        });

        Ok(nodes)
    }
}

impl SelectionSource for FsWorkbench {
    fn selection_root(&self) -> &Path {
        &self.selection_root
    }

    fn root_nodes(&self) -> Result<Vec<SelectionNode>, Error> {
        self.read_nodes(crate::walker::ROOT_PATH)
    }

    fn list_children(
        &self,
        _folder: &FolderNode,
        folder_path: &str,
    ) -> Result<Vec<SelectionNode>, Error> {
        self.read_nodes(folder_path)
    }

    fn total_files(&self) -> Option<usize> {
        let count = WalkDir::new(&self.selection_root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .count();
        Some(count)
    }
}

impl MetadataStore for FsWorkbench {
    fn file_path(&self, file: &FileNode) -> Result<String, Error> {
        Ok(file.path.clone())
    }

    fn set_mime_type(&self, file: &FileNode, mime: &str) -> Result<(), Error> {
        let key = format!("{}/{}", file.path, file.name);
        debug!("Tagging {} as {}", key, mime);
        self.mime_tags.lock().unwrap().insert(key, mime.to_string());
        Ok(())
    }
}

impl ReportSink for FsWorkbench {
    fn write_report(&self, file_name: &str, contents: &[u8]) -> Result<(), Error> {
        let persist_err = |err: std::io::Error| Error::ReportPersist {
            file_name: file_name.to_string(),
            destination: self.report_dir.display().to_string(),
            reason: err.to_string(),
        };

        fs::create_dir_all(&self.report_dir).map_err(&persist_err)?;
        fs::write(self.report_dir.join(file_name), contents).map_err(&persist_err)?;

        // The report artifact itself is tagged as plain text.
        self.mime_tags
            .lock()
            .unwrap()
            .insert(file_name.to_string(), REPORT_MIME.to_string());
        Ok(())
    }
}
