use std::path::Path;

use crate::error::Error;

/// A node in the hierarchical selection, as yielded by the selection
/// source. The source owns the hierarchy; the walker only reads nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionNode {
    File(FileNode),
    Folder(FolderNode),
    /// A node that is neither a readable file nor a folder, such as a
    /// dangling symlink. Skipped by the walker with a log line.
    Unsupported { name: String },
}

/// A file in the selection. `path` is the `/`-rooted path of the
/// containing folder, in the selection layer's own convention
/// (duplicate separators are not normalized).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub name: String,
}

/// Read access to the hierarchical selection.
///
/// The tree is assumed to be finite and acyclic; the walker does not
/// perform cycle detection.
pub trait SelectionSource {
    /// Absolute filesystem path of the selection root.
    fn selection_root(&self) -> &Path;

    /// Children of the selection root (path `/`).
    fn root_nodes(&self) -> Result<Vec<SelectionNode>, Error>;

    /// Children of a folder. `folder_path` is the folder's own
    /// `/`-rooted path as threaded by the walker.
    fn list_children(
        &self,
        folder: &FolderNode,
        folder_path: &str,
    ) -> Result<Vec<SelectionNode>, Error>;

    /// Total number of files in the selection, when the source can
    /// count them upfront. Used only to size progress reporting.
    fn total_files(&self) -> Option<usize> {
        None
    }
}

/// Per-object metadata access, keyed by the fields the pipeline needs.
pub trait MetadataStore {
    /// Value of the FILE_PATH field for a file.
    fn file_path(&self, file: &FileNode) -> Result<String, Error>;

    /// Write the MIME_TYPE field back onto a file.
    fn set_mime_type(&self, file: &FileNode, mime: &str) -> Result<(), Error>;
}

/// Destination for the generated report artifact.
pub trait ReportSink {
    fn write_report(&self, file_name: &str, contents: &[u8]) -> Result<(), Error>;
}
