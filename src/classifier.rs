use std::process::Command;

use tracing::warn;

use crate::error::Error;

/// Fixed identifier of the classification agent, stamped into every
/// report record.
pub const AGENT_NAME: &str = "file";

/// Sentinel agent version used when the version probe fails.
pub const UNKNOWN_VERSION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Brief human-readable format description.
    Format,
    /// MIME type only.
    MimeType,
}

/// Invokes the external classification command against one file path.
///
/// Each invocation spawns a child process and waits synchronously for
/// it to exit; there is no retry and no timeout on the wait.
pub struct Classifier {
    command: String,
}

impl Classifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the classifier with options -b and -L.
    /// -b keeps the output brief, -L dereferences symlinks, and
    /// --mime-type is added when MIME output is requested.
    ///
    /// Exit code 0 yields the full stdout stream with lines joined by
    /// newlines and the trailing empty line trimmed. Any other exit
    /// code yields the captured stderr stream as the error.
    pub fn classify(&self, path: &str, mode: OutputMode) -> Result<String, Error> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("-b").arg("-L");
        if mode == OutputMode::MimeType {
            cmd.arg("--mime-type");
        }
        cmd.arg(path);

        let output = cmd.output().map_err(|err| Error::Spawn {
            command: self.command.clone(),
            source: err,
        })?;

        if output.status.success() {
            Ok(fold_lines(&output.stdout, "\n"))
        } else {
            Err(Error::ClassifierExit {
                code: output.status.code(),
                stderr: fold_lines(&output.stderr, "\n"),
            })
        }
    }

    /// Probe the classifier version with -v, once per run.
    ///
    /// Returns the first line of stdout on success and the "Unknown"
    /// sentinel on any failure; a broken classifier must not prevent
    /// the report from being produced.
    pub fn probe_version(&self) -> String {
        let output = match Command::new(&self.command).arg("-v").output() {
            Ok(output) => output,
            Err(err) => {
                warn!("Error when finding classifier version: {}", err);
                return UNKNOWN_VERSION.to_string();
            }
        };

        if output.status.success() {
            String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
        } else {
            warn!(
                "Error when finding classifier version, details: {}",
                fold_lines(&output.stderr, " ")
            );
            UNKNOWN_VERSION.to_string()
        }
    }
}

fn fold_lines(bytes: &[u8], separator: &str) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .collect::<Vec<_>>()
        .join(separator)
}
