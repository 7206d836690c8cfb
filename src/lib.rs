pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod progress;
pub mod report;
pub mod selection;
pub mod walker;
pub mod workbench;

pub use classifier::{Classifier, OutputMode};
pub use config::AppConfig;
pub use engine::{IdentifyEngine, RunResult, TagResult};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use workbench::FsWorkbench;
