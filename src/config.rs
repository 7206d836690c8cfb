use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding the selection to classify.
    pub selection_root: String,
    /// Directory the generated reports are written to.
    pub report_dir: String,
    /// Command name (or path) of the external classifier.
    pub classifier: String,
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .set_default("selection_root", ".")?
        .set_default("report_dir", "fileidoutput")?
        .set_default("classifier", "file")?
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
