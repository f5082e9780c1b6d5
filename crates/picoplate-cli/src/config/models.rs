use picoplate::engine::config::ConversionConfig;
use std::path::PathBuf;

/// Everything the `convert` command needs once CLI arguments, `--set` overrides and the
/// config file have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub core_config: ConversionConfig,
}
