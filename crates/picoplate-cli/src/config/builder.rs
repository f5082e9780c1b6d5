use super::file::{FileConfig, FileInputConfig, FileOutputConfig, FilePlatesConfig};
use super::models::AppConfig;
use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use picoplate::core::models::quadrant::Quadrant;
use picoplate::engine::config::ConversionConfigBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Merges CLI arguments, `--set` overrides, the config file and defaults, in that order
/// of precedence.
pub fn build_config(args: &ConvertArgs) -> Result<AppConfig> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let input = file_config.input.take().unwrap_or_default();
    let reads_path = args.reads.clone().or(input.reads).ok_or_else(|| {
        CliError::Config(
            "A reads file is required, either via `--reads` or `input.reads`.".to_string(),
        )
    })?;
    let standards_path = args.standards.clone().or(input.standards).ok_or_else(|| {
        CliError::Config(
            "A standards file is required, either via `--standards` or `input.standards`."
                .to_string(),
        )
    })?;

    let output_dir = args
        .output
        .clone()
        .or(file_config.output.take().and_then(|o| o.directory))
        .unwrap_or_else(|| default_output_dir(&reads_path));

    let plates = file_config.plates.take().unwrap_or_default();
    let mut builder = ConversionConfigBuilder::new()
        .reads_path(reads_path)
        .standards_path(standards_path);
    for quadrant in Quadrant::ALL {
        let cli_name = args
            .plate_names()
            .find(|(q, _)| *q == quadrant)
            .map(|(_, name)| name.to_string());
        if let Some(name) = cli_name.or_else(|| file_plate_name(&plates, quadrant).cloned()) {
            builder = builder.sub_plate(quadrant, name);
        }
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!(
        "Resolved {} sub-plate(s), output directory {:?}.",
        core_config.sub_plates.len(),
        &output_dir
    );
    Ok(AppConfig {
        output_dir,
        core_config,
    })
}

/// The reads path with its extension removed: `data/pico.reads.txt` becomes
/// `data/pico.reads`.
pub fn default_output_dir(reads_path: &Path) -> PathBuf {
    let stripped = reads_path.with_extension("");
    if stripped == reads_path {
        let mut name = reads_path.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    } else {
        stripped
    }
}

fn file_plate_name(plates: &FilePlatesConfig, quadrant: Quadrant) -> Option<&String> {
    match quadrant {
        Quadrant::TopLeft => plates.a1.as_ref(),
        Quadrant::TopRight => plates.a2.as_ref(),
        Quadrant::BottomLeft => plates.b1.as_ref(),
        Quadrant::BottomRight => plates.b2.as_ref(),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "input.reads" => {
                config
                    .input
                    .get_or_insert_with(FileInputConfig::default)
                    .reads = Some(PathBuf::from(value));
            }
            "input.standards" => {
                config
                    .input
                    .get_or_insert_with(FileInputConfig::default)
                    .standards = Some(PathBuf::from(value));
            }
            "output.directory" => {
                config
                    .output
                    .get_or_insert_with(FileOutputConfig::default)
                    .directory = Some(PathBuf::from(value));
            }
            _ => {
                let quadrant = key
                    .strip_prefix("plates.")
                    .and_then(|name| name.parse::<Quadrant>().ok())
                    .ok_or_else(|| {
                        CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        ))
                    })?;
                let plates = config
                    .plates
                    .get_or_insert_with(FilePlatesConfig::default);
                let slot = match quadrant {
                    Quadrant::TopLeft => &mut plates.a1,
                    Quadrant::TopRight => &mut plates.a2,
                    Quadrant::BottomLeft => &mut plates.b1,
                    Quadrant::BottomRight => &mut plates.b2,
                };
                *slot = Some(value.to_string());
            }
        }
    }
    Ok(config)
}
