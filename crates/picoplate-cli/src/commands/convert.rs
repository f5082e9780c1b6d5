use crate::cli::ConvertArgs;
use crate::config::{self, AppConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use picoplate::core::io::export::CsvDirectorySink;
use picoplate::engine::progress::ProgressReporter;
use picoplate::workflows::convert::{self, ConversionResult};
use tracing::{info, warn};

pub fn run(args: ConvertArgs, show_progress: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let AppConfig {
        output_dir,
        core_config,
    } = config::build_config(&args)?;

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut sink = CsvDirectorySink::new(&output_dir);

    println!(
        "Converting {} with standards from {}...",
        core_config.reads_path.display(),
        core_config.standards_path.display()
    );
    info!("Invoking the conversion workflow...");
    let result = convert::run(&core_config, &mut sink, &reporter)?;

    print_summary(&result, &sink);
    Ok(())
}

fn print_summary(result: &ConversionResult, sink: &CsvDirectorySink) {
    if result.standards.is_empty() {
        warn!("No standard wells were defined; the standard sheet is empty.");
        println!("Warning: no standard wells were found in the standards file.");
    }
    if result.sub_plates.is_empty() {
        println!("No 96-well plates requested; only the raw and standard sheets were written.");
    }
    for plate in &result.sub_plates {
        println!(
            "  {} ({}) -> {}",
            plate.quadrant.position_name(),
            plate.quadrant.long_name(),
            plate.sheet_name
        );
    }
    println!(
        "✓ Wrote {} sheet(s) to: {}",
        sink.written_paths().len(),
        sink.directory().display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use picoplate::core::error::PlateError;
    use picoplate::engine::error::EngineError;
    use std::fs;

    fn reads_text() -> String {
        (0..16)
            .map(|r| {
                (1..=24)
                    .map(|c| (r * 24 + c).to_string())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn writes_all_sheets_into_the_default_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let reads = dir.path().join("pico.reads.txt");
        let standards = dir.path().join("pico.standard.txt");
        fs::write(&reads, reads_text()).unwrap();
        fs::write(&standards, "a1\t0\nb2\t5\n").unwrap();

        let args = ConvertArgs {
            reads: Some(reads),
            standards: Some(standards),
            a1: Some("1st_plate".into()),
            b1: Some("2nd_plate".into()),
            ..Default::default()
        };
        run(args, false).unwrap();

        let out = dir.path().join("pico.reads");
        for name in ["raw", "standard", "1st_plate", "2nd_plate"] {
            assert!(out.join(format!("{name}.csv")).is_file(), "missing {name}");
        }
        let first = fs::read_to_string(out.join("1st_plate.csv")).unwrap();
        assert!(first.lines().nth(1).unwrap().starts_with("a,1,3,5,"));
    }

    #[test]
    fn failing_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let reads = dir.path().join("pico.reads.txt");
        let standards = dir.path().join("pico.standard.txt");
        fs::write(&reads, reads_text()).unwrap();
        fs::write(&standards, "a1\t0\nq3\t5\n").unwrap();

        let args = ConvertArgs {
            reads: Some(reads),
            standards: Some(standards),
            a1: Some("1st_plate".into()),
            ..Default::default()
        };
        let err = run(args, false).unwrap_err();

        assert!(matches!(
            err,
            CliError::Core(EngineError::Input {
                source: PlateError::MissingWell { .. },
                ..
            })
        ));
        assert!(!dir.path().join("pico.reads").exists());
    }
}
