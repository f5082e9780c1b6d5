use crate::core::error::PlateError;
use crate::core::extraction::extract_quadrant;
use crate::core::io::export::ExportSink;
use crate::core::io::reads::{ReadsFile, ReadsMetadata};
use crate::core::io::sheet::{Sheet, raw_sheet, standard_sheet, sub_plate_sheet};
use crate::core::io::standards::StandardsFile;
use crate::core::io::traits::PlateFile;
use crate::core::models::matrix::PlateMatrix;
use crate::core::models::quadrant::Quadrant;
use crate::core::models::standard::StandardCurve;
use crate::engine::config::{ConversionConfig, SubPlateSelection};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const PHASE_PARSING_READS: &str = "Parsing reads";
pub const PHASE_RESOLVING_STANDARDS: &str = "Resolving standards";
pub const PHASE_EXTRACTING: &str = "Extracting sub-plates";
pub const PHASE_EXPORTING: &str = "Exporting sheets";

/// A 96-well plate extracted from the raw matrix, with the sheet it is exported as.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPlate {
    pub quadrant: Quadrant,
    pub sheet_name: String,
    pub matrix: PlateMatrix,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub raw: PlateMatrix,
    pub standards: StandardCurve,
    pub sub_plates: Vec<SubPlate>,
    pub reads_metadata: ReadsMetadata,
}

impl ConversionResult {
    /// Every sheet of the export, in write order: `raw`, `standard`, then one sheet
    /// per requested sub-plate in the order a1, b1, a2, b2.
    pub fn sheets(&self) -> Vec<Sheet> {
        let mut sheets = Vec::with_capacity(2 + self.sub_plates.len());
        sheets.push(raw_sheet(&self.raw));
        sheets.push(standard_sheet(&self.standards));
        sheets.extend(
            self.sub_plates
                .iter()
                .map(|plate| sub_plate_sheet(&plate.sheet_name, &plate.matrix)),
        );
        sheets
    }

    pub fn sub_plate(&self, quadrant: Quadrant) -> Option<&SubPlate> {
        self.sub_plates.iter().find(|p| p.quadrant == quadrant)
    }
}

/// Runs a full conversion from the files named in `config` and writes the result to
/// `sink`.
///
/// Nothing is written to `sink` unless both inputs parse and every standard well
/// resolves.
#[instrument(skip_all, name = "conversion_workflow")]
pub fn run(
    config: &ConversionConfig,
    sink: &mut dyn ExportSink,
    reporter: &ProgressReporter,
) -> Result<ConversionResult, EngineError> {
    info!(
        reads = %config.reads_path.display(),
        standards = %config.standards_path.display(),
        "Starting plate conversion."
    );

    let (raw, reads_metadata) = reporter
        .phase(PHASE_PARSING_READS, || {
            ReadsFile::read_from_path(&config.reads_path)
        })
        .map_err(|source| input_error(&config.reads_path, source))?;

    let standards = reporter.phase(
        PHASE_RESOLVING_STANDARDS,
        || -> Result<StandardCurve, EngineError> {
            let definitions = StandardsFile::read_from_path(&config.standards_path)
                .map_err(|source| input_error(&config.standards_path, source))?;
            Ok(definitions.resolve(&raw)?)
        },
    )?;

    let result = assemble(raw, reads_metadata, standards, &config.sub_plates, reporter)?;
    export(&result, sink, reporter)?;

    info!(
        "Conversion finished: {} standard well(s), {} sub-plate(s).",
        result.standards.len(),
        result.sub_plates.len()
    );
    Ok(result)
}

/// Builds every output of a conversion from in-memory readers, without exporting.
pub fn convert(
    reads: &mut impl BufRead,
    standards: &mut impl BufRead,
    sub_plates: &SubPlateSelection,
    reporter: &ProgressReporter,
) -> Result<ConversionResult, EngineError> {
    let (raw, reads_metadata) =
        reporter.phase(PHASE_PARSING_READS, || ReadsFile::read_from(reads))?;
    let curve = reporter.phase(
        PHASE_RESOLVING_STANDARDS,
        || -> Result<StandardCurve, PlateError> {
            StandardsFile::read_from(standards)?.resolve(&raw)
        },
    )?;
    assemble(raw, reads_metadata, curve, sub_plates, reporter)
}

/// Writes the sheets of `result` to `sink` in order, then finishes the sink.
pub fn export(
    result: &ConversionResult,
    sink: &mut dyn ExportSink,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    let sheets = result.sheets();
    reporter.phase(PHASE_EXPORTING, || -> Result<(), EngineError> {
        reporter.report(Progress::TaskStart {
            total_steps: sheets.len() as u64,
        });
        for sheet in &sheets {
            sink.write_sheet(sheet)?;
            debug!("Exported sheet '{}'.", sheet.name());
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);
        sink.finish()?;
        Ok(())
    })
}

fn assemble(
    raw: PlateMatrix,
    reads_metadata: ReadsMetadata,
    standards: StandardCurve,
    selection: &SubPlateSelection,
    reporter: &ProgressReporter,
) -> Result<ConversionResult, EngineError> {
    if !reads_metadata.skipped_lines.is_empty() {
        reporter.report(Progress::Message(format!(
            "Skipped {} non-data line(s) in the reads file",
            reads_metadata.skipped_lines.len()
        )));
    }

    let sub_plates = reporter.phase(PHASE_EXTRACTING, || -> Result<_, EngineError> {
        reporter.report(Progress::TaskStart {
            total_steps: selection.len() as u64,
        });
        let plates = selection
            .targets()
            .iter()
            .map(|target| -> Result<SubPlate, EngineError> {
                let matrix = extract_quadrant(&raw, target.quadrant)?;
                reporter.report(Progress::TaskIncrement);
                Ok(SubPlate {
                    quadrant: target.quadrant,
                    sheet_name: target.sheet_name.clone(),
                    matrix,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;
        reporter.report(Progress::TaskFinish);
        Ok(plates)
    })?;

    Ok(ConversionResult {
        raw,
        standards,
        sub_plates,
        reads_metadata,
    })
}

fn input_error(path: &Path, source: PlateError) -> EngineError {
    EngineError::Input {
        path: path.display().to_string(),
        source,
    }
}
