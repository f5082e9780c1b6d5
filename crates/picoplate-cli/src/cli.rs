use clap::{Args, Parser, Subcommand};
use picoplate::core::models::quadrant::Quadrant;
use picoplate::core::models::well::WellCoordinate;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "picoplate - Split PicoGreen/RiboGreen 384-well plate-reader exports into 96-well plates and standard tables.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a 384-well reads export into raw, standard and 96-well sheets.
    Convert(ConvertArgs),
    /// Print which 384-well positions make up each 96-well plate.
    Layout(LayoutArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    // --- Inputs ---
    /// Plate-reader export holding the 16 x 24 grid of reads.
    #[arg(short = 'f', long = "reads", value_name = "PATH")]
    pub reads: Option<PathBuf>,

    /// Standards file with one `<well> <concentration>` line per standard well.
    #[arg(short, long, value_name = "PATH")]
    pub standards: Option<PathBuf>,

    // --- Sub-plates ---
    /// Sheet name for the 96-well plate starting at a1 (odd rows, odd columns).
    #[arg(long, value_name = "NAME")]
    pub a1: Option<String>,

    /// Sheet name for the 96-well plate starting at a2 (odd rows, even columns).
    #[arg(long, value_name = "NAME")]
    pub a2: Option<String>,

    /// Sheet name for the 96-well plate starting at b1 (even rows, odd columns).
    #[arg(long, value_name = "NAME")]
    pub b1: Option<String>,

    /// Sheet name for the 96-well plate starting at b2 (even rows, even columns).
    #[arg(long, value_name = "NAME")]
    pub b2: Option<String>,

    // --- Output ---
    /// Directory receiving one CSV file per sheet.
    /// Defaults to the reads path without its extension.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S plates.a1=1st_plate
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

impl ConvertArgs {
    /// Sheet names given on the command line, keyed by quadrant.
    pub fn plate_names(&self) -> impl Iterator<Item = (Quadrant, &str)> {
        [
            (Quadrant::TopLeft, &self.a1),
            (Quadrant::TopRight, &self.a2),
            (Quadrant::BottomLeft, &self.b1),
            (Quadrant::BottomRight, &self.b2),
        ]
        .into_iter()
        .filter_map(|(quadrant, name)| name.as_deref().map(|name| (quadrant, name)))
    }
}

/// Arguments for the `layout` subcommand.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Only show this plate (a1, a2, b1, b2, or top-left, top-right, ...).
    #[arg(value_name = "QUADRANT")]
    pub quadrant: Option<Quadrant>,

    /// Instead of the grids, show where these 384-well positions end up.
    /// Can be used multiple times. Example: -w b7 -w p24
    #[arg(short, long = "well", value_name = "WELL", conflicts_with = "quadrant")]
    pub wells: Vec<WellCoordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_accepts_short_and_position_flags() {
        let cli = Cli::parse_from([
            "picoplate",
            "-vv",
            "convert",
            "-f",
            "pico.reads.txt",
            "-s",
            "pico.standard.txt",
            "--a1",
            "1st_plate",
            "--b2",
            "4th_plate",
            "-S",
            "output.directory=out",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Convert(args) = cli.command else {
            panic!("expected the convert subcommand");
        };
        assert_eq!(args.reads, Some(PathBuf::from("pico.reads.txt")));
        assert_eq!(args.standards, Some(PathBuf::from("pico.standard.txt")));
        assert_eq!(args.set_values, ["output.directory=out"]);
        let names: Vec<_> = args.plate_names().collect();
        assert_eq!(
            names,
            [
                (Quadrant::TopLeft, "1st_plate"),
                (Quadrant::BottomRight, "4th_plate")
            ]
        );
    }

    #[test]
    fn layout_parses_quadrant_names() {
        let cli = Cli::parse_from(["picoplate", "layout", "bottom-left"]);
        let Commands::Layout(args) = cli.command else {
            panic!("expected the layout subcommand");
        };
        assert_eq!(args.quadrant, Some(Quadrant::BottomLeft));

        assert!(Cli::try_parse_from(["picoplate", "layout", "c3"]).is_err());

        let cli = Cli::parse_from(["picoplate", "layout", "-w", "B7", "--well", "p24"]);
        let Commands::Layout(args) = cli.command else {
            panic!("expected the layout subcommand");
        };
        let wells: Vec<_> = args.wells.iter().map(ToString::to_string).collect();
        assert_eq!(wells, ["b7", "p24"]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["picoplate", "-q", "-v", "layout"]).is_err());
    }
}
