use crate::cli::LayoutArgs;
use crate::error::{CliError, Result};
use picoplate::core::geometry::{columns_for, locate, rows_for};
use picoplate::core::models::quadrant::Quadrant;
use picoplate::core::models::well::{PlateLayout, WellCoordinate};

pub fn run(args: LayoutArgs) -> Result<()> {
    if !args.wells.is_empty() {
        for well in &args.wells {
            println!("{}", render_location(well)?);
        }
        return Ok(());
    }

    let quadrants = match args.quadrant {
        Some(quadrant) => vec![quadrant],
        None => Quadrant::ALL.to_vec(),
    };
    let rendered: Vec<String> = quadrants.into_iter().map(render_layout).collect();
    print!("{}", rendered.join("\n"));
    Ok(())
}

/// Renders one 96-well plate as a grid of the 384-well positions it is read from.
pub fn render_layout(quadrant: Quadrant) -> String {
    let layout = PlateLayout::Plate96;
    let columns = columns_for(quadrant);

    let header: String = layout
        .column_labels()
        .map(|column| format!("{:>5}", column))
        .collect();
    let body = layout
        .row_labels()
        .iter()
        .zip(rows_for(quadrant))
        .map(|(label, source_row)| {
            let wells: String = columns
                .iter()
                .map(|&column| format!("{:>5}", format!("{}{}", source_row, column)))
                .collect();
            format!("{:<4}{}\n", label, wells)
        });

    std::iter::once(format!(
        "Plate {} ({}): 96-well position -> 384-well source\n",
        quadrant.position_name(),
        quadrant.long_name()
    ))
    .chain(std::iter::once(format!("    {}\n", header)))
    .chain(body)
    .collect()
}

/// Describes which 96-well plate and position a 384 well is extracted to.
pub fn render_location(well: &WellCoordinate) -> Result<String> {
    let (quadrant, target) = locate(well).ok_or_else(|| {
        CliError::Argument(format!("'{}' is not a well of a 384-well plate", well))
    })?;
    Ok(format!(
        "{} -> plate {} ({}), well {}",
        well,
        quadrant.position_name(),
        quadrant.long_name(),
        target
    ))
}
