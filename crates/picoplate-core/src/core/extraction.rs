use super::error::PlateError;
use super::geometry::{self, QUADRANT_COLUMNS};
use super::models::matrix::PlateMatrix;
use super::models::quadrant::Quadrant;
use super::models::well::{PlateLayout, WellCoordinate};
use itertools::Itertools;
use tracing::debug;

/// Copies one quadrant of a 384-well read matrix into a 96-well matrix.
///
/// Wells are visited over the cartesian product of [`geometry::rows_for`] and
/// [`geometry::columns_for`] in row-major order, so position (r, c) of the result holds
/// `raw[rows_for(q)[r]][columns_for(q)[c]]`.
///
/// The result is always labelled with rows `a`-`h` and columns 1-12, whichever 384 rows
/// it came from. The top-left and bottom-left plates therefore carry identical row
/// letters; only the quadrant they were extracted for tells them apart.
///
/// # Errors
///
/// Returns [`PlateError::Shape`] if `raw` is not a complete 16 x 24 plate.
pub fn extract_quadrant(raw: &PlateMatrix, quadrant: Quadrant) -> Result<PlateMatrix, PlateError> {
    if !raw.is_complete_384() {
        return Err(PlateError::Shape {
            expected: (PlateLayout::Plate384.rows(), PlateLayout::Plate384.columns()),
            found: (raw.nrows(), raw.ncols()),
        });
    }

    let values = geometry::rows_for(quadrant)
        .into_iter()
        .cartesian_product(geometry::columns_for(quadrant))
        .map(|(letter, column)| {
            WellCoordinate::from_letter(letter, column)
                .ok_or_else(|| PlateError::MissingWell {
                    well: format!("{}{}", letter, column),
                    line: None,
                })
                .and_then(|well| raw.value(&well))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    debug!("Extracted {} wells for quadrant {}.", values.len(), quadrant);
    Ok(PlateMatrix::from_fn(PlateLayout::Plate96, |r, c| {
        values[r * QUADRANT_COLUMNS + c]
    }))
}
