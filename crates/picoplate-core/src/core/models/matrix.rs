use super::well::{PlateLayout, WellCoordinate};
use crate::core::error::PlateError;
use nalgebra::DMatrix;

/// Dense grid of read intensities for one plate.
///
/// The matrix always holds exactly `layout.rows() x layout.columns()` values; the shape
/// is validated when the matrix is built and never changes afterwards. Row labels come
/// from the layout (`a`-`p` or `a`-`h`) and columns are numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateMatrix {
    layout: PlateLayout,
    values: DMatrix<f64>,
}

impl PlateMatrix {
    /// Builds a matrix from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::Shape`] if the number of rows, or the length of any row,
    /// does not match `layout`.
    pub fn from_rows(layout: PlateLayout, rows: &[Vec<f64>]) -> Result<Self, PlateError> {
        let expected = (layout.rows(), layout.columns());
        if rows.len() != layout.rows() {
            let width = rows.first().map_or(0, Vec::len);
            return Err(PlateError::Shape {
                expected,
                found: (rows.len(), width),
            });
        }
        if let Some(ragged) = rows.iter().find(|row| row.len() != layout.columns()) {
            return Err(PlateError::Shape {
                expected,
                found: (rows.len(), ragged.len()),
            });
        }

        let values = DMatrix::from_fn(layout.rows(), layout.columns(), |r, c| rows[r][c]);
        Ok(Self { layout, values })
    }

    pub(crate) fn from_fn<F>(layout: PlateLayout, f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self {
            layout,
            values: DMatrix::from_fn(layout.rows(), layout.columns(), f),
        }
    }

    pub fn layout(&self) -> PlateLayout {
        self.layout
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Returns `true` if the matrix is a complete 16 x 24 plate.
    pub fn is_complete_384(&self) -> bool {
        self.layout == PlateLayout::Plate384
            && self.nrows() == PlateLayout::Plate384.rows()
            && self.ncols() == PlateLayout::Plate384.columns()
    }

    /// Value at a 0-based (row, column) position.
    pub fn at(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get((row, column)).copied()
    }

    /// Value of a well, or `None` if the well is not on this plate.
    pub fn get(&self, well: &WellCoordinate) -> Option<f64> {
        if !self.layout.contains(well) {
            return None;
        }
        let (row, column) = well.matrix_index()?;
        self.at(row, column)
    }

    /// Value of a well.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::MissingWell`] if the well is outside the plate.
    pub fn value(&self, well: &WellCoordinate) -> Result<f64, PlateError> {
        self.get(well).ok_or_else(|| PlateError::MissingWell {
            well: well.to_string(),
            line: None,
        })
    }

    /// Values of one row, left to right.
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        (row < self.nrows()).then(|| self.values.row(row).iter().copied().collect())
    }

    /// Rows paired with their layout letter, top to bottom.
    pub fn labeled_rows(&self) -> impl Iterator<Item = (char, Vec<f64>)> + '_ {
        self.layout
            .row_labels()
            .iter()
            .enumerate()
            .map(|(r, &label)| (label, self.values.row(r).iter().copied().collect()))
    }

    /// Every well with its value, in row-major order (`a1`, `a2`, ..., `b1`, ...).
    pub fn wells(&self) -> impl Iterator<Item = (WellCoordinate, f64)> + '_ {
        let ncols = self.ncols();
        (0..self.nrows()).flat_map(move |r| {
            (0..ncols).map(move |c| {
                (
                    WellCoordinate::new(r as u8, c as u16 + 1),
                    self.values[(r, c)],
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential_rows(layout: PlateLayout) -> Vec<Vec<f64>> {
        (0..layout.rows())
            .map(|r| {
                (0..layout.columns())
                    .map(|c| (r * layout.columns() + c + 1) as f64)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn from_rows_builds_a_complete_384_plate() {
        let matrix =
            PlateMatrix::from_rows(PlateLayout::Plate384, &sequential_rows(PlateLayout::Plate384))
                .unwrap();
        assert!(matrix.is_complete_384());
        assert_eq!(matrix.at(0, 0), Some(1.0));
        assert_eq!(matrix.at(15, 23), Some(384.0));
        assert_eq!(matrix.at(16, 0), None);
    }

    #[test]
    fn from_rows_rejects_wrong_row_count() {
        let mut rows = sequential_rows(PlateLayout::Plate384);
        rows.pop();
        let err = PlateMatrix::from_rows(PlateLayout::Plate384, &rows).unwrap_err();
        assert!(matches!(
            err,
            PlateError::Shape {
                expected: (16, 24),
                found: (15, 24)
            }
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let mut rows = sequential_rows(PlateLayout::Plate96);
        rows[3].push(0.0);
        let err = PlateMatrix::from_rows(PlateLayout::Plate96, &rows).unwrap_err();
        assert!(matches!(
            err,
            PlateError::Shape {
                expected: (8, 12),
                found: (8, 13)
            }
        ));
    }

    #[test]
    fn get_is_bounds_checked_by_layout() {
        let matrix =
            PlateMatrix::from_rows(PlateLayout::Plate96, &sequential_rows(PlateLayout::Plate96))
                .unwrap();
        assert_eq!(matrix.get(&"a1".parse().unwrap()), Some(1.0));
        assert_eq!(matrix.get(&"h12".parse().unwrap()), Some(96.0));
        assert_eq!(matrix.get(&"i1".parse().unwrap()), None);
        assert_eq!(matrix.get(&"a13".parse().unwrap()), None);
        assert_eq!(matrix.get(&"a0".parse().unwrap()), None);
    }

    #[test]
    fn value_reports_missing_well() {
        let matrix =
            PlateMatrix::from_rows(PlateLayout::Plate96, &sequential_rows(PlateLayout::Plate96))
                .unwrap();
        let err = matrix.value(&"p24".parse().unwrap()).unwrap_err();
        assert!(matches!(err, PlateError::MissingWell { ref well, line: None } if well == "p24"));
    }

    #[test]
    fn wells_iterate_in_row_major_order() {
        let matrix =
            PlateMatrix::from_rows(PlateLayout::Plate96, &sequential_rows(PlateLayout::Plate96))
                .unwrap();
        let wells: Vec<_> = matrix.wells().collect();
        assert_eq!(wells.len(), 96);
        assert_eq!(wells[0].0.to_string(), "a1");
        assert_eq!(wells[1].0.to_string(), "a2");
        assert_eq!(wells[12].0.to_string(), "b1");
        assert_eq!(wells[95], (WellCoordinate::new(7, 12), 96.0));
        assert!(wells.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn labeled_rows_use_layout_letters() {
        let matrix =
            PlateMatrix::from_rows(PlateLayout::Plate96, &sequential_rows(PlateLayout::Plate96))
                .unwrap();
        let labels: String = matrix.labeled_rows().map(|(label, _)| label).collect();
        assert_eq!(labels, "abcdefgh");
        assert_eq!(matrix.row(1).unwrap()[0], 13.0);
        assert_eq!(matrix.row(8), None);
    }
}
