use crate::core::models::matrix::PlateMatrix;
use crate::core::models::standard::StandardCurve;
use std::fmt;
use thiserror::Error;

pub const RAW_SHEET_NAME: &str = "raw";
pub const STANDARD_SHEET_NAME: &str = "standard";
pub const RESERVED_SHEET_NAMES: [&str; 2] = [RAW_SHEET_NAME, STANDARD_SHEET_NAME];

pub const READS_HEADER: &str = "reads";
pub const CONCENTRATION_HEADER: &str = "concentration(ng/ul)";

/// Column at which the single-column "flattened" copy of a 96-well plate starts.
pub const FLATTENED_START_COLUMN: usize = 15;

/// Spreadsheet applications cap sheet names at 31 characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['/', '\\', '?', '*', '[', ']', ':'];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => write!(f, "{}", text),
            Cell::Number(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// A rectangular table anchored at a fixed (row, column) position of its sheet.
///
/// The first row is the header; the first cell of every row is its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub start_row: usize,
    pub start_column: usize,
    pub rows: Vec<Vec<Cell>>,
}

impl Block {
    pub fn new(start_row: usize, start_column: usize, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            start_row,
            start_column,
            rows,
        }
    }

    fn end_row(&self) -> usize {
        self.start_row + self.rows.len()
    }

    fn end_column(&self) -> usize {
        self.start_column + self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A named sheet of the exported workbook, made of one or more anchored blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    blocks: Vec<Block>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Renders all blocks into one dense grid; cells not covered by a block are empty.
    ///
    /// Later blocks overwrite earlier ones where they overlap.
    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        let height = self.blocks.iter().map(Block::end_row).max().unwrap_or(0);
        let width = self.blocks.iter().map(Block::end_column).max().unwrap_or(0);
        let mut grid = vec![vec![Cell::Empty; width]; height];

        for block in &self.blocks {
            for (r, row) in block.rows.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    grid[block.start_row + r][block.start_column + c] = cell.clone();
                }
            }
        }
        grid
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetNameError {
    #[error("sheet name is empty")]
    Empty,
    #[error("sheet name is longer than {} characters", MAX_SHEET_NAME_LEN)]
    TooLong,
    #[error("sheet name contains the forbidden character '{0}'")]
    ForbiddenChar(char),
    #[error("sheet name is reserved for the '{0}' sheet")]
    Reserved(&'static str),
}

/// Checks that `name` can be used for a 96-well sheet.
pub fn validate_sheet_name(name: &str) -> Result<(), SheetNameError> {
    if name.trim().is_empty() {
        return Err(SheetNameError::Empty);
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(SheetNameError::TooLong);
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
        return Err(SheetNameError::ForbiddenChar(c));
    }
    if let Some(reserved) = RESERVED_SHEET_NAMES
        .iter()
        .find(|reserved| reserved.eq_ignore_ascii_case(name))
    {
        return Err(SheetNameError::Reserved(*reserved));
    }
    Ok(())
}

/// Grid block for a matrix: header `["", 1, 2, ...]`, one labelled row per plate row.
pub fn matrix_block(matrix: &PlateMatrix, start_row: usize, start_column: usize) -> Block {
    let header: Vec<Cell> = std::iter::once(Cell::Empty)
        .chain(
            matrix
                .layout()
                .column_labels()
                .map(|c| Cell::Number(f64::from(c))),
        )
        .collect();
    let body = matrix.labeled_rows().map(|(label, values)| {
        std::iter::once(Cell::Text(label.to_string()))
            .chain(values.into_iter().map(Cell::Number))
            .collect::<Vec<_>>()
    });
    Block::new(start_row, start_column, std::iter::once(header).chain(body).collect())
}

/// Single-column block listing every well as `<well ID>, <reads>` in row-major order.
pub fn flattened_block(matrix: &PlateMatrix, start_row: usize, start_column: usize) -> Block {
    let header = vec![Cell::Empty, Cell::from(READS_HEADER)];
    let body = matrix
        .wells()
        .map(|(well, value)| vec![Cell::Text(well.to_string()), Cell::Number(value)]);
    Block::new(start_row, start_column, std::iter::once(header).chain(body).collect())
}

/// The `raw` sheet: the full 384-well matrix.
pub fn raw_sheet(matrix: &PlateMatrix) -> Sheet {
    Sheet::new(RAW_SHEET_NAME).with_block(matrix_block(matrix, 0, 0))
}

/// The `standard` sheet: reads and concentration of each standard well, ordered by
/// ascending concentration and labelled with the well ID.
pub fn standard_sheet(curve: &StandardCurve) -> Sheet {
    let header = vec![
        Cell::Empty,
        Cell::from(READS_HEADER),
        Cell::from(CONCENTRATION_HEADER),
    ];
    let body = curve.iter().map(|entry| {
        vec![
            Cell::Text(entry.well.to_string()),
            Cell::Number(entry.reads),
            Cell::Number(entry.concentration),
        ]
    });
    Sheet::new(STANDARD_SHEET_NAME)
        .with_block(Block::new(0, 0, std::iter::once(header).chain(body).collect()))
}

/// A 96-well sheet: the 8 x 12 grid, plus the same reads flattened into one column.
pub fn sub_plate_sheet(name: &str, matrix: &PlateMatrix) -> Sheet {
    Sheet::new(name)
        .with_block(matrix_block(matrix, 0, 0))
        .with_block(flattened_block(matrix, 0, FLATTENED_START_COLUMN))
}
