use crate::core::error::PlateError;
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// One of the four 96-well plates interleaved in a 384-well plate.
///
/// The position names follow the 2 x 2 block at the upper-left corner of the 384 plate:
///
/// ```text
///  a1 | a2
/// ---- ----
///  b1 | b2
/// ```
///
/// Variants are declared in export order (`a1`, `b1`, `a2`, `b2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

static QUADRANT_NAMES: Map<&'static str, Quadrant> = phf_map! {
    "a1" => Quadrant::TopLeft,
    "a2" => Quadrant::TopRight,
    "b1" => Quadrant::BottomLeft,
    "b2" => Quadrant::BottomRight,
    "top-left" => Quadrant::TopLeft,
    "top-right" => Quadrant::TopRight,
    "bottom-left" => Quadrant::BottomLeft,
    "bottom-right" => Quadrant::BottomRight,
};

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
    ];

    /// Short position name used on the command line (`a1`, `a2`, `b1`, `b2`).
    pub const fn position_name(&self) -> &'static str {
        match self {
            Quadrant::TopLeft => "a1",
            Quadrant::TopRight => "a2",
            Quadrant::BottomLeft => "b1",
            Quadrant::BottomRight => "b2",
        }
    }

    pub const fn long_name(&self) -> &'static str {
        match self {
            Quadrant::TopLeft => "top-left",
            Quadrant::TopRight => "top-right",
            Quadrant::BottomLeft => "bottom-left",
            Quadrant::BottomRight => "bottom-right",
        }
    }

    /// Offset of the first 384 row used by this quadrant (0 for `a`, 1 for `b`).
    pub const fn row_offset(&self) -> usize {
        match self {
            Quadrant::TopLeft | Quadrant::TopRight => 0,
            Quadrant::BottomLeft | Quadrant::BottomRight => 1,
        }
    }

    /// Offset of the first 384 column used by this quadrant (0 for column 1, 1 for column 2).
    pub const fn column_offset(&self) -> usize {
        match self {
            Quadrant::TopLeft | Quadrant::BottomLeft => 0,
            Quadrant::TopRight | Quadrant::BottomRight => 1,
        }
    }

    pub(crate) fn from_offsets(row_offset: usize, column_offset: usize) -> Self {
        match (row_offset % 2, column_offset % 2) {
            (0, 0) => Quadrant::TopLeft,
            (0, _) => Quadrant::TopRight,
            (_, 0) => Quadrant::BottomLeft,
            _ => Quadrant::BottomRight,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position_name())
    }
}

impl FromStr for Quadrant {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        QUADRANT_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| PlateError::InvalidQuadrant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_position_and_long_names() {
        assert_eq!("a1".parse::<Quadrant>().unwrap(), Quadrant::TopLeft);
        assert_eq!("A2".parse::<Quadrant>().unwrap(), Quadrant::TopRight);
        assert_eq!("b1".parse::<Quadrant>().unwrap(), Quadrant::BottomLeft);
        assert_eq!(
            "bottom_right".parse::<Quadrant>().unwrap(),
            Quadrant::BottomRight
        );
        assert_eq!(" top-left ".parse::<Quadrant>().unwrap(), Quadrant::TopLeft);
    }

    #[test]
    fn unknown_names_are_invalid_quadrants() {
        let err = "c1".parse::<Quadrant>().unwrap_err();
        assert!(matches!(err, PlateError::InvalidQuadrant(ref name) if name == "c1"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for quadrant in Quadrant::ALL {
            assert_eq!(quadrant.to_string().parse::<Quadrant>().unwrap(), quadrant);
            assert_eq!(quadrant.long_name().parse::<Quadrant>().unwrap(), quadrant);
        }
    }

    #[test]
    fn all_is_in_export_order_and_sorted() {
        let names: Vec<_> = Quadrant::ALL.iter().map(Quadrant::position_name).collect();
        assert_eq!(names, ["a1", "b1", "a2", "b2"]);
        assert!(Quadrant::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn offsets_identify_the_quadrant() {
        for quadrant in Quadrant::ALL {
            assert_eq!(
                Quadrant::from_offsets(quadrant.row_offset(), quadrant.column_offset()),
                quadrant
            );
        }
    }
}
