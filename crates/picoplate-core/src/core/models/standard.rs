use super::well::WellCoordinate;

/// A standard well: its position on the 384 plate, the known concentration (ng/µl)
/// and the read intensity observed at that position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardEntry {
    pub well: WellCoordinate,
    pub concentration: f64,
    pub reads: f64,
}

/// Standard wells ordered by ascending concentration.
///
/// Sorting is stable, so entries with equal concentrations keep the order in which
/// their wells were first declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardCurve {
    entries: Vec<StandardEntry>,
}

impl StandardCurve {
    pub fn from_entries(mut entries: Vec<StandardEntry>) -> Self {
        entries.sort_by(|a, b| a.concentration.total_cmp(&b.concentration));
        Self { entries }
    }

    pub fn entries(&self) -> &[StandardEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StandardEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, well: &WellCoordinate) -> Option<&StandardEntry> {
        self.entries.iter().find(|entry| entry.well == *well)
    }
}

impl<'a> IntoIterator for &'a StandardCurve {
    type Item = &'a StandardEntry;
    type IntoIter = std::slice::Iter<'a, StandardEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(well: &str, concentration: f64, reads: f64) -> StandardEntry {
        StandardEntry {
            well: well.parse().unwrap(),
            concentration,
            reads,
        }
    }

    #[test]
    fn entries_are_sorted_by_ascending_concentration() {
        let curve = StandardCurve::from_entries(vec![
            entry("a1", 100.0, 900.0),
            entry("a2", 0.0, 10.0),
            entry("a3", 12.5, 150.0),
        ]);
        let concentrations: Vec<_> = curve.iter().map(|e| e.concentration).collect();
        assert_eq!(concentrations, [0.0, 12.5, 100.0]);
    }

    #[test]
    fn equal_concentrations_keep_declaration_order() {
        let curve = StandardCurve::from_entries(vec![
            entry("c1", 5.0, 1.0),
            entry("a1", 5.0, 2.0),
            entry("b1", 1.0, 3.0),
        ]);
        let wells: Vec<_> = curve.iter().map(|e| e.well.to_string()).collect();
        assert_eq!(wells, ["b1", "c1", "a1"]);
    }

    #[test]
    fn get_finds_entries_by_well() {
        let curve = StandardCurve::from_entries(vec![entry("b7", 12.5, 33.0)]);
        let found = curve.get(&"b7".parse().unwrap()).unwrap();
        assert_eq!(found.reads, 33.0);
        assert!(curve.get(&"b8".parse().unwrap()).is_none());
        assert_eq!(curve.len(), 1);
        assert!(!curve.is_empty());
    }
}
