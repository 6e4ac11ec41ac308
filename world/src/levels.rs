//! Level grid catalogue and point-in-wall queries.

use glam::Vec2;
use station_siege_core::{tuning::CELL_SIZE, CellCode, CellCoord, GridView, LevelBounds};
use thiserror::Error;

/// Reasons a level layout or catalogue may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contains no rows or no columns.
    #[error("level layout is empty")]
    Empty,
    /// A row is shorter or longer than the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of cells found in the row.
        found: usize,
        /// Number of cells in the first row.
        expected: usize,
    },
    /// The catalogue contains no layouts.
    #[error("level catalogue contains no layouts")]
    NoLevels,
}

/// Fixed rectangular grid of cell codes describing one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    cells: Vec<CellCode>,
    columns: u32,
    rows: u32,
}

impl LevelLayout {
    /// Builds a layout from rows of numeric cell codes (`0` empty, `1` wall, `2` system).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LayoutError> {
        let expected = rows.first().map_or(0, |row| row.as_ref().len());
        if expected == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(LayoutError::Ragged {
                    row: index,
                    found: row.len(),
                    expected,
                });
            }
            cells.extend(row.iter().copied().map(CellCode::from_code));
        }

        Ok(Self {
            cells,
            columns: expected as u32,
            rows: rows.len() as u32,
        })
    }

    fn from_grid<const COLUMNS: usize, const ROWS: usize>(grid: &[[u8; COLUMNS]; ROWS]) -> Self {
        Self {
            cells: grid
                .iter()
                .flat_map(|row| row.iter().copied().map(CellCode::from_code))
                .collect(),
            columns: COLUMNS as u32,
            rows: ROWS as u32,
        }
    }

    /// Read-only view of the layout in world units.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.columns, self.rows, CELL_SIZE)
    }

    /// First empty cell in reading order, if the layout has one.
    #[must_use]
    pub fn first_empty_cell(&self) -> Option<CellCoord> {
        self.view()
            .iter()
            .find(|(_, code)| *code == CellCode::Empty)
            .map(|(cell, _)| cell)
    }

    /// Cells hosting repairable systems in reading order.
    #[must_use]
    pub fn system_sockets(&self) -> Vec<CellCoord> {
        self.view()
            .iter()
            .filter(|(_, code)| *code == CellCode::SystemSocket)
            .map(|(cell, _)| cell)
            .collect()
    }
}

/// Ordered, immutable list of level layouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCatalogue {
    layouts: Vec<LevelLayout>,
}

impl LevelCatalogue {
    /// Creates a catalogue from the provided layouts; at least one is required.
    pub fn new(layouts: Vec<LevelLayout>) -> Result<Self, LayoutError> {
        if layouts.is_empty() {
            return Err(LayoutError::NoLevels);
        }
        Ok(Self { layouts })
    }

    /// Catalogue of the three built-in station levels.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            layouts: vec![
                LevelLayout::from_grid(&LEVEL_ONE),
                LevelLayout::from_grid(&LEVEL_TWO),
                LevelLayout::from_grid(&LEVEL_THREE),
            ],
        }
    }

    /// Number of levels in the catalogue.
    #[must_use]
    pub fn level_count(&self) -> u32 {
        self.layouts.len() as u32
    }

    /// Layout for the one-based level index, clamped into the catalogue.
    #[must_use]
    pub fn layout(&self, level: u32) -> &LevelLayout {
        let last = self.layouts.len().saturating_sub(1);
        let index = usize::try_from(level.saturating_sub(1)).map_or(last, |index| index.min(last));
        &self.layouts[index]
    }

    /// World-space bounds of the level.
    #[must_use]
    pub fn bounds(&self, level: u32) -> LevelBounds {
        self.layout(level).view().bounds()
    }

    /// Reports whether the point is outside the level or inside one of its walls.
    #[must_use]
    pub fn is_wall(&self, level: u32, point: Vec2) -> bool {
        self.layout(level).view().is_wall(point)
    }
}

impl Default for LevelCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

const LEVEL_ONE: [[u8; 15]; 15] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 2, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 2, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_TWO: [[u8; 15]; 15] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 0, 1, 0, 0, 2, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 0, 1, 0, 0, 2, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 2, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_THREE: [[u8; 15]; 15] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1],
    [1, 2, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 2, 1],
    [1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalogue_has_three_square_levels() {
        let catalogue = LevelCatalogue::builtin();
        assert_eq!(catalogue.level_count(), 3);
        for level in 1..=3 {
            let bounds = catalogue.bounds(level);
            assert_eq!(bounds.max_x, 1_500.0);
            assert_eq!(bounds.max_y, 1_500.0);
        }
    }

    #[test]
    fn out_of_range_levels_clamp_to_last_layout() {
        let catalogue = LevelCatalogue::builtin();
        assert_eq!(catalogue.layout(9), catalogue.layout(3));
        assert_eq!(catalogue.layout(0), catalogue.layout(1));
    }

    #[test]
    fn points_outside_bounds_are_walls() {
        let catalogue = LevelCatalogue::builtin();
        assert!(catalogue.is_wall(1, Vec2::new(-0.1, 150.0)));
        assert!(catalogue.is_wall(1, Vec2::new(150.0, 1_500.0)));
        assert!(catalogue.is_wall(1, Vec2::new(50.0, 50.0)));
        assert!(!catalogue.is_wall(1, Vec2::new(150.0, 150.0)));
    }

    #[test]
    fn first_empty_cell_follows_reading_order() {
        let layout = LevelLayout::from_rows(&[[1u8, 1, 1], [1, 2, 0], [1, 0, 1]])
            .expect("layout is rectangular");
        assert_eq!(layout.first_empty_cell(), Some(CellCoord::new(2, 1)));
        assert_eq!(layout.system_sockets(), vec![CellCoord::new(1, 1)]);
    }

    #[test]
    fn builtin_levels_expose_expected_system_counts() {
        let catalogue = LevelCatalogue::builtin();
        let counts: Vec<_> = (1..=3)
            .map(|level| catalogue.layout(level).system_sockets().len())
            .collect();
        assert_eq!(counts, vec![2, 3, 2]);
    }

    #[test]
    fn ragged_layouts_are_rejected() {
        let rows: [&[u8]; 2] = [&[1, 1, 1], &[1, 0]];
        assert_eq!(
            LevelLayout::from_rows(&rows),
            Err(LayoutError::Ragged {
                row: 1,
                found: 2,
                expected: 3,
            })
        );
        assert_eq!(LevelCatalogue::new(Vec::new()), Err(LayoutError::NoLevels));
    }
}
