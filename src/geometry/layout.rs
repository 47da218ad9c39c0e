//! Pixel-space layout for hex cells.
//!
//! Pure stateless math for placing cells on screen and hit-testing pointer
//! positions; the grid itself knows nothing about pixels.

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// Screen-space bounding box of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Bounding rectangle for `coord`, with cells `cell_size` pixels across.
///
/// Odd rows are shoved right by half a cell, matching the offset layout.
pub fn cell_rect(coord: Coordinate, cell_size: i32) -> Rect {
    let offset = coord.to_offset();
    let shove = if offset.y & 1 == 1 { cell_size / 2 } else { 0 };
    Rect {
        x: offset.x * cell_size + shove,
        y: offset.y * cell_size,
        width: cell_size,
        height: cell_size,
    }
}

/// The offset coordinate of the cell containing pixel `(x, y)`.
///
/// Inverse of [`cell_rect`]; division floors, so negative pixel space maps
/// consistently.
pub fn point_to_coord(x: i32, y: i32, cell_size: i32) -> Coordinate {
    let row = y.div_euclid(cell_size);
    let shove = if row & 1 == 1 { 1 } else { 0 };
    Coordinate::offset(x.div_euclid(cell_size) - shove, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(s: &str) -> Coordinate {
        s.parse().expect("test coordinates are well formed")
    }

    #[test]
    fn even_rows_sit_on_the_grid() {
        let rect = cell_rect(coord("o5:4"), 100);
        assert_eq!(
            rect,
            Rect {
                x: 500,
                y: 400,
                width: 100,
                height: 100
            }
        );
    }

    #[test]
    fn odd_rows_shove_right_by_half_a_cell() {
        assert_eq!(cell_rect(coord("o5:3"), 100).x, 550);
    }

    #[test]
    fn hit_testing_inverts_the_layout() {
        assert_eq!(point_to_coord(522, 462, 100), coord("o5:4"));
        assert_eq!(point_to_coord(522, 362, 100), coord("o4:3"));
    }

    #[test]
    fn hit_testing_floors_negative_pixels() {
        assert_eq!(point_to_coord(-30, -130, 100), coord("o-1:-2"));
    }
}
