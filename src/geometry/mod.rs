//! Hexagonal grid geometry.
//!
//! Uses techniques from [this reference](https://www.redblobgames.com/grids/hexagons/)

pub mod coordinate;
pub mod direction;
pub mod layout;

pub use coordinate::{AxialCoord, Coordinate, CubeCoord, OffsetCoord, ParseCoordinateError};
pub use direction::Direction;
pub use layout::{cell_rect, point_to_coord, Rect};
