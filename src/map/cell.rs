use crate::geometry::{Coordinate, Direction};

/// Index of a cell in its owning [`HexMap`]'s arena.
///
/// Neighbour links are stored as `CellId`s rather than references, so the
/// bidirectional graph carries no ownership cycles and the whole map drops
/// as one unit. Ids are only meaningful to the map that minted them.
///
/// [`HexMap`]: super::HexMap
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub(crate) usize);

/// A single cell of a [`HexMap`]: one coordinate's worth of identity, an
/// optional payload, and up to six neighbour links.
///
/// [`HexMap`]: super::HexMap
#[derive(Clone, Debug)]
pub struct HexCell<T> {
    coord: Coordinate,
    data: Option<T>,
    neighbors: [Option<CellId>; 6],
}

impl<T> HexCell<T> {
    pub(crate) fn new(coord: Coordinate, data: Option<T>) -> HexCell<T> {
        HexCell {
            coord,
            data,
            neighbors: [None; 6],
        }
    }

    /// The coordinate this cell was created under.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// The cell's payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// In-place access to the payload slot.
    pub fn data_mut(&mut self) -> &mut Option<T> {
        &mut self.data
    }

    /// The linked neighbour in `direction`, if one exists.
    ///
    /// Never creates a cell; materializing missing neighbours is the map's
    /// job.
    pub fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Iterate the linked neighbours, in canonical direction order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::iter()
            .filter_map(move |direction| self.neighbor(direction).map(|id| (direction, id)))
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, id: CellId) {
        self.neighbors[direction.index()] = Some(id);
    }
}
