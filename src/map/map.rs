use std::{collections::HashMap, fmt, ops::Index};

use crate::geometry::{
    AxialCoord, Coordinate, CubeCoord, Direction, OffsetCoord, ParseCoordinateError,
};

use super::cell::{CellId, HexCell};
use super::truthy::Truthy;

/// A graph of hexagonal cells, addressable under all three coordinate
/// representations.
///
/// Cells live in an arena and are indexed once per representation, so any
/// form of a coordinate resolves to the same cell in O(1). Neighbour links are always symmetric: if `a` links to `b` in
/// direction `d`, then `b` links back to `a` in `d.opposite()`.
///
/// The height/width bounds only drive eager construction; cells created
/// later through [`HexMap::get_or_create_cell`] may lie anywhere and are
/// reachable through explicit traversal rather than bounds iteration.
pub struct HexMap<T> {
    cells: Vec<HexCell<T>>,
    offset_index: HashMap<OffsetCoord, CellId>,
    axial_index: HashMap<AxialCoord, CellId>,
    cube_index: HashMap<CubeCoord, CellId>,
    height: usize,
    width: usize,
}

/// Errors raised by [`HexMap`] operations.
#[derive(Debug, thiserror::Error)]
pub enum HexMapError {
    /// A write named a coordinate with no cell behind it.
    #[error("no cell at coordinate {0}")]
    UnknownCoordinate(Coordinate),
    /// Weighted search was asked to start outside the indexed cell set.
    #[error("start node not found: {0}")]
    StartNotFound(Coordinate),
    /// Import cannot infer bounds from zero entries.
    #[error("cannot import an empty map")]
    EmptyImport,
    #[error(transparent)]
    ParseCoordinate(#[from] ParseCoordinateError),
}

impl<T> HexMap<T> {
    /// Create a dense `height` × `width` rectangle of offset-addressed
    /// cells, row-major, with no payloads.
    pub fn new(height: usize, width: usize) -> HexMap<T> {
        Self::procedural(height, width, |_| None)
    }

    /// Create a dense rectangle whose payloads come from a per-coordinate
    /// factory.
    ///
    /// Every cell links to its already-created neighbours as it is made;
    /// symmetric linking closes the other half, so the finished rectangle
    /// is fully connected.
    pub fn procedural(
        height: usize,
        width: usize,
        mut factory: impl FnMut(Coordinate) -> Option<T>,
    ) -> HexMap<T> {
        let area = height * width;
        let mut map = HexMap {
            cells: Vec::with_capacity(area),
            offset_index: HashMap::with_capacity(area),
            axial_index: HashMap::with_capacity(area),
            cube_index: HashMap::with_capacity(area),
            height,
            width,
        };
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let coord = Coordinate::offset(x, y);
                map.make_cell(coord, factory(coord));
            }
        }
        map
    }

    /// Build a map from tagged-coordinate-string keys.
    ///
    /// Bounds are inferred as `1 + max(offset.x)` by `1 + max(offset.y)`
    /// over all keys; that rectangle is built with empty payloads, then the
    /// given payloads are applied. Zero entries are rejected (there are no
    /// bounds to infer), and a key whose offset form lies outside the
    /// inferred rectangle (a negative coordinate) surfaces as
    /// [`HexMapError::UnknownCoordinate`].
    pub fn import<I>(entries: I) -> Result<HexMap<T>, HexMapError>
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let entries = itertools::process_results(
            entries
                .into_iter()
                .map(|(key, data)| key.parse::<Coordinate>().map(|coord| (coord, data))),
            |iter| iter.collect::<Vec<_>>(),
        )?;
        if entries.is_empty() {
            return Err(HexMapError::EmptyImport);
        }

        let mut width = 0;
        let mut height = 0;
        for (coord, _) in &entries {
            let offset = coord.to_offset();
            width = width.max(offset.x + 1);
            height = height.max(offset.y + 1);
        }

        let mut map = Self::new(height as usize, width as usize);
        for (coord, data) in entries {
            map.set_data(coord, data)?;
        }
        Ok(map)
    }

    /// Export every cell with a truthy payload, keyed by its axial string.
    pub fn export(&self) -> HashMap<String, T>
    where
        T: Clone + Truthy,
    {
        self.cells
            .iter()
            .filter_map(|cell| {
                let data = cell.data().filter(|data| data.is_truthy())?;
                Some((cell.coord().to_axial().to_string(), data.clone()))
            })
            .collect()
    }

    /// Height of the eagerly-constructed rectangle.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the eagerly-constructed rectangle.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells currently indexed.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when no cells exist at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate every indexed cell, in creation order.
    pub fn cells(&self) -> impl Iterator<Item = &HexCell<T>> {
        self.cells.iter()
    }

    /// Like [`HexMap::cells`], with in-place payload access.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut HexCell<T>> {
        self.cells.iter_mut()
    }

    /// Resolve a coordinate through the index matching its representation.
    pub fn cell_id(&self, coord: Coordinate) -> Option<CellId> {
        match coord {
            Coordinate::Offset(offset) => self.offset_index.get(&offset).copied(),
            Coordinate::Axial(axial) => self.axial_index.get(&axial).copied(),
            Coordinate::Cube(cube) => self.cube_index.get(&cube).copied(),
        }
    }

    /// The cell at `coord`, if one has been created.
    pub fn get_cell(&self, coord: Coordinate) -> Option<&HexCell<T>> {
        self.cell_id(coord).map(|id| &self.cells[id.0])
    }

    /// The payload at `coord`, if the cell exists and has one.
    pub fn get_data(&self, coord: Coordinate) -> Option<&T> {
        self.get_cell(coord).and_then(HexCell::data)
    }

    /// Replace the payload at `coord`.
    ///
    /// Fails if no cell was ever created there; a write never creates
    /// cells (contrast [`HexMap::get_or_create_cell`]).
    pub fn set_data(
        &mut self,
        coord: Coordinate,
        data: impl Into<Option<T>>,
    ) -> Result<(), HexMapError> {
        let id = self
            .cell_id(coord)
            .ok_or(HexMapError::UnknownCoordinate(coord))?;
        *self.cells[id.0].data_mut() = data.into();
        Ok(())
    }

    /// The cell at `coord`, creating and linking it first if absent.
    ///
    /// Idempotent. A new cell links against every neighbour that already
    /// exists (and they link back), wherever it lies relative to the
    /// original rectangle.
    pub fn get_or_create_cell(&mut self, coord: Coordinate) -> CellId {
        match self.cell_id(coord) {
            Some(id) => id,
            None => self.make_cell(coord, None),
        }
    }

    /// Iterate cells from `start`, following `direction` links until the
    /// chain ends.
    pub fn walk(
        &self,
        start: Coordinate,
        direction: Direction,
    ) -> impl Iterator<Item = &HexCell<T>> + '_ {
        std::iter::successors(self.cell_id(start), move |&id| {
            self.cells[id.0].neighbor(direction)
        })
        .map(move |id| &self.cells[id.0])
    }

    /// Create a cell and wire it into every index and every existing
    /// neighbour.
    ///
    /// The single entry point for cell creation: the three indices can
    /// never disagree about the cell set.
    fn make_cell(&mut self, coord: Coordinate, data: Option<T>) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(HexCell::new(coord, data));
        self.offset_index.insert(coord.to_offset(), id);
        self.axial_index.insert(coord.to_axial(), id);
        self.cube_index.insert(coord.to_cube(), id);

        for direction in Direction::iter() {
            if let Some(neighbor) = self.cell_id(coord.neighbour(direction)) {
                self.link(id, direction, neighbor);
            }
        }
        id
    }

    /// Link two cells so each sees the other: `a` toward `b` in
    /// `direction`, `b` back toward `a` in its opposite. No half-linked
    /// state is observable.
    fn link(&mut self, a: CellId, direction: Direction, b: CellId) {
        self.cells[a.0].set_neighbor(direction, b);
        self.cells[b.0].set_neighbor(direction.opposite(), a);
    }
}

impl<T> Index<CellId> for HexMap<T> {
    type Output = HexCell<T>;

    fn index(&self, id: CellId) -> &HexCell<T> {
        &self.cells[id.0]
    }
}

impl<T> fmt::Debug for HexMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("HexMap<{}>", std::any::type_name::<T>()))
            .field("height", &self.height)
            .field("width", &self.width)
            .field("cells", &format_args!("[...; {}]", self.cells.len()))
            .finish()
    }
}
