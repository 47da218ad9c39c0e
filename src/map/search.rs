//! Graph search over the neighbour links of a [`HexMap`].
//!
//! Every algorithm is a read-only traversal of the link graph; the
//! breadth-first entry points take `&mut` only to materialize their
//! endpoints.

use std::collections::VecDeque;

use bitvec::bitvec;

use crate::geometry::Coordinate;

use super::cell::{CellId, HexCell};
use super::map::{HexMap, HexMapError};

/// Reconstruction cap used by [`HexMap::dijkstra_path`].
const DEFAULT_MAX_DEPTH: usize = 10_000;

impl<T> HexMap<T> {
    /// Unweighted shortest path from `start` to `end`, inclusive of both.
    ///
    /// Breadth-first over the neighbour links, so a found path has exactly
    /// `distance + 1` cells. Both endpoints are materialized if absent; the
    /// traversal itself only follows existing links. Cells `max_len` hops
    /// out are not expanded, and `None` means no path within that bound.
    /// Equal-length paths tie-break on canonical direction order, which is
    /// deterministic for a fixed map.
    pub fn path(
        &mut self,
        start: Coordinate,
        end: Coordinate,
        max_len: usize,
    ) -> Option<Vec<CellId>> {
        let start_id = self.get_or_create_cell(start);
        let end_id = self.get_or_create_cell(end);
        self.bfs(start_id, max_len, |id, _| id == end_id)
            .map(|(found, parents)| reconstruct(found, &parents))
    }

    /// The first cell in breadth-first order whose payload satisfies
    /// `predicate`, starting from (and including) `start`.
    ///
    /// Breadth-first order guarantees the match is at minimal hop distance.
    pub fn closest(
        &mut self,
        start: Coordinate,
        predicate: impl Fn(Option<&T>) -> bool,
        max_len: usize,
    ) -> Option<CellId> {
        let start_id = self.get_or_create_cell(start);
        self.bfs(start_id, max_len, |_, cell| predicate(cell.data()))
            .map(|(found, _)| found)
    }

    /// Greedy walk from `start` toward `end`, stepping the approximate
    /// heading each time.
    ///
    /// An `O(max_len)` best-effort accelerator, not a shortest-path search:
    /// it fails with `None` when an endpoint is unknown, when the suggested
    /// neighbour is unlinked (it does not route around gaps), or when `end`
    /// is not reached within `max_len` steps.
    pub fn fast_path(
        &self,
        start: Coordinate,
        end: Coordinate,
        max_len: usize,
    ) -> Option<Vec<CellId>> {
        let start_id = self.cell_id(start)?;
        let end_id = self.cell_id(end)?;
        let end_coord = self[end_id].coord();

        let mut path = vec![start_id];
        let mut current = start_id;
        let mut remaining = max_len;
        while current != end_id {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;

            let heading = self[current].coord().approximate_direction(end_coord)?;
            let next = self[current].neighbor(heading)?;
            path.push(next);
            current = next;
        }
        Some(path)
    }

    /// Weighted shortest path with unit weights and the default
    /// reconstruction cap. See [`HexMap::dijkstra_path_with`].
    pub fn dijkstra_path(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Option<Vec<CellId>>, HexMapError> {
        self.dijkstra_path_with(start, end, |_| 1.0, DEFAULT_MAX_DEPTH)
    }

    /// Exact weighted shortest path from `start` to `end` over a snapshot
    /// of the currently-indexed cells.
    ///
    /// Stepping into a neighbour costs `weight(&neighbour)`; weights are
    /// assumed non-negative. Nothing is materialized lazily, so cells never
    /// created are unreachable. Minimum selection is a linear scan, which
    /// is plenty at the graph sizes this crate targets.
    ///
    /// An unknown `start` is an error. An unknown or unreachable `end`
    /// returns `Ok(None)`, as does a shortest path longer than `max_depth`
    /// hops: a truncated sequence is never returned.
    pub fn dijkstra_path_with(
        &self,
        start: Coordinate,
        end: Coordinate,
        weight: impl Fn(&HexCell<T>) -> f64,
        max_depth: usize,
    ) -> Result<Option<Vec<CellId>>, HexMapError> {
        let start_id = self
            .cell_id(start)
            .ok_or(HexMapError::StartNotFound(start))?;
        let end_id = match self.cell_id(end) {
            Some(id) => id,
            None => return Ok(None),
        };

        let mut distances = vec![f64::INFINITY; self.len()];
        let mut previous: Vec<Option<CellId>> = vec![None; self.len()];
        let mut unsettled = bitvec!(1; self.len());
        distances[start_id.0] = 0.0;

        loop {
            let current = match unsettled
                .iter_ones()
                .min_by(|&a, &b| distances[a].total_cmp(&distances[b]))
            {
                Some(index) if distances[index].is_finite() => index,
                _ => break,
            };
            unsettled.set(current, false);
            if current == end_id.0 {
                break;
            }

            for (_, neighbor) in self[CellId(current)].neighbors() {
                let candidate = distances[current] + weight(&self[neighbor]);
                if candidate < distances[neighbor.0] {
                    distances[neighbor.0] = candidate;
                    previous[neighbor.0] = Some(CellId(current));
                }
            }
        }

        if !distances[end_id.0].is_finite() {
            return Ok(None);
        }

        let mut path = vec![end_id];
        let mut current = end_id;
        let mut hops = 0;
        while current != start_id {
            if hops == max_depth {
                return Ok(None);
            }
            hops += 1;
            current = match previous[current.0] {
                Some(parent) => parent,
                None => return Ok(None),
            };
            path.push(current);
        }
        path.reverse();
        Ok(Some(path))
    }

    /// Breadth-first expansion bounded by `max_len` hops, stopping at the
    /// first dequeued cell accepted by `stop`. Returns that cell and the
    /// parent table for path reconstruction.
    fn bfs(
        &self,
        start: CellId,
        max_len: usize,
        stop: impl Fn(CellId, &HexCell<T>) -> bool,
    ) -> Option<(CellId, Vec<Option<CellId>>)> {
        let mut visited = bitvec!(0; self.len());
        let mut parents: Vec<Option<CellId>> = vec![None; self.len()];
        let mut queue = VecDeque::new();

        visited.set(start.0, true);
        queue.push_back((start, 0));

        while let Some((id, depth)) = queue.pop_front() {
            let cell = &self[id];
            if stop(id, cell) {
                return Some((id, parents));
            }
            if depth < max_len {
                for (_, neighbor) in cell.neighbors() {
                    if !visited[neighbor.0] {
                        visited.set(neighbor.0, true);
                        parents[neighbor.0] = Some(id);
                        queue.push_back((neighbor, depth + 1));
                    }
                }
            }
        }
        None
    }
}

/// Follow parent links back from `end`, yielding the start→end sequence.
fn reconstruct(end: CellId, parents: &[Option<CellId>]) -> Vec<CellId> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(parent) = parents[current.0] {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OffsetCoord;
    use std::collections::HashMap;

    fn coord(s: &str) -> Coordinate {
        s.parse().expect("test coordinates are well formed")
    }

    fn sparse() -> HashMap<String, &'static str> {
        vec![("a0:0", "origin"), ("a9:9", "end"), ("a5:5", "middle")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    fn cubes(map: &HexMap<&str>, path: &[CellId]) -> Vec<String> {
        path.iter()
            .map(|&id| map[id].coord().to_cube().to_string())
            .collect()
    }

    #[test]
    fn bfs_path_is_shortest_and_deterministic() {
        let mut map = HexMap::import(sparse()).expect("import succeeds");
        let path = map
            .path(coord("a0:0"), coord("a1:3"), 20)
            .expect("the rectangle is connected");
        assert_eq!(
            cubes(&map, &path),
            vec!["c0:0:0", "c1:0:-1", "c1:1:-2", "c1:2:-3", "c1:3:-4"]
        );
        assert_eq!(
            path.len() as u32,
            coord("a0:0").distance(coord("a1:3")) + 1
        );
    }

    #[test]
    fn bfs_respects_the_depth_bound() {
        let mut map: HexMap<u32> = HexMap::new(1, 6);
        assert!(map.path(coord("o0:0"), coord("o5:0"), 5).is_some());
        assert!(map.path(coord("o0:0"), coord("o5:0"), 4).is_none());
    }

    #[test]
    fn path_of_identical_endpoints_is_the_single_cell() {
        let mut map: HexMap<u32> = HexMap::new(1, 1);
        let path = map
            .path(coord("o0:0"), coord("o0:0"), 10)
            .expect("trivially found");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn path_materializes_missing_endpoints() {
        let mut map: HexMap<u32> = HexMap::new(1, 1);
        // both endpoints exist afterwards, but nothing links the islands
        assert!(map.path(coord("o5:0"), coord("o9:0"), 50).is_none());
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn closest_finds_the_nearest_match_in_bfs_order() {
        let mut map = HexMap::procedural(3, 3, |coordinate| {
            let offset = coordinate.to_offset();
            Some(offset.x + 10 * offset.y)
        });
        let found = map
            .closest(coord("o0:0"), |data| matches!(data, Some(&v) if v >= 20), 10)
            .expect("row two matches");
        assert_eq!(map[found].coord().to_offset(), OffsetCoord::new(0, 2));

        // nothing matches within one hop of the origin
        assert!(map
            .closest(coord("o0:0"), |data| matches!(data, Some(&v) if v >= 20), 1)
            .is_none());
    }

    #[test]
    fn closest_inspects_the_start_cell_first() {
        let mut map = HexMap::procedural(1, 1, |_| Some(5_u32));
        let found = map
            .closest(coord("o0:0"), |data| data.is_some(), 0)
            .expect("the start matches");
        assert_eq!(map[found].coord().to_offset(), OffsetCoord::new(0, 0));
    }

    #[test]
    fn fast_path_walks_straight_on_a_dense_grid() {
        let map: HexMap<u32> = HexMap::new(5, 6);
        let path = map
            .fast_path(coord("o0:0"), coord("o5:0"), 100)
            .expect("clear run along the row");
        assert_eq!(path.len(), 6);
        assert_eq!(
            map[*path.last().expect("nonempty")].coord().to_offset(),
            OffsetCoord::new(5, 0)
        );

        let diagonal = map
            .fast_path(coord("o0:0"), coord("o2:3"), 100)
            .expect("clear run down the diagonal");
        assert_eq!(diagonal.len(), 5);
    }

    #[test]
    fn fast_path_cannot_route_around_gaps() {
        let mut map: HexMap<u32> = HexMap::new(1, 1);
        map.get_or_create_cell(coord("o5:0"));
        map.get_or_create_cell(coord("o9:0"));
        assert!(map.fast_path(coord("o5:0"), coord("o9:0"), 100).is_none());
        // unknown endpoints fail outright
        assert!(map.fast_path(coord("o7:7"), coord("o9:0"), 100).is_none());
    }

    #[test]
    fn fast_path_gives_up_past_its_step_limit() {
        let map: HexMap<u32> = HexMap::new(1, 6);
        assert!(map.fast_path(coord("o0:0"), coord("o5:0"), 4).is_none());
        assert!(map.fast_path(coord("o0:0"), coord("o5:0"), 5).is_some());
    }

    #[test]
    fn unit_weight_dijkstra_matches_bfs_length() {
        let mut map = HexMap::import(sparse()).expect("import succeeds");
        let bfs = map
            .path(coord("a0:0"), coord("a1:3"), 20)
            .expect("connected");
        let weighted = map
            .dijkstra_path(coord("a0:0"), coord("a1:3"))
            .expect("start exists")
            .expect("connected");
        assert_eq!(weighted.len(), bfs.len());
        assert_eq!(weighted.first(), bfs.first());
        assert_eq!(weighted.last(), bfs.last());
    }

    #[test]
    fn dijkstra_requires_a_known_start() {
        let map: HexMap<u32> = HexMap::new(2, 2);
        let err = map
            .dijkstra_path(coord("o9:9"), coord("o0:0"))
            .unwrap_err();
        assert!(matches!(err, HexMapError::StartNotFound(_)));
    }

    #[test]
    fn dijkstra_reports_unreachable_ends_as_not_found() {
        let mut map: HexMap<u32> = HexMap::new(2, 2);
        map.get_or_create_cell(coord("o9:9"));
        assert_eq!(
            map.dijkstra_path(coord("o0:0"), coord("o9:9"))
                .expect("start exists"),
            None
        );
        // a coordinate that was never indexed behaves the same
        assert_eq!(
            map.dijkstra_path(coord("o0:0"), coord("o7:7"))
                .expect("start exists"),
            None
        );
    }

    #[test]
    fn dijkstra_refuses_to_truncate_reconstruction() {
        let map: HexMap<u32> = HexMap::new(1, 6);
        let full = map
            .dijkstra_path_with(coord("o0:0"), coord("o5:0"), |_| 1.0, 5)
            .expect("start exists");
        assert_eq!(full.map(|path| path.len()), Some(6));
        let capped = map
            .dijkstra_path_with(coord("o0:0"), coord("o5:0"), |_| 1.0, 4)
            .expect("start exists");
        assert_eq!(capped, None);
    }
}
