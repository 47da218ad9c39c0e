//! Procedural "bump map" generation: grids of smoothed random scalars.
//!
//! _Depends on the `bump-map` feature._

use rand::Rng;

use super::map::HexMap;

/// Fill a fresh `height` × `width` map with smoothed pseudo-random scalars
/// in `[0, 1)`.
///
/// `detail` controls surface roughness: `0` produces a flat map (one base
/// value everywhere); each further level adds per-cell jitter at half the
/// previous amplitude, then smooths every cell toward the mean of its
/// neighbourhood. The caller supplies the [`Rng`], so output is
/// reproducible from a seeded generator.
pub fn bump_map(height: usize, width: usize, detail: u32, rng: &mut impl Rng) -> HexMap<f64> {
    let base = rng.gen::<f64>();
    let mut map = HexMap::procedural(height, width, |_| Some(base));

    for level in 1..=detail {
        let amplitude = 0.5_f64.powi(level as i32);
        for cell in map.cells_mut() {
            if let Some(value) = cell.data_mut().as_mut() {
                *value += rng.gen_range(-amplitude..amplitude);
            }
        }
        smooth(&mut map);
    }

    for cell in map.cells_mut() {
        if let Some(value) = cell.data_mut().as_mut() {
            *value = value.max(0.0).min(1.0 - f64::EPSILON);
        }
    }
    map
}

/// One smoothing pass: every cell moves to the mean of itself and its
/// linked neighbours, computed against a snapshot so pass order cannot
/// matter.
fn smooth(map: &mut HexMap<f64>) {
    let snapshot: Vec<f64> = map
        .cells()
        .map(|cell| cell.data().copied().unwrap_or_default())
        .collect();

    let averaged: Vec<f64> = map
        .cells()
        .enumerate()
        .map(|(index, cell)| {
            let mut total = snapshot[index];
            let mut count = 1;
            for (_, neighbor) in cell.neighbors() {
                total += snapshot[neighbor.0];
                count += 1;
            }
            total / f64::from(count)
        })
        .collect();

    for (cell, value) in map.cells_mut().zip(averaged) {
        *cell.data_mut() = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn one_by_one_is_a_single_random_scalar() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = bump_map(1, 1, 0, &mut rng);
        assert_eq!(map.height(), 1);
        assert_eq!(map.width(), 1);
        let value = *map
            .get_data(Coordinate::offset(0, 0))
            .expect("the cell is filled");
        assert!((0.0..1.0).contains(&value));
    }

    #[test]
    fn zero_detail_is_flat() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = bump_map(3, 3, 0, &mut rng);
        let origin = *map
            .get_data(Coordinate::offset(0, 0))
            .expect("the cell is filled");
        for cell in map.cells() {
            assert_eq!(cell.data(), Some(&origin));
        }
    }

    #[test]
    fn detail_levels_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = bump_map(4, 6, 3, &mut rng);
        for cell in map.cells() {
            let value = *cell.data().expect("every cell is filled");
            assert!((0.0..1.0).contains(&value));
        }
    }
}
