use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign},
    str::FromStr,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::direction::Direction;

/// Sector width, in radians, used to bucket a heading angle into one of the
/// six hex directions. Slightly under π/3: the straight-up and straight-down
/// headings fall exactly halfway between sectors at π/3 and must round into
/// the right-hand one.
const SECTOR_RAD: f64 = 1.05;

/// Offset hex coordinates: column/row addressing matching a rectangular
/// array layout, with odd rows shoved right by half a cell.
///
/// See [reference](https://www.redblobgames.com/grids/hexagons/#coordinates).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display("o{x}:{y}")]
#[from_str(regex = r"^o(?P<x>-?\d+):(?P<y>-?\d+)$")]
pub struct OffsetCoord {
    pub x: i32,
    pub y: i32,
}

impl OffsetCoord {
    pub fn new(x: i32, y: i32) -> OffsetCoord {
        OffsetCoord { x, y }
    }

    pub fn to_cube(self) -> CubeCoord {
        let q = self.x - (self.y - (self.y & 1)) / 2;
        let r = self.y;
        CubeCoord::new(q, r, -q - r)
    }

    pub fn to_axial(self) -> AxialCoord {
        let cube = self.to_cube();
        AxialCoord::new(cube.q, cube.r)
    }
}

impl AddAssign<Direction> for OffsetCoord {
    fn add_assign(&mut self, rhs: Direction) {
        // `& 1` is two's-complement parity, so negative odd rows shove the
        // same way positive ones do.
        let odd = self.y & 1 == 1;
        match rhs {
            Direction::Left => {
                self.x -= 1;
            }
            Direction::Right => {
                self.x += 1;
            }
            Direction::UpLeft => {
                if !odd {
                    self.x -= 1;
                }
                self.y -= 1;
            }
            Direction::UpRight => {
                if odd {
                    self.x += 1;
                }
                self.y -= 1;
            }
            Direction::DownLeft => {
                if !odd {
                    self.x -= 1;
                }
                self.y += 1;
            }
            Direction::DownRight => {
                if odd {
                    self.x += 1;
                }
                self.y += 1;
            }
        }
    }
}

impl Add<Direction> for OffsetCoord {
    type Output = OffsetCoord;

    fn add(mut self, rhs: Direction) -> Self::Output {
        self += rhs;
        self
    }
}

/// Axial hex coordinates: the two-axis, size-independent representation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display("a{q}:{r}")]
#[from_str(regex = r"^a(?P<q>-?\d+):(?P<r>-?\d+)$")]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub fn new(q: i32, r: i32) -> AxialCoord {
        AxialCoord { q, r }
    }

    pub fn to_cube(self) -> CubeCoord {
        CubeCoord::new(self.q, self.r, -self.q - self.r)
    }

    pub fn to_offset(self) -> OffsetCoord {
        self.to_cube().to_offset()
    }
}

impl AddAssign<Direction> for AxialCoord {
    fn add_assign(&mut self, rhs: Direction) {
        match rhs {
            Direction::Left => {
                self.q -= 1;
            }
            Direction::Right => {
                self.q += 1;
            }
            Direction::UpLeft => {
                self.r -= 1;
            }
            Direction::UpRight => {
                self.q += 1;
                self.r -= 1;
            }
            Direction::DownLeft => {
                self.q -= 1;
                self.r += 1;
            }
            Direction::DownRight => {
                self.r += 1;
            }
        }
    }
}

impl Add<Direction> for AxialCoord {
    type Output = AxialCoord;

    fn add(mut self, rhs: Direction) -> Self::Output {
        self += rhs;
        self
    }
}

/// Cube hex coordinates: the three-axis representation used for distance
/// and direction arithmetic.
///
/// Constraint: `q + r + s == 0`. Every conversion produces coordinates
/// satisfying it; parsing deliberately does not enforce it, so textual
/// input can carry unconstrained triples into the same arithmetic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display("c{q}:{r}:{s}")]
#[from_str(regex = r"^c(?P<q>-?\d+):(?P<r>-?\d+):(?P<s>-?\d+)$")]
pub struct CubeCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl CubeCoord {
    pub fn new(q: i32, r: i32, s: i32) -> CubeCoord {
        CubeCoord { q, r, s }
    }

    pub fn to_offset(self) -> OffsetCoord {
        OffsetCoord::new(self.q + (self.r - (self.r & 1)) / 2, self.r)
    }

    pub fn to_axial(self) -> AxialCoord {
        AxialCoord::new(self.q, self.r)
    }
}

impl AddAssign<Direction> for CubeCoord {
    fn add_assign(&mut self, rhs: Direction) {
        match rhs {
            Direction::Left => {
                self.q -= 1;
                self.s += 1;
            }
            Direction::Right => {
                self.q += 1;
                self.s -= 1;
            }
            Direction::UpLeft => {
                self.r -= 1;
                self.s += 1;
            }
            Direction::UpRight => {
                self.q += 1;
                self.r -= 1;
            }
            Direction::DownLeft => {
                self.q -= 1;
                self.r += 1;
            }
            Direction::DownRight => {
                self.r += 1;
                self.s -= 1;
            }
        }
    }
}

impl Add<Direction> for CubeCoord {
    type Output = CubeCoord;

    fn add(mut self, rhs: Direction) -> Self::Output {
        self += rhs;
        self
    }
}

/// A hex-grid position under one of three interchangeable representations.
///
/// No representation is primary: two `Coordinate`s compare (and hash) equal
/// whenever they denote the same logical cell, regardless of tag. The
/// tagged text form (`o1:2`, `a1:2`, `c1:2:-3`) is the only serialized
/// representation.
#[derive(Clone, Copy, Debug)]
pub enum Coordinate {
    Offset(OffsetCoord),
    Axial(AxialCoord),
    Cube(CubeCoord),
}

impl Coordinate {
    pub fn offset(x: i32, y: i32) -> Coordinate {
        Coordinate::Offset(OffsetCoord::new(x, y))
    }

    pub fn axial(q: i32, r: i32) -> Coordinate {
        Coordinate::Axial(AxialCoord::new(q, r))
    }

    pub fn cube(q: i32, r: i32, s: i32) -> Coordinate {
        Coordinate::Cube(CubeCoord::new(q, r, s))
    }

    pub fn to_offset(self) -> OffsetCoord {
        match self {
            Coordinate::Offset(offset) => offset,
            Coordinate::Axial(axial) => axial.to_offset(),
            Coordinate::Cube(cube) => cube.to_offset(),
        }
    }

    pub fn to_axial(self) -> AxialCoord {
        match self {
            Coordinate::Offset(offset) => offset.to_axial(),
            Coordinate::Axial(axial) => axial,
            Coordinate::Cube(cube) => cube.to_axial(),
        }
    }

    pub fn to_cube(self) -> CubeCoord {
        match self {
            Coordinate::Offset(offset) => offset.to_cube(),
            Coordinate::Axial(axial) => axial.to_cube(),
            Coordinate::Cube(cube) => cube,
        }
    }

    /// Step one cell in `direction`, staying in this representation.
    pub fn neighbour(self, direction: Direction) -> Coordinate {
        match self {
            Coordinate::Offset(offset) => Coordinate::Offset(offset + direction),
            Coordinate::Axial(axial) => Coordinate::Axial(axial + direction),
            Coordinate::Cube(cube) => Coordinate::Cube(cube + direction),
        }
    }

    /// Manhattan distance in cube space: `(|Δq| + |Δr| + |Δs|) / 2`.
    ///
    /// Exact for any two converted coordinates, since their cube deltas
    /// always sum to zero.
    pub fn distance(self, other: Coordinate) -> u32 {
        let a = self.to_cube();
        let b = other.to_cube();
        ((a.q - b.q).unsigned_abs() + (a.r - b.r).unsigned_abs() + (a.s - b.s).unsigned_abs()) / 2
    }

    /// The single direction that best points from `self` toward `other`,
    /// or `None` when both name the same cube position.
    ///
    /// This is an angular approximation, not exact hex arithmetic: the
    /// cube delta is flattened to offset space and bucketed by its `atan2`
    /// heading. Ties at sector boundaries resolve by rounding, which can
    /// disagree with the true nearest-neighbour direction for some deltas.
    pub fn approximate_direction(self, other: Coordinate) -> Option<Direction> {
        const HEADINGS: [Direction; 6] = [
            Direction::Right,
            Direction::DownRight,
            Direction::DownLeft,
            Direction::Left,
            Direction::UpLeft,
            Direction::UpRight,
        ];

        let a = self.to_cube();
        let b = other.to_cube();
        if a == b {
            return None;
        }

        // translate `other` into `self`'s frame, then flatten to offset space
        let delta = CubeCoord::new(b.q - a.q, b.r - a.r, b.s - a.s).to_offset();
        let theta = f64::from(delta.y).atan2(f64::from(delta.x));
        let sector = (theta / SECTOR_RAD).round() as i32;
        Some(HEADINGS[sector.rem_euclid(6) as usize])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Offset(offset) => offset.fmt(f),
            Coordinate::Axial(axial) => axial.fmt(f),
            Coordinate::Cube(cube) => cube.fmt(f),
        }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.to_cube() == other.to_cube()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_cube().hash(state);
    }
}

/// Parsing failed for a tagged coordinate string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid coordinate string: {0:?}")]
pub struct ParseCoordinateError(pub String);

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Accepts the tagged text forms `o<x>:<y>`, `a<q>:<r>`, and
    /// `c<q>:<r>:<s>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.as_bytes().first() {
            Some(b'o') => s.parse().map(Coordinate::Offset).ok(),
            Some(b'a') => s.parse().map(Coordinate::Axial).ok(),
            Some(b'c') => s.parse().map(Coordinate::Cube).ok(),
            _ => None,
        };
        parsed.ok_or_else(|| ParseCoordinateError(s.to_owned()))
    }
}

impl Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
