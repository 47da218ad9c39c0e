#[cfg(feature = "bump-map")]
mod bump;
mod cell;
// This interior module is private; we reexport its contents.
#[allow(clippy::module_inception)]
mod map;
mod search;
mod truthy;

#[cfg(feature = "bump-map")]
pub use bump::bump_map;
pub use cell::{CellId, HexCell};
pub use map::{HexMap, HexMapError};
pub use truthy::Truthy;
