//! Place lookup over a set of known places.
//!
//! Indexes place boundaries and coordinates in an R-tree and answers "which places
//! contain this point" and "which places are near this one".

mod index;
mod service;

pub use index::{IndexedPlace, PlaceIndex};
pub use service::PlaceLocator;
