//! Place specificity: admin-level inference, search radii and nearby search.

mod infer;
mod radius;
mod search;

pub use infer::{infer_admin_level, HeuristicTables};
pub use radius::{RadiusEntry, RadiusTable};
pub use search::{
    find_nearby_places, CandidateSupplier, IterSupplier, NearbyPlace, PagedSupplier, SearchLimits,
};
