//! Bounded nearby-places search over an external candidate stream.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::geometry::haversine_distance;
use crate::models::PlaceRecord;

/// Work bounds for one search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Candidates requested from the supplier per page
    pub chunk_size: usize,
    /// Hard cap on candidates examined, qualifying or not
    pub max_candidates: usize,
    /// Stop scanning once `early_exit_factor * limit` results qualify
    pub early_exit_factor: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            chunk_size: 50,
            max_candidates: 200,
            early_exit_factor: 2,
        }
    }
}

/// Source of candidate places, consumed in order, one page at a time.
pub trait CandidateSupplier {
    /// Up to `size` further candidates. A short or empty page ends the stream.
    fn next_chunk(&mut self, size: usize) -> Vec<PlaceRecord>;
}

/// Supplier over any iterator of places.
pub struct IterSupplier<I> {
    iter: I,
}

impl<I: Iterator<Item = PlaceRecord>> IterSupplier<I> {
    pub fn new(places: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: places.into_iter(),
        }
    }
}

impl<I: Iterator<Item = PlaceRecord>> CandidateSupplier for IterSupplier<I> {
    fn next_chunk(&mut self, size: usize) -> Vec<PlaceRecord> {
        self.iter.by_ref().take(size).collect()
    }
}

/// Supplier over an offset/limit pager, e.g. a paginated query.
pub struct PagedSupplier<F> {
    fetch: F,
    offset: usize,
}

impl<F: FnMut(usize, usize) -> Vec<PlaceRecord>> PagedSupplier<F> {
    /// `fetch(offset, limit)` returns the page starting at `offset`.
    pub fn new(fetch: F) -> Self {
        Self { fetch, offset: 0 }
    }
}

impl<F: FnMut(usize, usize) -> Vec<PlaceRecord>> CandidateSupplier for PagedSupplier<F> {
    /// Pages longer than requested are cut to `size`; the surplus is fetched
    /// again from the next offset.
    fn next_chunk(&mut self, size: usize) -> Vec<PlaceRecord> {
        let mut page = (self.fetch)(self.offset, size);
        page.truncate(size);
        self.offset += page.len();
        page
    }
}

/// One search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub place: PlaceRecord,
    pub distance_km: f64,
}

/// Find places near `origin`, nearest first.
///
/// `radius_km` defaults to the radius table entry for the origin's admin level.
/// Candidates less specific than the origin (a numerically higher admin level) are
/// skipped, so a city finds other cities rather than their suburbs. Candidates
/// without a coordinate are skipped but still count against the examined cap.
/// The origin itself, and any id already seen, is never returned.
pub fn find_nearby_places<S>(
    origin: &PlaceRecord,
    supplier: &mut S,
    radius_km: Option<f64>,
    limit: usize,
    config: &EngineConfig,
) -> Vec<NearbyPlace>
where
    S: CandidateSupplier + ?Sized,
{
    let Some(center) = origin.reference_point() else {
        debug!("nearby search for {}: no reference point", origin.id);
        return Vec::new();
    };
    if limit == 0 {
        return Vec::new();
    }

    let tables = &config.heuristics;
    let limits = &config.search;
    let origin_level = origin.admin_level(tables);
    let radius = radius_km.unwrap_or_else(|| config.radius.radius_for(origin_level));
    let enough = limit.saturating_mul(limits.early_exit_factor.max(1));
    let chunk_size = limits.chunk_size.max(1);

    let mut results: Vec<NearbyPlace> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut examined = 0usize;

    'scan: while examined < limits.max_candidates {
        let want = chunk_size.min(limits.max_candidates - examined);
        let page = supplier.next_chunk(want);
        let page_len = page.len();
        if page_len == 0 {
            break;
        }

        for candidate in page.into_iter().take(want) {
            examined += 1;

            if candidate.id == origin.id || !seen.insert(candidate.id.clone()) {
                continue;
            }
            let Some(position) = candidate.coordinate else {
                continue;
            };

            let distance = haversine_distance(
                center.latitude,
                center.longitude,
                position.latitude,
                position.longitude,
            );
            if distance > radius {
                continue;
            }

            if let (Some(own), Some(theirs)) = (origin_level, candidate.admin_level(tables)) {
                if theirs > own {
                    continue;
                }
            }

            results.push(NearbyPlace {
                place: candidate,
                distance_km: distance,
            });
            if results.len() >= enough {
                break 'scan;
            }
        }

        if page_len < want {
            break;
        }
    }

    debug!(
        "nearby search for {}: examined {}, {} within {} km",
        origin.id,
        examined,
        results.len(),
        radius
    );

    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    results.truncate(limit);
    results
}
