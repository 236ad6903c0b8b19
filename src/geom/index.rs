use rstar::RTree;

use crate::types::{LocatedRecord, Region};

use super::bbox::{envelope, IndexedPoint};
use super::containment::point_in_polygon;

/// R-tree over record locations for region visibility queries.
///
/// Answers the same question as
/// [`RegionRegistry::visible_records`](crate::RegionRegistry::visible_records)
/// but prefilters candidates by each region's bounding box before ray casting.
#[derive(Debug, Clone)]
pub struct RecordIndex {
    rtree: RTree<IndexedPoint>,
    len: usize,
}

impl RecordIndex {
    /// Index a slice of records; positions in the slice become result indices.
    pub fn new<R: LocatedRecord>(records: &[R]) -> Self {
        Self {
            rtree: RTree::bulk_load(
                records.iter().enumerate()
                    .map(|(i, record)| IndexedPoint::new(i, record.location()))
                    .collect()
            ),
            len: records.len(),
        }
    }

    /// Get the number of indexed records.
    #[inline] pub fn len(&self) -> usize { self.len }

    /// Check if no records are indexed.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Indices of records inside any of `regions`, in ascending order.
    pub fn within_any<'r>(&self, regions: impl IntoIterator<Item = &'r Region>) -> Vec<usize> {
        let mut hit = vec![false; self.len];

        for region in regions {
            for cand in self.rtree.locate_in_envelope_intersecting(&envelope(&region.bounds())) {
                if !hit[cand.idx()] && point_in_polygon(cand.point(), region) {
                    hit[cand.idx()] = true;
                }
            }
        }

        hit.iter().enumerate()
            .filter_map(|(i, &inside)| inside.then_some(i))
            .collect()
    }
}
