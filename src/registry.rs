use tracing::debug;

use crate::error::EngineError;
use crate::geom::{point_in_any_region, point_in_polygon};
use crate::types::{GeoPoint, LocatedRecord, Region};

/// Accumulates completed regions; visibility is the union of all of them.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>, // creation order
}

impl RegionRegistry {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn regions(&self) -> &[Region] { &self.regions }

    #[inline] pub fn len(&self) -> usize { self.regions.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.regions.is_empty() }

    /// Append a region and return its position. Degenerate regions are refused.
    pub fn add_region(&mut self, region: Region) -> Result<usize, EngineError> {
        region.ensure_non_degenerate()?;
        self.regions.push(region);
        debug!(count = self.regions.len(), "region added");
        Ok(self.regions.len() - 1)
    }

    /// Remove the region at `index` (a declined confirmation).
    pub fn remove(&mut self, index: usize) -> Option<Region> {
        (index < self.regions.len()).then(|| self.regions.remove(index))
    }

    pub fn clear_all(&mut self) {
        debug!(count = self.regions.len(), "regions cleared");
        self.regions.clear();
    }

    /// True if `point` is inside any registered region.
    pub fn contains(&self, point: GeoPoint) -> bool {
        point_in_any_region(point, &self.regions)
    }

    /// Records whose location lies inside any registered region, in input order.
    ///
    /// With no regions this returns nothing; whether an empty registry means
    /// "show everything" is the caller's call.
    pub fn visible_records<'a, R: LocatedRecord>(&self, all: &'a [R]) -> Vec<&'a R> {
        all.iter().filter(|r| self.contains(r.location())).collect()
    }
}

/// Records inside a single region (live preview against the candidate).
pub fn records_in_region<'a, R: LocatedRecord>(region: &Region, all: &'a [R]) -> Vec<&'a R> {
    all.iter().filter(|r| point_in_polygon(r.location(), region)).collect()
}

/// Bounding-box center of `region`, used to seed a new quotation.
pub fn centroid_of(region: &Region) -> GeoPoint {
    region.centroid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuotationSite;

    fn pt(lat: f64, lng: f64) -> GeoPoint { GeoPoint::new(lat, lng).unwrap() }

    fn site(id: &str, lat: f64, lng: f64) -> QuotationSite {
        QuotationSite::new(id, "draft", pt(lat, lng))
    }

    #[test]
    fn add_rejects_degenerate() {
        let mut registry = RegionRegistry::new();
        let flat = Region::rectangle(pt(1.0, 1.0), pt(1.0, 5.0));
        assert_eq!(registry.add_region(flat), Err(EngineError::DegenerateRegion { distinct: 2 }));
        assert!(registry.is_empty());
    }

    #[test]
    fn union_visibility_keeps_input_order() {
        let mut registry = RegionRegistry::new();
        registry.add_region(Region::rectangle(pt(20.0, 20.0), pt(30.0, 30.0))).unwrap();
        registry.add_region(Region::rectangle(pt(0.0, 0.0), pt(10.0, 10.0))).unwrap();

        let records = vec![site("a", 5.0, 5.0), site("b", 15.0, 15.0), site("c", 25.0, 25.0)];
        let ids: Vec<&str> = registry.visible_records(&records).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn empty_registry_shows_nothing() {
        let registry = RegionRegistry::new();
        assert!(registry.visible_records(&[site("a", 5.0, 5.0)]).is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut registry = RegionRegistry::new();
        let first = Region::rectangle(pt(0.0, 0.0), pt(1.0, 1.0));
        let second = Region::rectangle(pt(2.0, 2.0), pt(3.0, 3.0));
        registry.add_region(first.clone()).unwrap();
        assert_eq!(registry.add_region(second.clone()).unwrap(), 1);

        assert_eq!(registry.remove(0), Some(first));
        assert_eq!(registry.regions(), &[second]);
        assert_eq!(registry.remove(5), None);

        registry.clear_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn centroid_of_rectangle() {
        let r = Region::new(vec![pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 0.0)]).unwrap();
        assert_eq!(centroid_of(&r), pt(1.0, 1.0));
    }

    #[test]
    fn centroid_of_triangle_is_bbox_center() {
        let r = Region::new(vec![pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 2.0)]).unwrap();
        assert_eq!(centroid_of(&r), pt(2.0, 1.0));
    }
}
