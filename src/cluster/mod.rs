//! Location grouping: buckets records that share a rounded coordinate.

use std::fmt;

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::types::{GeoPoint, LocatedRecord};

/// Decimal places used for cluster keys (~0.11 m at the equator).
pub const DEFAULT_PRECISION: u32 = 6;

/// Upper bound on the rounding precision; keeps the scaled coordinates well
/// inside `i64` and within `f64`'s exact integer range.
pub const MAX_PRECISION: u32 = 12;

/// Rounded coordinate pair identifying a cluster.
///
/// Stored as integers scaled by `10^precision`, so two records share a key
/// exactly when both rounded coordinates match. Rounding follows the decimal
/// formatter (`{:.p$}`) on the stored `f64`, so keys agree with marker labels
/// even at half-way values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterKey {
    lat: i64,
    lng: i64,
    precision: u32,
}

impl ClusterKey {
    pub fn new(point: GeoPoint, precision: u32) -> Self {
        let precision = precision.min(MAX_PRECISION);
        Self {
            lat: scaled(point.lat(), precision),
            lng: scaled(point.lng(), precision),
            precision,
        }
    }

    /// Rounded latitude.
    pub fn lat(&self) -> f64 { self.lat as f64 / 10f64.powi(self.precision as i32) }

    /// Rounded longitude.
    pub fn lng(&self) -> f64 { self.lng as f64 / 10f64.powi(self.precision as i32) }
}

/// `value` rounded to `precision` decimals, as an integer count of `10^-precision`.
fn scaled(value: f64, precision: u32) -> i64 {
    let p = precision as usize;
    let digits = format!("{value:.p$}").replace('.', "");
    digits.parse().unwrap_or_else(|_| (value * 10f64.powi(precision as i32)).round() as i64)
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision as usize;
        write!(f, "{:.p$},{:.p$}", self.lat(), self.lng())
    }
}

/// Records sharing one rounded location, in input order.
#[derive(Debug, Clone)]
pub struct LocationCluster<'a, R> {
    key: ClusterKey,
    members: SmallVec<[&'a R; 2]>,
}

impl<'a, R: LocatedRecord> LocationCluster<'a, R> {
    #[inline] pub fn key(&self) -> ClusterKey { self.key }

    #[inline] pub fn members(&self) -> &[&'a R] { &self.members }

    #[inline] pub fn count(&self) -> usize { self.members.len() }

    /// Location of the first member; where the marker is drawn.
    pub fn location(&self) -> GeoPoint { self.first().location() }

    /// Status of the first member; drives the marker colour.
    pub fn primary_status(&self) -> &'a str { self.first().status() }

    pub fn member_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().map(|&r| r.id())
    }

    /// Site name of the first member that has one.
    pub fn site_name(&self) -> Option<&'a str> {
        self.members.iter().find_map(|&r| r.site_name())
    }

    // Clusters are only built with at least one member.
    fn first(&self) -> &'a R { self.members[0] }

    /// Popup heading: the location as `"lat, lng"` with six decimals.
    pub fn label(&self) -> String { self.location().to_string() }
}

/// Group records by location rounded to [`DEFAULT_PRECISION`] decimals.
pub fn group_by_location<'a, R, I>(records: I) -> Vec<LocationCluster<'a, R>>
where
    R: LocatedRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    group_by_location_with(records, DEFAULT_PRECISION)
}

/// Group records by location rounded to `precision` decimals.
///
/// Clusters appear in first-seen order; members keep input order. Exact key
/// matching only, no distance threshold.
pub fn group_by_location_with<'a, R, I>(records: I, precision: u32) -> Vec<LocationCluster<'a, R>>
where
    R: LocatedRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut slots: AHashMap<ClusterKey, usize> = AHashMap::new();
    let mut clusters: Vec<LocationCluster<'a, R>> = Vec::new();

    for record in records {
        let key = ClusterKey::new(record.location(), precision);
        let slot = *slots.entry(key).or_insert_with(|| {
            clusters.push(LocationCluster { key, members: SmallVec::new() });
            clusters.len() - 1
        });
        clusters[slot].members.push(record);
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuotationSite;

    fn site(id: &str, status: &str, lat: f64, lng: f64) -> QuotationSite {
        QuotationSite::new(id, status, GeoPoint::new(lat, lng).unwrap())
    }

    #[test]
    fn shared_location_forms_one_cluster() {
        let records = vec![
            site("q1", "submitted", 53.48, -2.24),
            site("q2", "draft", 53.48, -2.24),
        ];
        let clusters = group_by_location(&records);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count(), 2);
        assert_eq!(clusters[0].primary_status(), "submitted");
        assert_eq!(clusters[0].member_ids().collect::<Vec<_>>(), vec!["q1", "q2"]);
    }

    #[test]
    fn first_seen_order() {
        let records = vec![
            site("a", "draft", 1.0, 1.0),
            site("b", "draft", 2.0, 2.0),
            site("c", "draft", 1.0, 1.0),
        ];
        let clusters = group_by_location(&records);
        let keys: Vec<String> = clusters.iter().map(|c| c.key().to_string()).collect();
        assert_eq!(keys, vec!["1.000000,1.000000", "2.000000,2.000000"]);
        assert_eq!(clusters[0].member_ids().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn rounding_merges_sub_precision_offsets() {
        let records = vec![
            site("a", "draft", 53.4808001, -2.2426001),
            site("b", "draft", 53.4807999, -2.2425999),
            site("c", "draft", 53.4808100, -2.2426000),
        ];
        let clusters = group_by_location(&records);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count(), 2);
        assert_eq!(clusters[0].location(), records[0].location);
    }

    #[test]
    fn coarser_precision_merges_more() {
        let records = vec![site("a", "draft", 10.01, 10.01), site("b", "draft", 10.04, 10.02)];
        assert_eq!(group_by_location_with(&records, 6).len(), 2);
        assert_eq!(group_by_location_with(&records, 1).len(), 1);
    }

    #[test]
    fn empty_input() {
        let clusters = group_by_location::<QuotationSite, _>(&[]);
        assert!(clusters.is_empty());
    }

    #[test]
    fn label_and_site_name() {
        let mut named = site("b", "draft", 53.4808, -2.2426);
        named.site_name = Some("Manchester City Centre".into());
        let records = vec![site("a", "draft", 53.4808, -2.2426), named];
        let clusters = group_by_location(&records);
        assert_eq!(clusters[0].label(), "53.480800, -2.242600");
        assert_eq!(clusters[0].site_name(), Some("Manchester City Centre"));
    }

    #[test]
    fn key_rounds_like_the_label() {
        // Decimal ties; the stored f64 sits on one side of each.
        for (lat, lng) in [(-31.5315335, 115.8571125), (51.5000005, -0.1249995), (0.0000005, -0.0000005)] {
            let p = GeoPoint::new(lat, lng).unwrap();
            let key = ClusterKey::new(p, DEFAULT_PRECISION);
            assert_eq!(key.to_string().replace(',', ", "), format!("{:.6}, {:.6}", p.lat(), p.lng()).replace("-0.000000", "0.000000"));
        }
    }

    #[test]
    fn cluster_key_matches_cluster_label() {
        let records = vec![site("a", "draft", -31.5315335, 115.8571125)];
        let clusters = group_by_location(&records);
        assert_eq!(clusters[0].key().to_string().replace(',', ", "), clusters[0].label());
    }
}
