use ahash::AHashMap;
use serde::Serialize;

use crate::cluster::LocationCluster;
use crate::types::{GeoPoint, LocatedRecord, Region};

/// One marker as the adapter should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSnapshot {
    /// Cluster key, stable across snapshots while the location is shown.
    pub key: String,
    pub location: GeoPoint,
    pub count: usize,
    pub primary_status: String,
    pub member_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    pub label: String,
}

impl<R: LocatedRecord> From<&LocationCluster<'_, R>> for MarkerSnapshot {
    fn from(cluster: &LocationCluster<'_, R>) -> Self {
        Self {
            key: cluster.key().to_string(),
            location: cluster.location(),
            count: cluster.count(),
            primary_status: cluster.primary_status().to_owned(),
            member_ids: cluster.member_ids().map(str::to_owned).collect(),
            site_name: cluster.site_name().map(str::to_owned),
            label: cluster.label(),
        }
    }
}

/// Immutable picture of the view state, for render reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub drawing: bool,
    pub panning_enabled: bool,
    pub show_all_markers: bool,
    pub candidate: Option<Region>,
    pub regions: Vec<Region>,
    pub markers: Vec<MarkerSnapshot>,
    /// Centroid of a completed region awaiting accept/decline.
    pub pending_confirmation: Option<GeoPoint>,
    /// Location picked by a plain map click awaiting confirmation.
    pub selected_location: Option<GeoPoint>,
}

/// Marker changes needed to move the live map from one snapshot to the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerDiff {
    pub added: Vec<MarkerSnapshot>,
    /// Keys of markers to take off the map.
    pub removed: Vec<String>,
    /// Markers whose key persists but whose contents changed.
    pub updated: Vec<MarkerSnapshot>,
}

impl MarkerDiff {
    /// Diff two marker lists by key; output follows `next` order (removals
    /// follow `prev` order).
    pub fn between(prev: &[MarkerSnapshot], next: &[MarkerSnapshot]) -> Self {
        let before: AHashMap<&str, &MarkerSnapshot> = prev.iter().map(|m| (m.key.as_str(), m)).collect();
        let after: AHashMap<&str, &MarkerSnapshot> = next.iter().map(|m| (m.key.as_str(), m)).collect();

        let mut diff = Self::default();
        for marker in next {
            match before.get(marker.key.as_str()) {
                None => diff.added.push(marker.clone()),
                Some(&old) if old != marker => diff.updated.push(marker.clone()),
                Some(_) => {}
            }
        }
        diff.removed = prev.iter()
            .filter(|m| !after.contains_key(m.key.as_str()))
            .map(|m| m.key.clone())
            .collect();
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}
