use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Any external entity placed on the map.
///
/// The engine only reads from records: `location` drives containment and
/// grouping, `status` is carried through for marker presentation, and the
/// optional attributes feed [`AttributeFilter`](crate::AttributeFilter).
pub trait LocatedRecord {
    /// Opaque identifier, reported back in visibility and selection events.
    fn id(&self) -> &str;

    fn location(&self) -> GeoPoint;

    /// Presentation tag; opaque to the engine.
    fn status(&self) -> &str;

    /// Human-readable site name shown in the cluster popup.
    fn site_name(&self) -> Option<&str> { None }

    fn template_type(&self) -> Option<&str> { None }

    fn created_by(&self) -> Option<&str> { None }

    /// Creation timestamp, for the date-range filter.
    fn created_at(&self) -> Option<DateTime<Utc>> { None }
}

/// A quotation anchored at an installation site, as supplied by the CRUD layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSite {
    pub id: String,
    pub status: String,
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// RFC 3339 timestamp, e.g. `"2024-03-01T09:30:00Z"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuotationSite {
    /// A bare record with only the fields the engine needs.
    pub fn new(id: impl Into<String>, status: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            location,
            site_name: None,
            customer_name: None,
            template_type: None,
            created_by: None,
            created_at: None,
        }
    }
}

impl LocatedRecord for QuotationSite {
    fn id(&self) -> &str { &self.id }

    fn location(&self) -> GeoPoint { self.location }

    fn status(&self) -> &str { &self.status }

    fn site_name(&self) -> Option<&str> { self.site_name.as_deref() }

    fn template_type(&self) -> Option<&str> { self.template_type.as_deref() }

    fn created_by(&self) -> Option<&str> { self.created_by.as_deref() }

    fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
}
