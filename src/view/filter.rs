use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::LocatedRecord;

/// Attribute filters applied before any spatial filtering.
///
/// Text fields match exactly; unset (or empty) fields match every record.
/// The date range compares the record's UTC creation day and is inclusive on
/// both ends. Once a bound is set, records without a creation time fail it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeFilter {
    pub status: Option<String>,
    pub template_type: Option<String>,
    pub created_by: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl AttributeFilter {
    /// True if at least one field constrains the record set.
    pub fn is_active(&self) -> bool {
        [&self.status, &self.template_type, &self.created_by]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    pub fn matches<R: LocatedRecord>(&self, record: &R) -> bool {
        field_matches(&self.status, Some(record.status()))
            && field_matches(&self.template_type, record.template_type())
            && field_matches(&self.created_by, record.created_by())
            && self.date_matches(record)
    }

    fn date_matches<R: LocatedRecord>(&self, record: &R) -> bool {
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        let Some(day) = record.created_at().map(|t| t.date_naive()) else { return false };
        self.date_from.is_none_or(|from| day >= from) && self.date_to.is_none_or(|to| day <= to)
    }
}

fn field_matches(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted.as_deref() {
        None | Some("") => true,
        Some(wanted) => actual == Some(wanted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::types::{GeoPoint, QuotationSite};

    fn site(status: &str, template: Option<&str>, user: Option<&str>) -> QuotationSite {
        let mut s = QuotationSite::new("q", status, GeoPoint::new(0.0, 0.0).unwrap());
        s.template_type = template.map(str::to_owned);
        s.created_by = user.map(str::to_owned);
        s
    }

    #[test]
    fn empty_filter_is_inactive_and_matches_all() {
        let filter = AttributeFilter { status: Some(String::new()), ..Default::default() };
        assert!(!filter.is_active());
        assert!(filter.matches(&site("draft", None, None)));
    }

    #[test]
    fn all_fields_must_match() {
        let filter = AttributeFilter {
            status: Some("accepted".into()),
            template_type: Some("transformer".into()),
            ..Default::default()
        };
        assert!(filter.is_active());
        assert!(filter.matches(&site("accepted", Some("transformer"), Some("Sarah"))));
        assert!(!filter.matches(&site("accepted", Some("lighting"), None)));
        assert!(!filter.matches(&site("draft", Some("transformer"), None)));
        assert!(!filter.matches(&site("accepted", None, None)));
    }

    fn created(y: i32, m: u32, d: u32, h: u32) -> QuotationSite {
        let mut s = site("draft", None, None);
        s.created_at = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single();
        s
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn date_from_is_inclusive() {
        let filter = AttributeFilter { date_from: day(2024, 3, 1), ..Default::default() };
        assert!(filter.is_active());
        assert!(filter.matches(&created(2024, 3, 1, 0)));
        assert!(filter.matches(&created(2024, 6, 9, 12)));
        assert!(!filter.matches(&created(2024, 2, 29, 23)));
    }

    #[test]
    fn date_to_is_inclusive() {
        let filter = AttributeFilter { date_to: day(2024, 3, 1), ..Default::default() };
        assert!(filter.is_active());
        assert!(filter.matches(&created(2024, 3, 1, 23)));
        assert!(filter.matches(&created(2023, 12, 31, 8)));
        assert!(!filter.matches(&created(2024, 3, 2, 0)));
    }

    #[test]
    fn date_range_excludes_undated_records() {
        let filter = AttributeFilter { date_from: day(2024, 1, 1), date_to: day(2024, 12, 31), ..Default::default() };
        assert!(filter.matches(&created(2024, 7, 4, 10)));
        assert!(!filter.matches(&site("draft", None, None)));
        assert!(AttributeFilter::default().matches(&site("draft", None, None)));
    }

    #[test]
    fn deserialize_date_range() {
        let filter: AttributeFilter =
            serde_json::from_str(r#"{"dateFrom": "2024-01-01", "dateTo": "2024-03-31"}"#).unwrap();
        assert_eq!(filter.date_from, day(2024, 1, 1));
        assert_eq!(filter.date_to, day(2024, 3, 31));
    }
}
