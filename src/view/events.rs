use std::fmt;

use ahash::AHashMap;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::types::{GeoPoint, Region};

/// Request to open the quotation wizard pre-filled at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    pub location: GeoPoint,
    /// Template being duplicated into the new quotation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_template: Option<String>,
}

impl CreateQuotationRequest {
    pub fn at(location: GeoPoint) -> Self {
        Self { location, duplicate_template: None }
    }

    /// Navigation query string: `lat=..&lng=..[&duplicate_template=..]`.
    pub fn query_string(&self) -> String {
        let mut query = format!("lat={}&lng={}", self.location.lat(), self.location.lng());
        if let Some(template) = &self.duplicate_template {
            query.push_str("&duplicate_template=");
            query.extend(utf8_percent_encode(template, NON_ALPHANUMERIC));
        }
        query
    }
}

/// Everything the engine tells the map adapter or the navigation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum MapEvent {
    /// Live rectangle changed; `None` once the gesture ends or is cancelled.
    CandidateChanged(Option<Region>),
    RegionCompleted(Region),
    /// Ids of the records whose markers should be shown.
    VisibilitySet(Vec<String>),
    CreateQuotationRequested(CreateQuotationRequest),
    /// Map drag-to-pan must be enabled (`true`) or disabled (`false`).
    PanningChanged(bool),
    DrawingModeChanged(bool),
    /// Ask the user whether to create a quotation for the completed region.
    ConfirmationRequested { region: Region, centroid: GeoPoint },
    RegionDiscarded(Region),
    RegionsCleared,
    /// A plain map click picked a location awaiting confirmation.
    LocationSelected(GeoPoint),
    QuotationSelected(String),
}

/// Callback-table key for each [`MapEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    CandidateChanged,
    RegionCompleted,
    VisibilitySet,
    CreateQuotationRequested,
    PanningChanged,
    DrawingModeChanged,
    ConfirmationRequested,
    RegionDiscarded,
    RegionsCleared,
    LocationSelected,
    QuotationSelected,
}

impl ActionKind {
    pub const ALL: [ActionKind; 11] = [
        ActionKind::CandidateChanged,
        ActionKind::RegionCompleted,
        ActionKind::VisibilitySet,
        ActionKind::CreateQuotationRequested,
        ActionKind::PanningChanged,
        ActionKind::DrawingModeChanged,
        ActionKind::ConfirmationRequested,
        ActionKind::RegionDiscarded,
        ActionKind::RegionsCleared,
        ActionKind::LocationSelected,
        ActionKind::QuotationSelected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CandidateChanged => "candidate_changed",
            ActionKind::RegionCompleted => "region_completed",
            ActionKind::VisibilitySet => "visibility_set",
            ActionKind::CreateQuotationRequested => "create_quotation_requested",
            ActionKind::PanningChanged => "panning_changed",
            ActionKind::DrawingModeChanged => "drawing_mode_changed",
            ActionKind::ConfirmationRequested => "confirmation_requested",
            ActionKind::RegionDiscarded => "region_discarded",
            ActionKind::RegionsCleared => "regions_cleared",
            ActionKind::LocationSelected => "location_selected",
            ActionKind::QuotationSelected => "quotation_selected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MapEvent {
    pub fn kind(&self) -> ActionKind {
        match self {
            MapEvent::CandidateChanged(_) => ActionKind::CandidateChanged,
            MapEvent::RegionCompleted(_) => ActionKind::RegionCompleted,
            MapEvent::VisibilitySet(_) => ActionKind::VisibilitySet,
            MapEvent::CreateQuotationRequested(_) => ActionKind::CreateQuotationRequested,
            MapEvent::PanningChanged(_) => ActionKind::PanningChanged,
            MapEvent::DrawingModeChanged(_) => ActionKind::DrawingModeChanged,
            MapEvent::ConfirmationRequested { .. } => ActionKind::ConfirmationRequested,
            MapEvent::RegionDiscarded(_) => ActionKind::RegionDiscarded,
            MapEvent::RegionsCleared => ActionKind::RegionsCleared,
            MapEvent::LocationSelected(_) => ActionKind::LocationSelected,
            MapEvent::QuotationSelected(_) => ActionKind::QuotationSelected,
        }
    }
}

pub type Handler = Box<dyn FnMut(&MapEvent)>;

/// Callback table keyed by action, handed to the view at construction.
///
/// Handlers run synchronously, in registration order: keyed handlers first,
/// then catch-all handlers.
#[derive(Default)]
pub struct Dispatcher {
    handlers: AHashMap<ActionKind, Vec<Handler>>,
    catch_all: Vec<Handler>,
}

impl Dispatcher {
    pub fn new() -> Self { Self::default() }

    /// Register a handler for one action.
    pub fn on(&mut self, kind: ActionKind, handler: impl FnMut(&MapEvent) + 'static) -> &mut Self {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
        self
    }

    /// Register a handler for every action.
    pub fn on_any(&mut self, handler: impl FnMut(&MapEvent) + 'static) -> &mut Self {
        self.catch_all.push(Box::new(handler));
        self
    }

    pub fn emit(&mut self, event: MapEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(&event);
            }
        }
        for handler in self.catch_all.iter_mut() {
            handler(&event);
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("keyed", &self.handlers.values().map(Vec::len).sum::<usize>())
            .field("catch_all", &self.catch_all.len())
            .finish()
    }
}
