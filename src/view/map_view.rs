use tracing::{debug, error, info, warn};

use crate::cluster::{group_by_location_with, LocationCluster};
use crate::config::EngineConfig;
use crate::draw::{DrawingSession, GestureOutcome, Phase};
use crate::error::EngineError;
use crate::geom::{point_in_any_region, RecordIndex};
use crate::registry::{centroid_of, RegionRegistry};
use crate::types::{GeoPoint, LocatedRecord, Region};

use super::events::{CreateQuotationRequest, Dispatcher, MapEvent};
use super::filter::AttributeFilter;
use super::snapshot::{MarkerSnapshot, ViewSnapshot};

/// A completed region waiting for the user to accept or decline it.
#[derive(Debug, Clone, Copy)]
struct PendingRegion {
    index: usize,
    centroid: GeoPoint,
    show_all_before: bool,
}

/// The filter engine for one map view.
///
/// Owns the drawing session, the region registry and the record set, and
/// reports every change through its [`Dispatcher`]. Pointer and command
/// methods never fail: invalid input is logged and ignored, so a malformed
/// gesture just does not produce a region.
///
/// Visibility, in order of precedence:
/// 1. dragging with a live candidate: records inside the candidate;
/// 2. completed regions exist: records inside any region;
/// 3. "show all markers" is on: every record;
/// 4. otherwise nothing.
///
/// The attribute filter applies on top of all four.
#[derive(Debug)]
pub struct MapView<R> {
    config: EngineConfig,
    records: Vec<R>,
    index: Option<RecordIndex>,
    filter: AttributeFilter,
    session: DrawingSession,
    registry: RegionRegistry,
    show_all: bool,
    pending: Option<PendingRegion>,
    selected_location: Option<GeoPoint>,
    dispatcher: Dispatcher,
}

impl<R: LocatedRecord> MapView<R> {
    pub fn new(records: Vec<R>, config: EngineConfig, dispatcher: Dispatcher) -> Self {
        let index = config.use_spatial_index.then(|| RecordIndex::new(&records));
        Self {
            show_all: config.show_all_markers,
            config,
            records,
            index,
            filter: AttributeFilter::default(),
            session: DrawingSession::new(),
            registry: RegionRegistry::new(),
            pending: None,
            selected_location: None,
            dispatcher,
        }
    }

    #[inline] pub fn config(&self) -> &EngineConfig { &self.config }

    #[inline] pub fn records(&self) -> &[R] { &self.records }

    #[inline] pub fn filter(&self) -> &AttributeFilter { &self.filter }

    #[inline] pub fn session(&self) -> &DrawingSession { &self.session }

    #[inline] pub fn registry(&self) -> &RegionRegistry { &self.registry }

    #[inline] pub fn show_all_markers(&self) -> bool { self.show_all }

    /// Centroid of the completed region awaiting confirmation, if any.
    #[inline] pub fn pending_confirmation(&self) -> Option<GeoPoint> { self.pending.map(|p| p.centroid) }

    #[inline] pub fn selected_location(&self) -> Option<GeoPoint> { self.selected_location }

    // -----------------------------------------------------------------------
    // Record set
    // -----------------------------------------------------------------------

    /// Replace the record set (e.g. after the CRUD layer reloads).
    pub fn set_records(&mut self, records: Vec<R>) {
        self.index = self.config.use_spatial_index.then(|| RecordIndex::new(&records));
        self.records = records;
        self.publish_visibility();
    }

    pub fn set_filter(&mut self, filter: AttributeFilter) {
        self.filter = filter;
        self.publish_visibility();
    }

    pub fn set_show_all(&mut self, enabled: bool) {
        self.show_all = enabled;
        self.publish_visibility();
    }

    pub fn toggle_show_all(&mut self) {
        self.set_show_all(!self.show_all);
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    pub fn enter_drawing_mode(&mut self) {
        if absorb("enter drawing mode", self.session.enter_drawing_mode()).is_some() {
            self.emit(MapEvent::DrawingModeChanged(true));
            self.emit(MapEvent::PanningChanged(false));
        }
    }

    pub fn cancel_drawing(&mut self) {
        let had_candidate = self.session.candidate().is_some();
        if absorb("cancel drawing", self.session.cancel_drawing()).is_some() {
            if had_candidate {
                self.emit(MapEvent::CandidateChanged(None));
            }
            self.leave_drawing_mode();
        }
    }

    /// The "Draw Polygon" / "Cancel Drawing" button.
    pub fn toggle_drawing_mode(&mut self) {
        if self.session.is_active() {
            self.cancel_drawing();
        } else {
            self.enter_drawing_mode();
        }
    }

    pub fn pointer_down(&mut self, lat: f64, lng: f64) {
        let Some(p) = absorb("pointer down", GeoPoint::new(lat, lng)) else { return };
        absorb("pointer down", self.session.on_pointer_down(p));
    }

    pub fn pointer_move(&mut self, lat: f64, lng: f64) {
        let Some(p) = absorb("pointer move", GeoPoint::new(lat, lng)) else { return };
        let candidate = absorb("pointer move", self.session.on_pointer_move(p)).flatten().cloned();
        if let Some(region) = candidate {
            self.emit(MapEvent::CandidateChanged(Some(region)));
            self.publish_visibility();
        }
    }

    pub fn pointer_up(&mut self) {
        let had_candidate = self.session.candidate().is_some();
        let Some(outcome) = absorb("pointer up", self.session.on_pointer_up()) else { return };

        if had_candidate {
            self.emit(MapEvent::CandidateChanged(None));
        }
        match outcome {
            GestureOutcome::Completed(region) => self.complete_region(region),
            GestureOutcome::Discarded => debug!("gesture produced no region"),
        }
        self.leave_drawing_mode();
    }

    fn complete_region(&mut self, region: Region) {
        let centroid = centroid_of(&region);
        let Some(index) = absorb("complete region", self.registry.add_region(region.clone())) else { return };

        info!(regions = self.registry.len(), %centroid, "region completed");
        self.pending = Some(PendingRegion { index, centroid, show_all_before: self.show_all });
        self.show_all = true;

        self.emit(MapEvent::RegionCompleted(region.clone()));
        self.emit(MapEvent::ConfirmationRequested { region, centroid });
    }

    fn leave_drawing_mode(&mut self) {
        self.emit(MapEvent::DrawingModeChanged(false));
        self.emit(MapEvent::PanningChanged(true));
        self.publish_visibility();
    }

    // -----------------------------------------------------------------------
    // Region confirmation and registry commands
    // -----------------------------------------------------------------------

    /// Accept the completed region: request a quotation at its centroid.
    pub fn confirm_region(&mut self, duplicate_template: Option<String>) {
        let Some(pending) = self.pending.take() else {
            warn!("confirm_region without a pending region");
            return;
        };
        let request = CreateQuotationRequest { location: pending.centroid, duplicate_template };
        info!(query = %request.query_string(), "create quotation requested");
        self.emit(MapEvent::CreateQuotationRequested(request));
    }

    /// Decline the completed region: drop it from the registry again.
    pub fn decline_region(&mut self) {
        let Some(pending) = self.pending.take() else {
            warn!("decline_region without a pending region");
            return;
        };
        if let Some(region) = self.registry.remove(pending.index) {
            self.show_all = pending.show_all_before;
            self.emit(MapEvent::RegionDiscarded(region));
            self.publish_visibility();
        }
    }

    /// Drop every completed region and hide the markers again.
    pub fn clear_all(&mut self) {
        self.registry.clear_all();
        self.pending = None;
        self.show_all = false;
        self.emit(MapEvent::RegionsCleared);
        self.publish_visibility();
    }

    // -----------------------------------------------------------------------
    // Location selection and markers
    // -----------------------------------------------------------------------

    /// A plain map click outside drawing mode picks a location.
    pub fn map_click(&mut self, lat: f64, lng: f64) {
        if self.session.is_active() {
            debug!("map click ignored in drawing mode");
            return;
        }
        let Some(p) = absorb("map click", GeoPoint::new(lat, lng)) else { return };
        self.selected_location = Some(p);
        self.emit(MapEvent::LocationSelected(p));
    }

    pub fn confirm_location(&mut self, duplicate_template: Option<String>) {
        let Some(location) = self.selected_location.take() else {
            warn!("confirm_location without a selected location");
            return;
        };
        let request = CreateQuotationRequest { location, duplicate_template };
        info!(query = %request.query_string(), "create quotation requested");
        self.emit(MapEvent::CreateQuotationRequested(request));
    }

    pub fn cancel_location(&mut self) {
        self.selected_location = None;
    }

    /// A record picked from a marker popup.
    pub fn select_quotation(&mut self, id: &str) {
        if self.records.iter().any(|r| r.id() == id) {
            self.emit(MapEvent::QuotationSelected(id.to_owned()));
        } else {
            warn!(id, "selected quotation is not in the record set");
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Records whose markers are currently shown, in record order.
    pub fn visible(&self) -> Vec<&R> {
        self.visible_indices().into_iter().map(|i| &self.records[i]).collect()
    }

    /// Visible records grouped into markers.
    pub fn clusters(&self) -> Vec<LocationCluster<'_, R>> {
        group_by_location_with(self.visible(), self.config.precision)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            drawing: self.session.is_active(),
            panning_enabled: !self.session.is_active(),
            show_all_markers: self.show_all,
            candidate: self.session.candidate().cloned(),
            regions: self.registry.regions().to_vec(),
            markers: self.clusters().iter().map(MarkerSnapshot::from).collect(),
            pending_confirmation: self.pending_confirmation(),
            selected_location: self.selected_location,
        }
    }

    /// Re-announce the visible set (e.g. once the adapter has mounted).
    pub fn refresh(&mut self) {
        self.publish_visibility();
    }

    fn visible_indices(&self) -> Vec<usize> {
        let candidate = match self.session.phase() {
            Phase::Dragging => self.session.candidate(),
            _ => None,
        };

        let spatial = if let Some(candidate) = candidate {
            self.within(std::slice::from_ref(candidate))
        } else if !self.registry.is_empty() {
            self.within(self.registry.regions())
        } else if self.show_all {
            (0..self.records.len()).collect()
        } else {
            return Vec::new();
        };

        spatial.into_iter()
            .filter(|&i| self.filter.matches(&self.records[i]))
            .collect()
    }

    fn within(&self, regions: &[Region]) -> Vec<usize> {
        match &self.index {
            Some(index) => index.within_any(regions),
            None => self.records.iter().enumerate()
                .filter(|(_, r)| point_in_any_region(r.location(), regions))
                .map(|(i, _)| i)
                .collect(),
        }
    }

    fn publish_visibility(&mut self) {
        let ids: Vec<String> = self.visible().iter().map(|r| r.id().to_owned()).collect();
        debug!(visible = ids.len(), "visibility recomputed");
        self.emit(MapEvent::VisibilitySet(ids));
    }

    fn emit(&mut self, event: MapEvent) {
        self.dispatcher.emit(event);
    }
}

/// Log and drop an engine error so it never reaches the host.
fn absorb<T>(action: &str, result: Result<T, EngineError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err @ EngineError::InvalidStateTransition { .. }) => {
            error!(action, %err, "ignored invalid drawing transition");
            None
        }
        Err(err @ EngineError::DegenerateRegion { .. }) => {
            debug!(action, %err, "discarded degenerate region");
            None
        }
        Err(err) => {
            warn!(action, %err, "ignored event");
            None
        }
    }
}
