#![doc = "Drag-to-draw geospatial filter for the quotation map view"]
mod cluster;
mod config;
mod draw;
mod error;
mod geom;
mod registry;
mod types;
mod view;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "cli")]
pub mod logging;

#[doc(inline)]
pub use cluster::{group_by_location, group_by_location_with, ClusterKey, LocationCluster, DEFAULT_PRECISION, MAX_PRECISION};

#[doc(inline)]
pub use config::EngineConfig;

#[doc(inline)]
pub use draw::{DrawingSession, GestureOutcome, Phase};

#[doc(inline)]
pub use error::EngineError;

#[doc(inline)]
pub use geom::{point_in_any_region, point_in_polygon, point_in_ring, RecordIndex};

#[doc(inline)]
pub use registry::{centroid_of, records_in_region, RegionRegistry};

#[doc(inline)]
pub use types::{GeoPoint, LocatedRecord, QuotationSite, Region};

#[doc(inline)]
pub use view::{
    ActionKind, AttributeFilter, CreateQuotationRequest, Dispatcher, Handler, MapEvent, MapView,
    MarkerDiff, MarkerSnapshot, ScriptStep, ViewSnapshot,
};
