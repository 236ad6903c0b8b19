mod events;
mod filter;
mod map_view;
mod script;
mod snapshot;

pub use events::{ActionKind, CreateQuotationRequest, Dispatcher, Handler, MapEvent};
pub use filter::AttributeFilter;
pub use map_view::MapView;
pub use script::ScriptStep;
pub use snapshot::{MarkerDiff, MarkerSnapshot, ViewSnapshot};
