use serde::{Deserialize, Serialize};

use crate::types::LocatedRecord;

use super::filter::AttributeFilter;
use super::map_view::MapView;

/// One recorded user interaction, replayable against a [`MapView`].
///
/// Serialized as `{"op": "down", "lat": 51.5, "lng": -0.13}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Enter,
    Cancel,
    Toggle,
    Down { lat: f64, lng: f64 },
    Move { lat: f64, lng: f64 },
    Up,
    Confirm {
        #[serde(default)]
        duplicate_template: Option<String>,
    },
    Decline,
    Clear,
    Click { lat: f64, lng: f64 },
    ConfirmLocation {
        #[serde(default)]
        duplicate_template: Option<String>,
    },
    CancelLocation,
    ShowAll { enabled: bool },
    Filter { filter: AttributeFilter },
    Select { id: String },
}

impl ScriptStep {
    pub fn apply<R: LocatedRecord>(self, view: &mut MapView<R>) {
        match self {
            ScriptStep::Enter => view.enter_drawing_mode(),
            ScriptStep::Cancel => view.cancel_drawing(),
            ScriptStep::Toggle => view.toggle_drawing_mode(),
            ScriptStep::Down { lat, lng } => view.pointer_down(lat, lng),
            ScriptStep::Move { lat, lng } => view.pointer_move(lat, lng),
            ScriptStep::Up => view.pointer_up(),
            ScriptStep::Confirm { duplicate_template } => view.confirm_region(duplicate_template),
            ScriptStep::Decline => view.decline_region(),
            ScriptStep::Clear => view.clear_all(),
            ScriptStep::Click { lat, lng } => view.map_click(lat, lng),
            ScriptStep::ConfirmLocation { duplicate_template } => view.confirm_location(duplicate_template),
            ScriptStep::CancelLocation => view.cancel_location(),
            ScriptStep::ShowAll { enabled } => view.set_show_all(enabled),
            ScriptStep::Filter { filter } => view.set_filter(filter),
            ScriptStep::Select { id } => view.select_quotation(&id),
        }
    }
}
