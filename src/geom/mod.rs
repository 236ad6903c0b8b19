mod bbox;
mod containment;
mod index;

pub use containment::{point_in_any_region, point_in_polygon, point_in_ring};
pub use index::RecordIndex;
