mod point;
mod record;
mod region;

pub use point::GeoPoint;
pub use record::{LocatedRecord, QuotationSite};
pub use region::Region;
