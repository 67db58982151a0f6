//! Value objects for the inkboard domain

mod geo_location;
mod target_date;
mod timezone;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use target_date::TargetDate;
pub use timezone::Timezone;
