pub mod blob;
pub mod coerce;
pub mod general;
pub mod named;
pub mod player;
pub mod tracker;

pub use coerce::coerce_int;
pub use general::{GeneralInfo, GENERAL_INFO_KEY};
pub use named::{Named, NamedInfo};
pub use player::PlayerInfo;
pub use tracker::TrackerInfo;
