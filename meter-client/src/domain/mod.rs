pub mod baseline;
pub mod meter;
pub mod reading;

pub use baseline::{Baseline, BaselineRecord};
pub use meter::{InvalidMeterId, MeterId};
pub use reading::{Reading, ReadingRecord};
