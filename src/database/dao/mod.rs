pub mod measurements;
pub mod stations;

pub use measurements::{DateRange, MeasurementsDao, StationActivity, TemperatureStats};
pub use stations::StationsDao;
