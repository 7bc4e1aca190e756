pub mod measurement;
pub mod station;

pub type StationRecord = station::Model;
