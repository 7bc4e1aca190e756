use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Windowing parameters for the precipitation and tobs endpoints.
///
/// `reference_date` stands in for "today": it is the last date recorded in the
/// dataset, not wall-clock time, so results do not drift as the calendar moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_reference_date")]
    pub reference_date: NaiveDate,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 23).unwrap_or(NaiveDate::MIN)
}

fn default_window_days() -> u32 {
    365
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            reference_date: default_reference_date(),
            window_days: default_window_days(),
        }
    }
}

impl DatasetConfig {
    /// First date (inclusive) of the trailing window ending at `reference_date`
    pub fn window_start(&self) -> NaiveDate {
        self.reference_date
            .checked_sub_days(Days::new(u64::from(self.window_days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_starts_one_year_back() {
        let config = DatasetConfig::default();
        assert_eq!(
            config.window_start(),
            NaiveDate::from_ymd_opt(2016, 8, 23).unwrap()
        );
    }

    #[test]
    fn test_custom_window() {
        let config = DatasetConfig {
            reference_date: NaiveDate::from_ymd_opt(2017, 8, 23).unwrap(),
            window_days: 3,
        };
        assert_eq!(
            config.window_start(),
            NaiveDate::from_ymd_opt(2017, 8, 20).unwrap()
        );
    }

    #[test]
    fn test_zero_window_is_reference_date() {
        let config = DatasetConfig {
            reference_date: NaiveDate::from_ymd_opt(2017, 8, 23).unwrap(),
            window_days: 0,
        };
        assert_eq!(config.window_start(), config.reference_date);
    }

    #[test]
    fn test_window_saturates_at_min_date() {
        let config = DatasetConfig {
            reference_date: NaiveDate::MIN,
            window_days: 10,
        };
        assert_eq!(config.window_start(), NaiveDate::MIN);
    }
}
