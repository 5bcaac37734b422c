use std::path::PathBuf;

use crate::charts::ChartData;
use crate::color::ChannelColors;
use crate::config::Config;
use crate::data::filter::filter_by_year;
use crate::data::model::{Channel, Dataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, read-only afterwards.
    dataset: Dataset,

    /// File the dataset came from (shown in the top bar).
    pub source: PathBuf,

    /// Channel chosen in the sensor selector.
    channel: Channel,

    /// Year chosen on the slider. `None` only for an empty dataset.
    year: Option<i32>,

    /// Chart series for the current (channel, year), rebuilt on change.
    charts: Option<ChartData>,

    /// Stable colour per channel.
    pub colors: ChannelColors,
}

impl AppState {
    /// Take ownership of the loaded dataset and select the configured
    /// channel and year.
    pub fn new(dataset: Dataset, config: &Config) -> Self {
        let year = config.initial_year(&dataset);
        let mut state = Self {
            dataset,
            source: config.data_path.clone(),
            channel: config.channel,
            year,
            charts: None,
            colors: ChannelColors::default(),
        };
        state.rebuild_charts();
        state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn charts(&self) -> Option<&ChartData> {
        self.charts.as_ref()
    }

    /// Change the selected channel; no-op if unchanged.
    pub fn set_channel(&mut self, channel: Channel) {
        if self.channel != channel {
            self.channel = channel;
            self.rebuild_charts();
        }
    }

    /// Change the selected year; no-op if unchanged.
    pub fn set_year(&mut self, year: i32) {
        if self.year != Some(year) {
            self.year = Some(year);
            self.rebuild_charts();
        }
    }

    /// Recompute the cached chart data after a selection change.
    fn rebuild_charts(&mut self) {
        self.charts = self.year.map(|year| {
            let subset = filter_by_year(&self.dataset, year);
            ChartData::build(&subset, self.channel, year)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    fn state() -> AppState {
        let ds = load_reader(
            "Date;CO(GT);T\n10/03/2004;-200;12\n11/03/2004;2.5;13\n01/01/2005;1.0;4\n".as_bytes(),
        )
        .unwrap();
        AppState::new(ds, &Config::default())
    }

    #[test]
    fn test_initial_selection() {
        let state = state();
        assert_eq!(state.channel(), Channel::CoGt);
        assert_eq!(state.year(), Some(2004));
        let charts = state.charts().unwrap();
        assert_eq!(charts.rows, 2);
        assert_eq!(charts.summary.count, 1);
    }

    #[test]
    fn test_selection_changes_rebuild_charts() {
        let mut state = state();
        state.set_year(2005);
        let charts = state.charts().unwrap();
        assert_eq!((charts.channel, charts.year, charts.rows), (Channel::CoGt, 2005, 1));

        state.set_channel(Channel::T);
        let charts = state.charts().unwrap();
        assert_eq!(charts.channel, Channel::T);
        assert_eq!(charts.time_series, vec![[charts.time_series[0][0], 4.0]]);

        state.set_year(2010);
        assert!(state.charts().unwrap().is_empty());
    }

    #[test]
    fn test_empty_dataset_has_no_charts() {
        let state = AppState::new(Dataset::from_records(Vec::new()), &Config::default());
        assert_eq!(state.year(), None);
        assert!(state.charts().is_none());
        assert!(state.dataset().is_empty());
    }
}
