//! Chart data: turn a year subset and a selected channel into the four
//! series the dashboard draws.

use chrono::{NaiveDate, TimeDelta};

use crate::data::filter::Subset;
use crate::data::model::Channel;
use crate::stats::{self, BoxSummary, HistogramBin, Summary};

/// Channel on the y axis of the scatter plot.
pub const SCATTER_Y: Channel = Channel::T;

/// Everything needed to draw the four charts for one (channel, year) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub channel: Channel,
    pub year: i32,
    /// Number of rows in the subset, missing readings included.
    pub rows: usize,
    /// `(day, value)`; day is [`date_to_x`] of the record date.
    pub time_series: Vec<[f64; 2]>,
    pub histogram: Vec<HistogramBin>,
    pub box_summary: Option<BoxSummary>,
    /// `(channel value, T)` from rows where both are present.
    pub scatter: Vec<[f64; 2]>,
    pub summary: Summary,
}

impl ChartData {
    pub fn build(subset: &Subset<'_>, channel: Channel, year: i32) -> Self {
        let time_series: Vec<[f64; 2]> = subset
            .iter()
            .filter_map(|r| Some([date_to_x(r.date), r.value(channel)?]))
            .collect();

        let values = subset.values(channel);
        let histogram = stats::histogram(&values, stats::auto_bin_count(values.len()));
        let box_summary = BoxSummary::from_values(&values);
        let summary = Summary::from_values(&values);

        let scatter = subset
            .pairs(channel, SCATTER_Y)
            .into_iter()
            .map(|(x, y)| [x, y])
            .collect();

        log::debug!(
            "chart data for {channel} in {year}: {} rows, {} readings",
            subset.len(),
            values.len()
        );

        ChartData {
            channel,
            year,
            rows: subset.len(),
            time_series,
            histogram,
            box_summary,
            scatter,
            summary,
        }
    }

    /// True when the selected channel has no reading in this year.
    pub fn is_empty(&self) -> bool {
        self.summary.count == 0
    }

    pub fn time_series_title(&self) -> String {
        format!("Time series for {} in {}", self.channel, self.year)
    }

    pub fn histogram_title(&self) -> String {
        format!("Histogram of {} in {}", self.channel, self.year)
    }

    pub fn box_plot_title(&self) -> String {
        format!("Box plot of {} in {}", self.channel, self.year)
    }

    pub fn scatter_title(&self) -> String {
        format!("{} vs {SCATTER_Y} in {}", self.channel, self.year)
    }
}

/// Plot x coordinate of a date: days since 1970-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

/// Inverse of [`date_to_x`] for axis labels; `None` off the calendar.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::default().checked_add_signed(TimeDelta::try_days(x.round() as i64)?)
}
