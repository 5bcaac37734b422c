use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Channel – one measured quantity (a numeric column of the source file)
// ---------------------------------------------------------------------------

/// The fixed set of sensor channels in the UCI air-quality export.
///
/// The list does not depend on the loaded file: a channel whose column is
/// absent simply has no readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    CoGt,
    Pt08S1Co,
    NmhcGt,
    C6h6Gt,
    Pt08S2Nmhc,
    NoxGt,
    Pt08S3Nox,
    No2Gt,
    Pt08S4No2,
    Pt08S5O3,
    T,
    Rh,
    Ah,
}

impl Channel {
    /// Number of channels, i.e. the width of [`Record::values`].
    pub const COUNT: usize = 13;

    /// All channels in source-file column order.
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::CoGt,
        Channel::Pt08S1Co,
        Channel::NmhcGt,
        Channel::C6h6Gt,
        Channel::Pt08S2Nmhc,
        Channel::NoxGt,
        Channel::Pt08S3Nox,
        Channel::No2Gt,
        Channel::Pt08S4No2,
        Channel::Pt08S5O3,
        Channel::T,
        Channel::Rh,
        Channel::Ah,
    ];

    /// Order in which the sensor selector lists the channels.
    pub const SELECTOR_ORDER: [Channel; Channel::COUNT] = [
        Channel::CoGt,
        Channel::NmhcGt,
        Channel::C6h6Gt,
        Channel::NoxGt,
        Channel::No2Gt,
        Channel::Pt08S1Co,
        Channel::Pt08S2Nmhc,
        Channel::Pt08S3Nox,
        Channel::Pt08S4No2,
        Channel::Pt08S5O3,
        Channel::T,
        Channel::Rh,
        Channel::Ah,
    ];

    /// Column name as it appears in the file header.
    pub fn column_name(self) -> &'static str {
        match self {
            Channel::CoGt => "CO(GT)",
            Channel::Pt08S1Co => "PT08.S1(CO)",
            Channel::NmhcGt => "NMHC(GT)",
            Channel::C6h6Gt => "C6H6(GT)",
            Channel::Pt08S2Nmhc => "PT08.S2(NMHC)",
            Channel::NoxGt => "NOx(GT)",
            Channel::Pt08S3Nox => "PT08.S3(NOx)",
            Channel::No2Gt => "NO2(GT)",
            Channel::Pt08S4No2 => "PT08.S4(NO2)",
            Channel::Pt08S5O3 => "PT08.S5(O3)",
            Channel::T => "T",
            Channel::Rh => "RH",
            Channel::Ah => "AH",
        }
    }

    /// Position of this channel in [`Channel::ALL`] and [`Record::values`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sensor channel '{0}'")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Channel::ALL
            .into_iter()
            .find(|ch| ch.column_name() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source file
// ---------------------------------------------------------------------------

/// One cleaned measurement row. `None` marks a missing reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub values: [Option<f64>; Channel::COUNT],
}

impl Record {
    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.values[channel.index()]
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full cleaned dataset. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    years: BTreeSet<i32>,
}

impl Dataset {
    /// Build the year index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let years = records.iter().map(Record::year).collect();
        Dataset { records, years }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Years present in the data, ascending.
    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    /// First and last year present, or `None` for an empty dataset.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = *self.years.first()?;
        let last = *self.years.last()?;
        Some((first, last))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            values: [None; Channel::COUNT],
        }
    }

    #[test]
    fn test_channel_names_round_trip() {
        for ch in Channel::ALL {
            assert_eq!(ch.column_name().parse::<Channel>(), Ok(ch));
        }
        assert_eq!(" NOx(GT) ".parse::<Channel>(), Ok(Channel::NoxGt));
        assert!("CO".parse::<Channel>().is_err());
    }

    #[test]
    fn test_channel_index_matches_all() {
        for (i, ch) in Channel::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
        }
    }

    #[test]
    fn test_selector_order_is_a_permutation() {
        let mut sorted = Channel::SELECTOR_ORDER;
        sorted.sort();
        assert_eq!(sorted, Channel::ALL);
        assert_eq!(Channel::SELECTOR_ORDER[0], Channel::CoGt);
    }

    #[test]
    fn test_dataset_years() {
        let ds = Dataset::from_records(vec![
            record(2005, 1, 1),
            record(2004, 3, 10),
            record(2004, 3, 11),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.years().iter().copied().collect::<Vec<_>>(), vec![2004, 2005]);
        assert_eq!(ds.year_range(), Some((2004, 2005)));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.year_range(), None);
    }
}
