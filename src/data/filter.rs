use super::model::{Channel, Dataset, Record};

// ---------------------------------------------------------------------------
// Subset: the rows of one year, in dataset order
// ---------------------------------------------------------------------------

/// Records selected by a query, borrowed from the [`Dataset`] in their
/// original relative order. Compares by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset<'a> {
    records: Vec<&'a Record>,
}

impl<'a> Subset<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    /// Present readings of `channel`, in row order.
    pub fn values(&self, channel: Channel) -> Vec<f64> {
        self.iter().filter_map(|r| r.value(channel)).collect()
    }

    /// `(x, y)` readings from rows where both channels are present.
    pub fn pairs(&self, x: Channel, y: Channel) -> Vec<(f64, f64)> {
        self.iter()
            .filter_map(|r| Some((r.value(x)?, r.value(y)?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Return every record whose date falls in `year`, preserving order.
///
/// A year with no rows yields an empty subset, not an error.
pub fn filter_by_year(dataset: &Dataset, year: i32) -> Subset<'_> {
    Subset {
        records: dataset
            .records()
            .iter()
            .filter(|r| r.year() == year)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), co: Option<f64>, t: Option<f64>) -> Record {
        let mut values = [None; Channel::COUNT];
        values[Channel::CoGt.index()] = co;
        values[Channel::T.index()] = t;
        Record {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            values,
        }
    }

    fn scenario() -> Dataset {
        load_reader("Date;CO(GT)\n10/03/2004;-200\n11/03/2004;2.5\n01/01/2005;1.0\n".as_bytes())
            .unwrap()
    }

    #[test]
    fn test_scenario_by_year() {
        let ds = scenario();
        assert_eq!(ds.records()[0].value(Channel::CoGt), None);

        let y2004 = filter_by_year(&ds, 2004);
        assert_eq!(y2004.len(), 2);
        assert_eq!(y2004.records()[0], &ds.records()[0]);
        assert_eq!(y2004.records()[1], &ds.records()[1]);

        let y2005 = filter_by_year(&ds, 2005);
        assert_eq!(y2005.len(), 1);
        assert_eq!(y2005.records()[0].value(Channel::CoGt), Some(1.0));

        assert!(filter_by_year(&ds, 2006).is_empty());
    }

    #[test]
    fn test_only_matching_year() {
        let ds = Dataset::from_records(vec![
            record((2005, 1, 1), None, None),
            record((2004, 12, 31), None, None),
            record((2005, 6, 1), None, None),
        ]);
        let subset = filter_by_year(&ds, 2005);
        assert!(subset.iter().all(|r| r.year() == 2005));
        assert_eq!(subset.len(), 2);
    }

    #[test]
    fn test_union_over_years_reconstructs_sorted_dataset() {
        let ds = scenario();
        let rebuilt: Vec<&Record> = ds
            .years()
            .iter()
            .flat_map(|&y| filter_by_year(&ds, y).records().to_vec())
            .collect();
        let original: Vec<&Record> = ds.records().iter().collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_filter_is_deterministic() {
        let ds = scenario();
        assert_eq!(filter_by_year(&ds, 2004), filter_by_year(&ds, 2004));
        assert_eq!(filter_by_year(&ds, 1999), filter_by_year(&ds, 1999));
    }

    #[test]
    fn test_values_and_pairs_skip_missing() {
        let ds = Dataset::from_records(vec![
            record((2004, 3, 10), Some(1.0), Some(10.0)),
            record((2004, 3, 11), None, Some(11.0)),
            record((2004, 3, 12), Some(3.0), None),
            record((2004, 3, 13), Some(4.0), Some(13.0)),
        ]);
        let subset = filter_by_year(&ds, 2004);
        assert_eq!(subset.values(Channel::CoGt), vec![1.0, 3.0, 4.0]);
        assert_eq!(subset.values(Channel::Rh), Vec::<f64>::new());
        assert_eq!(
            subset.pairs(Channel::CoGt, Channel::T),
            vec![(1.0, 10.0), (4.0, 13.0)]
        );
    }
}
