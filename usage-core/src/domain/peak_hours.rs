use std::collections::BTreeSet;

/// Hours of day designated as peak.
///
/// Any integer is accepted as a key; values outside 0..=23 never match a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakHours(BTreeSet<i64>);

impl PeakHours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_hour(&self, hour: u8) -> bool {
        self.0.contains(&i64::from(hour))
    }

    /// Sum of the distinct hours in the set, widened so any set of `i64` keys fits.
    pub fn sum(&self) -> i128 {
        self.0.iter().map(|&h| i128::from(h)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<i64> for PeakHours {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[i64; N]> for PeakHours {
    fn from(hours: [i64; N]) -> Self {
        hours.into_iter().collect()
    }
}
