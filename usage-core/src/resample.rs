//! Grouped sums, calendar resampling and rejoin.

use std::collections::{BTreeMap, BTreeSet};

use time::PrimitiveDateTime;

use crate::calendar::{bucket_start, Granularity};

/// Plain summation of values sharing a key.
pub fn group_sum<K, I>(pairs: I) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut out = BTreeMap::new();
    for (key, value) in pairs {
        *out.entry(key).or_insert(0.0) += value;
    }
    out
}

/// Regroup a time-indexed series onto calendar buckets keyed by bucket start.
pub fn resample<I>(points: I, granularity: Granularity) -> BTreeMap<PrimitiveDateTime, f64>
where
    I: IntoIterator<Item = (PrimitiveDateTime, f64)>,
{
    group_sum(
        points
            .into_iter()
            .map(|(ts, value)| (bucket_start(ts, granularity), value)),
    )
}

/// Left join: each timestamp looks up the aggregate of its own bucket by exact key.
///
/// Absent buckets stay `None`; see [`fill_missing`].
pub fn rejoin(
    index: &[PrimitiveDateTime],
    buckets: &BTreeMap<PrimitiveDateTime, f64>,
    granularity: Granularity,
) -> Vec<Option<f64>> {
    index
        .iter()
        .map(|ts| buckets.get(&bucket_start(*ts, granularity)).copied())
        .collect()
}

/// Left join onto representatives only: the first timestamp of each bucket in
/// `index` carries the bucket's aggregate, later members of the bucket get `None`.
pub fn rejoin_first(
    index: &[PrimitiveDateTime],
    buckets: &BTreeMap<PrimitiveDateTime, f64>,
    granularity: Granularity,
) -> Vec<Option<f64>> {
    let mut seen = BTreeSet::new();
    index
        .iter()
        .map(|ts| {
            let key = bucket_start(*ts, granularity);
            if seen.insert(key) {
                buckets.get(&key).copied()
            } else {
                None
            }
        })
        .collect()
}

/// Default fill applied after every join: a missing aggregate is `0.0`.
pub fn fill_missing(joined: Vec<Option<f64>>) -> Vec<f64> {
    joined.into_iter().map(|v| v.unwrap_or(0.0)).collect()
}

/// `resample` + `rejoin` + `fill_missing` over one series.
pub fn resample_onto(
    index: &[PrimitiveDateTime],
    values: &[f64],
    granularity: Granularity,
) -> Vec<f64> {
    let buckets = resample(index.iter().copied().zip(values.iter().copied()), granularity);
    fill_missing(rejoin(index, &buckets, granularity))
}

/// `resample` + `rejoin_first` + `fill_missing`: one total per bucket.
pub fn resample_first(
    index: &[PrimitiveDateTime],
    values: &[f64],
    granularity: Granularity,
) -> Vec<f64> {
    let buckets = resample(index.iter().copied().zip(values.iter().copied()), granularity);
    fill_missing(rejoin_first(index, &buckets, granularity))
}
