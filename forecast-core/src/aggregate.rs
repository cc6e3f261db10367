//! Reduction of 3-hourly forecast samples into one summary per calendar day.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{DailySummary, RawObservation},
    normalize::{normalize, unix_to_utc},
};

pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// Which clock decides the calendar day a sample belongs to.
///
/// Samples close to midnight move between days when this changes, so it is
/// always chosen explicitly and never taken from the host timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DayBucketing {
    #[default]
    Utc,
    /// Fixed offset from UTC in seconds, e.g. the city offset reported by the feed.
    FixedOffset(i32),
}

impl DayBucketing {
    fn offset(self) -> Result<FixedOffset, WeatherError> {
        let secs = match self {
            DayBucketing::Utc => 0,
            DayBucketing::FixedOffset(secs) => secs,
        };

        FixedOffset::east_opt(secs)
            .ok_or_else(|| WeatherError::malformed(format!("UTC offset of {secs}s is out of range")))
    }
}

/// Group `samples` by calendar day and reduce each group to a [`DailySummary`].
///
/// Days keep the order in which they first appear and only the first `days`
/// of them are returned; samples for later days are dropped. For each day
/// the headline temperature is the sample at position `len / 2`, min/max
/// span all finite temperatures of the day, and the remaining readings come
/// from the day's first sample.
pub fn aggregate_daily(
    samples: &[RawObservation],
    days: usize,
    bucketing: DayBucketing,
) -> Result<Vec<DailySummary>, WeatherError> {
    let offset = bucketing.offset()?;
    let mut buckets: Vec<(NaiveDate, Vec<&RawObservation>)> = Vec::new();

    for raw in samples {
        let date = local_date(raw.dt, &offset)?;

        match buckets.iter().position(|(d, _)| *d == date) {
            Some(ix) => buckets[ix].1.push(raw),
            None if buckets.len() < days => buckets.push((date, vec![raw])),
            None => {}
        }
    }

    debug!(samples = samples.len(), days = buckets.len(), ?bucketing, "bucketed forecast samples");

    buckets
        .into_iter()
        .map(|(date, group)| summarize(date, &group))
        .collect()
}

fn summarize(date: NaiveDate, group: &[&RawObservation]) -> Result<DailySummary, WeatherError> {
    let records = group
        .iter()
        .copied()
        .map(normalize)
        .collect::<Result<Vec<_>, _>>()?;

    // A bucket only exists once a sample was pushed into it.
    let mut record = records[0].clone();
    let temps = records.iter().filter_map(|r| r.temp_c);

    record.temp_c = records[records.len() / 2].temp_c;
    record.temp_min_c = temps.clone().reduce(f64::min);
    record.temp_max_c = temps.reduce(f64::max);
    record.date = Some(date);

    if record.temp_min_c.is_none() {
        debug!(%date, "no finite temperature in bucket");
    }

    Ok(DailySummary {
        date,
        label: date.format("%a, %b %-d").to_string(),
        record,
    })
}

fn local_date(dt: i64, offset: &FixedOffset) -> Result<NaiveDate, WeatherError> {
    let at: DateTime<Utc> =
        unix_to_utc(dt).ok_or_else(|| WeatherError::malformed(format!("timestamp {dt} is out of range")))?;
    Ok(at.with_timezone(offset).date_naive())
}
