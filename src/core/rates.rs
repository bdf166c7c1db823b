//! Exchange-rate snapshot types and the daily staleness boundary

use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot of exchange rates published by a provider at one point in time.
///
/// Rates are expressed against the provider's base currency and kept in the
/// order the provider (or the persisted file) listed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Seconds since the UTC epoch at which the provider generated the snapshot.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(with = "ordered_rates")]
    pub rates: Vec<(String, f64)>,
}

impl RateTable {
    pub fn new(timestamp: i64, rates: Vec<(String, f64)>) -> Self {
        Self {
            timestamp,
            base: None,
            rates,
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    /// Fails when the table carries no rates at all.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.rates.is_empty() {
            bail!("Exchange rate table generated at {} has no rates", self.timestamp);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// A table is stale once the current UTC day started after it was generated.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.timestamp < start_of_utc_day(now)
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.timestamp, 0)
    }

    pub fn generated_at_local(&self) -> Option<DateTime<Local>> {
        self.generated_at().map(|dt| dt.with_timezone(&Local))
    }
}

/// Epoch seconds of 00:00:00 UTC on the date of `now`.
pub fn start_of_utc_day(now: DateTime<Utc>) -> i64 {
    now.date_naive().and_time(NaiveTime::MIN).and_utc().timestamp()
}

// Rates are a JSON object on the wire; keep its key order instead of sorting.
mod ordered_rates {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(rates: &[(String, f64)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(rates.len()))?;
        for (code, rate) in rates {
            map.serialize_entry(code, rate)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RatesVisitor)
    }

    struct RatesVisitor;

    impl<'de> Visitor<'de> for RatesVisitor {
        type Value = Vec<(String, f64)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of currency codes to rates")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut rates: Vec<(String, f64)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((code, rate)) = access.next_entry::<String, f64>()? {
                // A repeated code keeps its first position and takes the last value
                match rates.iter_mut().find(|(existing, _)| *existing == code) {
                    Some(entry) => entry.1 = rate,
                    None => rates.push((code, rate)),
                }
            }
            Ok(rates)
        }
    }
}
