use crate::{candle::Candle, error::DataError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordered sequence of [`Candle`]s (oldest -> newest) with strictly increasing `open_time`.
///
/// Every derived value in Signalbot is a pure function of a [`CandleSeries`], so the series is
/// immutable once constructed. Deserialising goes through the same validation as
/// [`CandleSeries::new`].
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Vec<Candle>", into = "Vec<Candle>")]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Construct a new [`CandleSeries`], validating each [`Candle`] and the time ordering.
    pub fn new(candles: Vec<Candle>) -> Result<Self, DataError> {
        candles.iter().try_for_each(Candle::validate)?;

        if let Some(pair) = candles
            .windows(2)
            .find(|pair| pair[1].open_time <= pair[0].open_time)
        {
            return Err(DataError::NonIncreasingTime {
                previous: pair[0].open_time,
                current: pair[1].open_time,
            });
        }

        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    /// Newest [`Candle`] in the series.
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Bounds-checked relative access from the newest [`Candle`].
    ///
    /// `nth_back(0)` is the latest candle, `nth_back(1)` the previous one, etc.
    pub fn nth_back(&self, offset: usize) -> Option<&Candle> {
        self.candles
            .len()
            .checked_sub(offset.checked_add(1)?)
            .and_then(|index| self.candles.get(index))
    }

    /// Closing prices, index-aligned with the series.
    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|candle| candle.close).collect()
    }

    /// Fixed-capacity window holding at most the newest `capacity` candles.
    pub fn tail(&self, capacity: usize) -> Self {
        let start = self.candles.len().saturating_sub(capacity);
        Self {
            candles: self.candles[start..].to_vec(),
        }
    }
}

impl TryFrom<Vec<Candle>> for CandleSeries {
    type Error = DataError;

    fn try_from(value: Vec<Candle>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CandleSeries> for Vec<Candle> {
    fn from(value: CandleSeries) -> Self {
        value.candles
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn time(minute: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + TimeDelta::minutes(minute)
    }

    fn flat(minute: i64, price: Decimal) -> Candle {
        Candle::new(time(minute), price, price, price, price, dec!(1))
    }

    #[test]
    fn test_new_rejects_non_increasing_open_time() {
        let candles = vec![flat(0, dec!(1)), flat(1, dec!(2)), flat(1, dec!(3))];

        let actual = CandleSeries::new(candles);

        assert_eq!(
            actual,
            Err(DataError::NonIncreasingTime {
                previous: time(1),
                current: time(1),
            })
        );
    }

    #[test]
    fn test_new_rejects_invalid_candle() {
        let mut candle = flat(0, dec!(1));
        candle.high = dec!(0.5);

        assert!(matches!(
            CandleSeries::new(vec![candle]),
            Err(DataError::InvalidCandle { .. })
        ));
    }

    #[test]
    fn test_nth_back_is_bounds_checked() {
        let series = CandleSeries::new(vec![flat(0, dec!(1)), flat(1, dec!(2))]).unwrap();

        assert_eq!(series.nth_back(0).map(|c| c.close), Some(dec!(2)));
        assert_eq!(series.nth_back(1).map(|c| c.close), Some(dec!(1)));
        assert_eq!(series.nth_back(2), None);
        assert_eq!(series.nth_back(usize::MAX), None);
        assert_eq!(CandleSeries::default().nth_back(0), None);
    }

    #[test]
    fn test_tail_keeps_newest_candles() {
        let series = CandleSeries::new((0..5).map(|i| flat(i, Decimal::from(i))).collect()).unwrap();

        assert_eq!(series.tail(2).closes(), vec![dec!(3), dec!(4)]);
        assert_eq!(series.tail(10).len(), 5);
        assert!(series.tail(0).is_empty());
    }

    #[test]
    fn test_deserialise_validates() {
        let valid = r#"[
            {"open_time":"2024-01-01T00:00:00Z","open":"1","high":"2","low":"1","close":"2","volume":"3"},
            {"open_time":"2024-01-01T00:01:00Z","open":"2","high":"2","low":"1","close":"1","volume":"3"}
        ]"#;
        let unordered = r#"[
            {"open_time":"2024-01-01T00:01:00Z","open":"1","high":"2","low":"1","close":"2","volume":"3"},
            {"open_time":"2024-01-01T00:00:00Z","open":"2","high":"2","low":"1","close":"1","volume":"3"}
        ]"#;

        assert_eq!(serde_json::from_str::<CandleSeries>(valid).unwrap().len(), 2);
        assert!(serde_json::from_str::<CandleSeries>(unordered).is_err());
    }
}
