use crate::{
    candle::Candle,
    de::{datetime_utc_from_epoch_ms, extract_next, extract_next_str},
    error::DataError,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Binance kline (candlestick) row.
///
/// ### Raw Payload Examples
/// See docs: <https://developers.binance.com/docs/binance-spot-api-docs/rest-api/market-data-endpoints#klinecandlestick-data>
/// ```json
/// [
///     1499040000000,
///     "0.01634790",
///     "0.80000000",
///     "0.01575800",
///     "0.01577100",
///     "148976.11427815",
///     1499644799999,
///     "2434.19055334",
///     308,
///     "1756.87402397",
///     "28.46694368",
///     "0"
/// ]
/// ```
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct BinanceKline {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: DateTime<Utc>,
    pub quote_volume: Decimal,
    pub trade_count: u64,
}

impl BinanceKline {
    /// Decode a `GET /api/v3/klines` response body into [`Candle`]s, preserving order.
    pub fn parse_payload(payload: &str) -> Result<Vec<Candle>, DataError> {
        let klines = serde_json::from_str::<Vec<BinanceKline>>(payload)?;
        Ok(klines.into_iter().map(Candle::from).collect())
    }
}

impl From<BinanceKline> for Candle {
    fn from(kline: BinanceKline) -> Self {
        Candle::new(
            kline.open_time,
            kline.open,
            kline.high,
            kline.low,
            kline.close,
            kline.volume,
        )
    }
}

impl<'de> serde::de::Deserialize<'de> for BinanceKline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SeqVisitor;

        impl<'de> serde::de::Visitor<'de> for SeqVisitor {
            type Value = BinanceKline;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("BinanceKline array from the Binance REST API")
            }

            fn visit_seq<SeqAccessor>(
                self,
                mut seq: SeqAccessor,
            ) -> Result<Self::Value, SeqAccessor::Error>
            where
                SeqAccessor: serde::de::SeqAccess<'de>,
            {
                // BinanceKline Sequence Format:
                // [openTime, open, high, low, close, volume, closeTime, quoteVolume, trades,
                //  takerBuyBaseVolume, takerBuyQuoteVolume, ignore]
                let open_time = extract_next::<SeqAccessor, u64>(&mut seq, "openTime")
                    .map(datetime_utc_from_epoch_ms)?;
                let open = extract_next_str(&mut seq, "open")?;
                let high = extract_next_str(&mut seq, "high")?;
                let low = extract_next_str(&mut seq, "low")?;
                let close = extract_next_str(&mut seq, "close")?;
                let volume = extract_next_str(&mut seq, "volume")?;
                let close_time = extract_next::<SeqAccessor, u64>(&mut seq, "closeTime")
                    .map(datetime_utc_from_epoch_ms)?;
                let quote_volume = extract_next_str(&mut seq, "quoteAssetVolume")?;
                let trade_count = extract_next(&mut seq, "numberOfTrades")?;

                // Ignore taker volumes & any additional elements or SerDe will fail
                //  '--> Exchange may add fields without warning
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}

                Ok(BinanceKline {
                    open_time,
                    open,
                    high,
                    low,
                    close,
                    volume,
                    close_time,
                    quote_volume,
                    trade_count,
                })
            }
        }

        deserializer.deserialize_seq(SeqVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod de {
        use super::*;
        use rust_decimal_macros::dec;

        #[test]
        fn test_binance_kline() {
            struct TestCase {
                input: &'static str,
                expected: Result<BinanceKline, DataError>,
            }

            let tests = vec![
                TestCase {
                    // TC0: valid BinanceKline
                    input: r#"
                    [
                        1499040000000,
                        "0.01634790",
                        "0.80000000",
                        "0.01575800",
                        "0.01577100",
                        "148976.11427815",
                        1499644799999,
                        "2434.19055334",
                        308,
                        "1756.87402397",
                        "28.46694368",
                        "0"
                    ]
                    "#,
                    expected: Ok(BinanceKline {
                        open_time: datetime_utc_from_epoch_ms(1499040000000),
                        open: dec!(0.01634790),
                        high: dec!(0.80000000),
                        low: dec!(0.01575800),
                        close: dec!(0.01577100),
                        volume: dec!(148976.11427815),
                        close_time: datetime_utc_from_epoch_ms(1499644799999),
                        quote_volume: dec!(2434.19055334),
                        trade_count: 308,
                    }),
                },
                TestCase {
                    // TC1: truncated row missing closeTime onwards
                    input: r#"[1499040000000, "1.0", "2.0", "0.5", "1.5", "10.0"]"#,
                    expected: Err(DataError::Deserialise(String::new())),
                },
                TestCase {
                    // TC2: price not encoded as a decimal string
                    input: r#"[1499040000000, "abc", "2.0", "0.5", "1.5", "10.0", 1499040059999, "1", 1]"#,
                    expected: Err(DataError::Deserialise(String::new())),
                },
            ];

            for (index, test) in tests.into_iter().enumerate() {
                let actual = serde_json::from_str::<BinanceKline>(test.input);
                match (actual, test.expected) {
                    (Ok(actual), Ok(expected)) => {
                        assert_eq!(actual, expected, "TC{} failed", index)
                    }
                    (Err(_), Err(_)) => {
                        // Test passed
                    }
                    (actual, expected) => {
                        // Test failed
                        panic!(
                            "TC{index} failed because actual != expected. \nActual: {actual:?}\nExpected: {expected:?}\n"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_parse_payload_preserves_order() {
        let payload = r#"[
            [1700000000000, "10", "11", "9", "10.5", "100", 1700000059999, "1000", 5, "0", "0", "0"],
            [1700000060000, "10.5", "12", "10", "11.5", "120", 1700000119999, "1300", 6, "0", "0", "0"]
        ]"#;

        let candles = BinanceKline::parse_payload(payload).unwrap();

        assert_eq!(candles.len(), 2);
        assert!(candles[0].open_time < candles[1].open_time);
        assert_eq!(candles[1].close, rust_decimal_macros::dec!(11.5));
    }
}
