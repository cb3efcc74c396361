use crate::{config::SignalBotConfig, engine::SignalEngine, error::SignalBotError};
use futures::future::join_all;
use signalbot_data::{
    alias::PairAliases,
    series::CandleSeries,
    source::{CandleSource, Interval},
};
use signalbot_strategy::result::{SignalResult, StreamingReport};
use smol_str::SmolStr;
use tracing::{debug, warn};

/// Resolves display pairs, fetches candles from a [`CandleSource`] and runs the
/// [`SignalEngine`] over them.
#[derive(Debug, Clone)]
pub struct SignalService<Source> {
    source: Source,
    aliases: PairAliases,
    interval: Interval,
    limit: usize,
    engine: SignalEngine,
}

impl<Source> SignalService<Source>
where
    Source: CandleSource,
{
    pub fn new(source: Source, config: &SignalBotConfig) -> Self {
        Self {
            source,
            aliases: config.aliases.clone(),
            interval: config.interval,
            limit: config.limit,
            engine: SignalEngine::from(config),
        }
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    /// Single-shot [`SignalResult`] for the display `pair`.
    pub async fn generate(&self, pair: &str) -> Result<SignalResult, SignalBotError> {
        let (ticker, series) = self.fetch_series(pair).await?;
        Ok(self.engine.single_shot(&ticker, &series))
    }

    /// Streaming [`StreamingReport`] for the display `pair`.
    pub async fn generate_stream(&self, pair: &str) -> Result<StreamingReport, SignalBotError> {
        let (ticker, series) = self.fetch_series(pair).await?;
        Ok(self.engine.streaming(&ticker, &series))
    }

    /// Single-shot [`SignalResult`]s for every display pair, evaluated concurrently.
    ///
    /// Pairs are independent: one failure does not affect the others. Output order follows
    /// input order.
    pub async fn generate_all<Pairs>(
        &self,
        pairs: Pairs,
    ) -> Vec<(SmolStr, Result<SignalResult, SignalBotError>)>
    where
        Pairs: IntoIterator,
        Pairs::Item: AsRef<str>,
    {
        let pairs = pairs
            .into_iter()
            .map(|pair| SmolStr::new(pair.as_ref()))
            .collect::<Vec<_>>();

        let results = join_all(pairs.iter().map(|pair| self.generate(pair))).await;

        pairs.into_iter().zip(results).collect()
    }

    async fn fetch_series(&self, pair: &str) -> Result<(SmolStr, CandleSeries), SignalBotError> {
        let ticker = self.aliases.resolve(pair)?;

        let candles = self
            .source
            .fetch_candles(&ticker, self.interval, self.limit)
            .await?;
        debug!(%pair, %ticker, interval = %self.interval, candles = candles.len(), "fetched candles");

        let series = CandleSeries::new(candles).unwrap_or_else(|error| {
            warn!(%pair, %ticker, %error, "discarding malformed candle payload");
            CandleSeries::default()
        });

        Ok((ticker, series))
    }
}
