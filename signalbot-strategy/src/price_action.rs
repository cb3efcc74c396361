use crate::signal::CandleSignal;
use rust_decimal::Decimal;

/// Momentum label of the close at `index` from its two predecessors.
///
/// - [`CandleSignal::Buy`]: local trough turning up (`close[i] > close[i-1] < close[i-2]`).
/// - [`CandleSignal::Sell`]: local peak turning down (`close[i] < close[i-1] > close[i-2]`).
/// - [`CandleSignal::Hold`]: anything else, including `index < 2` or out of bounds.
pub fn price_action_at(closes: &[Decimal], index: usize) -> CandleSignal {
    let Some(start) = index.checked_sub(2) else {
        return CandleSignal::Hold;
    };
    let Some(&[before, previous, current]) = closes.get(start..=index) else {
        return CandleSignal::Hold;
    };

    if current > previous && previous < before {
        CandleSignal::Buy
    } else if current < previous && previous > before {
        CandleSignal::Sell
    } else {
        CandleSignal::Hold
    }
}

/// [`price_action_at`] for every close, index-aligned.
pub fn price_action(closes: &[Decimal]) -> Vec<CandleSignal> {
    (0..closes.len())
        .map(|index| price_action_at(closes, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_action() {
        let closes = [
            dec!(10),
            dec!(10),
            dec!(9),
            dec!(9.5),
            dec!(11),
            dec!(10),
            dec!(10),
        ];

        assert_eq!(
            price_action(&closes),
            vec![
                CandleSignal::Hold,
                CandleSignal::Hold,
                CandleSignal::Hold,
                CandleSignal::Buy,
                CandleSignal::Hold,
                CandleSignal::Sell,
                CandleSignal::Hold,
            ]
        );
    }

    #[test]
    fn test_price_action_out_of_bounds() {
        assert_eq!(price_action_at(&[], 0), CandleSignal::Hold);
        assert_eq!(price_action_at(&[dec!(1), dec!(0)], 5), CandleSignal::Hold);
        assert!(price_action(&[]).is_empty());
    }
}
