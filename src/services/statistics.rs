use crate::models::{Diversification, Holding, RecordStatistics};

/// Value and per-holding breakdown of one asset class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetClassSummary {
    pub value: f64,
    pub diversification: Vec<Diversification>,
}

/// Computes the derived block of a record.
///
/// Stocks and cryptos are summarized on separate rayon workers and joined
/// before the combined totals are taken. Calling this twice on the same
/// inputs gives the same output.
pub fn generate(stocks: &[Holding], cryptos: &[Holding], liquidity: f64) -> RecordStatistics {
    let (stocks, cryptos) = rayon::join(|| summarize(stocks), || summarize(cryptos));

    let invested_amount = stocks.value + cryptos.value;

    RecordStatistics {
        stocks_value: stocks.value,
        cryptos_value: cryptos.value,
        stock_diversification: stocks.diversification,
        crypto_diversification: cryptos.diversification,
        invested_amount,
        total_invested: invested_amount + liquidity,
    }
}

pub fn summarize(holdings: &[Holding]) -> AssetClassSummary {
    let value = total_value(holdings);
    AssetClassSummary {
        value,
        diversification: diversification(holdings, value),
    }
}

/// Sum of valuations. Starts from +0.0 so an empty class never reports -0.0.
pub fn total_value(holdings: &[Holding]) -> f64 {
    holdings.iter().fold(0.0, |acc, h| acc + h.valued_at)
}

/// Share of `total` held by each holding, index-aligned with `holdings`.
/// A zero total gives every holding 0%.
pub fn diversification(holdings: &[Holding], total: f64) -> Vec<Diversification> {
    holdings
        .iter()
        .map(|h| Diversification {
            symbol: h.symbol.clone(),
            percent: if total == 0.0 {
                0.0
            } else {
                round_percent(h.valued_at / total)
            },
        })
        .collect()
}

// Fraction to whole percent, ties away from zero.
fn round_percent(fraction: f64) -> f64 {
    (fraction * 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(symbol: &str, valued_at: f64) -> Holding {
        Holding::new(symbol, 1.0, valued_at)
    }

    #[test]
    fn test_stocks_only_scenario() {
        let stocks = vec![stock("AAPL", 300.0), stock("MSFT", 700.0)];

        let stats = generate(&stocks, &[], 1000.0);

        assert_eq!(stats.stocks_value, 1000.0);
        assert_eq!(
            stats.stock_diversification,
            vec![
                Diversification { symbol: "AAPL".into(), percent: 30.0 },
                Diversification { symbol: "MSFT".into(), percent: 70.0 },
            ]
        );
        assert_eq!(stats.cryptos_value, 0.0);
        assert!(stats.crypto_diversification.is_empty());
        assert_eq!(stats.invested_amount, 1000.0);
        assert_eq!(stats.total_invested, 2000.0);
    }

    #[test]
    fn test_empty_holdings_only_liquidity() {
        let stats = generate(&[], &[], 500.0);

        assert_eq!(stats.stocks_value, 0.0);
        assert_eq!(stats.cryptos_value, 0.0);
        assert_eq!(stats.invested_amount, 0.0);
        assert_eq!(stats.total_invested, 500.0);
        assert!(stats.stock_diversification.is_empty());
        assert!(stats.crypto_diversification.is_empty());
    }

    #[test]
    fn test_empty_classes_are_positive_zero() {
        let stats = generate(&[], &[], 500.0);

        assert!(!stats.stocks_value.is_sign_negative());
        assert!(!stats.cryptos_value.is_sign_negative());
        assert!(!stats.invested_amount.is_sign_negative());

        let text = serde_json::to_string(&stats).unwrap();
        assert!(text.contains("\"stocksValue\":0.0"), "{}", text);
        assert!(text.contains("\"cryptosValue\":0.0"), "{}", text);
        assert!(text.contains("\"investedAmount\":0.0"), "{}", text);
    }

    #[test]
    fn test_zero_valued_holdings_get_zero_percent() {
        let cryptos = vec![stock("BTC", 0.0), stock("ETH", 0.0)];

        let stats = generate(&[], &cryptos, 10.0);

        assert_eq!(stats.cryptos_value, 0.0);
        assert_eq!(stats.crypto_diversification.len(), 2);
        for entry in &stats.crypto_diversification {
            assert_eq!(entry.percent, 0.0);
            assert!(entry.percent.is_finite());
        }
        assert_eq!(stats.total_invested, 10.0);
    }

    #[test]
    fn test_diversification_preserves_input_order() {
        let holdings = vec![stock("ZZZ", 1.0), stock("AAA", 5.0), stock("MMM", 4.0)];

        let div = diversification(&holdings, total_value(&holdings));

        let symbols: Vec<&str> = div.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ZZZ", "AAA", "MMM"]);
        assert_eq!(div[0].percent, 10.0);
        assert_eq!(div[1].percent, 50.0);
        assert_eq!(div[2].percent, 40.0);
    }

    #[test]
    fn test_percentages_sum_close_to_hundred() {
        let holdings = vec![stock("A", 1.0), stock("B", 1.0), stock("C", 1.0)];

        let summary = summarize(&holdings);

        // 33.33.. rounds to 33 three times
        let sum: f64 = summary.diversification.iter().map(|d| d.percent).sum();
        assert_eq!(summary.diversification.len(), 3);
        assert!((sum - 100.0).abs() <= holdings.len() as f64 * 0.5);
        assert_eq!(sum, 99.0);
    }

    #[test]
    fn test_half_percent_rounds_away_from_zero() {
        // 1/8 = 12.5%
        let holdings = vec![stock("A", 1.0), stock("B", 7.0)];

        let div = diversification(&holdings, 8.0);

        assert_eq!(div[0].percent, 13.0);
        assert_eq!(div[1].percent, 88.0);
    }

    #[test]
    fn test_total_value_ignores_quantity() {
        let holdings = vec![
            Holding::new("AAPL", 100.0, 250.5),
            Holding::new("VT", 0.0, 49.5),
        ];

        assert_eq!(total_value(&holdings), 300.0);
    }

    #[test]
    fn test_totals_identity_holds() {
        let stocks = vec![stock("AAPL", 123.45), stock("MSFT", 678.9)];
        let cryptos = vec![stock("BTC", 1111.11)];
        let liquidity = 42.0;

        let stats = generate(&stocks, &cryptos, liquidity);

        let expected = stats.stocks_value + stats.cryptos_value + liquidity;
        assert!((stats.total_invested - expected).abs() < 1e-9);
        assert!((stats.invested_amount - (stats.stocks_value + stats.cryptos_value)).abs() < 1e-9);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let stocks = vec![stock("AAPL", 300.0), stock("MSFT", 700.0)];
        let cryptos = vec![stock("BTC", 250.0), stock("ETH", 750.0)];

        let first = generate(&stocks, &cryptos, 100.0);
        let second = generate(&stocks, &cryptos, 100.0);

        assert_eq!(first, second);
        assert_eq!(first.crypto_diversification[1].percent, 75.0);
    }
}
