#[cfg(test)]
mod tests {
    use crate::transactions::{sort_ledger, Transaction, TransactionSide};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn tx(id: &str, day: u32, created_secs: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            portfolio_id: "PF1".to_string(),
            ticker: "AAPL".to_string(),
            side: TransactionSide::Buy,
            quantity: dec!(1),
            unit_price: dec!(100),
            currency: "USD".to_string(),
            fx_rate: None,
            fee: dec!(0),
            transaction_date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, day, 12, 0, created_secs)
                .unwrap(),
        }
    }

    #[test]
    fn sort_ledger_orders_by_date_then_insertion() {
        let mut ledger = vec![tx("c", 2, 0), tx("b", 1, 30), tx("a", 1, 10)];
        sort_ledger(&mut ledger);
        let ids: Vec<&str> = ledger.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_ledger_breaks_full_ties_by_id() {
        let mut ledger = vec![tx("z", 1, 0), tx("a", 1, 0)];
        sort_ledger(&mut ledger);
        assert_eq!(ledger[0].id, "a");
    }

    #[test]
    fn only_buy_and_sell_affect_positions() {
        assert!(TransactionSide::Buy.affects_position());
        assert!(TransactionSide::Sell.affects_position());
        assert!(!TransactionSide::Deposit.affects_position());
        assert!(!TransactionSide::Withdrawal.affects_position());
        assert!(!TransactionSide::Dividend.affects_position());
        assert!(!TransactionSide::Fee.affects_position());
    }
}
