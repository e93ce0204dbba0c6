//! Mutation engine tests.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use valuta_shared::types::{BranchId, BranchScope, CurrencyCode, CustomerId, TransactionId, UserId};

use super::service::MutationCalculator;
use super::types::{CurrencyMutation, DateRange};
use crate::branch::{MemoryBranchConfig, OpeningBalance};
use crate::calendar::AccountingCalendar;
use crate::mutation::MutationError;
use crate::transaction::memory::MemoryTransactionStore;
use crate::transaction::store::TransactionStore;
use crate::transaction::types::{local_amount_of, Direction, Transaction};

fn cal() -> AccountingCalendar {
    AccountingCalendar::new(8).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn usd() -> CurrencyCode {
    CurrencyCode::parse("USD").unwrap()
}

/// Business instant inside the given accounting day (noon local time).
fn noon(day: NaiveDate) -> DateTime<Utc> {
    cal().utc_range_of(day).0 + Duration::hours(12)
}

fn transaction(
    branch: BranchId,
    currency: &CurrencyCode,
    direction: Direction,
    foreign_amount: Decimal,
    exchange_rate: Decimal,
    day: NaiveDate,
) -> Transaction {
    let instant = noon(day);
    Transaction {
        id: TransactionId::new(),
        number: String::new(),
        voucher_number: None,
        customer_id: CustomerId::new(),
        branch_id: branch,
        currency: currency.clone(),
        direction,
        foreign_amount,
        exchange_rate,
        local_amount: local_amount_of(foreign_amount, exchange_rate),
        transaction_instant: instant,
        accounting_date: day,
        notes: None,
        payment_method: None,
        transaction_purpose: None,
        created_by: UserId::new(),
        created_at: instant,
        deletion: None,
    }
}

struct Fixture {
    store: MemoryTransactionStore,
    branches: MemoryBranchConfig,
    branch: BranchId,
}

impl Fixture {
    fn new() -> Self {
        let branches = MemoryBranchConfig::new();
        let branch = BranchId::new();
        branches.add_branch(branch, "HQ");
        Self {
            store: MemoryTransactionStore::new(),
            branches,
            branch,
        }
    }

    fn with_opening(foreign: Decimal, local: Decimal) -> Self {
        let fx = Self::new();
        fx.branches
            .set_opening_balance(fx.branch, usd(), OpeningBalance::new(foreign, local));
        fx
    }

    fn add(&self, direction: Direction, foreign: Decimal, rate: Decimal, day: NaiveDate) {
        self.store
            .insert(transaction(self.branch, &usd(), direction, foreign, rate, day));
    }

    fn calculator(&self) -> MutationCalculator<'_> {
        MutationCalculator::new(&self.store, &self.branches, cal())
    }

    fn scope(&self) -> BranchScope {
        BranchScope::Branch(self.branch)
    }

    fn compute(&self, range: DateRange) -> Option<CurrencyMutation> {
        self.calculator().compute(self.scope(), &usd(), range).unwrap()
    }
}

#[test]
fn test_worked_example() {
    // Opening stock 1000 USD valued at 15,000,000; buy 500 @ 15,200 and
    // sell 300 @ 15,500 on the same day.
    let fx = Fixture::with_opening(dec!(1000), dec!(15000000));
    let day = date(2024, 3, 5);
    fx.add(Direction::Buy, dec!(500), dec!(15200), day);
    fx.add(Direction::Sell, dec!(300), dec!(15500), day);

    let record = fx.compute(DateRange::single_day(day)).unwrap().rounded();
    assert_eq!(record.opening_stock_fc, dec!(1000.00));
    assert_eq!(record.opening_stock_lc, dec!(15000000));
    assert_eq!(record.purchases_fc, dec!(500.00));
    assert_eq!(record.purchases_lc, dec!(7600000));
    assert_eq!(record.sales_fc, dec!(300.00));
    assert_eq!(record.sales_lc, dec!(4650000));
    assert_eq!(record.ending_stock_fc, dec!(1200.00));
    assert_eq!(record.weighted_avg_rate, dec!(15066.67));
    assert_eq!(record.ending_stock_lc, dec!(18080000));
    assert_eq!(record.profit_loss_lc, dec!(130000));
    assert_eq!(record.transaction_count, 2);
}

#[test]
fn test_sales_do_not_move_the_average() {
    // Selling at any price must leave the cost basis untouched.
    let fx = Fixture::with_opening(dec!(1000), dec!(15000000));
    let day = date(2024, 3, 5);
    fx.add(Direction::Sell, dec!(400), dec!(19999), day);

    let record = fx.compute(DateRange::single_day(day)).unwrap();
    assert_eq!(record.weighted_avg_rate, dec!(15000));
    assert_eq!(record.ending_stock_fc, dec!(600));
    assert_eq!(record.ending_stock_lc, dec!(9000000));
}

#[test]
fn test_zero_basis_resolves_to_zero_rate() {
    // Selling out of an empty book is a data problem for auditors, not an
    // arithmetic fault: the rate degrades to zero.
    let fx = Fixture::new();
    let day = date(2024, 3, 5);
    fx.add(Direction::Sell, dec!(100), dec!(15000), day);

    let record = fx.compute(DateRange::single_day(day)).unwrap();
    assert_eq!(record.weighted_avg_rate, Decimal::ZERO);
    assert_eq!(record.ending_stock_fc, dec!(-100));
    assert_eq!(record.ending_stock_lc, Decimal::ZERO);
}

#[test]
fn test_unknown_currency_is_empty_not_error() {
    let fx = Fixture::new();
    fx.add(Direction::Buy, dec!(100), dec!(15000), date(2024, 3, 5));
    let record = fx
        .calculator()
        .compute(
            fx.scope(),
            &CurrencyCode::parse("ZZZ").unwrap(),
            DateRange::single_day(date(2024, 3, 5)),
        )
        .unwrap();
    assert_eq!(record, None);
}

#[test]
fn test_missing_branch_is_an_error() {
    let fx = Fixture::new();
    let ghost = BranchId::new();
    let result = fx.calculator().compute(
        BranchScope::Branch(ghost),
        &usd(),
        DateRange::single_day(date(2024, 3, 5)),
    );
    assert_eq!(result, Err(MutationError::BranchNotFound(ghost)));
}

#[test]
fn test_configured_opening_without_activity_is_reported() {
    let fx = Fixture::with_opening(dec!(250), dec!(3800000));
    let record = fx.compute(DateRange::single_day(date(2024, 3, 5))).unwrap();
    assert_eq!(record.purchases_fc, Decimal::ZERO);
    assert_eq!(record.sales_fc, Decimal::ZERO);
    assert_eq!(record.ending_stock_fc, record.opening_stock_fc);
    assert_eq!(record.ending_stock_lc, record.opening_stock_lc);
    assert_eq!(record.transaction_count, 0);
}

#[test]
fn test_never_transacted_currency_is_omitted() {
    let fx = Fixture::new();
    assert_eq!(fx.compute(DateRange::single_day(date(2024, 3, 5))), None);
}

#[test]
fn test_opening_carries_from_prior_days() {
    let fx = Fixture::new();
    fx.add(Direction::Buy, dec!(1000), dec!(15000), date(2024, 3, 1));
    fx.add(Direction::Buy, dec!(500), dec!(15200), date(2024, 3, 5));

    let record = fx.compute(DateRange::single_day(date(2024, 3, 5))).unwrap();
    // March 1 purchase carries forward as the opening position.
    assert_eq!(record.opening_stock_fc, dec!(1000));
    assert_eq!(record.opening_stock_lc, dec!(15000000));
    assert_eq!(record.purchases_fc, dec!(500));
}

#[test]
fn test_multi_day_window_uses_one_lookback() {
    // Opening for a range must be the position strictly before the range,
    // and the window average must use the window's own purchases.
    let fx = Fixture::with_opening(dec!(1000), dec!(15000000));
    fx.add(Direction::Buy, dec!(500), dec!(15200), date(2024, 3, 5));
    fx.add(Direction::Sell, dec!(300), dec!(15500), date(2024, 3, 6));

    let range = DateRange::new(date(2024, 3, 5), date(2024, 3, 6)).unwrap();
    let record = fx.compute(range).unwrap();
    assert_eq!(record.opening_stock_fc, dec!(1000));
    assert_eq!(record.opening_stock_lc, dec!(15000000));
    // Window basis: (15,000,000 + 7,600,000) / (1,000 + 500).
    assert_eq!(record.rounded().weighted_avg_rate, dec!(15066.67));
    assert_eq!(record.ending_stock_fc, dec!(1200));
}

#[test]
fn test_chaining_identity_when_leading_day_has_no_sales() {
    let fx = Fixture::with_opening(dec!(2000), dec!(30000000));
    let d1 = date(2024, 3, 5);
    let d2 = date(2024, 3, 6);
    fx.add(Direction::Buy, dec!(500), dec!(15200), d1);
    fx.add(Direction::Buy, dec!(250), dec!(15300), d2);
    fx.add(Direction::Sell, dec!(600), dec!(15650), d2);

    let direct = fx
        .compute(DateRange::new(d1, d2).unwrap())
        .unwrap();
    let first = fx.compute(DateRange::single_day(d1)).unwrap();
    let second = fx.compute(DateRange::single_day(d2)).unwrap();

    // Day two opens exactly where day one ended.
    assert_eq!(second.opening_stock_fc, first.ending_stock_fc);
    assert_eq!(second.opening_stock_lc, first.ending_stock_lc);
    // The two-day aggregate equals the chained computation, exactly.
    assert_eq!(direct.ending_stock_fc, second.ending_stock_fc);
    assert_eq!(direct.ending_stock_lc, second.ending_stock_lc);
    assert_eq!(direct.weighted_avg_rate, second.weighted_avg_rate);
    assert_eq!(direct.purchases_fc, first.purchases_fc + second.purchases_fc);
    assert_eq!(direct.purchases_lc, first.purchases_lc + second.purchases_lc);
    assert_eq!(direct.sales_fc, first.sales_fc + second.sales_fc);
    assert_eq!(direct.sales_lc, first.sales_lc + second.sales_lc);
    assert_eq!(
        direct.profit_loss_lc,
        first.profit_loss_lc + second.profit_loss_lc
    );
}

#[test]
fn test_idempotence() {
    let fx = Fixture::with_opening(dec!(1000), dec!(15000000));
    fx.add(Direction::Buy, dec!(500), dec!(15200), date(2024, 3, 5));
    fx.add(Direction::Sell, dec!(300), dec!(15500), date(2024, 3, 5));

    let range = DateRange::single_day(date(2024, 3, 5));
    let first = fx.compute(range);
    let second = fx.compute(range);
    assert_eq!(first, second);
}

#[test]
fn test_soft_deleted_transactions_are_excluded() {
    let fx = Fixture::new();
    let keep = transaction(
        fx.branch,
        &usd(),
        Direction::Buy,
        dec!(100),
        dec!(15000),
        date(2024, 3, 5),
    );
    let drop = transaction(
        fx.branch,
        &usd(),
        Direction::Buy,
        dec!(900),
        dec!(15000),
        date(2024, 3, 5),
    );
    let drop_id = drop.id;
    fx.store.insert(keep);
    fx.store.insert(drop);
    fx.store.soft_delete(drop_id, UserId::new(), noon(date(2024, 3, 6)));

    let record = fx.compute(DateRange::single_day(date(2024, 3, 5))).unwrap();
    assert_eq!(record.purchases_fc, dec!(100));
    assert_eq!(record.transaction_count, 1);
}

#[test]
fn test_all_branches_aggregates_without_configured_anchor() {
    let fx = Fixture::with_opening(dec!(1000), dec!(15000000));
    let other = BranchId::new();
    fx.branches.add_branch(other, "KCP");
    let day = date(2024, 3, 5);
    fx.add(Direction::Buy, dec!(100), dec!(15000), day);
    fx.store
        .insert(transaction(other, &usd(), Direction::Buy, dec!(200), dec!(15100), day));

    let record = fx
        .calculator()
        .compute(BranchScope::AllBranches, &usd(), DateRange::single_day(day))
        .unwrap()
        .unwrap();
    // Configured anchors are per branch; the aggregate folds from zero.
    assert_eq!(record.opening_stock_fc, Decimal::ZERO);
    assert_eq!(record.purchases_fc, dec!(300));
    assert_eq!(record.transaction_count, 2);
}

#[test]
fn test_compute_all_reports_only_live_currencies() {
    let fx = Fixture::new();
    let eur = CurrencyCode::parse("EUR").unwrap();
    let jpy = CurrencyCode::parse("JPY").unwrap();
    fx.branches
        .set_opening_balance(fx.branch, jpy.clone(), OpeningBalance::new(dec!(50000), dec!(5000000)));
    let day = date(2024, 3, 5);
    fx.add(Direction::Buy, dec!(100), dec!(15000), day);
    fx.store
        .insert(transaction(fx.branch, &eur, Direction::Buy, dec!(40), dec!(16500), day));

    let records = fx
        .calculator()
        .compute_all(fx.scope(), DateRange::single_day(day))
        .unwrap();
    let codes: Vec<&str> = records.iter().map(|r| r.currency.as_str()).collect();
    // Sorted by code; JPY present with configured stock only.
    assert_eq!(codes, vec!["EUR", "JPY", "USD"]);
    let jpy_record = &records[1];
    assert_eq!(jpy_record.transaction_count, 0);
    assert_eq!(jpy_record.ending_stock_fc, dec!(50000));
}

#[test]
fn test_invalid_range_rejected() {
    let result = DateRange::new(date(2024, 3, 6), date(2024, 3, 5));
    assert_eq!(
        result,
        Err(MutationError::InvalidRange {
            start: date(2024, 3, 6),
            end: date(2024, 3, 5),
        })
    );
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
struct Move {
    direction: Direction,
    foreign: Decimal,
    rate: Decimal,
    day_offset: u8,
}

fn move_strategy() -> impl Strategy<Value = Move> {
    (
        prop::bool::ANY,
        1i64..50_000,
        10_000i64..20_000,
        0u8..4,
    )
        .prop_map(|(buy, foreign_cents, rate, day_offset)| Move {
            direction: if buy { Direction::Buy } else { Direction::Sell },
            foreign: Decimal::new(foreign_cents, 2),
            rate: Decimal::new(rate, 0),
            day_offset,
        })
}

fn apply_moves(fx: &Fixture, moves: &[Move]) {
    let base = date(2024, 3, 4);
    for m in moves {
        fx.add(
            m.direction,
            m.foreign,
            m.rate,
            base + Duration::days(i64::from(m.day_offset)),
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Stock conservation: ending = opening + purchases - sales, exactly.
    #[test]
    fn prop_stock_conservation(moves in prop::collection::vec(move_strategy(), 1..20)) {
        let fx = Fixture::with_opening(dec!(1000), dec!(15000000));
        apply_moves(&fx, &moves);

        let range = DateRange::new(date(2024, 3, 4), date(2024, 3, 7)).unwrap();
        let record = fx.compute(range).unwrap();
        prop_assert_eq!(
            record.ending_stock_fc,
            record.opening_stock_fc + record.purchases_fc - record.sales_fc
        );
    }

    /// Ending stock and buy/sell totals chain exactly over sub-periods,
    /// whatever the sale pattern.
    #[test]
    fn prop_quantities_chain_over_subperiods(moves in prop::collection::vec(move_strategy(), 1..20)) {
        let fx = Fixture::with_opening(dec!(1000), dec!(15000000));
        apply_moves(&fx, &moves);

        let split = date(2024, 3, 5);
        let direct = fx
            .compute(DateRange::new(date(2024, 3, 4), date(2024, 3, 7)).unwrap())
            .unwrap();
        let head = fx
            .compute(DateRange::new(date(2024, 3, 4), split).unwrap())
            .unwrap();
        let tail = fx
            .compute(DateRange::new(split + Duration::days(1), date(2024, 3, 7)).unwrap())
            .unwrap();

        prop_assert_eq!(tail.opening_stock_fc, head.ending_stock_fc);
        prop_assert_eq!(direct.ending_stock_fc, tail.ending_stock_fc);
        prop_assert_eq!(direct.purchases_fc, head.purchases_fc + tail.purchases_fc);
        prop_assert_eq!(direct.purchases_lc, head.purchases_lc + tail.purchases_lc);
        prop_assert_eq!(direct.sales_fc, head.sales_fc + tail.sales_fc);
        prop_assert_eq!(direct.sales_lc, head.sales_lc + tail.sales_lc);
    }

    /// Recomputation with no intervening writes is byte-identical.
    #[test]
    fn prop_idempotent(moves in prop::collection::vec(move_strategy(), 1..20)) {
        let fx = Fixture::new();
        apply_moves(&fx, &moves);

        let range = DateRange::new(date(2024, 3, 4), date(2024, 3, 7)).unwrap();
        prop_assert_eq!(fx.compute(range), fx.compute(range));
    }
}
