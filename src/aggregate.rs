// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory aggregation over transaction slices.
//!
//! Every function here is pure: callers fetch rows through `repo` once and
//! derive whatever views they need without going back to the store. Amounts
//! are signed (credits positive, debits negative) and all arithmetic stays
//! in `Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Category, Transaction};

/// One step of the running-balance chart, numbered from 1.
#[derive(Debug, Clone, Serialize)]
pub struct BalancePoint {
    pub seq: usize,
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Monthly limit versus what the window actually spent. `remaining` is
/// simply `monthly_limit - spent` and goes negative when over budget.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetUtilization {
    pub monthly_limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

/// Everything the spending report prints for one window.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingSummary {
    pub total_spent: Decimal,
    pub total_income: Decimal,
    pub net: Decimal,
    pub categories: BTreeMap<Category, Decimal>,
}

/// Sum of magnitudes of the negative amounts in the window.
pub fn total_spent(txs: &[Transaction]) -> Decimal {
    txs.iter()
        .filter(|t| t.amount < Decimal::ZERO)
        .map(|t| -t.amount)
        .sum()
}

/// Sum of the positive amounts in the window.
pub fn total_income(txs: &[Transaction]) -> Decimal {
    txs.iter()
        .filter(|t| t.amount > Decimal::ZERO)
        .map(|t| t.amount)
        .sum()
}

/// Spending per category, keyed only by categories that come out net
/// negative over the window. The value is the magnitude of that category's
/// outflows, so a category where refunds outweigh purchases disappears
/// rather than showing a negative bar. Summing the map can therefore land
/// below `total_spent`.
pub fn category_breakdown(txs: &[Transaction]) -> BTreeMap<Category, Decimal> {
    let mut net: BTreeMap<Category, Decimal> = BTreeMap::new();
    let mut spent: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txs {
        *net.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
        if t.amount < Decimal::ZERO {
            *spent.entry(t.category).or_insert(Decimal::ZERO) += -t.amount;
        }
    }
    spent.retain(|cat, _| net.get(cat).is_some_and(|n| *n < Decimal::ZERO));
    spent
}

/// Running-balance points ordered by `(date, transaction_id)`, numbered
/// from 1 so the first entry of an account charts as step 1.
pub fn balance_series(txs: &[Transaction]) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = txs.iter().collect();
    ordered.sort_by_key(|t| (t.date, t.id));
    ordered
        .iter()
        .enumerate()
        .map(|(i, t)| BalancePoint {
            seq: i + 1,
            date: t.date,
            balance: t.balance,
        })
        .collect()
}

pub fn budget_utilization(monthly_limit: Decimal, spent: Decimal) -> BudgetUtilization {
    BudgetUtilization {
        monthly_limit,
        spent,
        remaining: monthly_limit - spent,
    }
}

pub fn summarize(txs: &[Transaction]) -> SpendingSummary {
    let total_spent = total_spent(txs);
    let total_income = total_income(txs);
    SpendingSummary {
        total_spent,
        total_income,
        net: total_income - total_spent,
        categories: category_breakdown(txs),
    }
}
