// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
}

/// One ledger row. `balance` is the account balance immediately after this
/// transaction; ordering rows by `(date, id)` ascending must reproduce each
/// balance as the previous balance plus this row's `amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "transaction_type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub merchant: String,
    pub balance: Decimal,
}

/// A monthly spending limit. Budgets are append-only; the row with the
/// greatest `(date, id)` is the active one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub monthly_limit: Decimal,
    pub date: NaiveDate,
}

/// One point of a user's spending-score series, written by the external
/// scoring process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePoint {
    pub updated_at: NaiveDateTime,
    pub score: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Credit,
    Debit,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "Credit",
            TransactionType::Debit => "Debit",
            TransactionType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "Credit" => Ok(TransactionType::Credit),
            "Debit" => Ok(TransactionType::Debit),
            "Transfer" => Ok(TransactionType::Transfer),
            other => Err(Error::InvalidInput(format!(
                "unknown transaction type '{}' (use Credit|Debit|Transfer)",
                other
            ))),
        }
    }
}

/// Spending tags offered by the data-entry grid. "Other" is a tag in its own
/// right, not a sink for unknown text: labels that match nothing fail to
/// parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Rent,
    Groceries,
    #[serde(rename = "Dining Out")]
    DiningOut,
    Entertainment,
    Utilities,
    Transportation,
    Salary,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Groceries => "Groceries",
            Category::DiningOut => "Dining Out",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Transportation => "Transportation",
            Category::Salary => "Salary",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "Rent" => Ok(Category::Rent),
            "Groceries" => Ok(Category::Groceries),
            "Dining Out" => Ok(Category::DiningOut),
            "Entertainment" => Ok(Category::Entertainment),
            "Utilities" => Ok(Category::Utilities),
            "Transportation" => Ok(Category::Transportation),
            "Salary" => Ok(Category::Salary),
            "Other" => Ok(Category::Other),
            other => Err(Error::InvalidInput(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Account Transfer")]
    AccountTransfer,
    #[serde(rename = "Direct Deposit")]
    DirectDeposit,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "ACH Transfer")]
    AchTransfer,
    #[serde(rename = "Online Payment")]
    OnlinePayment,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::AccountTransfer => "Account Transfer",
            PaymentMethod::DirectDeposit => "Direct Deposit",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::AchTransfer => "ACH Transfer",
            PaymentMethod::OnlinePayment => "Online Payment",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "Account Transfer" => Ok(PaymentMethod::AccountTransfer),
            "Direct Deposit" => Ok(PaymentMethod::DirectDeposit),
            "Debit Card" => Ok(PaymentMethod::DebitCard),
            "Credit Card" => Ok(PaymentMethod::CreditCard),
            "ACH Transfer" => Ok(PaymentMethod::AchTransfer),
            "Online Payment" => Ok(PaymentMethod::OnlinePayment),
            other => Err(Error::InvalidInput(format!(
                "unknown payment method '{}'",
                other
            ))),
        }
    }
}
