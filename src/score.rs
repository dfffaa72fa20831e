// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending score reads and the reward-tier step function.
//!
//! Scores are produced by an external scoring process and ingested through
//! `repo::record_score`; this module only reads them back and maps a score
//! to its reward tier.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::error::Error;
use crate::models::ScorePoint;
use crate::repo;

/// Reward tiers over the score domain `[0, 10]`. Each tier owns a
/// half-open slice so the breakpoints 4, 7 and 9 land in exactly one
/// tier; only `Gold` closes the top end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Base,
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::Base => "Base",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
        }
    }

    /// Benefits are cumulative: each tier keeps everything below it.
    pub fn benefit(self) -> &'static str {
        match self {
            Tier::Base => "standard account access",
            Tier::Bronze => "standard account access plus 1% cashback on debit spending",
            Tier::Silver => {
                "standard account access plus 1% cashback on debit spending \
                 and 2x reward points on recurring payments"
            }
            Tier::Gold => {
                "standard account access plus 1% cashback on debit spending, \
                 2x reward points on recurring payments, 5% cashback on debit \
                 spending and priority support"
            }
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn tier_for(score: Decimal) -> Tier {
    if score < Decimal::from(4) {
        Tier::Base
    } else if score < Decimal::from(7) {
        Tier::Bronze
    } else if score < Decimal::from(9) {
        Tier::Silver
    } else {
        Tier::Gold
    }
}

pub fn tier_benefit(score: Decimal) -> &'static str {
    tier_for(score).benefit()
}

/// Latest recorded score, zero for a user the scorer has not touched yet.
pub fn current_score(conn: &Connection, user_id: i64) -> Result<Decimal, Error> {
    repo::latest_score(conn, user_id)
}

pub fn history(conn: &Connection, user_id: i64) -> Result<Vec<ScorePoint>, Error> {
    repo::score_history(conn, user_id)
}
