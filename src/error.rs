// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the storage, period, and ledger layers.
///
/// Empty results are never errors: an absent budget or score reads as zero
/// and an empty ledger reads as `None`, so callers can always tell "nothing
/// there" apart from "the store failed".
#[derive(Debug, Error)]
pub enum Error {
    /// The backing store could not be reached or a read failed mid-flight.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] rusqlite::Error),

    /// A lookup key that must exist (user, row) is absent.
    #[error("{0} not found")]
    NotFound(String),

    /// The caller supplied something unusable: a bad period/year
    /// combination, a malformed row, an out-of-domain score.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The store rejected a write, or the write guard lost its race.
    #[error("write rejected: {0}")]
    Persistence(String),
}
