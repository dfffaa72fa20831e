// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod users;
pub mod transactions;
pub mod budgets;
pub mod scores;
pub mod dashboard;
pub mod reports;
pub mod importer;
pub mod exporter;
pub mod doctor;
