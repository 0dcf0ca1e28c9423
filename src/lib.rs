// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod backup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod settings;
pub mod stats;
pub mod utils;
pub mod visibility;

pub use error::{LedgerError, LedgerResult};
