// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod orders;
pub mod transactions;
pub mod stats;
pub mod dashboard;
pub mod backups;
pub mod settings;
pub mod doctor;
