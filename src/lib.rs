// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

pub mod config;
pub mod db;
pub mod processors;
pub mod utils;
