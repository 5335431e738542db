// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Lookout demos.

use lookout_layers::ElementUpdate;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Prints element updates under a heading, one per line.
pub fn print_updates(heading: &str, updates: &[ElementUpdate]) {
    println!("{heading}");
    if updates.is_empty() {
        println!("  (nothing)");
    }
    for update in updates {
        println!("  {update}");
    }
}
