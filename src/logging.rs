// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise
/// only warnings, or debug output with `verbose`. Logs go to stderr.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "moneylens=debug"
        } else {
            "moneylens=warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
