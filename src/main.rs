// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneylens::{cli, commands, db, logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_flag("verbose"));
    commands::dispatch(&matches, db::open_or_init)
}
