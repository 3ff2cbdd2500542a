// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_manager::FixtureManagerApp;

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = FixtureManagerApp::parse();
    log::debug!("{:?}", app);
    app.exec()
}
