// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

mod app;
mod domain;
mod download;
mod error;
mod event;
mod fetcher;
mod http_client;
mod infrastructure;
mod state;
mod terminal;
mod ui;

use std::path::{Path, PathBuf};
use std::time::Duration;

use app::App;
use clap::Parser;
use color_eyre::Result;
use event::EventHandler;
use infrastructure::{APP_NAME, Settings};
use terminal::TerminalGuard;

use crate::error::TuiError;

pub type TuiResult<OK> = std::result::Result<OK, TuiError>;

#[derive(Debug, Parser, PartialEq)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(
        short,
        long,
        help = "Ballista scheduler URL, e.g. http://localhost:50050"
    )]
    url: Option<String>,

    #[clap(
        short,
        long,
        help = "Configuration file overriding the defaults",
        value_parser(parse_valid_file)
    )]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut settings = Settings::new(args.config.as_deref())?;
    if let Some(url) = args.url {
        settings.scheduler.url = url;
    }

    let log_file = infrastructure::init_file_logger(&settings.logging, APP_NAME)?;
    tracing::info!(
        "Starting the Ballista dashboard against {} (log file: {})",
        settings.scheduler.url,
        log_file.display()
    );

    let mut events = EventHandler::new(Duration::from_millis(settings.dashboard.tick_rate));
    let mut app = App::new(settings)?;
    app.set_event_tx(events.sender());

    let mut guard = TerminalGuard::enter()?;
    app.mount();

    loop {
        guard.terminal.draw(|f| ui::render(f, &app))?;

        match events.next().await {
            Some(event) => app.handle_event(event)?,
            None => break,
        }

        if app.should_quit {
            tracing::info!("Stopping the Ballista dashboard");
            break;
        }
    }

    Ok(())
}

fn parse_valid_file(file: &str) -> std::result::Result<PathBuf, String> {
    if Path::new(file).is_file() {
        Ok(PathBuf::from(file))
    } else {
        Err(format!("Invalid file '{file}'"))
    }
}
