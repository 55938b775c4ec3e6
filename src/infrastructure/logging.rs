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

use std::path::PathBuf;

use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use super::config::LoggingSettings;

/// Initializes a tracing subscriber that logs to a file, since stdout is
/// owned by the terminal UI.
///
/// # Arguments
///
/// * `settings` - Log directory and default level (e.g. "info", "debug")
/// * `log_file_prefix` - Prefix for the log file name (e.g. "ballista-dashboard")
///
/// # Returns
///
/// The path of the log file, or an error if the file could not be created
/// or the level is not a valid filter directive.
pub fn init_file_logger(
    settings: &LoggingSettings,
    log_file_prefix: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(&settings.dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    let path = settings.dir.join(format!("{log_file_prefix}.log"));
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file)
        .with_ansi(false)
        .try_init();

    Ok(path)
}
