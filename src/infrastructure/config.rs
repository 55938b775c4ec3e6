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

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;

pub const APP_NAME: &str = "ballista-dashboard";

#[derive(Clone, Debug, Deserialize)]
pub struct SchedulerSettings {
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HttpSettings {
    /// Request timeout. In millis
    pub timeout: u64,
    /// Method used for the /api/state, /api/jobs and /api/executors requests
    pub list_method: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DashboardSettings {
    pub page_size: usize,
    /// In millis
    pub tick_rate: u64,
    /// Automatic refresh period in millis, 0 disables it
    pub refresh_interval: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DownloadSettings {
    /// Where DOT plans are saved. Falls back to the user's download directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl DownloadSettings {
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingSettings {
    pub dir: PathBuf,
    pub level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub scheduler: SchedulerSettings,
    pub http: HttpSettings,
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub downloads: DownloadSettings,
    pub logging: LoggingSettings,
}

const DEFAULT_CONFIG: &str = r#"
scheduler:
  url: http://localhost:50050

http:
  timeout: 2000
  list_method: POST

dashboard:
  page_size: 10
  tick_rate: 250
  refresh_interval: 0

logging:
  dir: logs
  level: info
"#;

impl Settings {
    /// Loads the settings, each layer overriding the previous one:
    /// built-in defaults, the user's config file, `config_file` and finally
    /// `BALLISTA_DASHBOARD__<SECTION>__<KEY>` environment variables.
    pub fn new(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults();

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(APP_NAME).join("config");
            builder = builder.add_source(
                File::with_name(&user_config.display().to_string()).required(false),
            );
        }

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        // E.g. `BALLISTA_DASHBOARD__SCHEDULER__URL=http://localhost:50051`
        // would set the scheduler url key
        builder
            .add_source(
                Environment::with_prefix("BALLISTA_DASHBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> config::ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Yaml))
    }

    #[cfg(test)]
    pub(crate) fn with_overrides(yaml: &str) -> Result<Self, ConfigError> {
        Self::defaults()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()
    }
}
