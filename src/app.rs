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
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    TuiResult,
    download::spawn_download,
    event::Event,
    fetcher::spawn_fetch_cycle,
    http_client::HttpClient,
    infrastructure::Settings,
    state::ViewState,
    ui::table::{DataTable, DataTableState},
    ui::{executor_columns, job_columns},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Jobs,
    Executors,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub should_quit: bool,
    pub event_tx: Option<UnboundedSender<Event>>,
    pub current_tab: Tab,

    pub view_state: ViewState,
    pub jobs_table: DataTable,
    pub jobs_state: DataTableState,
    pub executors_table: DataTable,
    pub executors_state: DataTableState,

    // Help panel
    pub show_help: bool,
    pub status: Option<StatusMessage>,

    pub http_client: Arc<HttpClient>,
    download_dir: PathBuf,
    refresh_interval: Option<Duration>,
    last_refresh: Instant,
    fetch_cycle: u64,
}

impl App {
    pub fn new(config: Settings) -> TuiResult<Self> {
        let page_size = config.dashboard.page_size;
        let refresh_interval = match config.dashboard.refresh_interval {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        };

        Ok(Self {
            should_quit: false,
            event_tx: None,
            current_tab: Tab::Jobs,
            view_state: ViewState::new(),
            jobs_table: DataTable::new(job_columns(), page_size)?,
            jobs_state: DataTableState::default(),
            executors_table: DataTable::new(executor_columns(), page_size)?,
            executors_state: DataTableState::default(),
            show_help: false,
            status: None,
            http_client: Arc::new(HttpClient::new(&config)?),
            download_dir: config.downloads.resolve_dir(),
            refresh_interval,
            last_refresh: Instant::now(),
            fetch_cycle: 0,
        })
    }

    pub fn set_event_tx(&mut self, tx: UnboundedSender<Event>) {
        self.event_tx = Some(tx);
    }

    /// Issues the first fetch cycle.
    pub fn mount(&mut self) {
        self.start_fetch_cycle();
    }

    #[cfg(test)]
    pub fn fetch_cycle(&self) -> u64 {
        self.fetch_cycle
    }

    pub fn handle_event(&mut self, event: Event) -> TuiResult<()> {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Tick => self.on_tick(),
            Event::Resize(_, _) => {}
            Event::DataLoaded { cycle, data } => {
                if self.view_state.apply(cycle, data) {
                    self.clamp_tables();
                }
            }
            Event::DownloadFinished { job_id, result } => {
                self.status = Some(match result {
                    Ok(path) => StatusMessage {
                        text: format!("Saved the DOT plan of job {job_id} to {}", path.display()),
                        is_error: false,
                    },
                    Err(err) => StatusMessage {
                        text: format!("Downloading the DOT plan of job {job_id} failed: {err}"),
                        is_error: true,
                    },
                });
            }
        }
        Ok(())
    }

    pub fn on_tick(&mut self) {
        if let Some(interval) = self.refresh_interval {
            if self.last_refresh.elapsed() >= interval {
                self.refresh();
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Help panel takes priority
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') | KeyCode::Char('h') => {
                self.show_help = true;
            }
            KeyCode::Char('j') => self.current_tab = Tab::Jobs,
            KeyCode::Char('e') => self.current_tab = Tab::Executors,
            KeyCode::Tab | KeyCode::BackTab => {
                self.current_tab = match self.current_tab {
                    Tab::Jobs => Tab::Executors,
                    Tab::Executors => Tab::Jobs,
                };
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('D') if self.current_tab == Tab::Jobs => self.download_selected_job(),
            _ => self.on_table_key(key.code),
        }
    }

    fn on_table_key(&mut self, code: KeyCode) {
        let total = self.current_total();
        let (table, state) = match self.current_tab {
            Tab::Jobs => (&self.jobs_table, &mut self.jobs_state),
            Tab::Executors => (&self.executors_table, &mut self.executors_state),
        };

        match code {
            KeyCode::Up => state.select_previous(),
            KeyCode::Down => state.select_next(table.rows_on_page(total, state.page_index())),
            KeyCode::Right | KeyCode::Char('n') => state.next_page(table.page_count(total)),
            KeyCode::Left | KeyCode::Char('p') => state.previous_page(),
            KeyCode::Home => state.first_page(),
            KeyCode::End => state.last_page(table.page_count(total)),
            KeyCode::Char('s') => state.cycle_sort(table.columns().len()),
            KeyCode::Char('S') => state.toggle_sort_direction(),
            _ => {}
        }
    }

    fn current_total(&self) -> usize {
        match self.current_tab {
            Tab::Jobs => self.view_state.jobs().loaded().map_or(0, Vec::len),
            Tab::Executors => self.view_state.executors().loaded().map_or(0, Vec::len),
        }
    }

    fn clamp_tables(&mut self) {
        let jobs = self.view_state.jobs().loaded().map_or(0, Vec::len);
        let executors = self.view_state.executors().loaded().map_or(0, Vec::len);
        self.jobs_table.clamp_state(&mut self.jobs_state, jobs);
        self.executors_table
            .clamp_state(&mut self.executors_state, executors);
    }

    fn refresh(&mut self) {
        self.fetch_cycle += 1;
        self.start_fetch_cycle();
    }

    fn start_fetch_cycle(&mut self) {
        self.last_refresh = Instant::now();
        match &self.event_tx {
            Some(tx) => {
                spawn_fetch_cycle(self.http_client.clone(), tx.clone(), self.fetch_cycle);
            }
            None => {
                tracing::warn!(
                    "Fetch cycle {} requested but event_tx is not set",
                    self.fetch_cycle
                );
            }
        }
    }

    fn download_selected_job(&mut self) {
        let selected = self
            .view_state
            .jobs()
            .loaded()
            .and_then(|jobs| self.jobs_table.selected_row(jobs, &self.jobs_state))
            .map(|job| job.job_id.clone());

        let Some(job_id) = selected else {
            self.status = Some(StatusMessage {
                text: "No job selected".to_string(),
                is_error: true,
            });
            return;
        };

        match &self.event_tx {
            Some(tx) => {
                self.status = Some(StatusMessage {
                    text: format!("Downloading the DOT plan of job {job_id}..."),
                    is_error: false,
                });
                spawn_download(
                    self.http_client.clone(),
                    tx.clone(),
                    job_id,
                    self.download_dir.clone(),
                );
            }
            None => {
                tracing::warn!("Download of job {job_id} requested but event_tx is not set");
            }
        }
    }
}
