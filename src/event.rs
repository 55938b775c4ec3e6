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
use std::time::Duration;

use crossterm::event::{EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::domain::{ExecutorsData, Job, SchedulerState};

/// The outcome of one fetch, keyed by the resource it belongs to.
#[derive(Clone, Debug)]
pub enum UiData {
    SchedulerState(Result<SchedulerState, String>),
    Jobs(Result<Vec<Job>, String>),
    Executors(Result<Vec<ExecutorsData>, String>),
}

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    DataLoaded {
        cycle: u64,
        data: UiData,
    },
    DownloadFinished {
        job_id: String,
        result: Result<PathBuf, String>,
    },
}

/// Multiplexes terminal input, ticks and background task completions into
/// a single stream consumed by the main loop.
#[derive(Debug)]
pub struct EventHandler {
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    reader: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let reader_tx = tx.clone();

        let reader = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                let interval_delay = interval.tick();
                let crossterm_event = reader.next().fuse();

                let event = tokio::select! {
                    _ = interval_delay => Event::Tick,
                    Some(Ok(evt)) = crossterm_event => match evt {
                        crossterm::event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        crossterm::event::Event::Resize(x, y) => Event::Resize(x, y),
                        _ => continue,
                    },
                };

                if reader_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { tx, rx, reader }
    }

    /// A sender background tasks use to report back to the main loop.
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
