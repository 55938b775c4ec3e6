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

use crate::domain::{ExecutorsData, Job, SchedulerState};
use crate::event::UiData;

/// The lifecycle of one fetched resource.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Slot<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Slot::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Slot::Loading)
    }

    fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Slot::Loaded(value),
            Err(err) => Slot::Failed(err),
        }
    }
}

#[derive(Clone, Debug)]
struct Tracked<T> {
    /// The fetch cycle which last wrote `slot`.
    cycle: Option<u64>,
    slot: Slot<T>,
}

impl<T> Tracked<T> {
    fn new() -> Self {
        Self {
            cycle: None,
            slot: Slot::Loading,
        }
    }

    fn update(&mut self, cycle: u64, result: Result<T, String>) -> bool {
        if self.cycle.is_some_and(|current| cycle < current) {
            tracing::debug!(
                "Ignoring result of fetch cycle {cycle}, slot already holds cycle {:?}",
                self.cycle
            );
            return false;
        }
        self.cycle = Some(cycle);
        self.slot = Slot::from_result(result);
        true
    }
}

/// The three independently populated pieces of fetched data driving the UI.
///
/// Every slot starts out as [`Slot::Loading`] and is only written by the
/// completion of a fetch, through [`ViewState::apply`].
#[derive(Clone, Debug)]
pub struct ViewState {
    scheduler_state: Tracked<SchedulerState>,
    jobs: Tracked<Vec<Job>>,
    executors: Tracked<Vec<ExecutorsData>>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            scheduler_state: Tracked::new(),
            jobs: Tracked::new(),
            executors: Tracked::new(),
        }
    }

    pub fn scheduler_state(&self) -> &Slot<SchedulerState> {
        &self.scheduler_state.slot
    }

    pub fn jobs(&self) -> &Slot<Vec<Job>> {
        &self.jobs.slot
    }

    pub fn executors(&self) -> &Slot<Vec<ExecutorsData>> {
        &self.executors.slot
    }

    /// Stores a fetch result in its slot. Returns `false` when the result
    /// belongs to an older fetch cycle than the one already stored.
    pub fn apply(&mut self, cycle: u64, data: UiData) -> bool {
        match data {
            UiData::SchedulerState(result) => self.scheduler_state.update(cycle, result),
            UiData::Jobs(result) => self.jobs.update(cycle, result),
            UiData::Executors(result) => self.executors.update(cycle, result),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
