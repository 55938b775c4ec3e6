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

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
};
use serde_json::Value;

use crate::app::App;
use crate::domain::{Job, JobStatus};
use crate::ui::table::{ColumnSpec, actions_cell, display_value, link_cell, progress_cell};

pub const ACTIONS_COLUMN_ID: &str = "action_cell";

pub fn job_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Job ID", "job_id").with_cell(link_cell),
        ColumnSpec::new("Status", "status").with_cell(status_cell),
        ColumnSpec::new("Number of Stages", "num_stages").with_width(Constraint::Length(18)),
        ColumnSpec::new("Progress", "percent_complete")
            .with_cell(progress_cell)
            .with_width(Constraint::Length(10)),
        ColumnSpec::new("Actions", "job_id")
            .with_id(ACTIONS_COLUMN_ID)
            .with_cell(actions_cell),
    ]
}

/// The status text as reported, colored by its classification.
fn status_cell(value: &Value) -> Line<'static> {
    let text = display_value(value);
    let style = match JobStatus::classify(&text) {
        JobStatus::Queued => Style::new().magenta(),
        JobStatus::Running => Style::new().light_blue(),
        JobStatus::Completed => Style::new().green(),
        JobStatus::Failed => Style::new().red(),
        JobStatus::Unknown => Style::new().dark_gray(),
    };
    Line::from(Span::styled(text, style))
}

pub fn render_jobs(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.view_state.jobs().loaded() {
        Some(jobs) => format!("Queries ({})", count_by_state(jobs)),
        None => "Queries".to_string(),
    };

    app.jobs_table.render(
        f,
        area,
        &title,
        app.view_state.jobs(),
        &app.jobs_state,
        "No jobs",
    );
}

fn count_by_state(jobs: &[Job]) -> String {
    let count = |state: JobStatus| jobs.iter().filter(|job| job.state() == state).count();
    format!(
        "{} running, {} queued, {} completed, {} failed",
        count(JobStatus::Running),
        count(JobStatus::Queued),
        count(JobStatus::Completed),
        count(JobStatus::Failed)
    )
}
