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

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, domain::SchedulerState, state::Slot, ui::table::render_skeleton};

pub fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let scheduler_url = app.http_client.scheduler_url();
    let block = Block::default().borders(Borders::ALL).title(" Scheduler ");

    match app.view_state.scheduler_state() {
        Slot::Loading => render_skeleton(f, area, block),
        Slot::Failed(err) => render_scheduler_down(f, area, scheduler_url, err),
        Slot::Loaded(state) => {
            render_scheduler_up(f, area, block, scheduler_url, state, Utc::now())
        }
    }
}

fn render_scheduler_down(f: &mut Frame, area: Rect, scheduler_url: &str, err: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::new().red())
        .title(" Scheduler down ");
    let paragraph = Paragraph::new(vec![
        field("URL", scheduler_url.to_string()),
        field("Error", err.to_string()),
    ])
    .block(block);
    f.render_widget(paragraph, area);
}

fn render_scheduler_up(
    f: &mut Frame,
    area: Rect,
    block: Block<'_>,
    scheduler_url: &str,
    state: &SchedulerState,
    now: DateTime<Utc>,
) {
    let started = DateTime::from_timestamp_millis(state.started);
    let started_at = started
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string());
    let uptime = started
        .map(|dt| format_uptime(now.signed_duration_since(dt)))
        .unwrap_or_else(|| "-".to_string());

    let paragraph = Paragraph::new(vec![
        field("URL", scheduler_url.to_string()),
        field("Version", state.version.clone()),
        field("Started at", started_at),
        field("Uptime", uptime),
    ])
    .block(block);
    f.render_widget(paragraph, area);
}

fn field(name: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<12}"), Style::new().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn format_uptime(elapsed: chrono::TimeDelta) -> String {
    let minutes = elapsed.num_minutes().max(0);
    let (days, hours, minutes) = (minutes / 1440, (minutes / 60) % 24, minutes % 60);
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}
