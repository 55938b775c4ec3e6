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
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Tab};
use crate::state::Slot;

const TABS: [(Tab, &str); 2] = [(Tab::Jobs, "Jobs"), (Tab::Executors, "Executors")];
const TAB_CONSTRAINTS: [Constraint; TABS.len()] =
    [Constraint::Percentage(100 / TABS.len() as u16); TABS.len()];

// Generated at https://manytools.org/hacker-tools/ascii-banner/
// Font: Shimrod
#[rustfmt::skip]
const BANNER: &str = r#"
,-.      .       ,--.                   ,-.      . .       .
|  \     |       |          o           |  )     | | o     |
|  | ,-: |-  ,-: |- . . ,-. . ,-. ;-.   |-<  ,-: | | . ,-. |-  ,-:
|  / | | |   | | |  | | `-. | | | | |   |  ) | | | | | `-. |   | |
`-'  `-` `-' `-` '  `-` `-' ' `-' ' '   `-'  `-` ' ' ' `-' `-' `-`
"#;

pub(super) fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Banner
            Constraint::Min(0),         // Tabs
            Constraint::Length(22),     // Scheduler status
        ])
        .split(area);

    render_banner(f, chunks[0]);

    let right = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]);
    render_tabs(f, right.split(chunks[1])[1], app);
    render_scheduler_status(f, right.split(chunks[2])[1], app);
}

fn render_banner(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(BANNER)
        .style(Style::default().bold())
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(TAB_CONSTRAINTS)
        .split(area);

    for (index, (tab, label)) in TABS.iter().enumerate() {
        let (first, rest) = label.split_at(1);
        let text = Text::from(Line::from(vec![
            Span::raw(first).underlined(),
            Span::raw(rest),
        ]));

        let style = if app.current_tab == *tab {
            Style::default().white()
        } else {
            Style::default().dark_gray()
        };
        let block = Block::default().borders(Borders::ALL).border_style(style);
        let paragraph = Paragraph::new(text)
            .style(style)
            .block(block)
            .alignment(Alignment::Center);

        f.render_widget(paragraph, chunks[index]);
    }
}

fn render_scheduler_status(f: &mut Frame, area: Rect, app: &App) {
    let (label, style) = match app.view_state.scheduler_state() {
        Slot::Loading => ("…".to_string(), Style::default().dark_gray()),
        Slot::Loaded(state) => (format!("● v{}", state.version), Style::default().green()),
        Slot::Failed(_) => ("● down".to_string(), Style::default().red()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().dark_gray())
        .title(" Scheduler ");
    let paragraph = Paragraph::new(label)
        .style(style)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
