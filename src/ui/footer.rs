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

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::widgets::Paragraph;

use crate::app::App;

const KEY_BINDINGS: &str = "[j] Jobs, [e] Executors, [←/→] page, [↑/↓] select, [s/S] sort, \
                            [D] download DOT, [r] refresh, [?/h] help, [q/Esc] quit";

pub(super) fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    if let Some(status) = &app.status {
        let style = if status.is_error {
            Style::default().red()
        } else {
            Style::default().green()
        };
        f.render_widget(Paragraph::new(status.text.as_str()).style(style), chunks[0]);
    } else if is_fetching(app) {
        let paragraph = Paragraph::new("Loading…").style(Style::default().dark_gray());
        f.render_widget(paragraph, chunks[0]);
    }

    let paragraph = Paragraph::new(KEY_BINDINGS)
        .style(Style::default().bold())
        .centered();
    f.render_widget(paragraph, chunks[1]);
}

fn is_fetching(app: &App) -> bool {
    let state = &app.view_state;
    state.scheduler_state().is_loading()
        || state.jobs().is_loading()
        || state.executors().is_loading()
}
