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

mod executors;
mod footer;
mod header;
mod jobs;
mod summary;
pub mod table;

use crate::app::{App, Tab};
use executors::render_executors;
pub use executors::executor_columns;
use footer::render_footer;
use header::render_header;
use jobs::render_jobs;
pub use jobs::job_columns;
use summary::render_summary;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Lays out the whole screen from the current application state.
pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Header
            Constraint::Length(7), // Summary
            Constraint::Min(0),    // Tab content
            Constraint::Length(2), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_summary(f, chunks[1], app);
    render_tab(f, app, chunks[2]);
    render_footer(f, chunks[3], app);

    // Overlay help if active
    if app.show_help {
        render_help_overlay(f);
    }
}

fn render_tab(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(Clear, area);
    match app.current_tab {
        Tab::Jobs => render_jobs(f, area, app),
        Tab::Executors => render_executors(f, area, app),
    }
}

fn render_help_overlay(f: &mut Frame) {
    let area = centered_rect(40, 60, f.area());

    f.render_widget(Clear, area);

    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().fg(Color::Yellow))])
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "KEYBOARD SHORTCUTS",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("  Navigation"),
        Line::from("  j / e     Show Jobs / Executors"),
        Line::from("  Tab       Switch tab"),
        Line::from("  ↑ ↓       Select row"),
        Line::from("  ←/p →/n   Previous / next page"),
        Line::from("  Home End  First / last page"),
        Line::from(""),
        section("  Table"),
        Line::from("  s         Sort by next column"),
        Line::from("  S         Reverse sort order"),
        Line::from("  D         Download DOT plan of selected job"),
        Line::from(""),
        section("  General"),
        Line::from("  r         Refresh data"),
        Line::from("  ?/h       Show this help"),
        Line::from("  q/Esc     Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let para = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(para, area);
}

// Helper functions

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
pub(crate) mod test_utils {
    use ratatui::{Frame, Terminal, backend::TestBackend};

    use crate::app::App;
    use crate::infrastructure::Settings;

    pub fn test_app() -> App {
        App::new(Settings::with_overrides("").unwrap()).unwrap()
    }

    /// Draws into an off-screen terminal and returns its rows as text.
    pub fn draw<F: FnOnce(&mut Frame)>(width: u16, height: u16, draw: F) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    pub fn count_lines_containing(lines: &[String], needle: &str) -> usize {
        lines.iter().filter(|line| line.contains(needle)).count()
    }
}
