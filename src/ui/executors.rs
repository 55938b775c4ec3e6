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
};

use crate::app::App;
use crate::ui::table::{ColumnSpec, timestamp_cell};

pub fn executor_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Executor ID", "id"),
        ColumnSpec::new("Host", "host"),
        ColumnSpec::new("Port", "port").with_width(Constraint::Length(8)),
        ColumnSpec::new("Last Seen", "last_seen")
            .with_cell(timestamp_cell)
            .with_width(Constraint::Length(25)),
    ]
}

pub fn render_executors(f: &mut Frame, area: Rect, app: &App) {
    app.executors_table.render(
        f,
        area,
        "Executors",
        app.view_state.executors(),
        &app.executors_state,
        "No live executors",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExecutorsData;
    use crate::event::UiData;
    use crate::ui::table::{SKELETON_ROWS, SKELETON_SYMBOL};
    use crate::ui::test_utils::{count_lines_containing, draw, test_app};

    fn render(app: &App) -> Vec<String> {
        draw(100, 12, |f| {
            let area = f.area();
            render_executors(f, area, app)
        })
    }

    #[test]
    fn loading_executors_render_placeholders() {
        let lines = render(&test_app());
        assert_eq!(count_lines_containing(&lines, SKELETON_SYMBOL), SKELETON_ROWS);
    }

    #[test]
    fn executors_are_listed() {
        let mut app = test_app();
        app.view_state.apply(
            0,
            UiData::Executors(Ok(vec![
                ExecutorsData {
                    id: "exec-a".to_string(),
                    host: "10.0.0.1".to_string(),
                    port: 50051,
                    last_seen: Some(0),
                },
                ExecutorsData {
                    id: "exec-b".to_string(),
                    host: "10.0.0.2".to_string(),
                    port: 50052,
                    last_seen: None,
                },
            ])),
        );

        let lines = render(&app);
        assert_eq!(count_lines_containing(&lines, "exec-"), 2);
        assert_eq!(count_lines_containing(&lines, "1970-01-01 00:00:00 UTC"), 1);
        assert_eq!(count_lines_containing(&lines, "50052"), 1);
    }

    #[test]
    fn no_executors() {
        let mut app = test_app();
        app.view_state.apply(0, UiData::Executors(Ok(vec![])));
        let lines = render(&app);
        assert_eq!(count_lines_containing(&lines, "No live executors"), 1);
    }
}
