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

//! Cell rendering strategies a [`super::ColumnSpec`] can opt into.

use chrono::DateTime;
use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
};
use serde_json::Value;

/// Turns the value a column's accessor points at into a styled line.
pub type CellRenderer = fn(&Value) -> Line<'static>;

const PROGRESS_GLYPHS: [&str; 5] = ["○", "◔", "◑", "◕", "●"];
const PROGRESS_COLOR: Color = Color::Rgb(246, 173, 85);

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

pub fn default_cell(value: &Value) -> Line<'static> {
    Line::from(display_value(value))
}

pub fn link_cell(value: &Value) -> Line<'static> {
    Line::from(Span::styled(
        display_value(value),
        Style::new().fg(Color::Cyan).underlined(),
    ))
}

/// A circular indicator followed by the `p%` label.
pub fn progress_cell(value: &Value) -> Line<'static> {
    let percent = value.as_f64().unwrap_or(0.0).clamp(0.0, 100.0);
    Line::from(vec![
        Span::styled(progress_glyph(percent), Style::new().fg(PROGRESS_COLOR)),
        Span::raw(" "),
        Span::raw(format_percent(percent)),
    ])
}

/// The stop control is display only. The download control is bound to `D`
/// on the selected row.
pub fn actions_cell(value: &Value) -> Line<'static> {
    Line::from(vec![
        Span::styled("■", Style::new().fg(Color::Red)),
        Span::raw("  "),
        Span::styled(
            format!("⤓ {}.dot", display_value(value)),
            Style::new().fg(Color::Blue),
        ),
    ])
}

/// Epoch millis rendered as a UTC timestamp.
pub fn timestamp_cell(value: &Value) -> Line<'static> {
    let text = value
        .as_i64()
        .map(|millis| {
            DateTime::from_timestamp_millis(millis)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "Invalid Date".to_string())
        })
        .unwrap_or_else(|| "-".to_string());
    Line::from(text)
}

fn progress_glyph(percent: f64) -> &'static str {
    let index = if percent <= 0.0 {
        0
    } else if percent >= 100.0 {
        PROGRESS_GLYPHS.len() - 1
    } else {
        ((percent / 25.0).ceil() as usize).clamp(1, PROGRESS_GLYPHS.len() - 2)
    };
    PROGRESS_GLYPHS[index]
}

fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{percent:.0}%")
    } else {
        format!("{percent}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn progress_label_contains_percentage() {
        for p in 0..=100 {
            let rendered = text(&progress_cell(&json!(p)));
            assert!(rendered.contains(&format!("{p}%")), "{rendered} for {p}");
        }
    }

    #[test]
    fn progress_is_clamped_and_keeps_fractions() {
        assert!(text(&progress_cell(&json!(150))).ends_with("100%"));
        assert!(text(&progress_cell(&json!(-3))).ends_with(" 0%"));
        assert!(text(&progress_cell(&json!(42.5))).ends_with("42.5%"));
    }

    #[test]
    fn progress_glyph_follows_quarters() {
        assert_eq!(progress_glyph(0.0), "○");
        assert_eq!(progress_glyph(10.0), "◔");
        assert_eq!(progress_glyph(42.0), "◑");
        assert_eq!(progress_glyph(99.0), "◕");
        assert_eq!(progress_glyph(100.0), "●");
    }

    #[test]
    fn default_cell_stringifies() {
        assert_eq!(text(&default_cell(&json!("RUNNING"))), "RUNNING");
        assert_eq!(text(&default_cell(&json!(3))), "3");
        assert_eq!(text(&default_cell(&Value::Null)), "");
    }

    #[test]
    fn actions_cell_names_the_dot_file() {
        assert_eq!(text(&actions_cell(&json!("j1"))), "■  ⤓ j1.dot");
    }

    #[test]
    fn timestamp_cell_formats_millis() {
        assert_eq!(
            text(&timestamp_cell(&json!(0))),
            "1970-01-01 00:00:00 UTC"
        );
        assert_eq!(text(&timestamp_cell(&Value::Null)), "-");
    }
}
