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

//! A sortable, paginated table driven by a declarative column schema.
//!
//! The table knows nothing about the rows it displays: every row exposes
//! its fields through [`TableRow`], and every column names the field it
//! shows through its `accessor`. Paging and sorting happen on the already
//! fetched data set.

mod cells;

use std::cmp::Ordering;
use std::collections::HashSet;

pub use cells::{
    CellRenderer, actions_cell, default_cell, display_value, link_cell, progress_cell,
    timestamp_cell,
};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, Wrap},
};
use serde_json::Value;

use crate::{TuiResult, error::TuiError, state::Slot};

/// Number of placeholder rows shown while the data is still loading.
pub const SKELETON_ROWS: usize = 5;
pub const SKELETON_SYMBOL: &str = "▒";

pub trait TableRow {
    /// The raw value stored under `accessor`, [`Value::Null`] if there is none.
    fn value(&self, accessor: &str) -> Value;
}

impl TableRow for Value {
    fn value(&self, accessor: &str) -> Value {
        self.get(accessor).cloned().unwrap_or(Value::Null)
    }
}

#[derive(Clone, Debug)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub accessor: &'static str,
    /// Disambiguates columns sharing an accessor
    pub id: Option<&'static str>,
    pub cell: Option<CellRenderer>,
    pub width: Constraint,
}

impl ColumnSpec {
    pub fn new(header: &'static str, accessor: &'static str) -> Self {
        Self {
            header,
            accessor,
            id: None,
            cell: None,
            width: Constraint::Fill(1),
        }
    }

    pub fn with_id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_cell(mut self, cell: CellRenderer) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn with_width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    pub fn id(&self) -> &'static str {
        self.id.unwrap_or(self.accessor)
    }

    pub fn render_cell<R: TableRow>(&self, row: &R) -> Line<'static> {
        let value = row.value(self.accessor);
        match self.cell {
            Some(cell) => cell(&value),
            None => default_cell(&value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortBy {
    pub column: usize,
    pub descending: bool,
}

/// Paging, sorting and selection of one table. Lives as long as the view
/// owning the table, not the data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataTableState {
    page_index: usize,
    selected: usize,
    sort: Option<SortBy>,
}

impl DataTableState {
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Index of the highlighted row within the current page.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn sort(&self) -> Option<SortBy> {
        self.sort
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page_index + 1 < page_count {
            self.page_index += 1;
            self.selected = 0;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page_index > 0 {
            self.page_index -= 1;
            self.selected = 0;
        }
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
        self.selected = 0;
    }

    pub fn last_page(&mut self, page_count: usize) {
        self.page_index = page_count.saturating_sub(1);
        self.selected = 0;
    }

    pub fn select_next(&mut self, rows_on_page: usize) {
        if self.selected + 1 < rows_on_page {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Unsorted, then ascending by each column in turn, then unsorted again.
    pub fn cycle_sort(&mut self, column_count: usize) {
        self.sort = match self.sort {
            None if column_count > 0 => Some(SortBy {
                column: 0,
                descending: false,
            }),
            Some(SortBy { column, .. }) if column + 1 < column_count => Some(SortBy {
                column: column + 1,
                descending: false,
            }),
            _ => None,
        };
        self.first_page();
    }

    pub fn toggle_sort_direction(&mut self) {
        if let Some(sort) = self.sort.as_mut() {
            sort.descending = !sort.descending;
            self.first_page();
        }
    }

    /// Keeps page and selection in range after the data changed size.
    pub fn clamp(&mut self, page_count: usize, rows_on_last_page: usize) {
        let last_page = page_count.saturating_sub(1);
        if self.page_index > last_page {
            self.page_index = last_page;
            self.selected = rows_on_last_page.saturating_sub(1);
        }
    }

    fn clamp_selection(&mut self, rows_on_page: usize) {
        self.selected = self.selected.min(rows_on_page.saturating_sub(1));
    }
}

#[derive(Clone, Debug)]
pub struct DataTable {
    columns: Vec<ColumnSpec>,
    page_size: usize,
}

impl DataTable {
    pub fn new(columns: Vec<ColumnSpec>, page_size: usize) -> TuiResult<Self> {
        let mut ids = HashSet::new();
        for column in &columns {
            if !ids.insert(column.id()) {
                return Err(TuiError::DuplicateColumnId(column.id().to_string()));
            }
        }

        Ok(Self {
            columns,
            page_size: page_size.max(1),
        })
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn rows_on_page(&self, total: usize, page_index: usize) -> usize {
        total
            .saturating_sub(page_index * self.page_size)
            .min(self.page_size)
    }

    /// Re-validates `state` against a data set of `total` rows.
    pub fn clamp_state(&self, state: &mut DataTableState, total: usize) {
        let page_count = self.page_count(total);
        let last_page = page_count.saturating_sub(1);
        state.clamp(page_count, self.rows_on_page(total, last_page));
        state.clamp_selection(self.rows_on_page(total, state.page_index));
    }

    /// The rows of the current page, after sorting the whole data set.
    pub fn page<'a, R: TableRow>(&self, data: &'a [R], state: &DataTableState) -> Vec<&'a R> {
        let mut rows: Vec<&R> = data.iter().collect();

        if let Some(SortBy { column, descending }) = state.sort {
            if let Some(column) = self.columns.get(column) {
                rows.sort_by(|a, b| {
                    let ordering =
                        compare_values(&a.value(column.accessor), &b.value(column.accessor));
                    if descending { ordering.reverse() } else { ordering }
                });
            }
        }

        rows.into_iter()
            .skip(state.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// The row currently highlighted, if any.
    pub fn selected_row<'a, R: TableRow>(
        &self,
        data: &'a [R],
        state: &DataTableState,
    ) -> Option<&'a R> {
        self.page(data, state).get(state.selected).copied()
    }

    pub fn render<R: TableRow>(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        data: &Slot<Vec<R>>,
        state: &DataTableState,
        empty_message: &str,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "));

        match data {
            Slot::Loading => render_skeleton(f, area, block),
            Slot::Failed(err) => render_failure(f, area, block, err),
            Slot::Loaded(rows) if rows.is_empty() => {
                let paragraph = Paragraph::new(empty_message)
                    .block(block.border_style(Style::new().gray()))
                    .centered();
                f.render_widget(paragraph, area);
            }
            Slot::Loaded(rows) => self.render_rows(f, area, block, rows, state),
        }
    }

    fn render_rows<R: TableRow>(
        &self,
        f: &mut Frame,
        area: Rect,
        block: Block<'_>,
        rows: &[R],
        state: &DataTableState,
    ) {
        let chunks = Layout::vertical([
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Pager
        ])
        .split(area);

        let header = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| Cell::from(self.header_label(index, column, state)))
            .collect::<Row>()
            .style(Style::default().fg(Color::Yellow).bold())
            .height(1);

        let page_rows = self.page(rows, state).into_iter().enumerate().map(|(i, row)| {
            let color = match i % 2 {
                0 => Color::Reset,
                _ => Color::Black,
            };
            self.columns
                .iter()
                .map(|column| Cell::from(column.render_cell(row)))
                .collect::<Row>()
                .style(Style::default().bg(color))
        });

        let table = Table::new(page_rows, self.columns.iter().map(|column| column.width))
            .header(header)
            .block(block)
            .row_highlight_style(Style::new().reversed())
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut table_state =
            ratatui::widgets::TableState::default().with_selected(Some(state.selected));
        f.render_stateful_widget(table, chunks[0], &mut table_state);

        let pager = Paragraph::new(self.pager_label(rows.len(), state))
            .style(Style::default().dark_gray())
            .alignment(Alignment::Right);
        f.render_widget(pager, chunks[1]);
    }

    fn header_label(&self, index: usize, column: &ColumnSpec, state: &DataTableState) -> String {
        match state.sort() {
            Some(SortBy { column: sorted, descending }) if sorted == index => {
                let arrow = if descending { "▼" } else { "▲" };
                format!("{} {arrow}", column.header)
            }
            _ => column.header.to_string(),
        }
    }

    fn pager_label(&self, total: usize, state: &DataTableState) -> String {
        let sort = state
            .sort()
            .and_then(|SortBy { column, descending }| {
                let column = self.columns.get(column)?;
                let direction = if descending { "desc" } else { "asc" };
                Some(format!(" | sorted by {} {direction}", column.header))
            })
            .unwrap_or_default();

        format!(
            "Page {} of {} | {} rows{sort} ",
            state.page_index + 1,
            self.page_count(total).max(1),
            total
        )
    }
}

/// Placeholder rows shown in place of data which has not arrived yet.
pub fn render_skeleton(f: &mut Frame, area: Rect, block: Block<'_>) {
    let width = block.inner(area).width as usize;
    let lines: Vec<Line> = (0..SKELETON_ROWS)
        .map(|_| Line::from(SKELETON_SYMBOL.repeat(width)))
        .collect();
    let paragraph = Paragraph::new(lines)
        .style(Style::default().dark_gray())
        .block(block);
    f.render_widget(paragraph, area);
}

pub fn render_failure(f: &mut Frame, area: Rect, block: Block<'_>, err: &str) {
    let paragraph = Paragraph::new(vec![
        Line::from("Failed to load the data".bold()),
        Line::from(err.to_string()),
    ])
    .block(block.border_style(Style::new().red()))
    .style(Style::new().red())
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_utils::{count_lines_containing, draw};
    use serde_json::json;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("Name", "name").with_cell(link_cell),
            ColumnSpec::new("Size", "size"),
        ]
    }

    fn rows(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!({"name": format!("row-{i:02}"), "size": (i * 7) % 5}))
            .collect()
    }

    fn names(rows: &[&Value]) -> Vec<String> {
        rows.iter()
            .map(|row| row["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn duplicate_column_ids_are_rejected() {
        let result = DataTable::new(
            vec![
                ColumnSpec::new("Job ID", "job_id"),
                ColumnSpec::new("Actions", "job_id"),
            ],
            10,
        );
        assert!(matches!(result, Err(TuiError::DuplicateColumnId(id)) if id == "job_id"));
    }

    #[test]
    fn explicit_id_disambiguates_shared_accessor() {
        let table = DataTable::new(
            vec![
                ColumnSpec::new("Job ID", "job_id"),
                ColumnSpec::new("Actions", "job_id")
                    .with_id("action_cell")
                    .with_cell(actions_cell),
            ],
            10,
        )
        .unwrap();

        let row = json!({"job_id": "j1"});
        let rendered: Vec<String> = table
            .columns()
            .iter()
            .map(|column| column.render_cell(&row).to_string())
            .collect();
        assert_eq!(rendered, vec!["j1".to_string(), "■  ⤓ j1.dot".to_string()]);
    }

    #[test]
    fn page_count_rounds_up() {
        let table = DataTable::new(columns(), 10).unwrap();
        assert_eq!(table.page_count(0), 0);
        assert_eq!(table.page_count(1), 1);
        assert_eq!(table.page_count(10), 1);
        assert_eq!(table.page_count(11), 2);
        assert_eq!(table.page_count(25), 3);
    }

    #[test]
    fn pages_slice_the_full_data_set() {
        let table = DataTable::new(columns(), 10).unwrap();
        let data = rows(25);
        let mut state = DataTableState::default();

        assert_eq!(table.page(&data, &state).len(), 10);
        state.next_page(table.page_count(data.len()));
        state.next_page(table.page_count(data.len()));
        let last = table.page(&data, &state);
        assert_eq!(last.len(), 5);
        assert_eq!(names(&last)[0], "row-20");

        // already on the last page
        state.next_page(table.page_count(data.len()));
        assert_eq!(state.page_index(), 2);
        state.first_page();
        assert_eq!(state.page_index(), 0);
        state.last_page(table.page_count(data.len()));
        assert_eq!(state.page_index(), 2);
    }

    #[test]
    fn sorting_applies_before_paging() {
        let table = DataTable::new(columns(), 3).unwrap();
        let data = rows(6);
        let mut state = DataTableState::default();

        state.cycle_sort(table.columns().len());
        state.cycle_sort(table.columns().len());
        assert_eq!(
            state.sort(),
            Some(SortBy {
                column: 1,
                descending: false
            })
        );
        let sizes: Vec<Value> = table
            .page(&data, &state)
            .iter()
            .map(|row| row["size"].clone())
            .collect();
        assert_eq!(sizes, vec![json!(0), json!(0), json!(1)]);

        state.toggle_sort_direction();
        let sizes: Vec<Value> = table
            .page(&data, &state)
            .iter()
            .map(|row| row["size"].clone())
            .collect();
        assert_eq!(sizes, vec![json!(4), json!(3), json!(2)]);

        state.cycle_sort(table.columns().len());
        assert_eq!(state.sort(), None);
        assert_eq!(names(&table.page(&data, &state))[0], "row-00");
    }

    #[test]
    fn selection_stays_within_page() {
        let table = DataTable::new(columns(), 10).unwrap();
        let data = rows(12);
        let mut state = DataTableState::default();

        for _ in 0..20 {
            state.select_next(table.rows_on_page(data.len(), state.page_index()));
        }
        assert_eq!(state.selected(), 9);
        assert_eq!(
            table.selected_row(&data, &state).map(|row| row["name"].clone()),
            Some(json!("row-09"))
        );

        state.next_page(table.page_count(data.len()));
        assert_eq!(state.selected(), 0);
        state.select_previous();
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn shrinking_data_clamps_state() {
        let table = DataTable::new(columns(), 10).unwrap();
        let mut state = DataTableState::default();
        state.last_page(table.page_count(30));
        state.select_next(10);

        table.clamp_state(&mut state, 14);
        assert_eq!(state.page_index(), 1);
        assert!(state.selected() < 4);

        table.clamp_state(&mut state, 0);
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn loading_renders_five_placeholder_rows() {
        let table = DataTable::new(columns(), 10).unwrap();
        let lines = draw(60, 12, |f| {
            let area = f.area();
            table.render::<Value>(
                f,
                area,
                "Rows",
                &Slot::Loading,
                &DataTableState::default(),
                "No rows",
            )
        });
        assert_eq!(count_lines_containing(&lines, SKELETON_SYMBOL), SKELETON_ROWS);
    }

    #[test]
    fn loaded_renders_first_page_and_pager() {
        let table = DataTable::new(columns(), 10).unwrap();
        let data = Slot::Loaded(rows(25));
        let lines = draw(60, 16, |f| {
            let area = f.area();
            table.render(f, area, "Rows", &data, &DataTableState::default(), "No rows")
        });

        assert_eq!(count_lines_containing(&lines, "row-"), 10);
        assert_eq!(count_lines_containing(&lines, "Page 1 of 3"), 1);
        assert_eq!(count_lines_containing(&lines, SKELETON_SYMBOL), 0);
    }

    #[test]
    fn pager_names_the_active_sort() {
        let table = DataTable::new(columns(), 10).unwrap();
        let data = Slot::Loaded(rows(4));
        let mut state = DataTableState::default();
        state.cycle_sort(table.columns().len());
        state.toggle_sort_direction();

        let lines = draw(60, 10, |f| {
            let area = f.area();
            table.render(f, area, "Rows", &data, &state, "No rows")
        });

        assert_eq!(count_lines_containing(&lines, "sorted by Name desc"), 1);
        assert_eq!(count_lines_containing(&lines, "Name ▼"), 1);
    }

    #[test]
    fn failure_renders_error_instead_of_placeholders() {
        let table = DataTable::new(columns(), 10).unwrap();
        let data: Slot<Vec<Value>> = Slot::Failed("connection refused".to_string());
        let lines = draw(60, 10, |f| {
            let area = f.area();
            table.render(f, area, "Rows", &data, &DataTableState::default(), "No rows")
        });

        assert_eq!(count_lines_containing(&lines, "connection refused"), 1);
        assert_eq!(count_lines_containing(&lines, SKELETON_SYMBOL), 0);
    }

    #[test]
    fn empty_data_renders_message() {
        let table = DataTable::new(columns(), 10).unwrap();
        let data: Slot<Vec<Value>> = Slot::Loaded(vec![]);
        let lines = draw(60, 8, |f| {
            let area = f.area();
            table.render(f, area, "Rows", &data, &DataTableState::default(), "No rows")
        });

        assert_eq!(count_lines_containing(&lines, "No rows"), 1);
    }
}
