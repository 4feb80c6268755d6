use log::debug;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::app::error::ApiError;
use crate::app::logging::logged;
use crate::app::models::{Task, TaskPatch};
use crate::app::resource_client::ResourceClient;

pub const DELETE_LABEL: &str = "Delete";

// One rendered line of the task list. Rebuilt from scratch on every reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl TaskRow {
    // Label of the toggle control; it names the action, not the current state
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Mark Incomplete"
        } else {
            "Mark Complete"
        }
    }
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> TaskRow {
        TaskRow {
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
        }
    }
}

// The rendered task list plus the client it reloads itself from.
// There is no separate model: the rows are whatever the server returned last.
pub struct TaskList<'a> {
    pub state: ListState,
    pub rows: Vec<TaskRow>,
    client: &'a ResourceClient<Task>,
}

impl<'a> TaskList<'a> {
    pub fn new(client: &'a ResourceClient<Task>) -> TaskList<'a> {
        TaskList {
            state: ListState::default(),
            rows: Vec::new(),
            client,
        }
    }

    pub fn client(&self) -> &'a ResourceClient<Task> {
        self.client
    }

    // Fetch every task from the server and re-render the whole list
    pub async fn load_tasks(&mut self) -> Result<(), ApiError> {
        logged("load_tasks", (), async {
            let tasks = self.client.list_all().await?;
            self.render_tasks(&tasks);
            Ok::<(), ApiError>(())
        })
        .await
    }

    // Replace all rendered rows, keeping the selection inside the new bounds
    pub fn render_tasks(&mut self, tasks: &[Task]) {
        self.rows = tasks.iter().map(TaskRow::from).collect();
        let selected = match self.state.selected() {
            _ if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => None,
        };
        self.state.select(selected);
        debug!("render_tasks rendered {} rows", self.rows.len());
    }

    // Send the new completed flag, then reload. Nothing is reloaded if the update fails.
    pub async fn toggle_task_completion(&mut self, task_id: i64, completed: bool) -> Result<(), ApiError> {
        logged("toggle_task_completion", (task_id, completed), async {
            self.client
                .update(task_id, &TaskPatch::completed(completed))
                .await?;
            self.load_tasks().await
        })
        .await
    }

    // Delete on the server, then reload. Rows stay as they are if the delete fails.
    pub async fn delete_task(&mut self, task_id: i64) -> Result<(), ApiError> {
        logged("delete_task", task_id, async {
            self.client.delete(task_id).await?;
            self.load_tasks().await
        })
        .await
    }

    // Move the selection to the next item
    pub fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if self.rows.is_empty() || i >= self.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    // Move the selection to the previous item
    pub fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if self.rows.is_empty() {
                    0
                } else if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn unselect(&mut self) {
        self.state.select(None);
    }

    pub fn get_selected(&self) -> Option<&TaskRow> {
        self.state.selected().and_then(|i| self.rows.get(i))
    }

    // Toggle control of the selected row
    pub async fn toggle_selected(&mut self) -> Result<(), ApiError> {
        match self.get_selected() {
            Some(row) => {
                let (id, completed) = (row.id, row.completed);
                self.toggle_task_completion(id, !completed).await
            }
            None => Ok(()),
        }
    }

    // Delete control of the selected row
    pub async fn delete_selected(&mut self) -> Result<(), ApiError> {
        match self.get_selected() {
            Some(row) => {
                let id = row.id;
                self.delete_task(id).await
            }
            None => Ok(()),
        }
    }

    // Run the control clicked on row `index`; clicking elsewhere on the row selects it
    pub async fn click_row(&mut self, index: usize, column: u16) -> Result<(), ApiError> {
        let Some(row) = self.rows.get(index) else {
            return Ok(());
        };
        let (id, completed) = (row.id, row.completed);
        match control_at(row, column) {
            Some(RowControl::Toggle) => self.toggle_task_completion(id, !completed).await,
            Some(RowControl::Delete) => self.delete_task(id).await,
            None => {
                self.state.select(Some(index));
                Ok(())
            }
        }
    }

    pub fn completed_count(&self) -> usize {
        self.rows.iter().filter(|row| row.completed).count()
    }
}

// Clickable controls drawn at the end of every row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowControl {
    Toggle,
    Delete,
}

// Span layout of one row: status, title, gap, toggle, gap, delete
const TOGGLE_SPAN: usize = 3;
const DELETE_SPAN: usize = 5;

fn row_line(row: &TaskRow) -> Line<'_> {
    let title_style = if row.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::from(if row.completed { "[x] " } else { "[ ] " }),
        Span::styled(row.title.as_str(), title_style),
        Span::from("  "),
        Span::from(format!("[{}]", row.toggle_label())).fg(Color::Cyan),
        Span::from(" "),
        Span::from(format!("[{DELETE_LABEL}]")).fg(Color::Red),
    ])
}

// Which control of `row` sits at `column`, counted from the first cell of the row
pub fn control_at(row: &TaskRow, column: u16) -> Option<RowControl> {
    let column = usize::from(column);
    let mut start = 0;
    for (i, span) in row_line(row).spans.iter().enumerate() {
        let end = start + span.width();
        if column >= start && column < end {
            return match i {
                TOGGLE_SPAN => Some(RowControl::Toggle),
                DELETE_SPAN => Some(RowControl::Delete),
                _ => None,
            };
        }
        start = end;
    }
    None
}

// Build the UI (list) for the task rows
pub fn get_list_items_ui(rows: &[TaskRow]) -> Vec<ListItem<'_>> {
    rows.iter().map(|row| ListItem::new(row_line(row))).collect()
}

// Build the UI (lines) for the statistics infobox
pub fn get_statistics_ui<'a>(list: &TaskList<'_>) -> Vec<Line<'a>> {
    let completed = list.completed_count();
    vec![
        Line::from(format!("Total tasks: {}", list.rows.len())),
        Line::from(format!("Completed: {completed}")),
        Line::from(format!("Remaining: {}", list.rows.len() - completed)),
    ]
}

// Build the UI (lines) for the instructions infobox
pub fn get_instructions_ui<'a>() -> Vec<Line<'a>> {
    vec![
        "Tab - switch input/list".into(),
        "Enter (input) - add a task".into(),
        "Enter/Space - toggle done".into(),
        "x - delete a task".into(),
        "r - reload".into(),
        "q - quit".into(),
    ]
}
