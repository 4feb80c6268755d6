use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::error;
use ratatui::{prelude::*, widgets::*};
use std::{io, time::Duration};

use crate::app::error::ApiError;
use crate::app::logging::logged;
use crate::app::models::Task;
use crate::app::resource_client::ResourceClient;
use crate::app::{task_input::*, task_list::*};

const ADD_BUTTON_LABEL: &str = "Add";
const HIGHLIGHT_SYMBOL: &str = ">> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// The view controller: task list, input and add button, wired to one resource client
pub struct App<'a> {
    pub items: TaskList<'a>,
    pub input: TaskInput,
    pub focus: Focus,
    // Where things were last drawn, for mouse clicks
    add_button_area: Rect,
    input_area: Rect,
    // Inside the list border
    list_area: Rect,
}

impl<'a> App<'a> {
    pub fn new(client: &'a ResourceClient<Task>) -> App<'a> {
        App {
            items: TaskList::new(client),
            input: TaskInput::default(),
            focus: Focus::Input,
            add_button_area: Rect::default(),
            input_area: Rect::default(),
            list_area: Rect::default(),
        }
    }

    // First load once the widgets exist
    pub async fn initialize(&mut self) -> Result<(), ApiError> {
        self.items.load_tasks().await
    }

    // Create a task from the trimmed input. Blank input is ignored and left as is.
    pub async fn add_task(&mut self) -> Result<(), ApiError> {
        let raw = self.input.value().to_string();
        logged("add_task", &raw, async {
            let title = raw.trim();
            if title.is_empty() {
                return Ok(());
            }
            self.items
                .client()
                .create(&Task::pending(title))
                .await?;
            self.input.clear();
            self.items.load_tasks().await
        })
        .await
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<Flow, ApiError> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Flow::Quit);
        }

        match self.focus {
            Focus::Input => match key.code {
                KeyCode::Enter => self.add_task().await?,
                KeyCode::Tab | KeyCode::Esc => self.focus = Focus::List,
                KeyCode::Left => self.input.move_cursor_left(),
                KeyCode::Right => self.input.move_cursor_right(),
                KeyCode::Home => self.input.move_cursor_home(),
                KeyCode::End => self.input.move_cursor_end(),
                KeyCode::Backspace => self.input.delete_char(),
                KeyCode::Delete => self.input.delete_forward(),
                KeyCode::Char(to_insert)
                    if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
                {
                    self.input.input(to_insert)
                }
                _ => {}
            },
            Focus::List => match key.code {
                KeyCode::Char('q') => return Ok(Flow::Quit),
                KeyCode::Char('a') | KeyCode::Tab => self.focus = Focus::Input,
                KeyCode::Down | KeyCode::Char('j') => self.items.next(),
                KeyCode::Up | KeyCode::Char('k') => self.items.previous(),
                KeyCode::Left | KeyCode::Esc => self.items.unselect(),
                KeyCode::Enter | KeyCode::Char(' ') => self.items.toggle_selected().await?,
                KeyCode::Char('x') | KeyCode::Delete => self.items.delete_selected().await?,
                KeyCode::Char('r') => self.items.load_tasks().await?,
                _ => {}
            },
        }
        Ok(Flow::Continue)
    }

    // Left clicks: the add button submits the input, row controls toggle or delete their task
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<(), ApiError> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }
        let (column, row) = (mouse.column, mouse.row);

        if contains(self.add_button_area, column, row) {
            return self.add_task().await;
        }
        if contains(self.input_area, column, row) {
            self.focus = Focus::Input;
            return Ok(());
        }
        if contains(self.list_area, column, row) {
            self.focus = Focus::List;
            // One line per row, shifted by the scroll offset and the highlight gutter
            let index = self.items.state.offset() + usize::from(row - self.list_area.y);
            let gutter = if self.items.state.selected().is_some() {
                HIGHLIGHT_SYMBOL.len() as u16
            } else {
                0
            };
            if let Some(row_column) = (column - self.list_area.x).checked_sub(gutter) {
                self.items.click_row(index, row_column).await?;
            }
        }
        Ok(())
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

// Event loop: every handled event runs its whole request chain before the next one is read
pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App<'_>,
    tick_rate: Duration,
) -> io::Result<()> {
    if let Err(err) = app.initialize().await {
        error!("initial load failed: {err}");
    }

    loop {
        terminal.draw(|f| draw_ui(f, &mut app))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let outcome = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key).await,
            Event::Mouse(mouse) => app.handle_mouse(mouse).await.map(|_| Flow::Continue),
            _ => Ok(Flow::Continue),
        };

        match outcome {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            // The chain stops here; the list keeps whatever it showed before
            Err(err) => error!("unhandled failure: {err}"),
        }
    }
}

fn focused_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

// Draws the whole user interface
pub fn draw_ui(f: &mut Frame, app: &mut App) {
    // Create two chunks of screen in 60-40 ratio
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(f.size());

    // DRAW LEFT PART: list on top, input and add button below
    let left_side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(chunks[0]);
    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(9)])
        .split(left_side[1]);

    let list_block = focused_block("Tasks", app.focus == Focus::List);
    app.list_area = list_block.inner(left_side[0]);
    let task_list = List::new(get_list_items_ui(app.items.rows.as_slice()))
        .block(list_block)
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    f.render_stateful_widget(task_list, left_side[0], &mut app.items.state);

    let input_focused = app.focus == Focus::Input;
    let input = Paragraph::new(get_task_input_ui(&app.input, input_focused))
        .block(focused_block("New task", input_focused));
    f.render_widget(input, input_row[0]);
    app.input_area = input_row[0];

    let add_button = Paragraph::new(ADD_BUTTON_LABEL)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::new().black().on_light_green());
    f.render_widget(add_button, input_row[1]);
    app.add_button_area = input_row[1];

    // DRAW RIGHT PART: instructions and statistics
    let right_side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let instructions = Paragraph::new(get_instructions_ui())
        .block(Block::new().title("Commands").borders(Borders::ALL))
        .style(Style::new().white());

    let statistics = Paragraph::new(get_statistics_ui(&app.items))
        .block(Block::new().title("Statistics").borders(Borders::ALL))
        .style(Style::new().white());

    f.render_widget(instructions, right_side[0]);
    f.render_widget(statistics, right_side[1]);
}
