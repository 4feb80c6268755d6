use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const PLACEHOLDER: &str = "What needs to be done?";

// State of the single-line "new task" input.
// The cursor counts chars, not bytes, so multi-byte titles edit correctly.
#[derive(Debug, Default)]
pub struct TaskInput {
    value: String,
    cursor: usize,
}

impl TaskInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    // Byte offset of the char at `position` (or the end of the string)
    fn byte_index(&self, position: usize) -> usize {
        self.value
            .char_indices()
            .nth(position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    // Insert a char at the cursor and step past it
    pub fn input(&mut self, to_insert: char) {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, to_insert);
        self.move_cursor_right();
    }

    // Backspace: remove the char before the cursor
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let index = self.byte_index(self.cursor - 1);
        self.value.remove(index);
        self.move_cursor_left();
    }

    // Delete: remove the char under the cursor
    pub fn delete_forward(&mut self) {
        if self.cursor < self.char_count() {
            let index = self.byte_index(self.cursor);
            self.value.remove(index);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_count();
    }
}

// Returns the UI content of the input line; the cursor cell is only drawn while focused
pub fn get_task_input_ui<'a>(input: &'a TaskInput, focused: bool) -> Line<'a> {
    const GRAY_TEXT: Style = Style::new().fg(Color::Rgb(62, 62, 62));
    const WHITE_TEXT: Style = Style::new().fg(Color::White);
    const BLACK_ON_WHITE: Style = Style::new().fg(Color::Black).bg(Color::White);

    if input.value.is_empty() {
        if !focused {
            return Line::from(Span::styled(PLACEHOLDER, GRAY_TEXT));
        }
        // First placeholder char doubles as the cursor
        return Line::from(vec![
            Span::styled(PLACEHOLDER.chars().take(1).collect::<String>(), BLACK_ON_WHITE),
            Span::styled(PLACEHOLDER.chars().skip(1).collect::<String>(), GRAY_TEXT),
        ]);
    }

    if !focused {
        return Line::from(Span::styled(input.value.as_str(), WHITE_TEXT));
    }

    let mut spans = vec![
        Span::styled(
            input.value.chars().take(input.cursor()).collect::<String>(),
            WHITE_TEXT,
        ),
        Span::styled(
            input.value.chars().skip(input.cursor()).take(1).collect::<String>(),
            BLACK_ON_WHITE,
        ),
        Span::styled(
            input.value.chars().skip(input.cursor() + 1).collect::<String>(),
            WHITE_TEXT,
        ),
    ];
    if input.cursor() == input.char_count() {
        spans.push(Span::styled(" ", BLACK_ON_WHITE));
    }
    Line::from(spans)
}
