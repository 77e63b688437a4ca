/// Single-line text input

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    /// Input pre-filled with `value`, for editing an existing field
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Take the value out, leaving the input empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }

    /// `> value▏` with the cursor shown when focused
    pub fn line(&self, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(self.value.clone(), style),
        ];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = TextInput::default();
        for c in "play.example.comm".chars() {
            input.push(c);
        }
        input.backspace();
        assert_eq!(input.value(), "play.example.com");

        assert_eq!(input.take(), "play.example.com");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_prefilled() {
        let mut input = TextInput::with_value("22");
        input.backspace();
        input.push('5');
        assert_eq!(input.value(), "25");
    }

    #[test]
    fn test_line_shows_cursor_when_focused() {
        let input = TextInput::with_value("abc");
        assert_eq!(input.line(true).spans.len(), 3);
        assert_eq!(input.line(false).spans.len(), 2);
    }
}
