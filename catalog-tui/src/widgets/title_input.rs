//! Single-line text field used for inline title edits.
//!
//! Mirrors a browser text input closely enough for this use: focusing it
//! selects everything, and typing over a selection replaces it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleInput {
    text: String,
    /// Cursor position in chars, `0..=len`.
    cursor: usize,
    all_selected: bool,
}

impl TitleInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            all_selected: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    /// Take focus: cursor to the end, whole text selected.
    pub fn focus_select_all(&mut self) {
        self.cursor = self.char_len();
        self.all_selected = !self.text.is_empty();
    }

    /// Apply an editing key. Returns true when the text changed.
    pub fn input(&mut self, event: &KeyEvent) -> bool {
        if event.modifiers.contains(KeyModifiers::CONTROL)
            || event.modifiers.contains(KeyModifiers::ALT)
        {
            return false;
        }
        match event.code {
            KeyCode::Char(c) => {
                self.delete_selection();
                let at = self.byte_index(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.delete_selection() {
                    return true;
                }
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                true
            }
            KeyCode::Delete => {
                if self.delete_selection() {
                    return true;
                }
                if self.cursor >= self.char_len() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                true
            }
            KeyCode::Left => {
                if self.all_selected {
                    self.all_selected = false;
                    self.cursor = 0;
                } else {
                    self.cursor = self.cursor.saturating_sub(1);
                }
                false
            }
            KeyCode::Right => {
                if self.all_selected {
                    self.all_selected = false;
                    self.cursor = self.char_len();
                } else {
                    self.cursor = (self.cursor + 1).min(self.char_len());
                }
                false
            }
            KeyCode::Home => {
                self.all_selected = false;
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.all_selected = false;
                self.cursor = self.char_len();
                false
            }
            _ => false,
        }
    }

    /// The field's contents as a line: the selection or the cursor cell is
    /// drawn reversed.
    pub fn line(&self, style: Style) -> Line<'static> {
        let highlight = style.add_modifier(Modifier::REVERSED);
        if self.all_selected {
            return Line::from(Span::styled(self.text.clone(), highlight));
        }
        let split = self.byte_index(self.cursor);
        let (before, rest) = self.text.split_at(split);
        let mut chars = rest.chars();
        let under = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        Line::from(vec![
            Span::styled(before.to_string(), style),
            Span::styled(under, highlight),
            Span::styled(chars.as_str().to_string(), style),
        ])
    }

    fn delete_selection(&mut self) -> bool {
        if !self.all_selected {
            return false;
        }
        self.all_selected = false;
        self.text.clear();
        self.cursor = 0;
        true
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
