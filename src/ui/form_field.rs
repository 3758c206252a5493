//! Input widgets for the interview steps.
//!
//! Each step owns exactly one widget: a multi-line area for the
//! long-form answers, a single-line input for the industry, and a
//! picker for the enumerated goal and tone steps. Widgets hold display
//! state only; the session's form store is the source of truth.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use crate::wizard::{CallGoal, FieldKey, StepDefinition, StepId, ToneChoice};

/// One entry of a picker field.
#[derive(Debug, Clone, Copy)]
pub struct SelectOption {
    /// Stored form value
    pub code: &'static str,
    /// Human label shown in the list
    pub label: &'static str,
}

/// A form field widget bound to one interview step.
pub enum FormField {
    /// Single-line text input
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: &'static str,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: &'static str,
    },
    /// Selection from a fixed option set; starts unselected so the
    /// step stays incomplete until the user picks
    EnumSelect {
        options: Vec<SelectOption>,
        list_state: ListState,
    },
}

impl FormField {
    /// Build the widget for a step, per its catalog entry.
    pub fn for_step(step: StepId) -> Self {
        let def = StepDefinition::for_step(step);
        match def.field {
            FieldKey::Product | FieldKey::Persona | FieldKey::Objections => FormField::TextArea {
                textarea: Box::new(TextArea::default()),
                placeholder: def.placeholder,
            },
            FieldKey::Industry => FormField::TextInput {
                value: String::new(),
                cursor_pos: 0,
                placeholder: def.placeholder,
            },
            FieldKey::Goal => FormField::EnumSelect {
                options: CallGoal::all()
                    .iter()
                    .map(|g| SelectOption {
                        code: g.code(),
                        label: g.label(),
                    })
                    .collect(),
                list_state: ListState::default(),
            },
            FieldKey::Tone => FormField::EnumSelect {
                options: ToneChoice::all()
                    .iter()
                    .map(|t| SelectOption {
                        code: t.code(),
                        label: t.label(),
                    })
                    .collect(),
                list_state: ListState::default(),
            },
        }
    }

    /// The current value as stored in the form (picker: the selected
    /// option's code, or empty while nothing is selected).
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
            FormField::EnumSelect {
                options,
                list_state,
            } => list_state
                .selected()
                .and_then(|i| options.get(i))
                .map(|opt| opt.code.to_string())
                .unwrap_or_default(),
        }
    }

    /// Whether Enter should be left to the widget (multi-line input).
    pub fn consumes_enter(&self) -> bool {
        matches!(self, FormField::TextArea { .. })
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => match key {
                KeyCode::Char(c) => {
                    value.insert(*cursor_pos, c);
                    *cursor_pos += 1;
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                        value.remove(*cursor_pos);
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.len() {
                        value.remove(*cursor_pos);
                    }
                    true
                }
                KeyCode::Left => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                    }
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.len() {
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.len();
                    true
                }
                _ => false,
            },
            FormField::TextArea { textarea, .. } => {
                textarea.input(crossterm::event::KeyEvent::new(
                    key,
                    crossterm::event::KeyModifiers::NONE,
                ));
                true
            }
            FormField::EnumSelect {
                options,
                list_state,
            } => {
                let len = options.len();
                match key {
                    KeyCode::Up | KeyCode::Char('k') => {
                        let i = list_state
                            .selected()
                            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
                        list_state.select(Some(i));
                        true
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        let i = list_state.selected().map_or(0, |i| (i + 1) % len);
                        list_state.select(Some(i));
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
            } => {
                let content = if value.is_empty() {
                    Line::from(Span::styled(
                        *placeholder,
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    let mut text = value.clone();
                    if *cursor_pos < text.len() {
                        text.insert(*cursor_pos, '|');
                    } else {
                        text.push('|');
                    }
                    Line::from(text)
                };

                let para = Paragraph::new(content).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                frame.render_widget(para, area);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                if textarea.lines().iter().all(|l| l.is_empty()) {
                    textarea.set_placeholder_text(placeholder.to_string());
                    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
                }
                frame.render_widget(&**textarea, area);
            }
            FormField::EnumSelect {
                options,
                list_state,
            } => {
                let items: Vec<ListItem> = options
                    .iter()
                    .map(|opt| ListItem::new(Span::raw(opt.label)))
                    .collect();

                let list = List::new(items)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(Color::Cyan)),
                    )
                    .highlight_style(
                        Style::default()
                            .add_modifier(Modifier::REVERSED)
                            .fg(Color::Cyan),
                    )
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list, area, list_state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_handles_chars() {
        let mut field = FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: "",
        };

        assert!(field.handle_key(KeyCode::Char('h')));
        assert!(field.handle_key(KeyCode::Char('i')));
        assert_eq!(field.value(), "hi");

        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "h");
    }

    #[test]
    fn test_goal_picker_starts_unselected() {
        let goal_step = StepId::new(4).unwrap();
        let mut field = FormField::for_step(goal_step);
        assert_eq!(field.value(), "");

        field.handle_key(KeyCode::Down);
        assert_eq!(field.value(), "schedule-demo");

        field.handle_key(KeyCode::Down);
        assert_eq!(field.value(), "book-meeting");

        field.handle_key(KeyCode::Up);
        assert_eq!(field.value(), "schedule-demo");
    }

    #[test]
    fn test_picker_wraps_around() {
        let tone_step = StepId::new(5).unwrap();
        let mut field = FormField::for_step(tone_step);

        field.handle_key(KeyCode::Up);
        assert_eq!(field.value(), "consultative");
    }

    #[test]
    fn test_textarea_consumes_enter() {
        let first = StepId::FIRST;
        let field = FormField::for_step(first);
        assert!(field.consumes_enter());

        let industry = StepId::new(3).unwrap();
        assert!(!FormField::for_step(industry).consumes_enter());
    }
}
