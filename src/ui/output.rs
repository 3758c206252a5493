//! Display view for a generated call script.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::generate::CallScript;

/// The four script sections in reading order, with their headings.
fn sections(script: &CallScript) -> [(&'static str, &str); 4] {
    [
        ("Opening", script.opener.as_str()),
        ("Value Pitch", script.value_pitch.as_str()),
        ("Objection Handling", script.objection_handling.as_str()),
        ("Closing", script.closing.as_str()),
    ]
}

pub struct OutputView {
    script: CallScript,
    scroll: u16,
}

impl OutputView {
    pub fn new(script: CallScript) -> Self {
        Self { script, scroll: 0 }
    }

    pub fn script(&self) -> &CallScript {
        &self.script
    }

    /// Handle a key; returns true when the user is done with the view.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
                false
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" Your Call Script "),
                Span::styled(
                    format!("({}) ", self.script.created_at.format("%Y-%m-%d %H:%M UTC")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(8),    // Script body
                Constraint::Length(2), // Details
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let mut lines: Vec<Line> = Vec::new();
        for (heading, body) in sections(&self.script) {
            lines.push(Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for text_line in body.lines() {
                lines.push(Line::from(text_line.to_string()));
            }
            lines.push(Line::default());
        }
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(body, chunks[0]);

        let request = &self.script.request;
        let details = Paragraph::new(Line::from(vec![
            Span::styled("Goal: ", Style::default().fg(Color::Gray)),
            Span::raw(request.goal.label()),
            Span::styled("   Tone: ", Style::default().fg(Color::Gray)),
            Span::raw(request.tone.clone()),
            Span::styled("   Industry: ", Style::default().fg(Color::Gray)),
            Span::raw(request.industry.clone()),
        ]));
        frame.render_widget(details, chunks[1]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw(" scroll  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{ScriptId, ScriptRequest};
    use crate::wizard::CallGoal;

    fn script() -> CallScript {
        CallScript {
            id: ScriptId::new("42"),
            created_at: chrono::Utc::now(),
            request: ScriptRequest {
                product: "Cloud CRM".to_string(),
                persona: "Sales Directors".to_string(),
                industry: "Technology".to_string(),
                goal: CallGoal::CloseSale,
                tone: "assertive".to_string(),
                objections: "No budget".to_string(),
            },
            opener: "Hi".to_string(),
            value_pitch: "Pitch".to_string(),
            objection_handling: "Sure".to_string(),
            closing: "Deal?".to_string(),
        }
    }

    #[test]
    fn test_quit_keys_close_the_view() {
        let mut view = OutputView::new(script());
        assert!(!view.handle_key(KeyCode::Down));
        assert!(view.handle_key(KeyCode::Char('q')));
        assert!(OutputView::new(script()).handle_key(KeyCode::Esc));
    }

    #[test]
    fn test_scroll_never_underflows() {
        let mut view = OutputView::new(script());
        view.handle_key(KeyCode::Up);
        view.handle_key(KeyCode::Down);
        view.handle_key(KeyCode::Down);
        view.handle_key(KeyCode::Up);
        // No panic and the script is still reachable
        assert_eq!(view.script().id, ScriptId::new("42"));
    }
}
