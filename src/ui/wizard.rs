//! The interview screen: one step at a time, with a stepper header and
//! a forward affordance that reflects the validation gate.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::{centered_rect, FormField};
use crate::wizard::{
    steps, LifecycleStatus, NavOutcome, StepDefinition, StepId, WizardSession, STEP_COUNT,
};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// What a keypress means for the shell that owns the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardInput {
    /// The final step was confirmed; start generation.
    Submit,
    /// The user backed out from the first step.
    Cancel,
    /// Consumed by navigation or the focused widget.
    Handled,
}

/// Widget state for the whole interview: one input per step, so
/// answers stay visible when the user navigates back.
pub struct WizardScreen {
    fields: Vec<FormField>,
    spinner_frame: usize,
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardScreen {
    pub fn new() -> Self {
        Self {
            fields: steps().iter().map(|def| FormField::for_step(def.id)).collect(),
            spinner_frame: 0,
        }
    }

    /// Advance the busy spinner; called once per draw tick.
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    fn field_mut(&mut self, step: StepId) -> &mut FormField {
        &mut self.fields[step.index()]
    }

    /// Route a keypress: navigation first, then the focused widget.
    /// Every widget edit is mirrored into the session's form store so
    /// the validation gate always sees current values.
    pub fn handle_key(&mut self, session: &mut WizardSession, key: KeyCode) -> WizardInput {
        // Keys are inert while a generation is in flight or done.
        if session.status() != LifecycleStatus::Idle {
            return WizardInput::Handled;
        }

        // Any keypress clears a failure notice.
        if session.notice().is_some() {
            session.dismiss_notice();
        }

        let step = session.current_step();
        let enter_navigates = !self.field_mut(step).consumes_enter();

        match key {
            KeyCode::Esc => {
                if session.go_back() == NavOutcome::Stay {
                    WizardInput::Cancel
                } else {
                    WizardInput::Handled
                }
            }
            KeyCode::Tab => self.forward(session),
            KeyCode::Enter if enter_navigates => self.forward(session),
            other => {
                let field = self.field_mut(step);
                if field.handle_key(other) {
                    let value = field.value();
                    session.set_field(StepDefinition::for_step(step).field, value);
                }
                WizardInput::Handled
            }
        }
    }

    fn forward(&mut self, session: &mut WizardSession) -> WizardInput {
        match session.go_forward() {
            NavOutcome::Submit => WizardInput::Submit,
            NavOutcome::Moved { .. } | NavOutcome::Stay => WizardInput::Handled,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, session: &WizardSession) {
        if session.status() == LifecycleStatus::Submitting {
            self.render_generating(frame);
            return;
        }
        self.render_step(frame, session);
    }

    fn render_step(&mut self, frame: &mut Frame, session: &WizardSession) {
        let step = session.current_step();
        let def = StepDefinition::for_step(step);

        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "Pitchline",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Call Script Builder "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2), // Stepper
                Constraint::Length(2), // Step title
                Constraint::Length(2), // Prompt
                Constraint::Min(7),    // Input widget
                Constraint::Length(1), // Notice
                Constraint::Length(2), // Footer
            ])
            .split(inner);

        frame.render_widget(self.stepper_line(step), chunks[0]);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Step {step}: {}", def.title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", def.description),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        frame.render_widget(title, chunks[1]);

        let prompt = Paragraph::new(def.prompt).wrap(Wrap { trim: true });
        frame.render_widget(prompt, chunks[2]);

        self.field_mut(step).render(frame, chunks[3]);

        if let Some(notice) = session.notice() {
            let line = Paragraph::new(Line::from(Span::styled(
                format!("✗ {notice} (any key to dismiss)"),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(line, chunks[4]);
        }

        frame.render_widget(self.footer_line(session), chunks[5]);
    }

    fn stepper_line(&self, current: StepId) -> Paragraph<'static> {
        let mut spans = Vec::with_capacity(STEP_COUNT * 2 + 1);
        for def in steps() {
            let (glyph, style) = if def.id < current {
                ('●', Style::default().fg(Color::Green))
            } else if def.id == current {
                ('●', Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                ('○', Style::default().fg(Color::DarkGray))
            };
            spans.push(Span::styled(glyph.to_string(), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("  Step {} of {STEP_COUNT}", current.get()),
            Style::default().fg(Color::Gray),
        ));
        Paragraph::new(Line::from(spans))
    }

    fn footer_line(&self, session: &WizardSession) -> Paragraph<'static> {
        let step = session.current_step();
        let forward_label = if step == StepId::LAST {
            "generate"
        } else {
            "next"
        };
        // Dim the forward hint while the gate blocks it.
        let forward_style = if session.can_advance() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled("Tab", forward_style),
            Span::styled(format!(" {forward_label}  "), forward_style),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(if step == StepId::FIRST {
                " quit"
            } else {
                " back"
            }),
        ];
        if self.fields[step.index()].consumes_enter() {
            spans.push(Span::styled(
                "  Enter newline",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled("  Enter", forward_style));
            spans.push(Span::styled(format!(" {forward_label}"), forward_style));
        }
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_generating(&self, frame: &mut Frame) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        let spinner = SPINNER_FRAMES[self.spinner_frame];
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{spinner} "),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Generating Your Script",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let detail =
            Paragraph::new("Crafting the perfect call script from your answers...")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
        frame.render_widget(detail, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::FieldKey;

    #[test]
    fn test_typing_mirrors_into_the_form() {
        let mut screen = WizardScreen::new();
        let mut session = WizardSession::new();

        for c in "CRM".chars() {
            screen.handle_key(&mut session, KeyCode::Char(c));
        }
        assert_eq!(session.form().get(FieldKey::Product), "CRM");
        assert!(session.can_advance());
    }

    #[test]
    fn test_tab_advances_only_when_gate_passes() {
        let mut screen = WizardScreen::new();
        let mut session = WizardSession::new();

        assert_eq!(
            screen.handle_key(&mut session, KeyCode::Tab),
            WizardInput::Handled
        );
        assert_eq!(session.current_step(), StepId::FIRST);

        screen.handle_key(&mut session, KeyCode::Char('x'));
        screen.handle_key(&mut session, KeyCode::Tab);
        assert_eq!(session.current_step().get(), 2);
    }

    #[test]
    fn test_escape_from_first_step_cancels() {
        let mut screen = WizardScreen::new();
        let mut session = WizardSession::new();

        assert_eq!(
            screen.handle_key(&mut session, KeyCode::Esc),
            WizardInput::Cancel
        );
    }

    #[test]
    fn test_enter_is_a_newline_on_textarea_steps() {
        let mut screen = WizardScreen::new();
        let mut session = WizardSession::new();

        screen.handle_key(&mut session, KeyCode::Char('a'));
        screen.handle_key(&mut session, KeyCode::Enter);
        screen.handle_key(&mut session, KeyCode::Char('b'));

        assert_eq!(session.form().get(FieldKey::Product), "a\nb");
        assert_eq!(session.current_step(), StepId::FIRST);
    }

    #[test]
    fn test_full_interview_submits_via_keys() {
        let mut screen = WizardScreen::new();
        let mut session = WizardSession::new();

        // Product and persona text areas advance with Tab
        for _ in 0..2 {
            screen.handle_key(&mut session, KeyCode::Char('x'));
            assert_eq!(
                screen.handle_key(&mut session, KeyCode::Tab),
                WizardInput::Handled
            );
        }
        // Industry is single-line, so Enter advances too
        screen.handle_key(&mut session, KeyCode::Char('x'));
        screen.handle_key(&mut session, KeyCode::Enter);
        assert_eq!(session.current_step().get(), 4);

        // Goal and tone pickers
        screen.handle_key(&mut session, KeyCode::Down);
        screen.handle_key(&mut session, KeyCode::Enter);
        assert_eq!(session.current_step().get(), 5);
        screen.handle_key(&mut session, KeyCode::Down);
        screen.handle_key(&mut session, KeyCode::Tab);
        assert_eq!(session.current_step().get(), 6);

        // Objections, then generate
        screen.handle_key(&mut session, KeyCode::Char('x'));
        assert_eq!(
            screen.handle_key(&mut session, KeyCode::Tab),
            WizardInput::Submit
        );
        assert_eq!(session.status(), LifecycleStatus::Submitting);

        // Keys are inert while submitting
        assert_eq!(
            screen.handle_key(&mut session, KeyCode::Tab),
            WizardInput::Handled
        );
    }
}
