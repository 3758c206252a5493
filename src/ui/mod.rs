//! TUI rendering for the interview wizard and the script output view.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub mod form_field;
pub mod output;
pub mod wizard;

pub use form_field::FormField;
pub use output::OutputView;
pub use wizard::{WizardInput, WizardScreen};

/// Helper to create a centered rect using a percentage of the available area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
