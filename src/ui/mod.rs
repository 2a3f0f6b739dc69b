pub mod article_pane;
pub mod articles_pane;
pub mod chart_pane;
pub mod mood_bar;
pub mod status_bar;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::{ActivePane, App};

/// Top-level render function.
///
/// The mood buttons sit in a 3-row bar at the top and the status bar takes
/// the last row.  The space between is split horizontally into the article
/// list and the distribution chart, with widths taken from the config.  An
/// open article takes the chart's place.
pub fn render(frame: &mut Frame, app: &mut App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(app.config.display.columns.articles),
            Constraint::Percentage(app.config.display.columns.chart),
        ])
        .split(vertical[1]);

    mood_bar::render(frame, app, vertical[0]);
    articles_pane::render(frame, app, horizontal[0]);
    if app.active_pane == ActivePane::ArticleView {
        article_pane::render(frame, app, horizontal[1]);
    } else {
        chart_pane::render(frame, app, horizontal[1]);
    }
    status_bar::render(frame, app, vertical[2]);
}
