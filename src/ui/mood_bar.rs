use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{ActivePane, App};
use crate::config::ColourConfig;
use crate::mood::Mood;
use crate::ui::theme;

/// Render the row of mood buttons across the top of the screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let colours = &app.config.display.colours;

    let block = Block::default()
        .title(" Moods ")
        .borders(Borders::ALL)
        .border_style(theme::get_border_style(app.active_pane == ActivePane::Moods, colours))
        .border_type(theme::get_border_type(colours));

    let line = button_line(app.board.selected_mood(), app.mood_cursor, colours);
    let bar = Paragraph::new(line).block(block).alignment(Alignment::Center);

    frame.render_widget(bar, area);
}

/// One span per button, in [`Mood::ALL`] order, separated by spaces.
pub fn button_line(selected: Mood, cursor: Mood, colours: &ColourConfig) -> Line<'static> {
    let mut spans = Vec::with_capacity(Mood::ALL.len() * 2);
    for (i, mood) in Mood::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!(" {} ", mood.button_caption()),
            theme::mood_button_style(mood == selected, mood == cursor, colours),
        ));
    }
    Line::from(spans)
}
