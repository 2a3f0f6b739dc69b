use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::config::{parse_border_type, parse_color, ColourConfig};
use crate::mood::Mood;

/// Get border style based on whether the pane is focused and the colour config.
pub fn get_border_style(is_focused: bool, colours: &ColourConfig) -> Style {
    let color_str = if is_focused {
        &colours.active_border
    } else {
        &colours.inactive_border
    };

    let color = parse_color(color_str).unwrap_or(if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    });

    Style::new().fg(color)
}

/// Get highlight style for the currently selected row based on the colour config.
pub fn get_highlight_style(colours: &ColourConfig) -> Style {
    let color = parse_color(&colours.highlight_bg).unwrap_or(Color::DarkGray);

    Style::new().bg(color).add_modifier(Modifier::BOLD)
}

/// Get border type based on the colour config.
pub fn get_border_type(colours: &ColourConfig) -> BorderType {
    parse_border_type(&colours.border_type).unwrap_or(BorderType::Plain)
}

/// The chart segment colour for `mood`.
pub fn mood_color(mood: Mood) -> Color {
    parse_color(mood.colour()).unwrap_or(Color::White)
}

/// Style for a mood button.  The selected mood is drawn reversed in the
/// configured colour; the button under the cursor is underlined.
pub fn mood_button_style(selected: bool, under_cursor: bool, colours: &ColourConfig) -> Style {
    let mut style = if selected {
        let color = parse_color(&colours.selected_mood).unwrap_or(Color::Yellow);
        Style::new()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(Color::White)
    };

    if under_cursor {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    style
}

/// Style for article titles.
pub const TITLE_STYLE: Style = Style::new()
    .fg(Color::Green)
    .add_modifier(Modifier::BOLD);

/// Style for article content and other secondary text.
pub const META_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for error text inside panes.
pub const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Background style for the bottom status bar.
pub const STATUS_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

/// Status bar style while a fetch error is shown.
pub const STATUS_ERROR_STYLE: Style = Style::new().fg(Color::White).bg(Color::Red);
