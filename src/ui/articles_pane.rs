use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::api::Article;
use crate::app::{ActivePane, App};
use crate::ui::theme;

/// Wrap text to fit within a maximum width, returning at most `max_lines`
/// lines.  A single word longer than the width is cut.
pub fn wrap_text(text: &str, max_width: usize, max_lines: usize) -> Vec<String> {
    if text.is_empty() || max_width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut line_chars = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if line_chars > 0 && line_chars + 1 + word_len > max_width {
            lines.push(current_line);
            current_line = String::new();
            line_chars = 0;

            if lines.len() >= max_lines {
                return lines;
            }
        }

        if line_chars > 0 {
            current_line.push(' ');
            line_chars += 1;
        }
        if word_len > max_width {
            current_line.extend(word.chars().take(max_width));
            line_chars += max_width;
        } else {
            current_line.push_str(word);
            line_chars += word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Build the list entry for one article: the title, up to `content_lines`
/// lines of content, and a separator.
fn article_item(article: &Article, width: usize, content_lines: usize) -> ListItem<'static> {
    let mut lines = Vec::new();

    let title_lines = wrap_text(&article.title, width, 2);
    if title_lines.is_empty() {
        lines.push(Line::from(Span::styled("(untitled)", theme::META_STYLE)));
    }
    for title_line in title_lines {
        lines.push(Line::from(Span::styled(title_line, theme::TITLE_STYLE)));
    }

    for content_line in wrap_text(&article.content, width, content_lines) {
        lines.push(Line::from(Span::raw(content_line)));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(width.min(80)),
        theme::META_STYLE,
    )));

    ListItem::new(lines)
}

/// Text shown in place of the list when there are no articles.  An empty
/// successful response shows nothing.
fn placeholder(app: &App) -> String {
    if app.board.is_loading() {
        "Loading articles…".to_string()
    } else if let Some(err) = app.board.last_error() {
        format!("Could not load articles: {err}")
    } else {
        String::new()
    }
}

/// Render the article list for the selected mood.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let colours = &app.config.display.colours;
    let mood = app.board.selected_mood();

    let block = Block::default()
        .title(format!(" {} articles ({}) ", mood.label(), app.board.articles().len()))
        .borders(Borders::ALL)
        .border_style(theme::get_border_style(
            app.active_pane == ActivePane::Articles,
            colours,
        ))
        .border_type(theme::get_border_type(colours));

    if app.board.articles().is_empty() {
        let style = if app.board.last_error().is_some() && !app.board.is_loading() {
            theme::ERROR_STYLE
        } else {
            theme::META_STYLE
        };
        let text = Paragraph::new(placeholder(app))
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    // Inner width after borders.
    let inner_width = area.width.saturating_sub(2) as usize;
    let content_lines = app.config.display.format.content_lines as usize;

    let items: Vec<ListItem> = app
        .board
        .articles()
        .iter()
        .map(|article| article_item(article, inner_width, content_lines))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::get_highlight_style(colours));

    frame.render_stateful_widget(list, area, &mut app.articles_state);
}
