use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::api::Article;
use crate::app::{ActivePane, App};
use crate::ui::theme;

/// Wrap `text` to `width` columns without dropping anything.
///
/// Line breaks in the text are kept, runs of spaces inside a line are kept,
/// and a word longer than the width is split across lines.  Only the single
/// space at each wrap point is consumed.
pub fn wrap_verbatim(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;
        let mut started = false;

        for word in raw.split(' ') {
            let chars: Vec<char> = word.chars().collect();
            if started {
                if current_len + 1 + chars.len() <= width {
                    current.push(' ');
                    current_len += 1;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
            }

            let mut rest = &chars[..];
            while current_len + rest.len() > width {
                let (head, tail) = rest.split_at(width - current_len);
                current.extend(head);
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                rest = tail;
            }
            current.extend(rest);
            current_len += rest.len();
            started = true;
        }

        lines.push(current);
    }

    lines
}

/// The full article: title, a blank line, then the content.
fn article_lines(article: &Article, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = wrap_verbatim(&article.title, width)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, theme::TITLE_STYLE)))
        .collect();
    lines.push(Line::default());
    lines.extend(
        wrap_verbatim(&article.content, width)
            .into_iter()
            .map(Line::from),
    );
    lines
}

/// Render the selected article in full with vertical scrolling.
///
/// Records the wrapped line count on `app` and keeps the scroll offset
/// within it, since both depend on the pane width.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let colours = &app.config.display.colours;
    let block = Block::default()
        .title(" Article ")
        .borders(Borders::ALL)
        .border_style(theme::get_border_style(
            app.active_pane == ActivePane::ArticleView,
            colours,
        ))
        .border_type(theme::get_border_type(colours));

    let Some(article) = app.selected_article() else {
        let placeholder = Paragraph::new("Select an article to read")
            .block(block)
            .alignment(Alignment::Center)
            .style(theme::META_STYLE);
        frame.render_widget(placeholder, area);
        return;
    };

    let lines = article_lines(article, area.width.saturating_sub(2) as usize);
    let visible = area.height.saturating_sub(2);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    app.article_lines = total;
    app.article_scroll = app.article_scroll.min(total.saturating_sub(visible.max(1)));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.article_scroll, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::api::{ArticleBatch, FetchOutcome, NewsClient};
    use crate::config::Config;
    use crate::test_support::dead_url;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn wrap_keeps_every_character() {
        let text = "alpha  beta gamma\n\nsupercalifragilistic end";
        let lines = wrap_verbatim(text, 8);
        assert_eq!(
            lines,
            vec!["alpha ", "beta", "gamma", "", "supercal", "ifragili", "stic end"]
        );
        let kept: String = lines.concat().chars().filter(|c| !c.is_whitespace()).collect();
        let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(kept, original);
    }

    #[test]
    fn wrap_zero_width_or_empty_text() {
        assert!(wrap_verbatim("text", 0).is_empty());
        assert!(wrap_verbatim("", 10).is_empty());
    }

    async fn app_with(articles: Vec<Article>) -> App {
        let mut config = Config::default();
        config.api.base_url = dead_url().await;
        let client = NewsClient::new(&config.api);
        let (mut app, _rx) = App::new_with_receivers(config, client);
        let ticket = app.board.refresh();
        app.handle_fetch_outcome(FetchOutcome {
            ticket,
            result: Ok(ArticleBatch { articles, skipped: 0 }),
        });
        app
    }

    fn draw(app: &mut App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, app, area)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn long_content_is_shown_to_the_end() {
        let content = format!("{} ENDMARKER", "word ".repeat(26).trim_end());
        let title = "A headline long enough to need a second line here";
        let mut app = app_with(vec![Article { title: title.into(), content }]).await;
        app.update(Action::OpenArticle);

        let rows = draw(&mut app).join("\n");
        assert!(rows.contains("ENDMARKER"));
        assert!(rows.contains("second line here"));
    }

    #[tokio::test]
    async fn multi_line_content_keeps_its_lines() {
        let content = "first paragraph\nsecond paragraph\n\nlast ENDMARKER".to_string();
        let mut app = app_with(vec![Article { title: "t".into(), content }]).await;
        app.update(Action::OpenArticle);

        let rows = draw(&mut app);
        let first = rows.iter().position(|r| r.contains("first paragraph")).unwrap();
        assert!(rows[first + 1].contains("second paragraph"));
        assert!(rows[first + 3].contains("last ENDMARKER"));
    }

    #[tokio::test]
    async fn scrolling_reaches_the_last_line_and_stops() {
        let content = (1..=60).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut app = app_with(vec![Article { title: "t".into(), content }]).await;
        app.update(Action::OpenArticle);
        draw(&mut app);
        // title, blank, 60 content lines
        assert_eq!(app.article_lines, 62);

        app.update(Action::JumpToBottom);
        let rows = draw(&mut app);
        assert!(rows[28].contains("line 60"));
        assert!(!rows.iter().any(|r| r.contains("line 1 ")));
        // 62 lines in a 28-row viewport.
        assert_eq!(app.article_scroll, 34);

        app.update(Action::JumpToTop);
        let rows = draw(&mut app);
        assert!(rows[3].contains("line 1"));
    }

    #[tokio::test]
    async fn nothing_selected_shows_placeholder() {
        let mut app = app_with(Vec::new()).await;
        let rows = draw(&mut app).join("\n");
        assert!(rows.contains("Select an article to read"));
    }
}
