use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action;
use crate::app::{format_time, ActivePane, App};
use crate::chart::{ChartError, Distribution};
use crate::config::{KeyBinding, KeyBindings};
use crate::ui::theme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the single-row status bar at the bottom of the terminal.
///
/// Shows a status message if one is set, otherwise key-binding hints for
/// the active pane.  A spinner is prepended while a fetch is outstanding
/// and the time of the last successful fetch is appended.  Chart data that
/// fails validation is reported ahead of the hints.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut content = String::new();

    if app.board.is_loading() {
        content.push_str(&format!(
            " {} Fetching {}… \u{2502}",
            SPINNER[app.tick_count % SPINNER.len()],
            app.board.selected_mood().label()
        ));
    }

    let notice = chart_notice(&app.chart_data());
    if let Some(ref notice) = notice {
        content.push_str(&format!(" {notice} \u{2502}"));
    }

    match app.status_message {
        Some(ref msg) => content.push_str(&format!(" {msg}")),
        None => content.push_str(&build_hints(&app.config.keybindings, app.active_pane)),
    }

    if let Some(time) = app.board.fetched_at() {
        content.push_str(&format!(
            " \u{2502} Updated {}",
            format_time(&time, app.config.display.format.time)
        ));
    }

    let fetch_error = app.board.last_error().is_some() && app.status_message.is_some();
    let style = if fetch_error || notice.is_some() {
        theme::STATUS_ERROR_STYLE
    } else {
        theme::STATUS_STYLE
    };

    frame.render_widget(Paragraph::new(content).style(style), area);
}

/// Status text for chart data that cannot be drawn.
pub fn chart_notice(data: &Result<Distribution, ChartError>) -> Option<String> {
    data.as_ref().err().map(|e| format!("Chart: {e}"))
}

/// Build keybinding hints for the given pane.
pub fn build_hints(kb: &KeyBindings, pane: ActivePane) -> String {
    let moods = format!(
        "[{}] Moods",
        action::format_bindings(&[
            kb.global.mood_happy.clone(),
            kb.global.mood_sad.clone(),
            kb.global.mood_angry.clone(),
            kb.global.mood_surprised.clone(),
        ])
    );
    let pane_switch = format!(
        "[{}]/[{}] Pane",
        action::format_bindings(&kb.global.focus_prev),
        action::format_bindings(&kb.global.focus_next)
    );
    let refresh = format!("[{}] Refresh", kb.global.refresh.display());
    let quit = format!("[{}] Quit", action::format_bindings(&kb.global.quit));

    let parts = match pane {
        ActivePane::Moods => vec![
            moods,
            format!("[{}] Choose", action::format_bindings(&first_of_each(&kb.moods.prev, &kb.moods.next))),
            format!("[{}] Select", action::format_bindings(&kb.moods.select)),
            refresh,
            pane_switch,
            quit,
        ],
        ActivePane::Articles => vec![
            moods,
            format!("[{}] Navigate", action::format_bindings(&kb.articles.move_down)),
            format!(
                "[{}] Page",
                action::format_bindings(&kb.articles.scroll_half_page_down)
            ),
            format!(
                "[{}] Jump",
                action::format_bindings(&[kb.global.jump_top.clone(), kb.global.jump_bottom.clone()])
            ),
            format!("[{}] Read", action::format_bindings(&kb.articles.open)),
            refresh,
            pane_switch,
            quit,
        ],
        ActivePane::ArticleView => vec![
            format!(
                "[{}] Scroll",
                action::format_bindings(&first_of_each(
                    &kb.article_view.scroll_down,
                    &kb.article_view.scroll_up
                ))
            ),
            format!(
                "[{}] Page",
                action::format_bindings(&first_of_each(
                    &kb.article_view.scroll_half_page_down,
                    &kb.article_view.scroll_half_page_up
                ))
            ),
            format!(
                "[{}] Top/Bottom",
                action::format_bindings(&[kb.global.jump_top.clone(), kb.global.jump_bottom.clone()])
            ),
            format!("[{}] Back", action::format_bindings(&kb.article_view.close)),
            quit,
        ],
    };
    format!(" {}", parts.join(" \u{2502} "))
}

/// The first binding of each list, for compact hints.
fn first_of_each(a: &[KeyBinding], b: &[KeyBinding]) -> Vec<KeyBinding> {
    a.iter().take(1).chain(b.iter().take(1)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NewsClient;
    use crate::config::{ChartSource, Config};
    use crate::test_support::dead_url;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    async fn draw_with(config: Config) -> String {
        let mut config = config;
        config.api.base_url = dead_url().await;
        let client = NewsClient::new(&config.api);
        let (app, _rx) = App::new_with_receivers(config, client);

        let mut terminal = Terminal::new(TestBackend::new(200, 1)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &app, area)
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn chart_notice_only_for_errors() {
        let ok = Distribution::try_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(chart_notice(&ok), None);

        let notice = chart_notice(&Distribution::try_from_slice(&[1.0, 2.0])).unwrap();
        assert!(notice.starts_with("Chart: "));
        assert!(notice.contains("exactly 4 values"));
    }

    #[tokio::test]
    async fn invalid_fixed_distribution_shows_in_status_bar() {
        let mut config = Config::default();
        config.chart.source = ChartSource::Fixed;
        config.chart.distribution = vec![1.0, 2.0, 3.0];
        let bar = draw_with(config).await;
        assert!(bar.contains("Chart: "));
        assert!(bar.contains("exactly 4 values"));
    }

    #[tokio::test]
    async fn valid_chart_adds_no_notice() {
        let bar = draw_with(Config::default()).await;
        assert!(!bar.contains("Chart:"));
    }

    #[test]
    fn mood_pane_hints() {
        let hints = build_hints(&KeyBindings::default(), ActivePane::Moods);
        assert!(hints.contains("[1/2/3/4] Moods"));
        assert!(hints.contains("[h/l] Choose"));
        assert!(hints.contains("[Enter/Space] Select"));
        assert!(hints.contains("[r] Refresh"));
        assert!(hints.contains("[q/Ctrl+c] Quit"));
    }

    #[test]
    fn articles_pane_hints() {
        let hints = build_hints(&KeyBindings::default(), ActivePane::Articles);
        assert!(hints.contains("[j/↓] Navigate"));
        assert!(hints.contains("[g/G] Jump"));
        assert!(hints.contains("[Enter/Space] Read"));
        assert!(!hints.contains("Choose"));
    }

    #[test]
    fn article_view_hints() {
        let hints = build_hints(&KeyBindings::default(), ActivePane::ArticleView);
        assert!(hints.contains("[j/k] Scroll"));
        assert!(hints.contains("[Esc/Backspace] Back"));
        assert!(!hints.contains("Moods"));
    }
}
