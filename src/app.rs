use ratatui::widgets::ListState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::action::Action;
use crate::api::{self, Article, FetchOutcome, FetchTicket, NewsClient};
use crate::chart::{ChartError, Distribution};
use crate::config::{ChartSource, Config};
use crate::mood::Mood;
use crate::moodboard::{Applied, MoodBoard};

/// Articles moved by a half-page jump.
const HALF_PAGE: usize = 5;

/// Lines scrolled by a half-page jump in the article view.
const VIEW_HALF_PAGE: u16 = 10;

/// Which pane currently has focus in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Moods,
    Articles,
    /// The selected article, read in full.
    ArticleView,
}

impl ActivePane {
    fn toggled(self) -> Self {
        match self {
            ActivePane::Moods => ActivePane::Articles,
            ActivePane::Articles | ActivePane::ArticleView => ActivePane::Moods,
        }
    }
}

/// Format the time of the last successful fetch for the status bar.
pub fn format_time(time: &chrono::DateTime<chrono::Local>, hour_format: u8) -> String {
    if hour_format == 12 {
        time.format("%-I:%M %p").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

/// Top-level application state.
///
/// Holds everything the TUI needs to render and the event loop needs to
/// drive the application.
pub struct App {
    /// When `true` the main loop will exit.
    pub should_quit: bool,
    /// Which pane currently has keyboard focus.
    pub active_pane: ActivePane,
    /// Selected mood and its articles.
    pub board: MoodBoard,
    /// Mood button under the cursor in the mood bar.
    pub mood_cursor: Mood,
    /// Selection state for the articles list widget.
    pub articles_state: ListState,
    /// User configuration.
    pub config: Config,
    /// An optional status message to display in the status bar.
    pub status_message: Option<String>,
    /// Advanced on every tick; drives the loading spinner.
    pub tick_count: usize,
    /// Vertical scroll offset in the article view.
    pub article_scroll: u16,
    /// Wrapped line count of the open article, set when it is drawn.
    pub article_lines: u16,

    // -- Private fields --
    client: NewsClient,
    /// Sender half of the channel used by background fetch tasks.
    fetch_tx: UnboundedSender<FetchOutcome>,
    /// Validated `chart.distribution` when the chart source is fixed.
    fixed_distribution: Option<Result<Distribution, ChartError>>,
}

impl App {
    /// Create a new `App` and return it along with the fetch receiver.
    ///
    /// The receiver is returned separately so the main loop can `select!`
    /// on it while holding `&mut App`.  The initial mood's fetch is started
    /// immediately, so this must run inside a tokio runtime.
    pub fn new_with_receivers(
        config: Config,
        client: NewsClient,
    ) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();

        let fixed_distribution = match config.chart.source {
            ChartSource::Fixed => Some(Distribution::try_from_slice(&config.chart.distribution)),
            ChartSource::Tally => None,
        };
        if let Some(Err(e)) = &fixed_distribution {
            tracing::error!(error = %e, "invalid chart distribution in config");
        }

        let initial_mood = config.default_mood;
        let mut app = Self {
            should_quit: false,
            active_pane: ActivePane::Moods,
            board: MoodBoard::new(initial_mood),
            mood_cursor: initial_mood,
            articles_state: ListState::default(),
            config,
            status_message: None,
            tick_count: 0,
            article_scroll: 0,
            article_lines: 0,
            client,
            fetch_tx,
            fixed_distribution,
        };

        app.select_mood(initial_mood);

        (app, fetch_rx)
    }

    /// Apply a user action.
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::FocusNext | Action::FocusPrev => {
                self.active_pane = self.active_pane.toggled();
            }

            Action::SelectMood(mood) => {
                self.mood_cursor = mood;
                self.select_mood(mood);
            }

            Action::MoodCursorNext => self.mood_cursor = self.mood_cursor.next(),
            Action::MoodCursorPrev => self.mood_cursor = self.mood_cursor.prev(),
            Action::PressMoodCursor => self.select_mood(self.mood_cursor),

            Action::Refresh => {
                let ticket = self.board.refresh();
                self.start_fetch(ticket);
            }

            Action::OpenArticle => {
                if self.selected_article().is_some() {
                    self.article_scroll = 0;
                    self.active_pane = ActivePane::ArticleView;
                }
            }
            Action::CloseArticle => {
                if self.active_pane == ActivePane::ArticleView {
                    self.active_pane = ActivePane::Articles;
                }
            }

            Action::MoveDown => match self.active_pane {
                ActivePane::ArticleView => self.scroll_article(1),
                _ => self.move_article_selection(1),
            },
            Action::MoveUp => match self.active_pane {
                ActivePane::ArticleView => self.scroll_article(-1),
                _ => self.move_article_selection(-1),
            },
            Action::ScrollHalfPageDown => match self.active_pane {
                ActivePane::ArticleView => self.scroll_article(i32::from(VIEW_HALF_PAGE)),
                _ => self.jump_article_selection(HALF_PAGE as isize),
            },
            Action::ScrollHalfPageUp => match self.active_pane {
                ActivePane::ArticleView => self.scroll_article(-i32::from(VIEW_HALF_PAGE)),
                _ => self.jump_article_selection(-(HALF_PAGE as isize)),
            },

            Action::JumpToTop => match self.active_pane {
                ActivePane::ArticleView => self.article_scroll = 0,
                _ => {
                    if !self.board.articles().is_empty() {
                        self.articles_state.select(Some(0));
                    }
                }
            },
            Action::JumpToBottom => match self.active_pane {
                ActivePane::ArticleView => self.article_scroll = self.article_lines.saturating_sub(1),
                _ => {
                    let len = self.board.articles().len();
                    if len > 0 {
                        self.articles_state.select(Some(len - 1));
                    }
                }
            },
        }
    }

    /// The article under the list cursor.
    pub fn selected_article(&self) -> Option<&Article> {
        self.articles_state
            .selected()
            .and_then(|i| self.board.articles().get(i))
    }

    /// Process a completed background fetch.
    pub fn handle_fetch_outcome(&mut self, outcome: FetchOutcome) {
        let mood = outcome.ticket.mood;
        match self.board.apply(outcome) {
            Applied::Replaced { count, skipped } => {
                tracing::info!(%mood, count, skipped, "articles replaced");
                // The open article belonged to the old list.
                if self.active_pane == ActivePane::ArticleView {
                    self.active_pane = ActivePane::Articles;
                }
                self.article_scroll = 0;
                self.articles_state
                    .select(if count == 0 { None } else { Some(0) });
                self.status_message = if skipped > 0 {
                    Some(format!(
                        "Skipped {skipped} malformed article{}",
                        if skipped == 1 { "" } else { "s" }
                    ))
                } else {
                    None
                };
            }
            Applied::Failed(message) => {
                tracing::error!(%mood, error = %message, "fetch failed");
                self.status_message = Some(format!("Fetch failed: {message}"));
            }
            Applied::Stale => {}
        }
    }

    /// Advance the tick counter.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// The numbers the distribution chart should show.
    pub fn chart_data(&self) -> Result<Distribution, ChartError> {
        match &self.fixed_distribution {
            Some(fixed) => fixed.clone(),
            None => Ok(self.board.tally().distribution()),
        }
    }

    /// Whether the chart shows live article counts.
    pub fn chart_is_tally(&self) -> bool {
        self.fixed_distribution.is_none()
    }

    fn select_mood(&mut self, mood: Mood) {
        let ticket = self.board.select_mood(mood);
        self.start_fetch(ticket);
    }

    fn start_fetch(&mut self, ticket: FetchTicket) {
        tracing::info!(mood = %ticket.mood, generation = ticket.generation, "fetching articles");
        self.status_message = None;
        api::spawn_fetch(&self.fetch_tx, &self.client, ticket);
    }

    /// Scroll the article view by `delta` lines, stopping at the last line.
    fn scroll_article(&mut self, delta: i32) {
        let max_scroll = i32::from(self.article_lines.saturating_sub(1));
        let scroll = (i32::from(self.article_scroll) + delta).clamp(0, max_scroll);
        self.article_scroll = scroll as u16;
    }

    /// Move the article cursor by `delta`, wrapping at both ends.
    fn move_article_selection(&mut self, delta: isize) {
        let len = self.board.articles().len();
        if len == 0 {
            return;
        }
        let current = self.articles_state.selected().unwrap_or(0) as isize;
        let new_idx = (current + delta).rem_euclid(len as isize) as usize;
        self.articles_state.select(Some(new_idx));
    }

    /// Move the article cursor by `delta`, stopping at the ends.
    fn jump_article_selection(&mut self, delta: isize) {
        let len = self.board.articles().len();
        if len == 0 {
            return;
        }
        let current = self.articles_state.selected().unwrap_or(0) as isize;
        let new_idx = (current + delta).clamp(0, len as isize - 1) as usize;
        self.articles_state.select(Some(new_idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Article, ArticleBatch};
    use crate::config::ApiConfig;
    use crate::test_support::{dead_url, serve};

    fn config_for(base_url: &str) -> Config {
        let mut config = Config::default();
        config.api = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        config
    }

    async fn offline_app(config: Config) -> (App, UnboundedReceiver<FetchOutcome>) {
        let mut config = config;
        config.api.base_url = dead_url().await;
        let client = NewsClient::new(&config.api);
        App::new_with_receivers(config, client)
    }

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("title {i}"),
                content: format!("content {i}"),
            })
            .collect()
    }

    /// Answer the current selection with `n` articles.
    fn answer(app: &mut App, n: usize) {
        let ticket = FetchTicket {
            generation: app.board.refresh().generation,
            mood: app.board.selected_mood(),
        };
        app.handle_fetch_outcome(FetchOutcome {
            ticket,
            result: Ok(ArticleBatch {
                articles: articles(n),
                skipped: 0,
            }),
        });
    }

    #[tokio::test]
    async fn startup_fetches_default_mood() {
        let (base_url, server) = serve(1, "200 OK", r#"[{"title":"a","content":"b"}]"#).await;
        let mut config = config_for(&base_url);
        config.default_mood = Mood::Sad;
        let client = NewsClient::new(&config.api);

        let (mut app, mut rx) = App::new_with_receivers(config, client);
        assert!(app.board.is_loading());

        let outcome = rx.recv().await.unwrap();
        app.handle_fetch_outcome(outcome);

        assert_eq!(server.await.unwrap(), vec!["GET /api/news/sad/ HTTP/1.1"]);
        assert_eq!(app.board.articles().len(), 1);
        assert_eq!(app.articles_state.selected(), Some(0));
        assert!(!app.board.is_loading());
    }

    #[tokio::test]
    async fn selecting_same_mood_twice_requests_twice() {
        let (base_url, server) = serve(3, "200 OK", "[]").await;
        let config = config_for(&base_url);
        let client = NewsClient::new(&config.api);

        let (mut app, mut rx) = App::new_with_receivers(config, client);
        app.update(Action::SelectMood(Mood::Angry));
        app.update(Action::SelectMood(Mood::Angry));

        for _ in 0..3 {
            let outcome = rx.recv().await.unwrap();
            app.handle_fetch_outcome(outcome);
        }

        let mut lines = server.await.unwrap();
        lines.sort();
        assert_eq!(
            lines,
            vec![
                "GET /api/news/angry/ HTTP/1.1",
                "GET /api/news/angry/ HTTP/1.1",
                "GET /api/news/happy/ HTTP/1.1",
            ]
        );
        assert_eq!(app.board.selected_mood(), Mood::Angry);
        assert!(app.board.articles().is_empty());
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn failed_fetch_sets_status_and_keeps_list() {
        let (mut app, mut rx) = offline_app(Config::default()).await;
        // Drop the startup fetch and install a list by hand.
        let _ = rx.recv().await;
        answer(&mut app, 2);

        app.update(Action::SelectMood(Mood::Surprised));
        let outcome = rx.recv().await.unwrap();
        app.handle_fetch_outcome(outcome);

        assert_eq!(app.board.articles().len(), 2);
        assert!(app.status_message.as_deref().unwrap().starts_with("Fetch failed"));
    }

    #[tokio::test]
    async fn skipped_entries_show_in_status() {
        let body = r#"[{"title":"ok","content":"fine"},{"title":"bad"}]"#;
        let (base_url, _server) = serve(1, "200 OK", body).await;
        let config = config_for(&base_url);
        let client = NewsClient::new(&config.api);

        let (mut app, mut rx) = App::new_with_receivers(config, client);
        let outcome = rx.recv().await.unwrap();
        app.handle_fetch_outcome(outcome);

        assert_eq!(app.board.articles().len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Skipped 1 malformed article"));
    }

    #[tokio::test]
    async fn mood_cursor_moves_and_presses() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        app.update(Action::MoodCursorNext);
        app.update(Action::MoodCursorNext);
        assert_eq!(app.mood_cursor, Mood::Angry);
        assert_eq!(app.board.selected_mood(), Mood::Happy);

        app.update(Action::PressMoodCursor);
        assert_eq!(app.board.selected_mood(), Mood::Angry);

        app.update(Action::MoodCursorPrev);
        app.update(Action::MoodCursorPrev);
        app.update(Action::MoodCursorPrev);
        assert_eq!(app.mood_cursor, Mood::Surprised);
    }

    #[tokio::test]
    async fn direct_mood_key_moves_cursor_too() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        app.update(Action::SelectMood(Mood::Sad));
        assert_eq!(app.mood_cursor, Mood::Sad);
        assert_eq!(app.board.selected_mood(), Mood::Sad);
    }

    #[tokio::test]
    async fn focus_toggles_between_panes() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        assert_eq!(app.active_pane, ActivePane::Moods);
        app.update(Action::FocusNext);
        assert_eq!(app.active_pane, ActivePane::Articles);
        app.update(Action::FocusPrev);
        assert_eq!(app.active_pane, ActivePane::Moods);
    }

    #[tokio::test]
    async fn article_navigation_wraps_and_clamps() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        answer(&mut app, 8);
        assert_eq!(app.articles_state.selected(), Some(0));

        app.update(Action::MoveUp);
        assert_eq!(app.articles_state.selected(), Some(7));
        app.update(Action::MoveDown);
        assert_eq!(app.articles_state.selected(), Some(0));

        app.update(Action::ScrollHalfPageDown);
        assert_eq!(app.articles_state.selected(), Some(5));
        app.update(Action::ScrollHalfPageDown);
        assert_eq!(app.articles_state.selected(), Some(7));
        app.update(Action::ScrollHalfPageUp);
        assert_eq!(app.articles_state.selected(), Some(2));

        app.update(Action::JumpToTop);
        assert_eq!(app.articles_state.selected(), Some(0));
        app.update(Action::JumpToBottom);
        assert_eq!(app.articles_state.selected(), Some(7));
    }

    #[tokio::test]
    async fn navigation_on_empty_list_is_a_no_op() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        answer(&mut app, 0);
        app.update(Action::MoveDown);
        app.update(Action::JumpToBottom);
        assert_eq!(app.articles_state.selected(), None);
    }

    #[tokio::test]
    async fn quit_sets_flag() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        app.update(Action::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn tally_chart_follows_fetch_results() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        assert!(app.chart_is_tally());
        answer(&mut app, 3);
        app.update(Action::SelectMood(Mood::Angry));
        answer(&mut app, 1);

        let data = app.chart_data().unwrap();
        assert_eq!(data.values(), [3.0, 0.0, 1.0, 0.0]);
    }

    #[tokio::test]
    async fn fixed_chart_uses_configured_distribution() {
        let mut config = Config::default();
        config.chart.source = ChartSource::Fixed;
        config.chart.distribution = vec![10.0, 20.0, 30.0, 40.0];
        let (app, _rx) = offline_app(config).await;

        assert!(!app.chart_is_tally());
        assert_eq!(app.chart_data().unwrap().values(), [10.0, 20.0, 30.0, 40.0]);
    }

    #[tokio::test]
    async fn invalid_fixed_distribution_is_reported() {
        let mut config = Config::default();
        config.chart.source = ChartSource::Fixed;
        config.chart.distribution = vec![1.0, 2.0, 3.0];
        let (app, _rx) = offline_app(config).await;

        assert_eq!(
            app.chart_data().unwrap_err(),
            ChartError::Length { expected: 4, actual: 3 }
        );
    }

    #[tokio::test]
    async fn open_scroll_and_close_article() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        answer(&mut app, 3);
        app.update(Action::MoveDown);
        app.update(Action::OpenArticle);
        assert_eq!(app.active_pane, ActivePane::ArticleView);
        assert_eq!(app.selected_article().unwrap().title, "title 1");

        // Normally set by the article pane when it draws.
        app.article_lines = 25;
        app.update(Action::MoveDown);
        app.update(Action::ScrollHalfPageDown);
        assert_eq!(app.article_scroll, 11);
        app.update(Action::ScrollHalfPageDown);
        app.update(Action::ScrollHalfPageDown);
        assert_eq!(app.article_scroll, 24);
        app.update(Action::MoveUp);
        assert_eq!(app.article_scroll, 23);
        app.update(Action::JumpToTop);
        assert_eq!(app.article_scroll, 0);
        app.update(Action::MoveUp);
        assert_eq!(app.article_scroll, 0);
        // The list cursor did not move while reading.
        assert_eq!(app.articles_state.selected(), Some(1));

        app.update(Action::CloseArticle);
        assert_eq!(app.active_pane, ActivePane::Articles);
    }

    #[tokio::test]
    async fn open_without_articles_stays_in_list() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        answer(&mut app, 0);
        app.active_pane = ActivePane::Articles;
        app.update(Action::OpenArticle);
        assert_eq!(app.active_pane, ActivePane::Articles);
    }

    #[tokio::test]
    async fn new_list_closes_open_article() {
        let (mut app, _rx) = offline_app(Config::default()).await;
        answer(&mut app, 2);
        app.update(Action::OpenArticle);
        app.article_lines = 40;
        app.update(Action::JumpToBottom);
        assert_eq!(app.article_scroll, 39);

        answer(&mut app, 4);
        assert_eq!(app.active_pane, ActivePane::Articles);
        assert_eq!(app.article_scroll, 0);
    }

    #[test]
    fn format_time_respects_hour_format() {
        use chrono::TimeZone;
        let time = chrono::Local.with_ymd_and_hms(2024, 5, 1, 15, 7, 0).unwrap();
        assert_eq!(format_time(&time, 24), "15:07");
        assert_eq!(format_time(&time, 12), "3:07 PM");
    }
}
