use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use moodboard::api::NewsClient;
use moodboard::config::{self, ChartSource};
use moodboard::{action, app::App, event, logging, ui, Distribution, Mood};

const LONG_HELP: &str = r#"
CONFIGURATION
    Configuration file: $XDG_CONFIG_HOME/moodboard/config.yaml
                       (typically ~/.config/moodboard/config.yaml)

    Log file:          $XDG_STATE_HOME/moodboard/moodboard.log
                       (typically ~/.local/state/moodboard/moodboard.log)

    Example configuration:
        default_mood: happy          # happy, sad, angry, surprised
        log_level: info
        api:
          base_url: "http://localhost:8000"
          path: "/api/news/{mood}/"  # {mood} becomes the mood name
          timeout_secs: 30
        chart:
          source: tally              # tally (fetched counts) or fixed
          distribution: [10, 20, 30, 40]
        display:
          format:
            time: 24                 # 12 or 24 hour format
            content_lines: 3
          columns:
            articles: 60             # Width percentages
            chart: 40
          colours:
            active_border: "cyan"
            inactive_border: "darkgray"
            border_type: "plain"     # plain, double, thick, rounded
            highlight_bg: "darkgray"
            selected_mood: "yellow"
        keybindings:
          global:
            quit: ["q", "Ctrl-c"]
            focus_next: ["Tab"]
            focus_prev: ["Shift-Tab"]
            refresh: "r"
            jump_top: "g"
            jump_bottom: "G"
            mood_happy: "1"
            mood_sad: "2"
            mood_angry: "3"
            mood_surprised: "4"
          moods:
            next: ["l", "Right"]
            prev: ["h", "Left"]
            select: ["Enter", "Space"]
          articles:
            move_down: ["j", "Down"]
            move_up: ["k", "Up"]
            open: ["Enter", "Space"]
          article_view:
            close: ["Esc", "Backspace"]

KEYBINDINGS
    Global (work in all panes):
        q, Ctrl+c      Quit
        Tab            Focus next pane
        Shift+Tab      Focus previous pane
        1 2 3 4        Show Happy / Sad / Angry / Surprised articles
        r              Fetch the current mood again
        g              Jump to first article
        G              Jump to last article

    Mood Bar:
        h, ←           Previous mood button
        l, →           Next mood button
        Enter, Space   Press the button

    Articles Pane:
        j, ↓           Move down
        k, ↑           Move up
        Ctrl+d, PgDn   Scroll half-page down
        Ctrl+u, PgUp   Scroll half-page up
        Enter, Space   Read the selected article in full

    Article View:
        j, ↓ / k, ↑    Scroll down / up
        Ctrl+d, Ctrl+u Scroll half-page
        Esc, Backspace Back to the list

HEADLESS USE
    moodboard fetch sad            Print the sad articles as JSON
    moodboard chart 10,20,30,40    Print the donut chart configuration
"#;

/// Moodboard - browse news articles by mood
#[derive(Parser, Debug)]
#[command(name = "moodboard")]
#[command(version)]
#[command(about = "Browse mood-tagged news articles and their emotional distribution", long_about = None)]
#[command(after_help = LONG_HELP)]
struct Args {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Mood selected on startup
    #[arg(long)]
    mood: Option<Mood>,

    /// Base URL of the article service
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Chart these four comma separated values instead of fetched counts
    #[arg(long, value_name = "V1,V2,V3,V4")]
    distribution: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the articles for one mood and print them as JSON
    Fetch {
        /// happy, sad, angry or surprised
        mood: Mood,
    },
    /// Print the donut chart configuration for four values as JSON
    Chart {
        /// Comma separated values in Happy, Sad, Angry, Surprised order
        #[arg(value_name = "V1,V2,V3,V4", allow_hyphen_values = true)]
        values: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1. Load configuration and apply command-line overrides.
    let mut config = match &args.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if let Some(mood) = args.mood {
        config.default_mood = mood;
    }
    if let Some(values) = &args.distribution {
        let distribution = Distribution::parse(values).context("Invalid --distribution")?;
        config.chart.source = ChartSource::Fixed;
        config.chart.distribution = distribution.values().to_vec();
    }

    // 2. Log to a file; the terminal belongs to the UI.  Headless commands
    //    still run when the log file is unavailable.
    let headless = args.command.is_some();
    logging::setup(&config.log_level, logging::log_path(), headless)?;

    // 3. Headless commands.
    match args.command {
        Some(Command::Fetch { mood }) => {
            let client = NewsClient::new(&config.api);
            let batch = client.fetch_articles(mood).await?;
            if batch.skipped > 0 {
                eprintln!("Skipped {} malformed article(s)", batch.skipped);
            }
            println!("{}", serde_json::to_string_pretty(&batch.articles)?);
            return Ok(());
        }
        Some(Command::Chart { values }) => {
            let chart = Distribution::parse(&values)?.to_config();
            println!("{}", serde_json::to_string_pretty(&chart)?);
            return Ok(());
        }
        None => {}
    }

    tracing::info!(mood = %config.default_mood, api = %config.api.base_url, "starting");

    // 4. Build the application state; this starts the first fetch.
    let client = NewsClient::new(&config.api);
    let (mut app, mut fetch_rx) = App::new_with_receivers(config, client);

    // 5. Set up the terminal for TUI rendering.
    let mut terminal = ratatui::init();

    // 6. Create the async event handler (100 ms tick rate drives the spinner).
    let mut events = event::EventHandler::new(100);

    // 7. Main event loop.
    let result: anyhow::Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut app)) {
            break Err(e.into());
        }

        tokio::select! {
            event = events.next() => {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => break Err(e),
                };
                if event == event::Event::Tick {
                    app.tick();
                } else if let Some(act) = action::handle_event(&event, app.active_pane, &app.config.keybindings) {
                    app.update(act);
                }
            }
            Some(outcome) = fetch_rx.recv() => {
                app.handle_fetch_outcome(outcome);
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // 8. Hand the terminal back.
    ratatui::restore();
    tracing::info!("exiting");

    result
}
