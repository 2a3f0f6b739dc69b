use std::f64::consts::TAU;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Painter, Shape};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::chart::{ChartError, Distribution};
use crate::config::ColourConfig;
use crate::mood::Mood;
use crate::ui::theme;

const OUTER_RADIUS: f64 = 0.95;
const INNER_RADIUS: f64 = 0.5;
const RADIUS_STEP: f64 = 0.01;
const ANGLE_STEPS: usize = 720;
const NO_DATA: &str = "No data yet";

/// A ring split into one arc per mood, starting at twelve o'clock and
/// running clockwise.  An empty distribution draws a grey ring.
struct Donut {
    distribution: Distribution,
}

impl Shape for Donut {
    fn draw(&self, painter: &mut Painter) {
        let mut r = INNER_RADIUS;
        while r <= OUTER_RADIUS {
            for step in 0..ANGLE_STEPS {
                let fraction = step as f64 / ANGLE_STEPS as f64;
                let color = self
                    .distribution
                    .segment_at(fraction)
                    .map_or(Color::DarkGray, theme::mood_color);
                let theta = fraction * TAU;
                if let Some((x, y)) = painter.get_point(r * theta.sin(), r * theta.cos()) {
                    painter.paint(x, y, color);
                }
            }
            r += RADIUS_STEP;
        }
    }
}

/// Half-width of the canvas x range so the ring stays round.  Terminal
/// cells are roughly twice as tall as they are wide.
pub fn x_extent(width: u16, height: u16) -> f64 {
    if height == 0 {
        return 1.0;
    }
    (f64::from(width) / (2.0 * f64::from(height))).max(1.0)
}

/// One legend row per mood: colour swatch, label, value and share.
pub fn legend_lines(distribution: &Distribution) -> Vec<Line<'static>> {
    Mood::ALL
        .into_iter()
        .map(|mood| {
            let share = distribution
                .share(mood)
                .map(|s| format!("{:>5.1}%", s * 100.0))
                .unwrap_or_else(|| "    -".to_string());
            Line::from(vec![
                Span::styled("■ ", Style::new().fg(theme::mood_color(mood))),
                Span::raw(format!("{:<10}", mood.label())),
                Span::raw(format!("{:>6} ", distribution.value(mood))),
                Span::styled(share, theme::META_STYLE),
            ])
        })
        .collect()
}

/// Render the distribution chart pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.chart_is_tally() {
        " Mood distribution (fetched) "
    } else {
        " Mood distribution "
    };
    render_chart(frame, area, &app.chart_data(), title, &app.config.display.colours);
}

/// Draw `data` as a donut with a legend, or the validation error in its place.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    data: &Result<Distribution, ChartError>,
    title: &str,
    colours: &ColourConfig,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(theme::get_border_style(false, colours))
        .border_type(theme::get_border_type(colours));

    let distribution = match data {
        Ok(d) => *d,
        Err(e) => {
            let text = Paragraph::new(e.to_string())
                .style(theme::ERROR_STYLE)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(text, area);
            return;
        }
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(Mood::ALL.len() as u16)])
        .split(inner);

    frame.render_widget(Paragraph::new(legend_lines(&distribution)), sections[1]);

    let plot = sections[0];
    let extent = x_extent(plot.width, plot.height);
    let empty = distribution.total() <= 0.0;
    // Start of a label centred in the ring.
    let label_x = -(NO_DATA.chars().count() as f64) * extent / f64::from(plot.width.max(1));

    let donut = Donut { distribution };
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-extent, extent])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            ctx.draw(&donut);
            if empty {
                ctx.print(label_x, 0.0, Span::styled(NO_DATA, theme::META_STYLE));
            }
        });

    frame.render_widget(canvas, plot);
}
