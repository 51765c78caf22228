pub mod charting;

use itertools::Itertools;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Gauge, Paragraph, Sparkline, Wrap,
    },
    Frame,
};

use crate::{app::App, score::PLACEHOLDER_LABEL};

const SIDE_PANEL_WIDTH: u16 = 38;
const HEATMAP_WIDTH: u16 = 18;
const ANALYSIS_PLACEHOLDER: &str =
    "Record at least 5 seconds of movement to receive a personalised analysis of your pattern.";

/// Draw the whole screen. Records the canvas area on the app so pointer
/// events can be mapped into it.
pub fn draw(f: &mut Frame, app: &mut App) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());
    let [canvas_area, side] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)]).areas(body);

    let canvas_block = Block::bordered().title(" TulipaMouse ");
    app.set_canvas(canvas_block.inner(canvas_area));

    render_canvas(f, app, canvas_block, canvas_area);
    render_side_panel(f, app, side);
    render_footer(f, app, footer);
}

fn render_canvas(f: &mut Frame, app: &App, block: Block, area: Rect) {
    let (width, height) = app.canvas_size_px();
    let samples = app.session.samples().as_slice();
    let show_hint = samples.is_empty() && !app.session.is_recording();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width.max(1.0)])
        .y_bounds([0.0, height.max(1.0)])
        .paint(move |ctx| {
            // canvas y grows upwards
            for (a, b) in samples.iter().tuple_windows() {
                ctx.draw(&CanvasLine {
                    x1: a.x,
                    y1: height - a.y,
                    x2: b.x,
                    y2: height - b.y,
                    color: charting::speed_to_color(b.speed),
                });
            }
            if show_hint {
                ctx.print(
                    width * 0.25,
                    height * 0.5,
                    Span::styled(
                        "press space and move the mouse here",
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let [score_area, stats_area, chart_area, analysis_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Min(0),
    ])
    .areas(area);

    let score_block = Block::bordered().title(" Score ");
    match app.session.score() {
        Some(score) => {
            let color = charting::tier_color(score.tier);
            let tier_label = Line::from(score.tier.to_string()).style(Style::default().fg(color));
            let gauge = Gauge::default()
                .block(score_block.title_bottom(tier_label))
                .gauge_style(Style::default().fg(color))
                .percent(u16::from(score.value))
                .label(format!("{}", score.value));
            f.render_widget(gauge, score_area);
        }
        None => {
            let placeholder = Paragraph::new(vec![
                Line::from("—").style(Style::default().add_modifier(Modifier::BOLD)),
                Line::from(PLACEHOLDER_LABEL).style(Style::default().add_modifier(Modifier::DIM)),
            ])
            .block(score_block);
            f.render_widget(placeholder, score_area);
        }
    }

    let live = app.session.live_stats();
    let tremor_span = match (live.tremor, live.tremor_severity()) {
        (Some(t), Some(severity)) => Span::styled(
            format!("{t:.1}"),
            Style::default().fg(charting::severity_color(severity)),
        ),
        _ => Span::raw("—"),
    };
    let pointer = match app.session.cursor() {
        Some((x, y)) => format!("x: {} y: {}", x.round(), y.round()),
        None => "—".to_string(),
    };
    let cfg = app.config();
    let stats = Paragraph::new(vec![
        Line::from(format!("Speed     {} px/s", live.speed)),
        Line::from(format!("Points    {}", live.points)),
        Line::from(vec![Span::raw("Tremor    "), tremor_span]),
        Line::from(format!("Distance  {} px", live.distance)),
        Line::from(format!("Pointer   {pointer}")),
        Line::from(format!(
            "Filter    {}% / {}px / {}px/s",
            cfg.smoothing_pct, cfg.dead_zone_px, cfg.velocity_threshold_px_s
        ))
        .style(Style::default().add_modifier(Modifier::DIM)),
    ])
    .block(Block::bordered().title(" Stats "));
    f.render_widget(stats, stats_area);

    let [velocity_area, heatmap_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(HEATMAP_WIDTH)])
            .areas(chart_area);

    let (bars, max) = charting::velocity_bars(app.session.speed_history());
    let sparkline = Sparkline::default()
        .block(Block::bordered().title(" Velocity "))
        .data(&bars)
        .max(max)
        .style(Style::default().fg(charting::RED));
    f.render_widget(sparkline, velocity_area);

    render_heatmap(f, app, heatmap_area);

    let analysis = match app.session.report() {
        Some(report) => Paragraph::new(vec![
            Line::from(report.title()).style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(charting::severity_color(report.severity)),
            ),
            Line::from(report.message()),
        ]),
        None => Paragraph::new(ANALYSIS_PLACEHOLDER)
            .style(Style::default().add_modifier(Modifier::ITALIC)),
    };
    f.render_widget(
        analysis
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Analysis ")),
        analysis_area,
    );
}

/// Density of visited canvas regions, shaded on the red ramp
fn render_heatmap(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered().title(" Heatmap ");
    let inner = block.inner(area);
    let samples = charting::heatmap_samples(app.session.samples().as_slice());
    let cells = charting::heatmap_cells(
        samples,
        app.canvas_size_px(),
        (usize::from(inner.width), usize::from(inner.height)),
    );
    let max = cells.iter().flatten().copied().max().unwrap_or(0);

    let lines: Vec<Line> = cells
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&count| match charting::heat_cell(count, max) {
                    Some((shade, color)) => Span::styled(shade, Style::default().fg(color)),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let status_color = if app.session.is_recording() {
        charting::RED
    } else {
        Color::Gray
    };
    let mut spans = vec![
        Span::styled(
            format!(" ● {} ", app.status()),
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " [space] record/pause  [c] clear  [e] export  [q] quit ",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    if let Some(notice) = app.notice() {
        spans.push(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_sets_canvas_area() {
        let mut app = App::new(Config::default());
        render(&mut app);

        let canvas = app.canvas();
        assert_eq!(canvas, Rect::new(1, 1, 100 - SIDE_PANEL_WIDTH - 2, 30 - 1 - 2));
    }

    #[test]
    fn test_empty_session_shows_placeholders() {
        let mut app = App::new(Config::default());
        let screen = render(&mut app);

        assert!(screen.contains("Waiting to start"));
        assert!(screen.contains("Score"));
        assert!(screen.contains("Move the pointer"));
    }

    fn has_heat(screen: &str) -> bool {
        screen.chars().any(|c| matches!(c, '░' | '▒' | '▓'))
    }

    #[test]
    fn test_heatmap_fills_and_clears() {
        let mut app = App::new(Config::default());
        assert!(!has_heat(&render(&mut app)));

        app.toggle_recording();
        for i in 0..40 {
            let y = 60.0 + f64::from(i % 4) * 16.0;
            app.on_pointer(20.0 + f64::from(i) * 8.0, y, f64::from(i) * 16.0);
        }
        assert!(has_heat(&render(&mut app)));

        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        let screen = render(&mut app);
        assert!(screen.contains("Heatmap"));
        assert!(!has_heat(&screen));
    }

    #[test]
    fn test_heatmap_waits_for_refresh_step() {
        let mut app = App::new(Config::default());
        render(&mut app);
        app.toggle_recording();
        for i in 0..19 {
            app.on_pointer(20.0 + f64::from(i) * 8.0, 60.0, f64::from(i) * 16.0);
        }
        assert!(!has_heat(&render(&mut app)));

        app.on_pointer(200.0, 60.0, 19.0 * 16.0);
        assert!(has_heat(&render(&mut app)));
    }

    #[test]
    fn test_recording_session_renders_score() {
        let mut app = App::new(Config::default());
        render(&mut app);
        app.toggle_recording();
        for i in 0..20 {
            app.on_pointer(10.0 + f64::from(i) * 6.0, 40.0, f64::from(i) * 16.0);
        }

        let screen = render(&mut app);
        assert!(screen.contains("Recording..."));
        assert!(screen.contains("100"));
        assert!(screen.contains("Smooth movement"));
    }
}
