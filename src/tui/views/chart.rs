//! Animated donut chart panel
//!
//! Draws whatever frame the engine last committed. The ring is sampled on a
//! polar grid and each sample takes the fill of the wedge under its angle.

use std::collections::BTreeMap;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::chart::{ChartFrame, ChartKind, Fill};
use crate::display::report::format_percentage;
use crate::tui::app::App;
use crate::tui::layout::ChartLayout;
use crate::tui::theme::to_color;

const INNER_RADIUS: f64 = 0.55;
const OUTER_RADIUS: f64 = 1.0;
const RADIAL_STEPS: usize = 12;
const ANGLE_STEP_DEG: f64 = 1.0;

/// Sample points of the ring grouped by color; transparent wedges are left out
pub fn donut_points(frame: &ChartFrame) -> BTreeMap<(u8, u8, u8), Vec<(f64, f64)>> {
    let wedges = frame.wedges();
    let mut points: BTreeMap<(u8, u8, u8), Vec<(f64, f64)>> = BTreeMap::new();

    let steps = (360.0 / ANGLE_STEP_DEG) as usize;
    for step in 0..steps {
        let angle = step as f64 * ANGLE_STEP_DEG;
        let Some(Fill::Color(color)) = wedges
            .iter()
            .find(|wedge| wedge.contains(angle))
            .map(|wedge| wedge.fill)
        else {
            continue;
        };

        let (sin, cos) = angle.to_radians().sin_cos();
        let bucket = points.entry((color.r, color.g, color.b)).or_default();
        for ring in 0..=RADIAL_STEPS {
            let r = INNER_RADIUS + (OUTER_RADIUS - INNER_RADIUS) * ring as f64 / RADIAL_STEPS as f64;
            bucket.push((r * cos, r * sin));
        }
    }
    points
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" グラフ ")
        .borders(Borders::ALL)
        .border_style(app.palette.border(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = ChartLayout::new(inner);
    render_selector(frame, app, layout.selector);

    if let Some(message) = app.chart.no_data_message() {
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::Gray)),
            layout.donut,
        );
        return;
    }

    let Some(chart_frame) = app.chart.last_frame() else {
        return;
    };
    render_donut(frame, chart_frame, layout.donut);
    render_legend(frame, chart_frame, layout.legend);
}

fn render_selector(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for kind in ChartKind::ALL {
        let style = if kind == app.chart.kind() {
            app.palette.selected()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", kind.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_donut(frame: &mut Frame, chart_frame: &ChartFrame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    // Terminal cells are about twice as tall as wide
    let y_half = OUTER_RADIUS * 1.1;
    let x_half = y_half * f64::from(area.width) * 0.5 / f64::from(area.height);
    let points = donut_points(chart_frame);

    let center = chart_frame.center.as_ref().map(|center| {
        let text = center.to_string();
        let width = Line::from(text.as_str()).width() as f64;
        let units_per_cell = 2.0 * x_half / f64::from(area.width);
        let color = to_color(center.tone.color());
        (text, -width / 2.0 * units_per_cell, color)
    });

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-y_half, y_half])
        .paint(move |ctx| {
            for ((r, g, b), coords) in &points {
                ctx.draw(&Points {
                    coords,
                    color: Color::Rgb(*r, *g, *b),
                });
            }
            if let Some((text, x, color)) = &center {
                ctx.print(
                    *x,
                    0.0,
                    Span::styled(
                        text.clone(),
                        Style::default().fg(*color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_legend(frame: &mut Frame, chart_frame: &ChartFrame, area: Rect) {
    let total: i64 = chart_frame.legend.iter().map(|e| e.amount.units()).sum();
    let lines: Vec<Line> = chart_frame
        .legend
        .iter()
        .map(|entry| {
            let share = if total > 0 {
                entry.amount.units() as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(to_color(entry.color))),
                Span::raw(format!(
                    "{}  {}  ({})",
                    entry.label,
                    entry.amount,
                    format_percentage(share)
                )),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Segment;
    use crate::models::HexColor;

    fn frame(segments: Vec<Segment>) -> ChartFrame {
        ChartFrame {
            kind: ChartKind::Expense,
            year: 2024,
            month: 5,
            frame: 10,
            total_frames: 30,
            segments,
            center: None,
            legend: Vec::new(),
        }
    }

    #[test]
    fn test_transparent_filler_draws_nothing() {
        let red = HexColor::rgb(255, 0, 0);
        let chart = frame(vec![
            Segment {
                label: "食費".to_string(),
                value: 1.0,
                fill: Fill::Color(red),
            },
            Segment {
                label: String::new(),
                value: 3.0,
                fill: Fill::Transparent,
            },
        ]);

        let points = donut_points(&chart);
        assert_eq!(points.len(), 1);
        let red_points = &points[&(255, 0, 0)];
        // A quarter of the angles, every ring sample
        assert_eq!(red_points.len(), 90 * (RADIAL_STEPS + 1));
    }

    #[test]
    fn test_first_wedge_starts_at_twelve_oclock() {
        let chart = frame(vec![
            Segment {
                label: "a".to_string(),
                value: 1.0,
                fill: Fill::Color(HexColor::rgb(1, 0, 0)),
            },
            Segment {
                label: "b".to_string(),
                value: 1.0,
                fill: Fill::Color(HexColor::rgb(2, 0, 0)),
            },
        ]);

        let points = donut_points(&chart);
        // Clockwise from the top, the first half is the right side
        assert!(points[&(1, 0, 0)].iter().all(|(x, _)| *x >= -1e-9));
        assert!(points[&(2, 0, 0)].iter().all(|(x, _)| *x <= 1e-9));
    }

    #[test]
    fn test_empty_frame_has_no_points() {
        assert!(donut_points(&frame(Vec::new())).is_empty());
    }
}
