// Monitor view rendering.
// Sleep stages as a bar chart, other metrics as a line chart with thresholds.

use ratatui::{prelude::*, widgets::*};

use crate::fixtures::{Fixtures, MetricSeries, SleepStageKind};
use crate::state::{MonitorState, MonitorTab, Period};

pub fn draw_monitor(frame: &mut Frame, fixtures: &Fixtures, monitor: &MonitorState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Metric tabs
            Constraint::Length(1), // Period selector
            Constraint::Min(1),    // Chart
        ])
        .split(area);

    let titles: Vec<Line> = MonitorTab::ALL.iter().map(|t| Line::from(t.label())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(monitor.tab_index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw(" "));
    frame.render_widget(tabs, chunks[0]);

    let periods: Vec<Span> = Period::ALL
        .iter()
        .map(|p| {
            if *p == monitor.period {
                Span::styled(
                    format!(" {} ", p.label()),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                )
            } else {
                Span::styled(format!(" {} ", p.label()), Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(periods)), chunks[1]);

    match monitor.current() {
        MonitorTab::Sleep => draw_sleep(frame, fixtures, chunks[2]),
        MonitorTab::Metric(kind) => match fixtures.metric(kind) {
            Some(series) => draw_metric(frame, kind.label(), series, chunks[2]),
            None => {
                let empty = Paragraph::new("No data")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(empty, chunks[2]);
            }
        },
    }
}

fn stage_color(stage: SleepStageKind) -> Color {
    match stage {
        SleepStageKind::Awake => Color::Yellow,
        SleepStageKind::Light => Color::Cyan,
        SleepStageKind::Deep => Color::Blue,
    }
}

fn draw_sleep(frame: &mut Frame, fixtures: &Fixtures, area: Rect) {
    let sleep = &fixtures.sleep;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary
            Constraint::Min(6),    // Stages
            Constraint::Length(3), // Totals
        ])
        .split(area);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                sleep.quality.as_str(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", sleep.date), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(sleep.description.as_str()),
        Line::from(vec![
            Span::styled(
                format!("{}: ", sleep.highlight.label),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(sleep.highlight.value.as_str()),
            Span::styled(
                format!("  {}", sleep.highlight_note),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Organ sleep "),
    );
    frame.render_widget(summary, chunks[0]);

    let bars: Vec<Bar> = sleep
        .stages
        .iter()
        .map(|s| {
            Bar::default()
                .value(u64::from(s.value))
                .label(Line::from(s.time.as_str()))
                .style(Style::default().fg(stage_color(s.stage)))
                .value_style(Style::default().fg(Color::Black).bg(stage_color(s.stage)))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Stages  {} ", sleep.window_note)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1);
    frame.render_widget(chart, chunks[1]);

    let totals = Paragraph::new(Line::from(vec![
        Span::styled("Total ", Style::default().fg(Color::DarkGray)),
        Span::styled(sleep.total.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("   Deep ", Style::default().fg(Color::DarkGray)),
        Span::styled(sleep.deep.as_str(), Style::default().fg(stage_color(SleepStageKind::Deep))),
        Span::styled("   Light ", Style::default().fg(Color::DarkGray)),
        Span::styled(sleep.light.as_str(), Style::default().fg(stage_color(SleepStageKind::Light))),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(totals, chunks[2]);
}

fn draw_metric(frame: &mut Frame, label: &str, series: &MetricSeries, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let status = Paragraph::new(Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(series.status.as_str(), Style::default().fg(Color::Green)),
        Span::styled(format!("  ({})", series.unit), Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(status, chunks[0]);

    let last_x = series.points.len().saturating_sub(1).max(1) as f64;
    let values: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let thresholds: Vec<Vec<(f64, f64)>> = series
        .thresholds
        .iter()
        .map(|t| vec![(0.0, t.value), (last_x, t.value)])
        .collect();

    let mut datasets = vec![
        Dataset::default()
            .name(label.to_string())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&values),
    ];
    for (threshold, line) in series.thresholds.iter().zip(thresholds.iter()) {
        datasets.push(
            Dataset::default()
                .name(threshold.label.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(line),
        );
    }

    let (lo, hi) = series.bounds();
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (0.0, 1.0) };
    let pad = ((hi - lo) * 0.1).max(1.0);
    let (y_min, y_max) = (lo - pad, hi + pad);

    let x_labels: Vec<String> = match (series.points.first(), series.points.last()) {
        (Some(first), Some(last)) => vec![first.day.clone(), last.day.clone()],
        _ => Vec::new(),
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {label} trend ")),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, last_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(vec![format!("{y_min:.0}"), format!("{y_max:.0}")]),
        );
    frame.render_widget(chart, chunks[1]);
}
