// Home view rendering.
// Health score, SOS button, risk gauges, vitals, and the report banner.

use ratatui::{prelude::*, widgets::*};

use crate::fixtures::Fixtures;
use crate::state::{HomeAction, HomeState, RiskKind};

/// Border for an actionable card, highlighted under the cursor.
fn card(title: String, selected: bool) -> Block<'static> {
    let border = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

pub fn draw_home(frame: &mut Frame, fixtures: &Fixtures, home: &HomeState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and score
            Constraint::Length(3), // SOS
            Constraint::Length(3), // Heart and brain gauges
            Constraint::Length(4), // Tumor card
            Constraint::Length(4), // Vitals
            Constraint::Length(3), // Report banner
            Constraint::Min(0),
        ])
        .split(area);

    let summary = &fixtures.home;
    let title = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                summary.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  score {}", summary.health_score),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            summary.subtitle.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(title, chunks[0]);

    let sos = Paragraph::new(Line::from(vec![
        Span::styled(
            " SOS ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" one-key emergency call"),
    ]))
    .block(card(String::new(), home.selected == HomeAction::Sos));
    frame.render_widget(sos, chunks[1]);

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[2]);
    draw_gauge(frame, home, RiskKind::Heart, HomeAction::HeartRisk, Color::Red, gauges[0]);
    draw_gauge(frame, home, RiskKind::Brain, HomeAction::BrainRisk, Color::Magenta, gauges[1]);

    let tumor = Paragraph::new(vec![
        Line::from(vec![
            Span::raw(format!("{}%  ", home.gauge(RiskKind::Tumor))),
            Span::styled(
                summary.tumor_status.as_str(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(Span::styled(
            summary.tumor_note.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(card(
        format!(" {} ", RiskKind::Tumor.title()),
        home.selected == HomeAction::TumorRisk,
    ));
    frame.render_widget(tumor, chunks[3]);

    draw_vitals(frame, fixtures, chunks[4]);

    let banner = Paragraph::new(Line::from(vec![
        Span::styled("Weekly report ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            summary.report_teaser.as_str(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  ›"),
    ]))
    .block(card(String::new(), home.selected == HomeAction::Report));
    frame.render_widget(banner, chunks[5]);
}

fn draw_gauge(
    frame: &mut Frame,
    home: &HomeState,
    kind: RiskKind,
    action: HomeAction,
    color: Color,
    area: Rect,
) {
    let percent = home.gauge(kind);
    let gauge = Gauge::default()
        .block(card(format!(" {} ", kind.title()), home.selected == action))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .percent(u16::from(percent))
        .label(format!("{percent}%"));
    frame.render_widget(gauge, area);
}

fn draw_vitals(frame: &mut Frame, fixtures: &Fixtures, area: Rect) {
    if fixtures.vitals.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, fixtures.vitals.len() as u32); fixtures.vitals.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (vital, column) in fixtures.vitals.iter().zip(columns.iter()) {
        let text = Paragraph::new(vec![
            Line::from(Span::styled(
                vital.value.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                vital.unit.as_str(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(vital.label.as_str()),
        );
        frame.render_widget(text, *column);
    }
}
