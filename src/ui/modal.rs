// Overlay UI components.
// Full-screen weekly report, risk detail, and SOS alert drawn above the Home view.

use ratatui::{prelude::*, widgets::*};

use super::status_color;
use crate::fixtures::{FactorStatus, Fixtures, RiskProfile};
use crate::state::{FamilyMember, HomeState, Overlay, RiskKind};

/// Centered rectangle of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the open overlay over `area`.
pub fn draw_overlay(
    frame: &mut Frame,
    fixtures: &Fixtures,
    home: &mut HomeState,
    overlay: Overlay,
    area: Rect,
) {
    // Clear the area behind the overlay
    frame.render_widget(Clear, area);

    match overlay {
        Overlay::Report => draw_report(frame, fixtures, home, area),
        Overlay::Risk(kind) => draw_risk(frame, fixtures, kind, home.member, area),
        Overlay::Sos => draw_sos(frame, fixtures, area),
    }
}

fn overlay_block(title: &'static str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .title_bottom(Line::from(" Esc close ").right_aligned())
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn draw_report(frame: &mut Frame, fixtures: &Fixtures, home: &mut HomeState, area: Rect) {
    let block = overlay_block(Overlay::Report.title(), Color::Cyan);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // User
            Constraint::Length(8), // Trend
            Constraint::Length(1), // Tally
            Constraint::Min(1),    // Body
        ])
        .split(inner);

    let report = &fixtures.report;
    let user = &fixtures.user;
    let header = Line::from(vec![
        Span::styled(
            format!("{} ", user.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}, {} yrs  ", user.gender, user.age),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(report.title.as_str()),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let bars: Vec<Bar> = report
        .trend
        .iter()
        .map(|point| {
            Bar::default()
                .value(u64::from(point.value))
                .label(Line::from(point.day.as_str()))
                .style(Style::default().fg(status_color(point.status)))
        })
        .collect();
    let trend = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(2)
        .max(100);
    frame.render_widget(trend, chunks[1]);

    let tally = report.tally();
    let tally_line = Line::from(vec![
        Span::styled(
            format!("healthy {}", tally.healthy),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("sub-health {}", tally.sub_health),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(format!("risk {}", tally.risk), Style::default().fg(Color::Red)),
    ]);
    frame.render_widget(Paragraph::new(tally_line), chunks[2]);

    let mut body: Vec<Line> = vec![heading("Organ status")];
    body.push(Line::from(
        report
            .organ_map
            .iter()
            .flat_map(|organ| {
                [
                    Span::styled(
                        organ.name.as_str(),
                        Style::default().fg(status_color(organ.status)),
                    ),
                    Span::raw("  "),
                ]
            })
            .collect::<Vec<_>>(),
    ));
    body.push(Line::from(""));

    body.push(heading("Comprehensive analysis"));
    body.push(Line::from(vec![
        Span::raw("Overall: "),
        Span::styled(
            report.overall.label(),
            Style::default().fg(status_color(report.overall)),
        ),
    ]));
    for stat in &report.stats {
        body.push(Line::from(format!("  {}: {}", stat.label, stat.value)));
    }
    for finding in &report.findings {
        body.push(Line::from(format!("  • {finding}")));
    }
    body.push(Line::from(format!("  {}: {}", report.mood.label, report.mood.value)));
    body.push(Line::from(""));

    body.push(heading("Western medicine"));
    body.push(Line::from(report.western.as_str()));
    body.push(Line::from(""));

    let tcm = &report.tcm;
    body.push(heading("TCM evaluation"));
    body.push(Line::from(format!("Meridian: {}", tcm.meridian)));
    body.push(Line::from(format!("Pattern: {}", tcm.pattern)));
    body.push(Line::from(tcm.analysis.as_str()));
    body.push(Line::from(Span::styled(
        format!("Symptoms: {}", tcm.symptoms),
        Style::default().fg(Color::DarkGray),
    )));
    body.push(Line::from(""));

    body.push(heading("Diet"));
    body.push(Line::from(report.diet_note.as_str()));
    for dish in &report.dishes {
        body.push(Line::from(format!("  • {dish}")));
    }
    body.push(Line::from(""));

    let point = &report.acupoint;
    body.push(heading("Acupoint"));
    body.push(Line::from(vec![
        Span::styled(point.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", point.method), Style::default().fg(Color::DarkGray)),
    ]));
    body.push(Line::from(format!("Location: {}", point.location)));
    body.push(Line::from(format!("Indications: {}", point.indications)));

    let viewport = chunks[3];
    let height = wrapped_height(&body, viewport.width);
    home.set_report_max_scroll(height.saturating_sub(viewport.height));

    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .scroll((home.report_scroll, 0));
    frame.render_widget(paragraph, viewport);
}

/// Rows `lines` take when wrapped to `width`. Word wrapping can break early,
/// so each wrapped line is given one spare row.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| match line.width() {
            w if w <= width => 1,
            w => w.div_ceil(width) + 1,
        })
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_risk(
    frame: &mut Frame,
    fixtures: &Fixtures,
    kind: RiskKind,
    member: FamilyMember,
    area: Rect,
) {
    let block = overlay_block(kind.title(), Color::Magenta);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(profile) = fixtures.risk(kind) else {
        let empty = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title, score, family
            Constraint::Length(10), // Factor chart
            Constraint::Min(3),     // Factor lists
            Constraint::Length(2),  // Disclaimer
        ])
        .split(inner);

    let level_color = if profile.is_elevated() {
        Color::Red
    } else {
        Color::Green
    };
    let family: Vec<Span> = FamilyMember::ALL
        .iter()
        .map(|m| {
            if *m == member {
                Span::styled(
                    format!(" {} ", m.title()),
                    Style::default().fg(Color::Black).bg(Color::Magenta),
                )
            } else {
                Span::styled(format!(" {} ", m.title()), Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    let summary = Paragraph::new(vec![
        Line::from(Span::styled(
            profile.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("Score {}  ", profile.score)),
            Span::styled(
                format!(" {} ", profile.risk_level),
                Style::default().fg(Color::Black).bg(level_color),
            ),
        ]),
        Line::from(family),
    ]);
    frame.render_widget(summary, chunks[0]);

    draw_factor_chart(frame, profile, chunks[1]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[2]);
    frame.render_widget(
        factor_list(profile, FactorStatus::High, " Abnormal ", Color::Red),
        lists[0],
    );
    frame.render_widget(
        factor_list(profile, FactorStatus::Normal, " Normal ", Color::Green),
        lists[1],
    );

    let disclaimer = Paragraph::new(
        "Assessment is based on wearable data and is not a medical diagnosis.",
    )
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(disclaimer, chunks[3]);
}

/// Current vs reference value per factor.
fn draw_factor_chart(frame: &mut Frame, profile: &RiskProfile, area: Rect) {
    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Line::from(vec![
                    Span::styled(" current ", Style::default().fg(Color::Magenta)),
                    Span::styled("reference ", Style::default().fg(Color::DarkGray)),
                ])),
        )
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .max(100);

    for factor in &profile.factors {
        let current_color = match factor.status {
            FactorStatus::High => Color::Red,
            FactorStatus::Normal => Color::Magenta,
        };
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(factor.subject.as_str()))
                .bars(&[
                    Bar::default()
                        .value(u64::from(factor.current))
                        .style(Style::default().fg(current_color)),
                    Bar::default()
                        .value(u64::from(factor.reference))
                        .style(Style::default().fg(Color::DarkGray)),
                ]),
        );
    }

    frame.render_widget(chart, area);
}

fn factor_list<'a>(
    profile: &'a RiskProfile,
    status: FactorStatus,
    title: &'static str,
    color: Color,
) -> List<'a> {
    let factors = match status {
        FactorStatus::High => profile.high_factors().collect::<Vec<_>>(),
        FactorStatus::Normal => profile.normal_factors().collect::<Vec<_>>(),
    };
    let items: Vec<ListItem> = factors
        .into_iter()
        .map(|f| {
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::raw(f.label.as_str()),
            ]))
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    )
}

fn draw_sos(frame: &mut Frame, fixtures: &Fixtures, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Red))
        .title(format!(" {} ", Overlay::Sos.title()))
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(
            "SOS",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Emergency alert is being sent",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("Notifying emergency contact: {}", fixtures.user.emergency_contact),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("Location shared from {}", fixtures.device.name),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::White)),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to cancel", Style::default().fg(Color::White)),
        ]),
    ];

    let message = centered(inner, inner.width, text.len() as u16);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        message,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("short"), Line::from("x".repeat(25)), Line::from("")];
        assert_eq!(wrapped_height(&lines, 10), 1 + 4 + 1);
        assert_eq!(wrapped_height(&lines, 40), 3);
    }

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 50, 10), Rect::new(25, 15, 50, 10));

        let small = Rect::new(2, 3, 10, 4);
        let rect = centered(small, 50, 10);
        assert_eq!(rect, small);
    }
}
