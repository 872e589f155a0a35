// TCM view rendering.
// Organ meridian grid with the current shichen highlighted, plus advice cards.

use chrono::NaiveTime;
use ratatui::{prelude::*, widgets::*};

use super::status_color;
use crate::fixtures::Fixtures;

const GRID_COLUMNS: usize = 3;

pub fn draw_tcm(frame: &mut Frame, fixtures: &Fixtures, now: NaiveTime, area: Rect) {
    let current = fixtures.current_shichen(now);
    let grid_rows = fixtures.organs.len().div_ceil(GRID_COLUMNS) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Current meridian
            Constraint::Length(grid_rows * 4), // Organ grid
            Constraint::Min(3),                // Advice
            Constraint::Length(3),             // Technique note
        ])
        .split(area);

    let now_line = match current {
        Some(organ) => Line::from(vec![
            Span::styled(
                format!("{} ", now.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{} meridian on duty", organ.name),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({})", organ.time), Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            format!("{} no tracked meridian on duty", now.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(now_line), chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(4); grid_rows as usize])
        .split(chunks[1]);

    for (row, organs) in rows.iter().zip(fixtures.organs.chunks(GRID_COLUMNS)) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row);

        for (organ, cell) in organs.iter().zip(cells.iter()) {
            let active = current.is_some_and(|c| c.name == organ.name);
            let border = if active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let text = Paragraph::new(vec![
                Line::from(Span::styled(
                    organ.status.label(),
                    Style::default().fg(status_color(organ.status)),
                )),
                Line::from(Span::styled(
                    organ.description.as_str(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} {} ", organ.name, organ.time)),
            );
            frame.render_widget(text, *cell);
        }
    }

    let mut advice: Vec<Line> = Vec::new();
    for item in &fixtures.advice {
        advice.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(status_color(item.status))),
            Span::styled(item.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        advice.push(Line::from(format!("  {}", item.body)));
        if let Some(plan) = &item.plan {
            advice.push(Line::from(Span::styled(
                format!("  Plan: {plan}"),
                Style::default().fg(Color::Cyan),
            )));
        }
    }
    let advice = Paragraph::new(advice).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Care advice "),
    );
    frame.render_widget(advice, chunks[2]);

    let note = Paragraph::new(fixtures.technique_note.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP).title(" Technique "));
    frame.render_widget(note, chunks[3]);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::fixtures;

    fn render_at(time: &str) -> String {
        let fixtures = fixtures::load(None).unwrap();
        let now = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal
            .draw(|frame| draw_tcm(frame, &fixtures, now, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_highlights_current_meridian() {
        assert!(render_at("02:00").contains("Liver meridian on duty"));
    }

    #[test]
    fn test_uncovered_hour() {
        assert!(render_at("22:00").contains("no tracked meridian"));
    }
}
