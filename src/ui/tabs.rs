// Bottom tab bar rendering.
// Numbers each tab with its shortcut and marks the active one.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

/// Draw the tab bar at the bottom of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.active_tab();

    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let style = if *tab == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(
                    format!("{} ", tab.index() + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(tab.title(), style),
            ])
        })
        .collect();

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(active.index())
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
