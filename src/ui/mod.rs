// UI module for rendering the TUI.
// Contains the frame layout, status bar, help popup, and one module per view.

mod home;
mod modal;
mod monitor;
mod profile;
mod tabs;
mod tcm;

use chrono::Local;
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Screen};
use crate::fixtures::HealthStatus;
use crate::state::{Overlay, ProfilePage};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Main content
            Constraint::Length(3), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);

    // Tab-switch fade
    if app.transitioning {
        frame
            .buffer_mut()
            .set_style(chunks[1], Style::default().add_modifier(Modifier::DIM));
    }

    tabs::draw_tabs(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    // Overlays cover everything except the status bar
    if let (Some(overlay), Screen::Home(home)) = (app.overlay(), &mut app.screen) {
        let area = Rect {
            height: frame.area().height.saturating_sub(1),
            ..frame.area()
        };
        modal::draw_overlay(frame, &app.fixtures, home, overlay, area);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Colour used for a health status everywhere in the UI.
pub(crate) fn status_color(status: HealthStatus) -> Color {
    match status {
        HealthStatus::Healthy => Color::Green,
        HealthStatus::SubHealth => Color::Yellow,
        HealthStatus::Risk => Color::Red,
    }
}

/// Draw the header with the user and device state.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let fixtures = &app.fixtures;
    let device = if fixtures.device.connected {
        Span::styled(
            format!("● {} {}%", fixtures.device.name, fixtures.device.battery_percent),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            format!("○ {} disconnected", fixtures.device.name),
            Style::default().fg(Color::DarkGray),
        )
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.active_tab().title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} ", fixtures.user.name)),
        Span::styled(
            format!("({})  ", fixtures.user.display_id),
            Style::default().fg(Color::DarkGray),
        ),
        device,
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" puji ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(header, area);
}

/// Draw the main content area based on the mounted screen.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let fixtures = &app.fixtures;
    match &mut app.screen {
        Screen::Home(state) => home::draw_home(frame, fixtures, state, area),
        Screen::Monitor(state) => monitor::draw_monitor(frame, fixtures, state, area),
        Screen::Tcm => tcm::draw_tcm(frame, fixtures, Local::now().time(), area),
        Screen::Profile(state) => profile::draw_profile(frame, fixtures, state, area),
    }
}

fn hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::raw(key),
        Span::styled(action, Style::default().fg(Color::DarkGray)),
    ]
}

/// Draw the status bar with keybinding hints and the clock.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints: Vec<Span> = match (app.overlay(), &app.screen) {
        (Some(Overlay::Report), _) => [
            hint(" ↑↓ ", "Scroll"),
            hint("  Esc ", "Close"),
        ]
        .concat(),
        (Some(Overlay::Risk(_)), _) => [
            hint(" ←→ ", "Family"),
            hint("  Esc ", "Close"),
        ]
        .concat(),
        (Some(Overlay::Sos), _) => hint(" Esc ", "Cancel alert").to_vec(),
        (None, Screen::Home(_)) => [
            hint(" ↑↓ ", "Navigate"),
            hint("  ↵ ", "Open"),
            hint("  s ", "SOS"),
            hint("  r ", "Report"),
        ]
        .concat(),
        (None, Screen::Monitor(_)) => [
            hint(" ←→ ", "Metric"),
            hint("  p ", "Period"),
        ]
        .concat(),
        (None, Screen::Tcm) => Vec::new(),
        (None, Screen::Profile(profile)) => match profile.page {
            ProfilePage::Main => [hint(" ↑↓ ", "Navigate"), hint("  ↵ ", "Open")].concat(),
            ProfilePage::History => {
                [hint(" ←→ ", "Week/Month"), hint("  Esc ", "Back")].concat()
            }
            ProfilePage::Settings => [
                hint(" ↑↓ ", "Navigate"),
                hint("  Space ", "Toggle"),
                hint("  Esc ", "Back"),
            ]
            .concat(),
            ProfilePage::Notifications => hint(" Esc ", "Back").to_vec(),
        },
    };

    if app.overlay().is_none() {
        hints.extend(hint("  1-4/Tab ", "Switch"));
        hints.extend(hint("  ? ", "Help"));
        hints.extend(hint("  q ", "Quit"));
    }

    hints.push(Span::styled(
        format!("  {}", Local::now().format("%H:%M")),
        Style::default().fg(Color::DarkGray),
    ));

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = modal::centered(frame.area(), 55, 17);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![key("  1-4           "), Span::raw("Jump to tab")]),
        Line::from(vec![key("  Tab/S-Tab     "), Span::raw("Next / previous tab")]),
        Line::from(vec![key("  ↑/↓ or j/k    "), Span::raw("Navigate / scroll report")]),
        Line::from(vec![key("  ←/→ or h/l    "), Span::raw("Metric / family member / archive")]),
        Line::from(vec![key("  Enter         "), Span::raw("Open selection")]),
        Line::from(vec![key("  s / r         "), Span::raw("SOS / weekly report")]),
        Line::from(vec![key("  p             "), Span::raw("Cycle chart period")]),
        Line::from(vec![key("  Space         "), Span::raw("Toggle setting")]),
        Line::from(vec![key("  Esc/Backspace "), Span::raw("Back / close overlay")]),
        Line::from(vec![key("  ?             "), Span::raw("Show/hide this help")]),
        Line::from(vec![key("  q             "), Span::raw("Quit")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::app::Tab;
    use crate::config::Settings;
    use crate::fixtures;
    use crate::state::RiskKind;

    fn app_at(tab: Tab) -> App {
        let settings = Settings {
            default_tab: tab,
            ..Settings::default()
        };
        App::new(settings, fixtures::load(None).unwrap(), Instant::now())
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 48)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_every_tab() {
        for tab in Tab::ALL {
            let mut app = app_at(tab);
            let screen = render(&mut app);
            assert!(screen.contains("puji"), "header missing on {:?}", tab);
            assert!(screen.contains(tab.title()));
        }
    }

    #[test]
    fn test_draw_home_shows_sos_and_gauges() {
        let mut app = app_at(Tab::Home);
        let screen = render(&mut app);
        assert!(screen.contains("SOS"));
        assert!(screen.contains("Heart"));
    }

    #[test]
    fn test_draw_overlays() {
        let overlays = [
            Overlay::Report,
            Overlay::Risk(RiskKind::Heart),
            Overlay::Risk(RiskKind::Tumor),
            Overlay::Sos,
        ];
        for overlay in overlays {
            let mut app = app_at(Tab::Home);
            app.open_overlay(overlay);
            let screen = render(&mut app);
            assert!(screen.contains(overlay.title()), "{:?} not drawn", overlay);
        }
    }

    #[test]
    fn test_report_scroll_stays_on_content() {
        let now = Instant::now();
        let mut app = app_at(Tab::Home);
        app.handle_key(KeyEvent::from(KeyCode::Char('r')), now);
        render(&mut app);

        for _ in 0..500 {
            app.handle_key(KeyEvent::from(KeyCode::Down), now);
        }
        let screen = render(&mut app);
        assert!(screen.contains("Indications"), "report body scrolled away");

        let Screen::Home(home) = &app.screen else {
            panic!("home not mounted");
        };
        let bottom = home.report_scroll;
        assert!(bottom < 500);

        app.handle_key(KeyEvent::from(KeyCode::Up), now);
        let Screen::Home(home) = &app.screen else {
            panic!("home not mounted");
        };
        assert_eq!(home.report_scroll, bottom.saturating_sub(1));
    }

    #[test]
    fn test_draw_every_monitor_tab() {
        let mut app = app_at(Tab::Monitor);
        for _ in 0..crate::state::MonitorTab::ALL.len() {
            render(&mut app);
            if let Screen::Monitor(monitor) = &mut app.screen {
                monitor.next_tab();
            }
        }
    }

    #[test]
    fn test_draw_profile_pages() {
        let mut app = app_at(Tab::Profile);
        for page in ProfilePage::MENU {
            if let Screen::Profile(profile) = &mut app.screen {
                profile.back();
                profile.page = page;
            }
            let screen = render(&mut app);
            assert!(screen.contains(page.title()));
        }
    }

    #[test]
    fn test_draw_help_and_tiny_terminal() {
        let mut app = app_at(Tab::Home);
        app.show_help = true;
        assert!(render(&mut app).contains("Keyboard Shortcuts"));

        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    }
}
