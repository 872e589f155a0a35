// Profile view rendering.
// User and device cards, the main menu, and the archive/notification/settings pages.

use ratatui::{prelude::*, widgets::*};

use crate::fixtures::{Fixtures, NotificationKind};
use crate::state::{ArchivePeriod, ProfilePage, ProfileState, SettingToggle};

fn bordered(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
}

pub fn draw_profile(frame: &mut Frame, fixtures: &Fixtures, profile: &mut ProfileState, area: Rect) {
    match profile.page {
        ProfilePage::Main => draw_main(frame, fixtures, profile, area),
        ProfilePage::History => draw_history(frame, fixtures, profile.archive, area),
        ProfilePage::Notifications => draw_notifications(frame, fixtures, area),
        ProfilePage::Settings => draw_settings(frame, fixtures, profile, area),
    }
}

fn draw_main(frame: &mut Frame, fixtures: &Fixtures, profile: &mut ProfileState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // User
            Constraint::Length(3), // Device
            Constraint::Length(4), // Emergency
            Constraint::Min(3),    // Menu
        ])
        .split(area);

    let user = &fixtures.user;
    let user_card = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", user.initial),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", user.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ID {}", user.display_id),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(format!(
            "{} · {} yrs · {} cm · {} kg",
            user.gender, user.age, user.height_cm, user.weight_kg
        )),
        Line::from(Span::styled(
            format!("Medical history: {}", user.medical_history),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(bordered(" Profile "));
    frame.render_widget(user_card, chunks[0]);

    let device = &fixtures.device;
    let (state, color) = if device.connected {
        ("Connected", Color::Green)
    } else {
        ("Disconnected", Color::DarkGray)
    };
    let device_card = Paragraph::new(Line::from(vec![
        Span::raw(device.name.as_str()),
        Span::styled(format!("  {state}"), Style::default().fg(color)),
        Span::styled(
            format!("  battery {}%", device.battery_percent),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(bordered(" Device "));
    frame.render_widget(device_card, chunks[1]);

    let emergency = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Emergency contact  "),
            Span::styled(user.emergency_contact.as_str(), Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            "Contacts are notified when an SOS alert is raised",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(bordered(" Emergency "));
    frame.render_widget(emergency, chunks[2]);

    let items: Vec<ListItem> = ProfilePage::MENU
        .iter()
        .map(|page| ListItem::new(Line::from(page.title())))
        .collect();
    let menu = List::new(items)
        .block(bordered(" Menu "))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(menu, chunks[3], &mut profile.menu);
}

fn draw_history(frame: &mut Frame, fixtures: &Fixtures, period: ArchivePeriod, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    let selected = match period {
        ArchivePeriod::Weekly => 0,
        ArchivePeriod::Monthly => 1,
    };
    let tabs = Tabs::new(vec!["Weekly", "Monthly"])
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(ProfilePage::History.title()),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let archive = &fixtures.archive;
    let (reports, schedule) = match period {
        ArchivePeriod::Weekly => (&archive.weekly, &archive.weekly_schedule),
        ArchivePeriod::Monthly => (&archive.monthly, &archive.monthly_schedule),
    };

    let items: Vec<ListItem> = reports
        .iter()
        .map(|report| {
            let score_color = if report.score >= 90 {
                Color::Green
            } else if report.score >= 80 {
                Color::Cyan
            } else {
                Color::Yellow
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        report.title.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {} ({})", report.score, report.status),
                        Style::default().fg(score_color),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", report.date),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(items), chunks[1]);

    let note = Paragraph::new(schedule.as_str()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(note, chunks[2]);
}

fn draw_notifications(frame: &mut Frame, fixtures: &Fixtures, area: Rect) {
    let items: Vec<ListItem> = fixtures
        .notifications
        .iter()
        .map(|n| {
            let (icon, color) = match n.kind {
                NotificationKind::Alert => ("!", Color::Red),
                NotificationKind::System => ("i", Color::Cyan),
                NotificationKind::Device => ("⌚", Color::Green),
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{icon} "), Style::default().fg(color)),
                    Span::styled(n.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", n.time), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(format!("  {}", n.description)),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(ProfilePage::Notifications.title()),
    );
    frame.render_widget(list, area);
}

fn draw_settings(frame: &mut Frame, fixtures: &Fixtures, profile: &ProfileState, area: Rect) {
    let toggle = |label: &'static str, on: bool, which: SettingToggle| {
        let cursor = if profile.setting == which { "> " } else { "  " };
        let (text, color) = if on { ("[on] ", Color::Green) } else { ("[off]", Color::DarkGray) };
        Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
            Span::styled(text, Style::default().fg(color)),
            Span::raw(format!(" {label}")),
        ])
    };

    let app = &fixtures.settings;
    let lines = vec![
        toggle(
            "Push notifications",
            profile.push_notifications,
            SettingToggle::PushNotifications,
        ),
        toggle("SMS alerts", profile.sms_alerts, SettingToggle::SmsAlerts),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Cache {}", app.cache_size),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("  Version {} (build {})", app.version, app.build),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let settings = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(ProfilePage::Settings.title()),
    );
    frame.render_widget(settings, area);
}
