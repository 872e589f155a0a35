// App state and main event loop.
// Manages tabs, the back stack, cosmetic timers, and keyboard input handling.

use std::io;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::fixtures::Fixtures;
use crate::state::navigation::HistoryEntry;
use crate::state::{
    BackStack, HomeState, MonitorState, Overlay, ProfileState, TimerKind, Timers, ViewId,
};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Monitor,
    Tcm,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Monitor, Tab::Tcm, Tab::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Health",
            Tab::Monitor => "Monitor",
            Tab::Tcm => "TCM",
            Tab::Profile => "Me",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Monitor,
            Tab::Monitor => Tab::Tcm,
            Tab::Tcm => Tab::Profile,
            Tab::Profile => Tab::Home,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Home => Tab::Profile,
            Tab::Monitor => Tab::Home,
            Tab::Tcm => Tab::Monitor,
            Tab::Profile => Tab::Tcm,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Monitor => 1,
            Tab::Tcm => 2,
            Tab::Profile => 3,
        }
    }
}

/// The mounted top-level view. Holding the view's state in the variant keeps
/// exactly one tab active and drops view state on unmount.
#[derive(Debug)]
pub enum Screen {
    Home(HomeState),
    Monitor(MonitorState),
    Tcm,
    Profile(ProfileState),
}

impl Screen {
    pub fn tab(&self) -> Tab {
        match self {
            Screen::Home(_) => Tab::Home,
            Screen::Monitor(_) => Tab::Monitor,
            Screen::Tcm => Tab::Tcm,
            Screen::Profile(_) => Tab::Profile,
        }
    }
}

/// Main application state.
pub struct App {
    /// Currently mounted view.
    pub screen: Screen,
    /// Back stack standing in for platform history.
    pub history: BackStack,
    /// Pending cosmetic timers.
    pub timers: Timers,
    /// Mock data shown by the views.
    pub fixtures: Fixtures,
    pub settings: Settings,
    /// Whether the tab-switch fade is running.
    pub transitioning: bool,
    /// Whether the help popup is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings, fixtures: Fixtures, now: Instant) -> Self {
        let mut app = Self {
            screen: Screen::Tcm,
            history: BackStack::new(),
            timers: Timers::new(),
            fixtures,
            settings,
            transitioning: false,
            show_help: false,
            should_quit: false,
        };
        app.screen = app.mount(app.settings.default_tab, now);
        app
    }

    pub fn active_tab(&self) -> Tab {
        self.screen.tab()
    }

    /// Overlay currently open on the Home view.
    pub fn overlay(&self) -> Option<Overlay> {
        match &self.screen {
            Screen::Home(home) => home.overlays.state().current(),
            _ => None,
        }
    }

    /// Make `tab` the active tab. Leaving a tab unmounts it; the transition
    /// fade restarts even when `tab` is already active.
    pub fn select_tab(&mut self, tab: Tab, now: Instant) {
        if tab != self.active_tab() {
            if let Screen::Home(home) = &mut self.screen {
                home.unmount(&mut self.history, &mut self.timers);
            }
            self.screen = self.mount(tab, now);
            debug!(?tab, "tab selected");
        }

        self.timers.schedule(
            ViewId::Shell,
            TimerKind::Transition,
            self.settings.transition(),
            now,
        );
        self.transitioning = true;
    }

    fn mount(&mut self, tab: Tab, now: Instant) -> Screen {
        match tab {
            Tab::Home => Screen::Home(HomeState::mount(
                &mut self.history,
                &mut self.timers,
                self.settings.gauge_delay(),
                now,
            )),
            Tab::Monitor => Screen::Monitor(MonitorState::new()),
            Tab::Tcm => Screen::Tcm,
            Tab::Profile => Screen::Profile(ProfileState::new(&self.fixtures.settings)),
        }
    }

    /// Present an overlay on the Home view.
    pub fn open_overlay(&mut self, overlay: Overlay) {
        match &mut self.screen {
            Screen::Home(home) => home.open(overlay, &mut self.history),
            _ => warn!(?overlay, "overlays are only available on the home tab"),
        }
    }

    /// Close the open overlay by requesting back-navigation.
    pub fn close_overlay(&mut self) {
        let entry = match &self.screen {
            Screen::Home(home) => home.overlays.close(&mut self.history),
            _ => None,
        };
        if let Some(entry) = entry {
            self.dispatch_back(entry);
        }
    }

    /// Platform back: pop the back stack, or fall back to the view's own back.
    pub fn navigate_back(&mut self) {
        match self.history.back() {
            Some(entry) => self.dispatch_back(entry),
            None => {
                if let Screen::Profile(profile) = &mut self.screen {
                    profile.back();
                }
            }
        }
    }

    fn dispatch_back(&mut self, entry: HistoryEntry) {
        match (&mut self.screen, entry.owner) {
            (Screen::Home(home), ViewId::Home) => home.overlays.on_back(entry),
            (_, owner) => warn!(?owner, "no mounted view for back entry"),
        }
    }

    /// Fire due timers against the mounted views.
    pub fn tick(&mut self, now: Instant) {
        for fired in self.timers.poll(now) {
            match (fired.owner, fired.kind, &mut self.screen) {
                (ViewId::Shell, TimerKind::Transition, _) => self.transitioning = false,
                (ViewId::Home, TimerKind::GaugeFill(kind), Screen::Home(home)) => {
                    let percent = self
                        .fixtures
                        .risk(kind)
                        .map(|r| r.gauge_percent)
                        .unwrap_or(0);
                    home.reveal_gauge(kind, percent);
                }
                (owner, kind, _) => warn!(?owner, ?kind, "timer fired for unmounted view"),
            }
        }
    }

    /// Input poll timeout: the tick rate, shortened to the next timer deadline.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let tick = self.settings.tick_rate();
        match self.timers.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(tick),
            None => tick,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        info!(tab = ?self.active_tab(), "starting");
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
            self.tick(Instant::now());
        }
        info!("exiting");
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Route a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        // Overlays cover the tab bar, so they take every key
        if let Some(overlay) = self.overlay() {
            self.handle_overlay_key(overlay, key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.select_tab(self.active_tab().next(), now),
            KeyCode::BackTab => self.select_tab(self.active_tab().prev(), now),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.select_tab(Tab::ALL[index], now);
            }
            KeyCode::Esc | KeyCode::Backspace => self.navigate_back(),
            code => self.handle_screen_key(code),
        }
    }

    fn handle_overlay_key(&mut self, overlay: Overlay, code: KeyCode) {
        match (overlay, code) {
            (_, KeyCode::Esc | KeyCode::Backspace) => self.navigate_back(),
            (_, KeyCode::Char('q') | KeyCode::Char('x')) => self.close_overlay(),
            (Overlay::Risk(_), KeyCode::Left | KeyCode::Char('h')) => {
                if let Screen::Home(home) = &mut self.screen {
                    home.member = home.member.prev();
                }
            }
            (Overlay::Risk(_), KeyCode::Right | KeyCode::Char('l')) => {
                if let Screen::Home(home) = &mut self.screen {
                    home.member = home.member.next();
                }
            }
            (Overlay::Report, KeyCode::Up | KeyCode::Char('k')) => {
                if let Screen::Home(home) = &mut self.screen {
                    home.scroll_report_up();
                }
            }
            (Overlay::Report, KeyCode::Down | KeyCode::Char('j')) => {
                if let Screen::Home(home) = &mut self.screen {
                    home.scroll_report_down();
                }
            }
            _ => {}
        }
    }

    fn handle_screen_key(&mut self, code: KeyCode) {
        match &mut self.screen {
            Screen::Home(home) => {
                let overlay = match code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        home.select_prev();
                        None
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        home.select_next();
                        None
                    }
                    KeyCode::Enter => Some(home.selected.overlay()),
                    KeyCode::Char('s') => Some(Overlay::Sos),
                    KeyCode::Char('r') => Some(Overlay::Report),
                    _ => None,
                };
                if let Some(overlay) = overlay {
                    self.open_overlay(overlay);
                }
            }
            Screen::Monitor(monitor) => match code {
                KeyCode::Left | KeyCode::Char('h') => monitor.prev_tab(),
                KeyCode::Right | KeyCode::Char('l') => monitor.next_tab(),
                KeyCode::Char('p') => monitor.cycle_period(),
                _ => {}
            },
            Screen::Tcm => {}
            Screen::Profile(profile) => match code {
                KeyCode::Up | KeyCode::Char('k') => profile.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => profile.select_next(),
                KeyCode::Enter => profile.open_selected(),
                KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                    profile.toggle_archive()
                }
                KeyCode::Char(' ') => profile.toggle_setting(),
                _ => {}
            },
        }
    }
}
