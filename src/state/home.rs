// Home tab state.
// Owns the overlay controller, the action cursor, and the risk gauge animation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use super::navigation::{BackStack, Overlay, OverlayController, RiskKind, ViewId};
use super::timers::{TimerKind, Timers};

/// Actionable items on the Home view, in screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeAction {
    #[default]
    Sos,
    HeartRisk,
    BrainRisk,
    TumorRisk,
    Report,
}

impl HomeAction {
    pub const ALL: [HomeAction; 5] = [
        HomeAction::Sos,
        HomeAction::HeartRisk,
        HomeAction::BrainRisk,
        HomeAction::TumorRisk,
        HomeAction::Report,
    ];

    /// Overlay this action opens.
    pub fn overlay(&self) -> Overlay {
        match self {
            HomeAction::Sos => Overlay::Sos,
            HomeAction::HeartRisk => Overlay::Risk(RiskKind::Heart),
            HomeAction::BrainRisk => Overlay::Risk(RiskKind::Brain),
            HomeAction::TumorRisk => Overlay::Risk(RiskKind::Tumor),
            HomeAction::Report => Overlay::Report,
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|a| a == self).unwrap_or(0)
    }

    /// Next action, staying at the end.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Previous action, staying at the start.
    pub fn prev(&self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

/// Whose data the risk-detail overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyMember {
    Dad,
    #[default]
    Me,
    Mom,
}

impl FamilyMember {
    pub const ALL: [FamilyMember; 3] = [FamilyMember::Dad, FamilyMember::Me, FamilyMember::Mom];

    pub fn title(&self) -> &'static str {
        match self {
            FamilyMember::Dad => "Dad",
            FamilyMember::Me => "Me",
            FamilyMember::Mom => "Mom",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FamilyMember::Dad => FamilyMember::Me,
            FamilyMember::Me => FamilyMember::Mom,
            FamilyMember::Mom => FamilyMember::Mom,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FamilyMember::Dad => FamilyMember::Dad,
            FamilyMember::Me => FamilyMember::Dad,
            FamilyMember::Mom => FamilyMember::Me,
        }
    }
}

/// State for a mounted Home view. Dropped when the user leaves the tab.
#[derive(Debug)]
pub struct HomeState {
    /// Overlay state machine, tied to the app back stack.
    pub overlays: OverlayController,
    /// Highlighted action.
    pub selected: HomeAction,
    /// Family selector inside the risk-detail overlay.
    pub member: FamilyMember,
    /// Vertical scroll of the report overlay.
    pub report_scroll: u16,
    /// Largest useful scroll offset, set by the renderer from the report's height.
    report_max_scroll: u16,
    /// Gauge values currently displayed. Zero until the fill timer fires.
    gauges: HashMap<RiskKind, u8>,
}

impl HomeState {
    /// Mount the view: register its back handler and start the gauge fill timers.
    pub fn mount(
        history: &mut BackStack,
        timers: &mut Timers,
        gauge_delay: Duration,
        now: Instant,
    ) -> Self {
        history.register(ViewId::Home);
        for kind in RiskKind::ALL {
            timers.schedule(ViewId::Home, TimerKind::GaugeFill(kind), gauge_delay, now);
        }

        Self {
            overlays: OverlayController::new(ViewId::Home),
            selected: HomeAction::default(),
            member: FamilyMember::default(),
            report_scroll: 0,
            report_max_scroll: 0,
            gauges: HashMap::new(),
        }
    }

    /// Tear the view down: unregister the back handler, cancel pending timers,
    /// and drop any history entries it still owns.
    pub fn unmount(&mut self, history: &mut BackStack, timers: &mut Timers) {
        history.unregister(ViewId::Home);
        let cancelled = timers.cancel_owner(ViewId::Home);
        let discarded = history.discard_owner(ViewId::Home);
        self.overlays.on_platform_back();
        debug!(cancelled, discarded, "home unmounted");
    }

    /// Open an overlay, resetting the overlay-local view state.
    pub fn open(&mut self, overlay: Overlay, history: &mut BackStack) {
        self.member = FamilyMember::default();
        self.report_scroll = 0;
        self.overlays.open(overlay, history);
    }

    pub fn select_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.prev();
    }

    /// Displayed gauge value.
    pub fn gauge(&self, kind: RiskKind) -> u8 {
        self.gauges.get(&kind).copied().unwrap_or(0)
    }

    /// Fill timer handler.
    pub fn reveal_gauge(&mut self, kind: RiskKind, percent: u8) {
        self.gauges.insert(kind, percent.min(100));
    }

    pub fn scroll_report_down(&mut self) {
        self.report_scroll = self.report_scroll.saturating_add(1).min(self.report_max_scroll);
    }

    /// Bound the report scroll to the rendered body, which changes with the
    /// terminal size.
    pub fn set_report_max_scroll(&mut self, max: u16) {
        self.report_max_scroll = max;
        self.report_scroll = self.report_scroll.min(max);
    }

    pub fn scroll_report_up(&mut self) {
        self.report_scroll = self.report_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::navigation::OverlayState;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn test_mount_registers_and_schedules() {
        let mut history = BackStack::new();
        let mut timers = Timers::new();
        let home = HomeState::mount(&mut history, &mut timers, DELAY, Instant::now());

        assert!(history.is_registered(ViewId::Home));
        assert_eq!(timers.len(), RiskKind::ALL.len());
        assert_eq!(home.overlays.state(), OverlayState::Closed);
        assert_eq!(home.gauge(RiskKind::Heart), 0);
    }

    #[test]
    fn test_unmount_cleans_up() {
        let mut history = BackStack::new();
        let mut timers = Timers::new();
        let mut home = HomeState::mount(&mut history, &mut timers, DELAY, Instant::now());
        home.open(Overlay::Report, &mut history);

        home.unmount(&mut history, &mut timers);
        assert!(!history.is_registered(ViewId::Home));
        assert!(!timers.has_pending(ViewId::Home));
        assert_eq!(history.depth(), 0);
        assert_eq!(home.overlays.state(), OverlayState::Closed);
    }

    #[test]
    fn test_action_cursor_clamps() {
        assert_eq!(HomeAction::Sos.prev(), HomeAction::Sos);
        assert_eq!(HomeAction::Report.next(), HomeAction::Report);
        assert_eq!(HomeAction::Sos.next(), HomeAction::HeartRisk);
        assert_eq!(
            HomeAction::TumorRisk.overlay(),
            Overlay::Risk(RiskKind::Tumor)
        );
    }

    #[test]
    fn test_open_resets_overlay_view_state() {
        let mut history = BackStack::new();
        let mut timers = Timers::new();
        let mut home = HomeState::mount(&mut history, &mut timers, DELAY, Instant::now());
        home.member = FamilyMember::Mom;
        home.report_scroll = 7;

        home.selected = HomeAction::BrainRisk;
        home.open(home.selected.overlay(), &mut history);

        assert_eq!(
            home.overlays.state(),
            OverlayState::Open(Overlay::Risk(RiskKind::Brain))
        );
        assert_eq!(home.member, FamilyMember::Me);
        assert_eq!(home.report_scroll, 0);
    }

    #[test]
    fn test_report_scroll_stops_at_max() {
        let mut history = BackStack::new();
        let mut timers = Timers::new();
        let mut home = HomeState::mount(&mut history, &mut timers, DELAY, Instant::now());
        home.set_report_max_scroll(3);

        for _ in 0..10 {
            home.scroll_report_down();
        }
        assert_eq!(home.report_scroll, 3);

        home.scroll_report_up();
        assert_eq!(home.report_scroll, 2);

        // A taller terminal shrinks the range
        home.set_report_max_scroll(1);
        assert_eq!(home.report_scroll, 1);
    }

    #[test]
    fn test_reveal_gauge_caps_at_100() {
        let mut history = BackStack::new();
        let mut timers = Timers::new();
        let mut home = HomeState::mount(&mut history, &mut timers, DELAY, Instant::now());
        home.reveal_gauge(RiskKind::Brain, 140);
        assert_eq!(home.gauge(RiskKind::Brain), 100);
    }
}
