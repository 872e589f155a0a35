// Navigation state management.
// Back stack that stands in for platform history, and the Home overlay state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A view that can own history entries, back handlers, and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// The application frame: tab bar and tab transitions.
    Shell,
    Home,
}

/// Which risk assessment a risk-detail overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskKind {
    Heart,
    Brain,
    Tumor,
}

impl RiskKind {
    pub const ALL: [RiskKind; 3] = [RiskKind::Heart, RiskKind::Brain, RiskKind::Tumor];

    pub fn title(&self) -> &'static str {
        match self {
            RiskKind::Heart => "Heart attack risk",
            RiskKind::Brain => "Stroke risk",
            RiskKind::Tumor => "Tumor risk",
        }
    }
}

/// An overlay presented above the Home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Report,
    Risk(RiskKind),
    Sos,
}

impl Overlay {
    pub fn title(&self) -> &'static str {
        match self {
            Overlay::Report => "Weekly report",
            Overlay::Risk(kind) => kind.title(),
            Overlay::Sos => "SOS",
        }
    }
}

/// Overlay visibility. A single variant, so at most one overlay can be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Open(Overlay),
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        matches!(self, OverlayState::Open(_))
    }

    pub fn current(&self) -> Option<Overlay> {
        match self {
            OverlayState::Open(overlay) => Some(*overlay),
            OverlayState::Closed => None,
        }
    }
}

/// Marker pushed onto the back stack when an overlay opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// View whose back handler consumes this entry.
    pub owner: ViewId,
    /// Overlay that was opened (kept for logging only).
    pub overlay: Overlay,
}

/// In-process replacement for platform navigation history.
///
/// Views register a back handler while mounted. `back()` pops one entry and
/// yields it for dispatch only when its owner still has a handler registered.
#[derive(Debug, Clone, Default)]
pub struct BackStack {
    entries: Vec<HistoryEntry>,
    handlers: Vec<ViewId>,
}

impl BackStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a back handler for a view. Registering twice is harmless.
    pub fn register(&mut self, owner: ViewId) {
        if !self.handlers.contains(&owner) {
            self.handlers.push(owner);
        }
    }

    /// Remove a view's back handler.
    pub fn unregister(&mut self, owner: ViewId) {
        self.handlers.retain(|h| *h != owner);
    }

    pub fn is_registered(&self, owner: ViewId) -> bool {
        self.handlers.contains(&owner)
    }

    /// Push a history marker.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Update the overlay recorded on the top entry without changing depth.
    fn relabel_top(&mut self, owner: ViewId, overlay: Overlay) {
        match self.entries.last_mut() {
            Some(top) if top.owner == owner => top.overlay = overlay,
            _ => self.push(HistoryEntry { owner, overlay }),
        }
    }

    /// Navigate back once. Returns the popped entry if its owner is listening.
    pub fn back(&mut self) -> Option<HistoryEntry> {
        let entry = self.entries.pop()?;
        if self.is_registered(entry.owner) {
            Some(entry)
        } else {
            warn!(owner = ?entry.owner, "back entry has no registered handler");
            None
        }
    }

    /// Drop every entry owned by a view being torn down. Returns how many were dropped.
    pub fn discard_owner(&mut self, owner: ViewId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner != owner);
        before - self.entries.len()
    }

    /// Number of entries on the stack.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn depth_for(&self, owner: ViewId) -> usize {
        self.entries.iter().filter(|e| e.owner == owner).count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Overlay state machine for a view, kept in step with the back stack.
#[derive(Debug, Clone)]
pub struct OverlayController {
    owner: ViewId,
    state: OverlayState,
}

impl OverlayController {
    pub fn new(owner: ViewId) -> Self {
        Self {
            owner,
            state: OverlayState::Closed,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Present an overlay and push one history marker.
    ///
    /// Opening while another overlay is open replaces it in place; the existing
    /// marker is reused so depth stays at one.
    pub fn open(&mut self, overlay: Overlay, history: &mut BackStack) {
        match self.state {
            OverlayState::Closed => {
                history.push(HistoryEntry {
                    owner: self.owner,
                    overlay,
                });
            }
            OverlayState::Open(previous) => {
                debug!(?previous, ?overlay, "replacing open overlay");
                history.relabel_top(self.owner, overlay);
            }
        }
        debug!(?overlay, depth = history.depth(), "overlay opened");
        self.state = OverlayState::Open(overlay);
    }

    /// Request back-navigation. The state only changes once the returned
    /// entry is dispatched to `on_back`.
    pub fn close(&self, history: &mut BackStack) -> Option<HistoryEntry> {
        if !self.state.is_open() {
            return None;
        }
        history.back()
    }

    /// Dispatch a popped history entry. Entries owned by other views are ignored.
    pub fn on_back(&mut self, entry: HistoryEntry) {
        if entry.owner == self.owner {
            self.on_platform_back();
        }
    }

    /// Back handler: clear whichever overlay is set. No-op when closed.
    pub fn on_platform_back(&mut self) {
        if let OverlayState::Open(overlay) = self.state {
            debug!(?overlay, "overlay closed");
        }
        self.state = OverlayState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mounted() -> (OverlayController, BackStack) {
        let mut history = BackStack::new();
        history.register(ViewId::Home);
        (OverlayController::new(ViewId::Home), history)
    }

    fn close_via_back(ctl: &mut OverlayController, history: &mut BackStack) {
        if let Some(entry) = ctl.close(history) {
            ctl.on_back(entry);
        }
    }

    #[test]
    fn test_open_then_close_is_net_zero() {
        let (mut ctl, mut history) = mounted();
        let before = history.depth();

        ctl.open(Overlay::Report, &mut history);
        assert_eq!(ctl.state(), OverlayState::Open(Overlay::Report));
        assert_eq!(history.depth(), before + 1);

        close_via_back(&mut ctl, &mut history);
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert_eq!(history.depth(), before);
    }

    #[test]
    fn test_risk_overlay_closed_by_platform_back() {
        let (mut ctl, mut history) = mounted();

        ctl.open(Overlay::Risk(RiskKind::Heart), &mut history);
        assert_eq!(
            ctl.state(),
            OverlayState::Open(Overlay::Risk(RiskKind::Heart))
        );

        let entry = history.back().unwrap();
        ctl.on_back(entry);
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert!(history.is_empty());
    }

    #[test]
    fn test_sos_overlay_closed_by_platform_back() {
        let (mut ctl, mut history) = mounted();

        ctl.open(Overlay::Sos, &mut history);
        assert_eq!(ctl.state(), OverlayState::Open(Overlay::Sos));

        let entry = history.back().unwrap();
        ctl.on_back(entry);
        assert_eq!(ctl.state(), OverlayState::Closed);
    }

    #[test]
    fn test_back_with_nothing_open_is_noop() {
        let (mut ctl, mut history) = mounted();

        assert!(history.back().is_none());
        ctl.on_platform_back();
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert!(ctl.close(&mut history).is_none());
        assert_eq!(history.depth(), 0);
    }

    #[test]
    fn test_second_open_replaces_in_place() {
        let (mut ctl, mut history) = mounted();

        ctl.open(Overlay::Report, &mut history);
        ctl.open(Overlay::Sos, &mut history);
        assert_eq!(ctl.state(), OverlayState::Open(Overlay::Sos));
        assert_eq!(history.depth(), 1);

        close_via_back(&mut ctl, &mut history);
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert_eq!(history.depth(), 0);
    }

    #[test]
    fn test_back_without_handler_is_dropped() {
        let mut history = BackStack::new();
        history.push(HistoryEntry {
            owner: ViewId::Home,
            overlay: Overlay::Report,
        });

        assert!(history.back().is_none());
        assert_eq!(history.depth(), 0);
    }

    #[test]
    fn test_entries_for_other_owner_are_ignored() {
        let (mut ctl, mut history) = mounted();
        ctl.open(Overlay::Report, &mut history);

        ctl.on_back(HistoryEntry {
            owner: ViewId::Shell,
            overlay: Overlay::Report,
        });
        assert!(ctl.state().is_open());
    }

    #[test]
    fn test_discard_owner() {
        let mut history = BackStack::new();
        history.register(ViewId::Home);
        history.push(HistoryEntry {
            owner: ViewId::Home,
            overlay: Overlay::Sos,
        });
        history.push(HistoryEntry {
            owner: ViewId::Shell,
            overlay: Overlay::Report,
        });

        assert_eq!(history.discard_owner(ViewId::Home), 1);
        assert_eq!(history.depth(), 1);
        assert_eq!(history.depth_for(ViewId::Home), 0);

        history.unregister(ViewId::Home);
        assert!(!history.is_registered(ViewId::Home));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Open(Overlay),
        Close,
        Back,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Open(Overlay::Report)),
            Just(Op::Open(Overlay::Sos)),
            prop::sample::select(RiskKind::ALL.to_vec())
                .prop_map(|kind| Op::Open(Overlay::Risk(kind))),
            Just(Op::Close),
            Just(Op::Back),
        ]
    }

    proptest! {
        #[test]
        fn prop_depth_tracks_open_overlays(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let (mut ctl, mut history) = mounted();

            for op in ops {
                match op {
                    Op::Open(overlay) => ctl.open(overlay, &mut history),
                    Op::Close => close_via_back(&mut ctl, &mut history),
                    Op::Back => {
                        if let Some(entry) = history.back() {
                            ctl.on_back(entry);
                        }
                    }
                }
                prop_assert_eq!(history.depth(), usize::from(ctl.state().is_open()));
            }
        }
    }
}
