// Cosmetic timers scoped to the view that scheduled them.
// Polled by the event loop; torn-down views cancel theirs so nothing fires late.

use std::time::{Duration, Instant};

use tracing::trace;

use super::navigation::{RiskKind, ViewId};

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// End of the tab-switch fade.
    Transition,
    /// Reveal a risk gauge's value after mount.
    GaugeFill(RiskKind),
}

/// A timer that came due during `poll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub owner: ViewId,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    owner: ViewId,
    kind: TimerKind,
    deadline: Instant,
}

/// Pending timers keyed by `(owner, kind)`.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer. An existing timer with the same owner and kind is
    /// replaced, which restarts it.
    pub fn schedule(&mut self, owner: ViewId, kind: TimerKind, after: Duration, now: Instant) {
        self.cancel(owner, kind);
        self.pending.push(Pending {
            owner,
            kind,
            deadline: now + after,
        });
        trace!(?owner, ?kind, ?after, "timer scheduled");
    }

    /// Cancel one timer. Returns whether it was pending.
    pub fn cancel(&mut self, owner: ViewId, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending
            .retain(|p| !(p.owner == owner && p.kind == kind));
        before != self.pending.len()
    }

    /// Cancel every timer a view owns. Called when the view is torn down.
    pub fn cancel_owner(&mut self, owner: ViewId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.owner != owner);
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            trace!(?owner, cancelled, "timers cancelled");
        }
        cancelled
    }

    #[cfg(test)]
    pub fn has_pending(&self, owner: ViewId) -> bool {
        self.pending.iter().any(|p| p.owner == owner)
    }

    /// Earliest pending deadline, used to bound the input poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn poll(&mut self, now: Instant) -> Vec<Fired> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.deadline <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| p.deadline);
        due.into_iter()
            .map(|p| Fired {
                owner: p.owner,
                kind: p.kind,
            })
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_300: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_only_when_due() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(ViewId::Shell, TimerKind::Transition, MS_300, start);

        assert!(timers.poll(start + MS_100).is_empty());
        let fired = timers.poll(start + MS_300);
        assert_eq!(
            fired,
            vec![Fired {
                owner: ViewId::Shell,
                kind: TimerKind::Transition
            }]
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn test_retrigger_restarts_timer() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(ViewId::Shell, TimerKind::Transition, MS_300, start);
        timers.schedule(ViewId::Shell, TimerKind::Transition, MS_300, start + MS_100 * 2);

        assert_eq!(timers.len(), 1);
        assert!(timers.poll(start + MS_300).is_empty());
        assert_eq!(timers.poll(start + MS_100 * 5).len(), 1);
    }

    #[test]
    fn test_cancel_owner_drops_only_that_view() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(
            ViewId::Home,
            TimerKind::GaugeFill(RiskKind::Heart),
            MS_100,
            start,
        );
        timers.schedule(
            ViewId::Home,
            TimerKind::GaugeFill(RiskKind::Brain),
            MS_100,
            start,
        );
        timers.schedule(ViewId::Shell, TimerKind::Transition, MS_300, start);

        assert_eq!(timers.cancel_owner(ViewId::Home), 2);
        assert!(!timers.has_pending(ViewId::Home));

        let fired = timers.poll(start + MS_300);
        assert!(fired.iter().all(|f| f.owner == ViewId::Shell));
    }

    #[test]
    fn test_poll_orders_by_deadline() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(ViewId::Shell, TimerKind::Transition, MS_300, start);
        timers.schedule(
            ViewId::Home,
            TimerKind::GaugeFill(RiskKind::Tumor),
            MS_100,
            start,
        );

        assert_eq!(timers.next_deadline(), Some(start + MS_100));
        let fired = timers.poll(start + MS_300);
        assert_eq!(fired[0].owner, ViewId::Home);
        assert_eq!(fired[1].owner, ViewId::Shell);
    }
}
