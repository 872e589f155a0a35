// Monitor tab state.
// Metric sub-tab and period selection.

use crate::fixtures::MetricKind;

/// Sub-tabs along the top of the Monitor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorTab {
    Sleep,
    Metric(MetricKind),
}

impl MonitorTab {
    pub const ALL: [MonitorTab; 7] = [
        MonitorTab::Sleep,
        MonitorTab::Metric(MetricKind::Uric),
        MonitorTab::Metric(MetricKind::Lipid),
        MonitorTab::Metric(MetricKind::Vessel),
        MonitorTab::Metric(MetricKind::Glucose),
        MonitorTab::Metric(MetricKind::Bp),
        MonitorTab::Metric(MetricKind::Hr),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MonitorTab::Sleep => "Sleep",
            MonitorTab::Metric(kind) => kind.label(),
        }
    }
}

/// Chart period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
            Period::Year => "Year",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Period::Day => Period::Week,
            Period::Week => Period::Month,
            Period::Month => Period::Year,
            Period::Year => Period::Day,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    tab_index: usize,
    pub period: Period,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> MonitorTab {
        MonitorTab::ALL[self.tab_index]
    }

    pub fn tab_index(&self) -> usize {
        self.tab_index
    }

    pub fn next_tab(&mut self) {
        self.tab_index = (self.tab_index + 1) % MonitorTab::ALL.len();
    }

    pub fn prev_tab(&mut self) {
        self.tab_index = (self.tab_index + MonitorTab::ALL.len() - 1) % MonitorTab::ALL.len();
    }

    pub fn cycle_period(&mut self) {
        self.period = self.period.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_sleep() {
        let state = MonitorState::new();
        assert_eq!(state.current(), MonitorTab::Sleep);
        assert_eq!(state.period, Period::Day);
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut state = MonitorState::new();
        state.prev_tab();
        assert_eq!(state.current(), MonitorTab::Metric(MetricKind::Hr));
        state.next_tab();
        assert_eq!(state.current(), MonitorTab::Sleep);
        state.next_tab();
        assert_eq!(state.current(), MonitorTab::Metric(MetricKind::Uric));
    }

    #[test]
    fn test_period_cycles() {
        let mut state = MonitorState::new();
        for _ in 0..Period::ALL.len() {
            state.cycle_period();
        }
        assert_eq!(state.period, Period::Day);
    }
}
