// State management module.
// Navigation, timers, and per-tab view state.

pub mod home;
pub mod monitor;
pub mod navigation;
pub mod profile;
pub mod timers;

pub use home::{FamilyMember, HomeAction, HomeState};
pub use monitor::{MonitorState, MonitorTab, Period};
pub use navigation::{BackStack, Overlay, RiskKind, ViewId};
pub use profile::{ArchivePeriod, ProfilePage, ProfileState, SettingToggle};
pub use timers::{TimerKind, Timers};
