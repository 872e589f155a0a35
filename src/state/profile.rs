// Profile tab state.
// Main page menu, sub-page navigation, archive period, and settings toggles.

use ratatui::widgets::ListState;

use crate::fixtures::AppSettings;

/// Pages of the Profile view. Sub-pages return to `Main` on back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilePage {
    #[default]
    Main,
    History,
    Notifications,
    Settings,
}

impl ProfilePage {
    /// Sub-pages reachable from the main menu, in menu order.
    pub const MENU: [ProfilePage; 3] = [
        ProfilePage::History,
        ProfilePage::Notifications,
        ProfilePage::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ProfilePage::Main => "Profile",
            ProfilePage::History => "Health archive",
            ProfilePage::Notifications => "Notifications",
            ProfilePage::Settings => "Settings",
        }
    }
}

/// Which archive list the history page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchivePeriod {
    #[default]
    Weekly,
    Monthly,
}

impl ArchivePeriod {
    pub fn toggle(&self) -> Self {
        match self {
            ArchivePeriod::Weekly => ArchivePeriod::Monthly,
            ArchivePeriod::Monthly => ArchivePeriod::Weekly,
        }
    }
}

/// Toggles on the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingToggle {
    #[default]
    PushNotifications,
    SmsAlerts,
}

#[derive(Debug, Clone)]
pub struct ProfileState {
    pub page: ProfilePage,
    /// Main menu selection.
    pub menu: ListState,
    pub archive: ArchivePeriod,
    pub setting: SettingToggle,
    pub push_notifications: bool,
    pub sms_alerts: bool,
}

impl ProfileState {
    pub fn new(defaults: &AppSettings) -> Self {
        Self {
            page: ProfilePage::Main,
            menu: ListState::default().with_selected(Some(0)),
            archive: ArchivePeriod::default(),
            setting: SettingToggle::default(),
            push_notifications: defaults.push_notifications,
            sms_alerts: defaults.sms_alerts,
        }
    }

    /// Menu entry under the cursor.
    pub fn selected_page(&self) -> ProfilePage {
        let index = self.menu.selected().unwrap_or(0);
        ProfilePage::MENU[index.min(ProfilePage::MENU.len() - 1)]
    }

    /// Open the selected sub-page from the main page.
    pub fn open_selected(&mut self) {
        if self.page == ProfilePage::Main {
            self.page = self.selected_page();
            self.archive = ArchivePeriod::default();
        }
    }

    /// Return to the main page. Returns false when already there.
    pub fn back(&mut self) -> bool {
        if self.page == ProfilePage::Main {
            false
        } else {
            self.page = ProfilePage::Main;
            true
        }
    }

    pub fn select_next(&mut self) {
        match self.page {
            ProfilePage::Main => {
                let i = self.menu.selected().unwrap_or(0);
                self.menu
                    .select(Some((i + 1).min(ProfilePage::MENU.len() - 1)));
            }
            ProfilePage::Settings => self.setting = SettingToggle::SmsAlerts,
            _ => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.page {
            ProfilePage::Main => {
                let i = self.menu.selected().unwrap_or(0);
                self.menu.select(Some(i.saturating_sub(1)));
            }
            ProfilePage::Settings => self.setting = SettingToggle::PushNotifications,
            _ => {}
        }
    }

    /// Switch weekly/monthly on the history page.
    pub fn toggle_archive(&mut self) {
        if self.page == ProfilePage::History {
            self.archive = self.archive.toggle();
        }
    }

    /// Flip the highlighted toggle on the settings page.
    pub fn toggle_setting(&mut self) {
        if self.page != ProfilePage::Settings {
            return;
        }
        match self.setting {
            SettingToggle::PushNotifications => {
                self.push_notifications = !self.push_notifications
            }
            SettingToggle::SmsAlerts => self.sms_alerts = !self.sms_alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> AppSettings {
        AppSettings {
            push_notifications: true,
            sms_alerts: false,
            cache_size: "24.5MB".to_string(),
            version: "3.2.0".to_string(),
            build: "20231025".to_string(),
        }
    }

    #[test]
    fn test_open_and_back() {
        let mut state = ProfileState::new(&defaults());
        assert!(!state.back());

        state.select_next();
        assert_eq!(state.selected_page(), ProfilePage::Notifications);
        state.open_selected();
        assert_eq!(state.page, ProfilePage::Notifications);

        assert!(state.back());
        assert_eq!(state.page, ProfilePage::Main);
    }

    #[test]
    fn test_menu_cursor_clamps() {
        let mut state = ProfileState::new(&defaults());
        state.select_prev();
        assert_eq!(state.selected_page(), ProfilePage::History);
        for _ in 0..5 {
            state.select_next();
        }
        assert_eq!(state.selected_page(), ProfilePage::Settings);
    }

    #[test]
    fn test_archive_toggle_only_on_history_page() {
        let mut state = ProfileState::new(&defaults());
        state.toggle_archive();
        assert_eq!(state.archive, ArchivePeriod::Weekly);

        state.open_selected();
        state.toggle_archive();
        assert_eq!(state.archive, ArchivePeriod::Monthly);
    }

    #[test]
    fn test_settings_toggles() {
        let mut state = ProfileState::new(&defaults());
        state.menu.select(Some(2));
        state.open_selected();
        assert_eq!(state.page, ProfilePage::Settings);

        state.toggle_setting();
        assert!(!state.push_notifications);

        state.select_next();
        state.toggle_setting();
        assert!(state.sms_alerts);
    }
}
