// ABOUTME: Central application state: current view, single-slot
// notification, pending async action and the per-view component states

#![allow(dead_code)]

use std::time::{Duration, Instant};

use crate::components::client_registration::ClientFormState;
use crate::components::company_search::CompanySearchState;
use crate::components::dashboard::DashboardState;
use crate::components::driver_wizard::WizardState;
use crate::config::AppConfig;

/// Views of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Company dashboard with tabs, search and reports.
    Dashboard,
    /// Client registration form.
    ClientRegistration,
    /// Driver registration wizard.
    DriverRegistration,
    /// Landing screen after a successful registration.
    Login,
}

/// Kind of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient message in the single-slot notification region.
///
/// Setting a new one replaces the previous; it auto-dismisses after its
/// duration.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Success,
            created_at: Instant::now(),
            duration: Duration::from_secs(4),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Error,
            created_at: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    pub fn info(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Info,
            created_at: Instant::now(),
            duration: Duration::from_secs(4),
        }
    }

    pub fn warning(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Warning,
            created_at: Instant::now(),
            duration: Duration::from_secs(4),
        }
    }

    /// Whether the auto-dismiss deadline passed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) > self.duration
    }
}

/// What a confirmation dialog confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Abandon the client registration form.
    CancelClientRegistration,
    /// Abandon the driver registration wizard.
    CancelDriverRegistration,
}

/// A modal yes/no dialog.
#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_action: ConfirmAction,
    /// true = Yes, false = No.
    pub selected_option: bool,
}

/// Async work queued by the event handler, drained by `App::tick`.
#[derive(Debug, Clone)]
pub enum AsyncAction {
    /// Load the company list for the client form selector.
    LoadCompanies,
    /// Load a company's detail record (clients follow).
    LoadCompanyDetail(i64),
    /// Reload a company's client list.
    LoadCompanyClients(i64),
    /// Flip a client's active flag.
    ToggleClientStatus { client_id: i64, activo: bool },
    /// Validate and send the client registration.
    SubmitClientRegistration,
    /// Validate and send the driver registration.
    SubmitDriverRegistration,
    /// Export the configured report to a spreadsheet.
    ExportReport,
}

/// All mutable UI state, owned by one page session.
pub struct AppState {
    /// View currently shown.
    pub current_view: View,
    /// Set to exit the main loop.
    pub should_quit: bool,
    /// Single-slot notification region.
    pub notification: Option<Notification>,
    /// Modal dialog, when open.
    pub confirmation_dialog: Option<ConfirmationDialog>,
    /// Async work waiting for the next tick.
    pub pending_async_action: Option<AsyncAction>,
    /// Company dashboard state.
    pub dashboard: DashboardState,
    /// Client registration form state.
    pub client_form: ClientFormState,
    /// Driver registration wizard state.
    pub wizard: WizardState,
    /// Loaded configuration.
    pub config: AppConfig,
    /// Redraw before the next slot.
    pub ui_needs_refresh: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let debounce = Duration::from_millis(config.ui.search_debounce_ms);
        Self {
            current_view: View::Dashboard,
            should_quit: false,
            notification: None,
            confirmation_dialog: None,
            pending_async_action: None,
            dashboard: DashboardState::new(CompanySearchState::new(debounce)),
            client_form: ClientFormState::new(),
            wizard: WizardState::new(),
            config,
            ui_needs_refresh: false,
        }
    }

    /// Replace the notification slot.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.ui_needs_refresh = true;
    }

    pub fn notify_success(&mut self, message: String) {
        self.notify(Notification::success(message));
    }

    pub fn notify_error(&mut self, message: String) {
        self.notify(Notification::error(message));
    }

    pub fn notify_info(&mut self, message: String) {
        self.notify(Notification::info(message));
    }

    pub fn notify_warning(&mut self, message: String) {
        self.notify(Notification::warning(message));
    }

    /// Drop the notification once its deadline passes.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired_at(now))
        {
            self.notification = None;
            self.ui_needs_refresh = true;
        }
    }

    /// Open the client registration form with a fresh state.
    pub fn start_client_registration(&mut self) {
        self.client_form = ClientFormState::new();
        self.current_view = View::ClientRegistration;
        self.pending_async_action = Some(AsyncAction::LoadCompanies);
    }

    /// Open the driver registration wizard with a fresh state.
    pub fn start_driver_registration(&mut self) {
        self.wizard = WizardState::new();
        self.current_view = View::DriverRegistration;
    }

    /// Open the cancel-registration dialog for the current form.
    pub fn open_cancel_dialog(&mut self) {
        let confirm_action = match self.current_view {
            View::ClientRegistration => ConfirmAction::CancelClientRegistration,
            View::DriverRegistration => ConfirmAction::CancelDriverRegistration,
            _ => return,
        };
        self.confirmation_dialog = Some(ConfirmationDialog {
            title: " Cancelar registro ".to_string(),
            message: "¿Está seguro que desea cancelar el registro?".to_string(),
            confirm_action,
            // Default to No, the safe option
            selected_option: false,
        });
    }

    /// Apply a confirmed dialog action.
    pub fn apply_confirm_action(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::CancelClientRegistration => {
                self.client_form = ClientFormState::new();
                self.current_view = View::Dashboard;
            }
            ConfirmAction::CancelDriverRegistration => {
                self.wizard = WizardState::new();
                self.current_view = View::Dashboard;
            }
        }
    }

    /// Navigate to the login view for any due post-success redirect.
    pub fn take_due_redirects(&mut self, now: Instant) {
        if self.wizard.take_due_redirect(now) || self.client_form.take_due_redirect(now) {
            self.current_view = View::Login;
            self.ui_needs_refresh = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_notification_slot_replaces_previous() {
        let mut state = AppState::new(AppConfig::default());
        state.notify_error("primero".to_string());
        state.notify_success("segundo".to_string());
        let current = state.notification.as_ref().unwrap();
        assert_eq!(current.message, "segundo");
        assert_eq!(current.notification_type, NotificationType::Success);
    }

    #[test]
    fn test_notification_expires() {
        let mut state = AppState::new(AppConfig::default());
        state.notify_warning("atención".to_string());
        let created = state.notification.as_ref().unwrap().created_at;
        state.expire_notification(created + Duration::from_secs(3));
        assert!(state.notification.is_some());
        state.expire_notification(created + Duration::from_secs(5));
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_cancel_dialog_defaults_to_no() {
        let mut state = AppState::new(AppConfig::default());
        state.start_driver_registration();
        state.open_cancel_dialog();
        let dialog = state.confirmation_dialog.as_ref().unwrap();
        assert!(!dialog.selected_option);
        assert_eq!(
            dialog.confirm_action,
            ConfirmAction::CancelDriverRegistration
        );
    }

    #[test]
    fn test_confirmed_cancel_returns_to_dashboard() {
        let mut state = AppState::new(AppConfig::default());
        state.start_client_registration();
        state.apply_confirm_action(ConfirmAction::CancelClientRegistration);
        assert_eq!(state.current_view, View::Dashboard);
    }

    #[test]
    fn test_due_redirect_navigates_to_login() {
        let mut state = AppState::new(AppConfig::default());
        state.start_client_registration();
        let now = Instant::now();
        state.client_form.record_success(now);
        state.take_due_redirects(now + Duration::from_secs(2));
        assert_eq!(state.current_view, View::Login);
    }
}
