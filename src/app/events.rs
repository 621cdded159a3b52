// ABOUTME: Event handling system for keyboard input and app actions
// Keys resolve to AppEvents per view; processing an event mutates state
// and may queue an AsyncAction for the next tick

#![allow(dead_code)]

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::app::state::{AppState, AsyncAction, View};
use crate::components::dashboard::{DashboardFocus, DashboardTab};
use crate::components::driver_wizard::state::MSG_TAB_INCOMPLETE;
use crate::components::driver_wizard::WizardTab;

/// High-level events the key handler emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ShowDashboard,
    StartClientRegistration,
    StartDriverRegistration,

    // Dashboard: search box
    FocusSearch,
    LeaveSearch,
    SearchInputChar(char),
    SearchBackspace,
    SearchSelectNext,
    SearchSelectPrevious,
    SearchConfirm,

    // Dashboard: tabs and content
    NextDashboardTab,
    ClientSelectNext,
    ClientSelectPrevious,
    ToggleSelectedClient,
    ReportFocusNext,
    ReportFocusPrevious,
    ReportCycleKind,
    ReportInputChar(char),
    ReportBackspace,
    ReportExport,

    // Client registration form
    FormInputChar(char),
    FormBackspace,
    FormFocusNext,
    FormFocusPrevious,
    FormCompanyNext,
    FormCompanyPrevious,
    FormSubmit,
    FormCancel,

    // Driver wizard
    WizardInputChar(char),
    WizardBackspace,
    WizardFocusNext,
    WizardFocusPrevious,
    WizardNextTab,
    WizardPreviousTab,
    WizardJumpTab(usize),
    WizardAttachDocument,
    WizardSubmit,
    WizardCancel,

    // Confirmation dialog
    ConfirmationToggle,
    ConfirmationConfirm,
    ConfirmationCancel,
}

pub struct EventHandler;

impl EventHandler {
    /// Resolve a key press into an event for the current view.
    pub fn handle_key_event(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // The modal dialog captures everything while open
        if state.confirmation_dialog.is_some() {
            return match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    Some(AppEvent::ConfirmationToggle)
                }
                KeyCode::Enter => Some(AppEvent::ConfirmationConfirm),
                KeyCode::Esc => Some(AppEvent::ConfirmationCancel),
                _ => None,
            };
        }

        match state.current_view {
            View::Dashboard => Self::handle_dashboard_key(key, state),
            View::ClientRegistration => Self::handle_client_form_key(key, state),
            View::DriverRegistration => Self::handle_wizard_key(key, state),
            View::Login => match key.code {
                KeyCode::Char('q') => Some(AppEvent::Quit),
                _ => Some(AppEvent::ShowDashboard),
            },
        }
    }

    fn handle_dashboard_key(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if state.dashboard.focus == DashboardFocus::Search {
            return match key.code {
                KeyCode::Esc => Some(AppEvent::LeaveSearch),
                KeyCode::Enter => Some(AppEvent::SearchConfirm),
                KeyCode::Down => Some(AppEvent::SearchSelectNext),
                KeyCode::Up => Some(AppEvent::SearchSelectPrevious),
                KeyCode::Backspace => Some(AppEvent::SearchBackspace),
                KeyCode::Char(c) => Some(AppEvent::SearchInputChar(c)),
                _ => None,
            };
        }

        // Reportes date rows take raw character input
        let report_input_focused =
            state.dashboard.active_tab == DashboardTab::Reportes && state.dashboard.report.focus > 0;

        match key.code {
            KeyCode::Tab => Some(AppEvent::NextDashboardTab),
            KeyCode::Char('/') => Some(AppEvent::FocusSearch),
            KeyCode::Char('q') if !report_input_focused => Some(AppEvent::Quit),
            KeyCode::Char('c') if !report_input_focused => {
                Some(AppEvent::StartClientRegistration)
            }
            KeyCode::Char('v') if !report_input_focused => {
                Some(AppEvent::StartDriverRegistration)
            }
            _ => match state.dashboard.active_tab {
                DashboardTab::Clientes => match key.code {
                    KeyCode::Down => Some(AppEvent::ClientSelectNext),
                    KeyCode::Up => Some(AppEvent::ClientSelectPrevious),
                    KeyCode::Enter => Some(AppEvent::ToggleSelectedClient),
                    _ => None,
                },
                DashboardTab::Datos => None,
                DashboardTab::Reportes => match key.code {
                    KeyCode::Down => Some(AppEvent::ReportFocusNext),
                    KeyCode::Up => Some(AppEvent::ReportFocusPrevious),
                    KeyCode::Char(' ') if state.dashboard.report.focus == 0 => {
                        Some(AppEvent::ReportCycleKind)
                    }
                    KeyCode::Enter => Some(AppEvent::ReportExport),
                    KeyCode::Backspace if report_input_focused => {
                        Some(AppEvent::ReportBackspace)
                    }
                    KeyCode::Char(c) if report_input_focused => {
                        Some(AppEvent::ReportInputChar(c))
                    }
                    _ => None,
                },
            },
        }
    }

    fn handle_client_form_key(key: KeyEvent, _state: &AppState) -> Option<AppEvent> {
        match key.code {
            KeyCode::Esc => Some(AppEvent::FormCancel),
            KeyCode::Enter => Some(AppEvent::FormSubmit),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::FormFocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::FormFocusPrevious),
            KeyCode::Right => Some(AppEvent::FormCompanyNext),
            KeyCode::Left => Some(AppEvent::FormCompanyPrevious),
            KeyCode::Backspace => Some(AppEvent::FormBackspace),
            KeyCode::Char(c) => Some(AppEvent::FormInputChar(c)),
            _ => None,
        }
    }

    fn handle_wizard_key(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // Ctrl+1..5 jumps straight to a tab, bypassing validation
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(c) = key.code {
                if let Some(digit) = c.to_digit(10) {
                    let index = digit as usize;
                    if (1..=WizardTab::total()).contains(&index) {
                        return Some(AppEvent::WizardJumpTab(index - 1));
                    }
                }
            }
        }

        match key.code {
            KeyCode::Esc => Some(AppEvent::WizardCancel),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::WizardFocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::WizardFocusPrevious),
            KeyCode::Right | KeyCode::PageDown => Some(AppEvent::WizardNextTab),
            KeyCode::Left | KeyCode::PageUp => Some(AppEvent::WizardPreviousTab),
            KeyCode::Enter => {
                if state.wizard.is_final_tab() {
                    if !state.wizard.document_input.trim().is_empty() {
                        Some(AppEvent::WizardAttachDocument)
                    } else {
                        Some(AppEvent::WizardSubmit)
                    }
                } else {
                    Some(AppEvent::WizardNextTab)
                }
            }
            KeyCode::Backspace => Some(AppEvent::WizardBackspace),
            KeyCode::Char(c) => Some(AppEvent::WizardInputChar(c)),
            _ => None,
        }
    }

    /// Apply an event to the state.
    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Processing event: {:?}", event);
        let now = Instant::now();

        match event {
            AppEvent::Quit => state.should_quit = true,
            AppEvent::ShowDashboard => state.current_view = View::Dashboard,
            AppEvent::StartClientRegistration => state.start_client_registration(),
            AppEvent::StartDriverRegistration => state.start_driver_registration(),

            AppEvent::FocusSearch => state.dashboard.focus = DashboardFocus::Search,
            AppEvent::LeaveSearch => {
                state.dashboard.focus = DashboardFocus::Content;
                state.dashboard.search.close();
            }
            AppEvent::SearchInputChar(c) => state.dashboard.search.input_char(c, now),
            AppEvent::SearchBackspace => state.dashboard.search.backspace(now),
            AppEvent::SearchSelectNext => state.dashboard.search.select_next(),
            AppEvent::SearchSelectPrevious => state.dashboard.search.select_previous(),
            AppEvent::SearchConfirm => {
                if let Some(company) = state.dashboard.search.selected_result() {
                    let company_id = company.id;
                    state.dashboard.load_company(company_id);
                    state.dashboard.search.close();
                    state.dashboard.focus = DashboardFocus::Content;
                    state.pending_async_action = Some(AsyncAction::LoadCompanyDetail(company_id));
                }
            }

            AppEvent::NextDashboardTab => {
                let tabs = DashboardTab::all();
                let idx = tabs
                    .iter()
                    .position(|t| *t == state.dashboard.active_tab)
                    .unwrap_or(0);
                let next = tabs[(idx + 1) % tabs.len()];
                if state.dashboard.switch_tab(next) {
                    if let Some(company_id) = state.dashboard.company_id {
                        state.pending_async_action =
                            Some(AsyncAction::LoadCompanyClients(company_id));
                    }
                }
            }
            AppEvent::ClientSelectNext => state.dashboard.select_next_client(),
            AppEvent::ClientSelectPrevious => state.dashboard.select_previous_client(),
            AppEvent::ToggleSelectedClient => {
                if let Some(client) = state.dashboard.selected_client() {
                    state.pending_async_action = Some(AsyncAction::ToggleClientStatus {
                        client_id: client.id,
                        activo: !client.activo,
                    });
                }
            }

            AppEvent::ReportFocusNext => state.dashboard.report.focus_next(),
            AppEvent::ReportFocusPrevious => state.dashboard.report.focus_previous(),
            AppEvent::ReportCycleKind => state.dashboard.report.cycle_kind(),
            AppEvent::ReportInputChar(c) => state.dashboard.report.input_char(c),
            AppEvent::ReportBackspace => state.dashboard.report.backspace(),
            AppEvent::ReportExport => {
                if state.dashboard.report.is_ready() {
                    state.pending_async_action = Some(AsyncAction::ExportReport);
                } else if let Some(warning) = state.dashboard.report.date_order_warning() {
                    state.notify_warning(warning.to_string());
                }
            }

            AppEvent::FormInputChar(c) => state.client_form.input_char(c),
            AppEvent::FormBackspace => state.client_form.backspace(),
            AppEvent::FormFocusNext => state.client_form.focus_next(),
            AppEvent::FormFocusPrevious => state.client_form.focus_previous(),
            AppEvent::FormCompanyNext => state.client_form.select_next_company(),
            AppEvent::FormCompanyPrevious => state.client_form.select_previous_company(),
            AppEvent::FormSubmit => {
                // Disabled control: ignore while a submission is in flight
                if !state.client_form.submitting {
                    state.pending_async_action = Some(AsyncAction::SubmitClientRegistration);
                }
            }
            AppEvent::FormCancel => state.open_cancel_dialog(),

            AppEvent::WizardInputChar(c) => {
                if state.wizard.current_tab == WizardTab::Documents {
                    state.wizard.document_input.push(c);
                } else if let Some(field) = state.wizard.focused_field() {
                    state.wizard.input_char(field, c);
                }
            }
            AppEvent::WizardBackspace => {
                if state.wizard.current_tab == WizardTab::Documents {
                    state.wizard.document_input.pop();
                } else if let Some(field) = state.wizard.focused_field() {
                    state.wizard.backspace(field);
                }
            }
            AppEvent::WizardFocusNext => state.wizard.focus_next(),
            AppEvent::WizardFocusPrevious => state.wizard.focus_previous(),
            AppEvent::WizardNextTab => {
                if !state.wizard.is_final_tab() && !state.wizard.advance() {
                    state.notify_error(MSG_TAB_INCOMPLETE.to_string());
                }
            }
            AppEvent::WizardPreviousTab => {
                state.wizard.go_back();
            }
            AppEvent::WizardJumpTab(index) => {
                if let Some(tab) = WizardTab::all().get(index) {
                    state.wizard.jump_to(*tab);
                }
            }
            AppEvent::WizardAttachDocument => {
                if let Err(message) = state.wizard.attach_focused_document() {
                    state.notify_error(message);
                }
            }
            AppEvent::WizardSubmit => {
                if !state.wizard.submitting {
                    state.pending_async_action = Some(AsyncAction::SubmitDriverRegistration);
                }
            }
            AppEvent::WizardCancel => state.open_cancel_dialog(),

            AppEvent::ConfirmationToggle => {
                if let Some(dialog) = &mut state.confirmation_dialog {
                    dialog.selected_option = !dialog.selected_option;
                }
            }
            AppEvent::ConfirmationConfirm => {
                if let Some(dialog) = state.confirmation_dialog.take() {
                    if dialog.selected_option {
                        state.apply_confirm_action(dialog.confirm_action);
                    }
                }
            }
            AppEvent::ConfirmationCancel => {
                state.confirmation_dialog = None;
            }
        }

        state.ui_needs_refresh = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::driver_wizard::state::FieldId;
    use crate::config::AppConfig;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_blocked_next_raises_tab_incomplete() {
        let mut state = AppState::new(AppConfig::default());
        state.start_driver_registration();

        EventHandler::process_event(AppEvent::WizardNextTab, &mut state);
        assert_eq!(state.wizard.current_tab, WizardTab::Personal);
        assert_eq!(
            state.notification.as_ref().unwrap().message,
            MSG_TAB_INCOMPLETE
        );
    }

    #[test]
    fn test_ctrl_digit_jumps_tab() {
        let mut state = AppState::new(AppConfig::default());
        state.start_driver_registration();

        let event = EventHandler::handle_key_event(
            KeyEvent::new(KeyCode::Char('4'), KeyModifiers::CONTROL),
            &state,
        );
        assert_eq!(event, Some(AppEvent::WizardJumpTab(3)));

        EventHandler::process_event(AppEvent::WizardJumpTab(3), &mut state);
        assert_eq!(state.wizard.current_tab, WizardTab::Vehicle);
    }

    #[test]
    fn test_wizard_chars_go_to_focused_field() {
        let mut state = AppState::new(AppConfig::default());
        state.start_driver_registration();

        for c in "Ana".chars() {
            EventHandler::process_event(AppEvent::WizardInputChar(c), &mut state);
        }
        assert_eq!(state.wizard.value(FieldId::PrimerNombre), "Ana");
    }

    #[test]
    fn test_submit_ignored_while_in_flight() {
        let mut state = AppState::new(AppConfig::default());
        state.start_client_registration();
        state.pending_async_action = None;
        state.client_form.submitting = true;

        EventHandler::process_event(AppEvent::FormSubmit, &mut state);
        assert!(state.pending_async_action.is_none());
    }

    #[test]
    fn test_dialog_captures_keys() {
        let mut state = AppState::new(AppConfig::default());
        state.start_client_registration();
        state.open_cancel_dialog();

        let event = EventHandler::handle_key_event(key(KeyCode::Char('x')), &state);
        assert_eq!(event, None);

        let event = EventHandler::handle_key_event(key(KeyCode::Enter), &state);
        assert_eq!(event, Some(AppEvent::ConfirmationConfirm));
    }

    #[test]
    fn test_search_focus_routes_typing() {
        let mut state = AppState::new(AppConfig::default());
        EventHandler::process_event(AppEvent::FocusSearch, &mut state);

        let event = EventHandler::handle_key_event(key(KeyCode::Char('a')), &state);
        assert_eq!(event, Some(AppEvent::SearchInputChar('a')));
    }
}
