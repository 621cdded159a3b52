// ABOUTME: Wizard navigation flow tests driven through the event layer

use pretty_assertions::assert_eq;

use evory_admin::app::events::{AppEvent, EventHandler};
use evory_admin::app::state::{AppState, AsyncAction, View};
use evory_admin::components::driver_wizard::state::{FieldId, MSG_TAB_INCOMPLETE};
use evory_admin::components::driver_wizard::WizardTab;
use evory_admin::config::AppConfig;
use evory_admin::validation::MSG_REQUIRED_FIELD;

fn wizard_app() -> AppState {
    let mut state = AppState::new(AppConfig::default());
    EventHandler::process_event(AppEvent::StartDriverRegistration, &mut state);
    assert_eq!(state.current_view, View::DriverRegistration);
    state
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        EventHandler::process_event(AppEvent::WizardInputChar(c), state);
    }
}

#[test]
fn next_on_incomplete_tab_marks_fields_and_stays() {
    let mut state = wizard_app();

    EventHandler::process_event(AppEvent::WizardNextTab, &mut state);

    assert_eq!(state.wizard.current_tab, WizardTab::Personal);
    assert_eq!(state.wizard.error(FieldId::PrimerNombre), Some(MSG_REQUIRED_FIELD));
    assert_eq!(
        state.notification.as_ref().unwrap().message,
        MSG_TAB_INCOMPLETE
    );
}

#[test]
fn filling_the_tab_lets_next_advance_by_one() {
    let mut state = wizard_app();

    let fields: &[(FieldId, &str)] = &[
        (FieldId::PrimerNombre, "Carlos"),
        (FieldId::PrimerApellido, "Mendoza"),
        (FieldId::TipoDocumento, "CC"),
        (FieldId::NumeroDocumento, "1094000222"),
        (FieldId::FechaNacimiento, "1995-04-12"),
        (FieldId::Correo, "carlos@evory.com"),
        (FieldId::TelefonoPrincipal, "3001234567"),
        (FieldId::Direccion, "Calle 10 # 4-21"),
        (FieldId::Ciudad, "Armenia"),
        (FieldId::Password, "Abcdefg1!"),
        (FieldId::ConfirmPassword, "Abcdefg1!"),
    ];
    for (field, value) in fields {
        state.wizard.set_value(*field, (*value).to_string());
    }

    EventHandler::process_event(AppEvent::WizardNextTab, &mut state);
    assert_eq!(state.wizard.current_tab, WizardTab::License);
}

#[test]
fn typing_reaches_the_focused_field_and_moves_with_focus() {
    let mut state = wizard_app();

    type_text(&mut state, "Carlos");
    assert_eq!(state.wizard.value(FieldId::PrimerNombre), "Carlos");

    EventHandler::process_event(AppEvent::WizardFocusNext, &mut state);
    type_text(&mut state, "Andrés");
    assert_eq!(state.wizard.value(FieldId::SegundoNombre), "Andrés");

    EventHandler::process_event(AppEvent::WizardBackspace, &mut state);
    assert_eq!(state.wizard.value(FieldId::SegundoNombre), "André");
}

#[test]
fn jump_bypasses_validation_but_submit_does_not() {
    let mut state = wizard_app();

    // Jump straight to the final tab with everything empty
    EventHandler::process_event(AppEvent::WizardJumpTab(4), &mut state);
    assert_eq!(state.wizard.current_tab, WizardTab::Documents);
    assert!(state.wizard.is_final_tab());

    // Submit queues the async action; the orchestrator validates there
    EventHandler::process_event(AppEvent::WizardSubmit, &mut state);
    assert!(matches!(
        state.pending_async_action,
        Some(AsyncAction::SubmitDriverRegistration)
    ));
}

#[test]
fn previous_is_always_permitted() {
    let mut state = wizard_app();
    EventHandler::process_event(AppEvent::WizardJumpTab(3), &mut state);
    EventHandler::process_event(AppEvent::WizardPreviousTab, &mut state);
    assert_eq!(state.wizard.current_tab, WizardTab::BankAccount);
}

#[test]
fn cancel_flow_requires_confirmation() {
    let mut state = wizard_app();
    state.wizard.set_value(FieldId::PrimerNombre, "Carlos".into());

    EventHandler::process_event(AppEvent::WizardCancel, &mut state);
    assert!(state.confirmation_dialog.is_some());

    // Declining keeps the wizard and its state
    EventHandler::process_event(AppEvent::ConfirmationConfirm, &mut state);
    assert_eq!(state.current_view, View::DriverRegistration);
    assert_eq!(state.wizard.value(FieldId::PrimerNombre), "Carlos");

    // Accepting discards the form and returns to the dashboard
    EventHandler::process_event(AppEvent::WizardCancel, &mut state);
    EventHandler::process_event(AppEvent::ConfirmationToggle, &mut state);
    EventHandler::process_event(AppEvent::ConfirmationConfirm, &mut state);
    assert_eq!(state.current_view, View::Dashboard);
    assert_eq!(state.wizard.value(FieldId::PrimerNombre), "");
}

#[test]
fn submit_is_ignored_while_a_request_is_in_flight() {
    let mut state = wizard_app();
    state.wizard.submitting = true;
    state.pending_async_action = None;

    EventHandler::process_event(AppEvent::WizardSubmit, &mut state);
    assert!(state.pending_async_action.is_none());
}
