// ABOUTME: Client registration form: field state, validation and renderer
// Single-page form submitting JSON to POST /api/clientes/registro/

use std::collections::HashMap;
use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::api::CompanyRef;
use crate::components::REDIRECT_DELAY;
use crate::models::ClientRegistration;
use crate::validation::rules::{MSG_MISSING_FIELDS, MSG_PASSWORD_MISMATCH};
use crate::validation::{
    is_numeric, is_valid_email, is_valid_name, is_valid_phone, rules, ValidationProfile,
    MSG_REQUIRED_FIELD,
};

const SUBMIT_LABEL: &str = "Registrar Cliente";
const SUBMIT_BUSY_LABEL: &str = "Registrando...";

/// Inputs of the client registration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientField {
    PrimerNombre,
    SegundoNombre,
    PrimerApellido,
    SegundoApellido,
    TipoDocumento,
    NumeroDocumento,
    Correo,
    Telefono,
    Compania,
    Password,
    ConfirmPassword,
}

impl ClientField {
    /// All fields in display order.
    pub fn all() -> &'static [ClientField] {
        &[
            Self::PrimerNombre,
            Self::SegundoNombre,
            Self::PrimerApellido,
            Self::SegundoApellido,
            Self::TipoDocumento,
            Self::NumeroDocumento,
            Self::Correo,
            Self::Telefono,
            Self::Compania,
            Self::Password,
            Self::ConfirmPassword,
        ]
    }

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PrimerNombre => "Primer nombre",
            Self::SegundoNombre => "Segundo nombre",
            Self::PrimerApellido => "Primer apellido",
            Self::SegundoApellido => "Segundo apellido",
            Self::TipoDocumento => "Tipo de documento",
            Self::NumeroDocumento => "Número de documento",
            Self::Correo => "Correo electrónico",
            Self::Telefono => "Teléfono",
            Self::Compania => "Compañía",
            Self::Password => "Contraseña",
            Self::ConfirmPassword => "Confirmar contraseña",
        }
    }

    /// Whether the backend rejects a registration missing this field.
    pub fn required(&self) -> bool {
        !matches!(self, Self::SegundoNombre | Self::SegundoApellido)
    }
}

/// State of the client registration form.
#[derive(Debug)]
pub struct ClientFormState {
    values: HashMap<ClientField, String>,
    errors: HashMap<ClientField, String>,
    /// Companies for the selector, loaded from the backend.
    pub companies: Vec<CompanyRef>,
    /// Selected company index, when any.
    pub selected_company: Option<usize>,
    /// Whether the company list failed to load.
    pub companies_failed: bool,
    /// Focused row.
    pub focus: usize,
    /// Duplicate-submission guard.
    pub submitting: bool,
    /// When set, navigate to the login view once the deadline passes.
    pub redirect_at: Option<Instant>,
    profile: ValidationProfile,
}

impl ClientFormState {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            errors: HashMap::new(),
            companies: Vec::new(),
            selected_company: None,
            companies_failed: false,
            focus: 0,
            submitting: false,
            redirect_at: None,
            profile: ValidationProfile::client(),
        }
    }

    /// Current value of a field ("" when untouched).
    pub fn value(&self, field: ClientField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Current error of a field, if any.
    pub fn error(&self, field: ClientField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The focused field.
    pub fn focused_field(&self) -> ClientField {
        ClientField::all()[self.focus.min(ClientField::all().len() - 1)]
    }

    /// Move focus down one row.
    pub fn focus_next(&mut self) {
        if self.focus + 1 < ClientField::all().len() {
            self.focus += 1;
        }
    }

    /// Move focus up one row.
    pub fn focus_previous(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Replace a field value and re-run its live validation.
    pub fn set_value(&mut self, field: ClientField, value: String) {
        self.values.insert(field, value);
        self.validate_field(field);
    }

    /// Append a character to the focused field.
    pub fn input_char(&mut self, c: char) {
        let field = self.focused_field();
        if field == ClientField::Compania {
            return;
        }
        self.values.entry(field).or_default().push(c);
        self.validate_field(field);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        let field = self.focused_field();
        if let Some(value) = self.values.get_mut(&field) {
            value.pop();
        }
        self.validate_field(field);
    }

    /// Cycle the company selector.
    pub fn select_next_company(&mut self) {
        if self.companies.is_empty() {
            return;
        }
        let next = match self.selected_company {
            Some(i) => (i + 1) % self.companies.len(),
            None => 0,
        };
        self.selected_company = Some(next);
        self.errors.remove(&ClientField::Compania);
    }

    /// Cycle the company selector backwards.
    pub fn select_previous_company(&mut self) {
        if self.companies.is_empty() {
            return;
        }
        let previous = match self.selected_company {
            Some(0) | None => self.companies.len() - 1,
            Some(i) => i - 1,
        };
        self.selected_company = Some(previous);
        self.errors.remove(&ClientField::Compania);
    }

    /// Store the loaded company list.
    pub fn set_companies(&mut self, companies: Vec<CompanyRef>) {
        self.companies = companies;
        self.companies_failed = false;
        if self.companies.is_empty() {
            self.selected_company = None;
        }
    }

    /// Immediate feedback after a change, mirroring the input/blur wiring.
    pub fn validate_field(&mut self, field: ClientField) {
        // Passwords are compared and checked verbatim, never trimmed
        let value = match field {
            ClientField::Password | ClientField::ConfirmPassword => {
                self.value(field).to_string()
            }
            _ => self.value(field).trim().to_string(),
        };
        let error = if value.is_empty() {
            None
        } else {
            match field {
                ClientField::PrimerNombre
                | ClientField::SegundoNombre
                | ClientField::PrimerApellido
                | ClientField::SegundoApellido => {
                    (!is_valid_name(&value)).then(|| rules::MSG_INVALID_NAME.to_string())
                }
                ClientField::NumeroDocumento => {
                    (!is_numeric(&value)).then(|| rules::MSG_NOT_NUMERIC.to_string())
                }
                ClientField::Correo => {
                    (!is_valid_email(&value)).then(|| rules::MSG_INVALID_EMAIL.to_string())
                }
                ClientField::Telefono => {
                    (!is_valid_phone(&value)).then(|| rules::MSG_INVALID_PHONE.to_string())
                }
                ClientField::Password => self
                    .profile
                    .password
                    .validate(&value)
                    .err()
                    .map(str::to_string),
                ClientField::ConfirmPassword => (self.value(ClientField::Password) != value)
                    .then(|| MSG_PASSWORD_MISMATCH.to_string()),
                ClientField::TipoDocumento | ClientField::Compania => None,
            }
        };
        match error {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Clear every field error (after a successful submission).
    pub fn clear_all_errors(&mut self) {
        self.errors.clear();
    }

    /// Full-form validation before submission; aggregates every failure.
    pub fn validate_all(&mut self) -> Result<(), String> {
        self.clear_all_errors();
        let mut missing: Vec<&'static str> = Vec::new();

        for field in ClientField::all() {
            let value = self.value(*field).trim().to_string();
            if *field == ClientField::Compania {
                if self.selected_company.is_none() {
                    self.errors
                        .insert(*field, "Debe seleccionar una compañía".to_string());
                    missing.push(field.label());
                }
                continue;
            }
            if field.required() && value.is_empty() {
                self.errors.insert(*field, MSG_REQUIRED_FIELD.to_string());
                missing.push(field.label());
                continue;
            }
            if !value.is_empty() {
                self.validate_field(*field);
                if self.errors.contains_key(field) {
                    missing.push(field.label());
                }
            }
        }

        if self.value(ClientField::Password) != self.value(ClientField::ConfirmPassword) {
            self.errors
                .insert(ClientField::ConfirmPassword, MSG_PASSWORD_MISMATCH.to_string());
            if !missing.contains(&ClientField::ConfirmPassword.label()) {
                missing.push(ClientField::ConfirmPassword.label());
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("{}: {}", MSG_MISSING_FIELDS, missing.join(", ")))
        }
    }

    /// Build the JSON payload from the current state.
    pub fn build_registration(&self) -> ClientRegistration {
        let trimmed = |field: ClientField| self.value(field).trim().to_string();
        ClientRegistration {
            primer_nombre: trimmed(ClientField::PrimerNombre),
            segundo_nombre: trimmed(ClientField::SegundoNombre),
            primer_apellido: trimmed(ClientField::PrimerApellido),
            segundo_apellido: trimmed(ClientField::SegundoApellido),
            tipo_documento: trimmed(ClientField::TipoDocumento),
            numero_documento: trimmed(ClientField::NumeroDocumento),
            correo: trimmed(ClientField::Correo),
            telefono: trimmed(ClientField::Telefono),
            compania_id: self
                .selected_company
                .and_then(|i| self.companies.get(i))
                .map(|c| c.id)
                .unwrap_or_default(),
            password: self.value(ClientField::Password).to_string(),
            confirm_password: self.value(ClientField::ConfirmPassword).to_string(),
        }
    }

    /// Label of the submit control, reflecting the busy guard.
    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMIT_BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Record a successful submission: reset the form and schedule the
    /// single navigation to login.
    pub fn record_success(&mut self, now: Instant) {
        self.values.clear();
        self.errors.clear();
        self.selected_company = None;
        self.focus = 0;
        self.redirect_at = Some(now + REDIRECT_DELAY);
    }

    /// Take the redirect if its deadline has passed. Fires at most once.
    pub fn take_due_redirect(&mut self, now: Instant) -> bool {
        if self.redirect_at.is_some_and(|at| at <= now) {
            self.redirect_at = None;
            return true;
        }
        false
    }
}

impl Default for ClientFormState {
    fn default() -> Self {
        Self::new()
    }
}

const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);

/// Renderer for the client registration form.
pub struct ClientRegistrationComponent;

impl ClientRegistrationComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &ClientFormState) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Registro de Clientes ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(ClientField::all().len() as u16 * 2),
                Constraint::Length(2),
            ])
            .split(inner);

        self.render_fields(frame, layout[0], state);
        self.render_footer(frame, layout[1], state);
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect, state: &ClientFormState) {
        let mut lines: Vec<Line> = Vec::new();
        for (idx, field) in ClientField::all().iter().enumerate() {
            let focused = idx == state.focus;
            let marker = if focused { "> " } else { "  " };
            let label_style = if focused {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            };

            let shown = match field {
                ClientField::Compania => state
                    .selected_company
                    .and_then(|i| state.companies.get(i))
                    .map(|c| c.nombre.clone())
                    .unwrap_or_else(|| {
                        if state.companies_failed {
                            "Error al cargar compañías".to_string()
                        } else {
                            "Seleccione una compañía...".to_string()
                        }
                    }),
                ClientField::Password | ClientField::ConfirmPassword => {
                    "•".repeat(state.value(*field).len())
                }
                _ => state.value(*field).to_string(),
            };

            let value_style = if state.error(*field).is_some() {
                Style::default().fg(ERROR_RED)
            } else {
                Style::default().fg(SOFT_WHITE)
            };

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(GOLD)),
                Span::styled(format!("{:<28}", field.label()), label_style),
                Span::styled(shown, value_style),
            ]));

            if let Some(error) = state.error(*field) {
                lines.push(Line::from(Span::styled(
                    format!("    {error}"),
                    Style::default().fg(ERROR_RED),
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &ClientFormState) {
        let submit_style = if state.submitting {
            Style::default().fg(MUTED_GRAY)
        } else {
            Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
        };

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(format!("[Enter] {}", state.submit_label()), submit_style),
            Span::styled(
                "   [↑/↓] Campo   [←/→] Compañía   [Esc] Cancelar",
                Style::default().fg(MUTED_GRAY),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, area);
    }
}

impl Default for ClientRegistrationComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_form() -> ClientFormState {
        let mut state = ClientFormState::new();
        state.set_companies(vec![CompanyRef {
            id: 7,
            nombre: "Transportes Andinos".into(),
        }]);
        state.selected_company = Some(0);
        state.set_value(ClientField::PrimerNombre, "Laura".into());
        state.set_value(ClientField::PrimerApellido, "Gómez".into());
        state.set_value(ClientField::TipoDocumento, "CC".into());
        state.set_value(ClientField::NumeroDocumento, "1094000111".into());
        state.set_value(ClientField::Correo, "laura@evory.com".into());
        state.set_value(ClientField::Telefono, "3001234567".into());
        state.set_value(ClientField::Password, "Abcdefg1".into());
        state.set_value(ClientField::ConfirmPassword, "Abcdefg1".into());
        state
    }

    #[test]
    fn test_filled_form_validates() {
        let mut state = filled_form();
        assert!(state.validate_all().is_ok());
    }

    #[test]
    fn test_empty_form_aggregates_all_required_labels() {
        let mut state = ClientFormState::new();
        let err = state.validate_all().unwrap_err();
        assert!(err.starts_with(MSG_MISSING_FIELDS));
        assert!(err.contains("Primer nombre"));
        assert!(err.contains("Compañía"));
        assert!(!err.contains("Segundo nombre"));
    }

    #[test]
    fn test_client_password_policy_is_standard() {
        let mut state = filled_form();
        // no special character required for clients
        state.set_value(ClientField::Password, "Abcdefg1".into());
        state.set_value(ClientField::ConfirmPassword, "Abcdefg1".into());
        assert!(state.validate_all().is_ok());

        state.set_value(ClientField::Password, "abcdefg1".into());
        state.set_value(ClientField::ConfirmPassword, "abcdefg1".into());
        assert!(state.validate_all().is_err());
    }

    #[test]
    fn test_build_registration_uses_selected_company() {
        let state = filled_form();
        let reg = state.build_registration();
        assert_eq!(reg.compania_id, 7);
        assert_eq!(reg.correo, "laura@evory.com");
    }

    #[test]
    fn test_success_resets_form_and_schedules_redirect() {
        let mut state = filled_form();
        let now = Instant::now();
        state.record_success(now);
        assert_eq!(state.value(ClientField::PrimerNombre), "");
        assert!(state.selected_company.is_none());
        assert!(state.redirect_at.is_some());
        assert!(state.take_due_redirect(now + REDIRECT_DELAY));
        assert!(!state.take_due_redirect(now + REDIRECT_DELAY));
    }
}
