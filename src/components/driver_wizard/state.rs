// ABOUTME: State machine for the driver registration wizard
// Tracks the current tab, per-field values and errors, attached documents
// and the in-flight submission guard

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;

use crate::components::REDIRECT_DELAY;
use crate::models::{DocumentKind, DriverRegistration};
use crate::validation::rules::{
    MSG_ACCOUNT_MISMATCH, MSG_ACCOUNT_NOT_NUMERIC, MSG_INVALID_DATE, MSG_MISSING_FIELDS,
    MSG_MISSING_FILES, MSG_PASSWORD_MISMATCH,
};
use crate::validation::{
    age_on, check_license_dates, check_vehicle_year, is_numeric, is_valid_email, is_valid_name,
    is_valid_phone, parse_date, rules, ValidationProfile, MAX_UPLOAD_BYTES, MSG_REQUIRED_FIELD,
};

/// Message raised when Next is blocked by an incomplete tab.
pub const MSG_TAB_INCOMPLETE: &str = "Por favor complete todos los campos obligatorios";

const SUBMIT_LABEL: &str = "Registrar Conductor";
const SUBMIT_BUSY_LABEL: &str = "Registrando...";

/// Tabs of the wizard, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardTab {
    Personal,
    License,
    BankAccount,
    Vehicle,
    Documents,
}

impl WizardTab {
    /// All tabs in order.
    pub fn all() -> &'static [WizardTab] {
        &[
            Self::Personal,
            Self::License,
            Self::BankAccount,
            Self::Vehicle,
            Self::Documents,
        ]
    }

    /// 1-indexed position for display.
    pub fn number(&self) -> usize {
        match self {
            Self::Personal => 1,
            Self::License => 2,
            Self::BankAccount => 3,
            Self::Vehicle => 4,
            Self::Documents => 5,
        }
    }

    /// Total number of tabs.
    pub fn total() -> usize {
        5
    }

    /// Tab title shown in the progress bar.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Personal => "Datos Personales",
            Self::License => "Licencia",
            Self::BankAccount => "Cuenta Bancaria",
            Self::Vehicle => "Vehículo",
            Self::Documents => "Documentos",
        }
    }

    /// Next tab, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::License),
            Self::License => Some(Self::BankAccount),
            Self::BankAccount => Some(Self::Vehicle),
            Self::Vehicle => Some(Self::Documents),
            Self::Documents => None,
        }
    }

    /// Previous tab, if any.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::License => Some(Self::Personal),
            Self::BankAccount => Some(Self::License),
            Self::Vehicle => Some(Self::BankAccount),
            Self::Documents => Some(Self::Vehicle),
        }
    }
}

/// Every text input of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    PrimerNombre,
    SegundoNombre,
    PrimerApellido,
    SegundoApellido,
    TipoDocumento,
    NumeroDocumento,
    FechaNacimiento,
    Correo,
    TelefonoPrincipal,
    TelefonoSecundario,
    Direccion,
    Ciudad,
    Password,
    ConfirmPassword,
    NumeroLicencia,
    LicenciaExpedicion,
    LicenciaVencimiento,
    TipoCuenta,
    Banco,
    NumeroCuenta,
    ConfirmarNumeroCuenta,
    Placa,
    Marca,
    Modelo,
    Anio,
    Color,
    TipoVehiculo,
    NumPasajeros,
}

impl FieldId {
    /// All fields in tab and display order.
    pub fn all() -> &'static [FieldId] {
        &[
            Self::PrimerNombre,
            Self::SegundoNombre,
            Self::PrimerApellido,
            Self::SegundoApellido,
            Self::TipoDocumento,
            Self::NumeroDocumento,
            Self::FechaNacimiento,
            Self::Correo,
            Self::TelefonoPrincipal,
            Self::TelefonoSecundario,
            Self::Direccion,
            Self::Ciudad,
            Self::Password,
            Self::ConfirmPassword,
            Self::NumeroLicencia,
            Self::LicenciaExpedicion,
            Self::LicenciaVencimiento,
            Self::TipoCuenta,
            Self::Banco,
            Self::NumeroCuenta,
            Self::ConfirmarNumeroCuenta,
            Self::Placa,
            Self::Marca,
            Self::Modelo,
            Self::Anio,
            Self::Color,
            Self::TipoVehiculo,
            Self::NumPasajeros,
        ]
    }

    /// The tab this field belongs to.
    pub fn tab(&self) -> WizardTab {
        match self {
            Self::PrimerNombre
            | Self::SegundoNombre
            | Self::PrimerApellido
            | Self::SegundoApellido
            | Self::TipoDocumento
            | Self::NumeroDocumento
            | Self::FechaNacimiento
            | Self::Correo
            | Self::TelefonoPrincipal
            | Self::TelefonoSecundario
            | Self::Direccion
            | Self::Ciudad
            | Self::Password
            | Self::ConfirmPassword => WizardTab::Personal,
            Self::NumeroLicencia | Self::LicenciaExpedicion | Self::LicenciaVencimiento => {
                WizardTab::License
            }
            Self::TipoCuenta | Self::Banco | Self::NumeroCuenta | Self::ConfirmarNumeroCuenta => {
                WizardTab::BankAccount
            }
            Self::Placa
            | Self::Marca
            | Self::Modelo
            | Self::Anio
            | Self::Color
            | Self::TipoVehiculo
            | Self::NumPasajeros => WizardTab::Vehicle,
        }
    }

    /// Fields of one tab, in display order.
    pub fn in_tab(tab: WizardTab) -> Vec<FieldId> {
        Self::all().iter().filter(|f| f.tab() == tab).copied().collect()
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
            Self::FechaNacimiento => "Fecha de nacimiento",
            Self::Correo => "Correo electrónico",
            Self::TelefonoPrincipal => "Teléfono principal",
            Self::TelefonoSecundario => "Teléfono secundario",
            Self::Direccion => "Dirección",
            Self::Ciudad => "Ciudad",
            Self::Password => "Contraseña",
            Self::ConfirmPassword => "Confirmar contraseña",
            Self::NumeroLicencia => "Número de licencia",
            Self::LicenciaExpedicion => "Fecha de expedición",
            Self::LicenciaVencimiento => "Fecha de vencimiento",
            Self::TipoCuenta => "Tipo de cuenta",
            Self::Banco => "Banco",
            Self::NumeroCuenta => "Número de cuenta",
            Self::ConfirmarNumeroCuenta => "Confirmar número de cuenta",
            Self::Placa => "Placa",
            Self::Marca => "Marca",
            Self::Modelo => "Modelo",
            Self::Anio => "Año",
            Self::Color => "Color",
            Self::TipoVehiculo => "Tipo de vehículo",
            Self::NumPasajeros => "Número de pasajeros",
        }
    }

    /// Whether the backend rejects a registration missing this field.
    pub fn required(&self) -> bool {
        !matches!(
            self,
            Self::SegundoNombre | Self::SegundoApellido | Self::TelefonoSecundario
        )
    }
}

/// State of the driver registration wizard.
#[derive(Debug)]
pub struct WizardState {
    /// Tab currently shown.
    pub current_tab: WizardTab,
    values: HashMap<FieldId, String>,
    errors: HashMap<FieldId, String>,
    /// Attached document files.
    pub documents: HashMap<DocumentKind, PathBuf>,
    document_errors: HashMap<DocumentKind, String>,
    /// Path being typed for the focused document slot.
    pub document_input: String,
    /// Focused row within the current tab.
    pub focus: usize,
    /// Duplicate-submission guard; set while a request is in flight.
    pub submitting: bool,
    /// When set, navigate to the login view once the deadline passes.
    pub redirect_at: Option<Instant>,
    profile: ValidationProfile,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current_tab: WizardTab::Personal,
            values: HashMap::new(),
            errors: HashMap::new(),
            documents: HashMap::new(),
            document_errors: HashMap::new(),
            document_input: String::new(),
            focus: 0,
            submitting: false,
            redirect_at: None,
            profile: ValidationProfile::driver(),
        }
    }

    /// Current value of a field ("" when untouched).
    pub fn value(&self, id: FieldId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Current error of a field, if any.
    pub fn error(&self, id: FieldId) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }

    /// Current error of a document slot, if any.
    pub fn document_error(&self, kind: DocumentKind) -> Option<&str> {
        self.document_errors.get(&kind).map(String::as_str)
    }

    /// Replace a field value and re-run its live validation.
    pub fn set_value(&mut self, id: FieldId, value: String) {
        // Plates are entered uppercase, as the form input forces
        let value = if id == FieldId::Placa {
            value.to_uppercase()
        } else {
            value
        };
        self.values.insert(id, value);
        self.validate_field(id);
    }

    /// Append a character to a field (keyboard input path).
    pub fn input_char(&mut self, id: FieldId, c: char) {
        let c = if id == FieldId::Placa {
            c.to_ascii_uppercase()
        } else {
            c
        };
        self.values.entry(id).or_default().push(c);
        self.validate_field(id);
    }

    /// Delete the last character of a field.
    pub fn backspace(&mut self, id: FieldId) {
        if let Some(value) = self.values.get_mut(&id) {
            value.pop();
        }
        self.validate_field(id);
    }

    /// Fields of the tab currently shown.
    pub fn current_fields(&self) -> Vec<FieldId> {
        FieldId::in_tab(self.current_tab)
    }

    /// The focused field of the current tab, when it has text inputs.
    pub fn focused_field(&self) -> Option<FieldId> {
        self.current_fields().get(self.focus).copied()
    }

    /// Move focus to the next row of the tab.
    pub fn focus_next(&mut self) {
        let rows = self.row_count();
        if rows > 0 && self.focus + 1 < rows {
            self.focus += 1;
        }
    }

    /// Move focus to the previous row of the tab.
    pub fn focus_previous(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    fn row_count(&self) -> usize {
        if self.current_tab == WizardTab::Documents {
            DocumentKind::all().len()
        } else {
            self.current_fields().len()
        }
    }

    /// Re-run the live validation of one field, updating its error slot.
    ///
    /// Mirrors the per-field change/blur feedback of the form: empty values
    /// carry no error here; the required sweep owns those.
    pub fn validate_field(&mut self, id: FieldId) {
        // Passwords are compared and checked verbatim, never trimmed
        let value = match id {
            FieldId::Password | FieldId::ConfirmPassword => self.value(id).to_string(),
            _ => self.value(id).trim().to_string(),
        };
        match self.live_error(id, &value) {
            Some(message) => {
                self.errors.insert(id, message);
            }
            None => {
                self.errors.remove(&id);
            }
        }
    }

    fn live_error(&self, id: FieldId, value: &str) -> Option<String> {
        if value.is_empty() {
            return None;
        }
        match id {
            FieldId::PrimerNombre
            | FieldId::SegundoNombre
            | FieldId::PrimerApellido
            | FieldId::SegundoApellido => {
                (!is_valid_name(value)).then(|| rules::MSG_INVALID_NAME.to_string())
            }
            FieldId::NumeroDocumento => {
                (!is_numeric(value)).then(|| rules::MSG_NOT_NUMERIC.to_string())
            }
            FieldId::Correo => (!is_valid_email(value)).then(|| rules::MSG_INVALID_EMAIL.to_string()),
            FieldId::TelefonoPrincipal | FieldId::TelefonoSecundario => {
                (!is_valid_phone(value)).then(|| rules::MSG_INVALID_PHONE.to_string())
            }
            FieldId::Password => self
                .profile
                .password
                .validate(value)
                .err()
                .map(str::to_string),
            FieldId::ConfirmPassword => {
                (value != self.value(FieldId::Password)).then(|| MSG_PASSWORD_MISMATCH.to_string())
            }
            FieldId::FechaNacimiento => match parse_date(value) {
                None => Some(MSG_INVALID_DATE.to_string()),
                Some(birth) => {
                    let today = chrono::Local::now().date_naive();
                    (age_on(birth, today) < rules::MIN_DRIVER_AGE)
                        .then(|| rules::MSG_UNDER_AGE.to_string())
                }
            },
            FieldId::LicenciaExpedicion | FieldId::LicenciaVencimiento => {
                parse_date(value).is_none().then(|| MSG_INVALID_DATE.to_string())
            }
            FieldId::NumeroCuenta => {
                (!is_numeric(value)).then(|| MSG_ACCOUNT_NOT_NUMERIC.to_string())
            }
            FieldId::ConfirmarNumeroCuenta => (value != self.value(FieldId::NumeroCuenta))
                .then(|| MSG_ACCOUNT_MISMATCH.to_string()),
            FieldId::Placa => self.profile.plate.validate(value).err().map(str::to_string),
            FieldId::Anio => {
                let today = chrono::Local::now().date_naive();
                check_vehicle_year(value, today).err().map(str::to_string)
            }
            _ => None,
        }
    }

    /// Required sweep over one tab: non-empty after trim.
    ///
    /// Annotates each failing field and returns whether the tab passed.
    pub fn validate_tab(&mut self, tab: WizardTab) -> bool {
        if tab == WizardTab::Documents {
            return self.validate_documents();
        }
        let mut valid = true;
        for field in FieldId::in_tab(tab) {
            if field.required() && self.value(field).trim().is_empty() {
                self.errors.insert(field, MSG_REQUIRED_FIELD.to_string());
                valid = false;
            } else if self.error(field) == Some(MSG_REQUIRED_FIELD) {
                self.errors.remove(&field);
            }
        }
        valid
    }

    fn validate_documents(&mut self) -> bool {
        let mut valid = true;
        for kind in DocumentKind::all() {
            if kind.required() && !self.documents.contains_key(kind) {
                self.document_errors
                    .insert(*kind, MSG_REQUIRED_FIELD.to_string());
                valid = false;
            }
        }
        valid
    }

    /// Move to the next tab if the current one validates.
    ///
    /// Blocked (and `false`) otherwise; the failing fields stay annotated
    /// so the caller can surface [`MSG_TAB_INCOMPLETE`].
    pub fn advance(&mut self) -> bool {
        if !self.validate_tab(self.current_tab) {
            return false;
        }
        if let Some(next) = self.current_tab.next() {
            self.current_tab = next;
            self.focus = 0;
            return true;
        }
        false
    }

    /// Move to the previous tab. Always permitted when not on the first.
    pub fn go_back(&mut self) -> bool {
        if let Some(previous) = self.current_tab.previous() {
            self.current_tab = previous;
            self.focus = 0;
            return true;
        }
        false
    }

    /// Jump straight to a tab without validating.
    ///
    /// Deliberate escape hatch so any tab can be inspected; the full-form
    /// validation before submit closes the gap.
    pub fn jump_to(&mut self, tab: WizardTab) {
        self.current_tab = tab;
        self.focus = 0;
    }

    /// Whether the Submit control replaces Next.
    pub fn is_final_tab(&self) -> bool {
        self.current_tab.next().is_none()
    }

    /// Whether Back is available.
    pub fn can_go_back(&self) -> bool {
        self.current_tab.previous().is_some()
    }

    /// The document slot currently focused on the Documents tab.
    pub fn focused_document(&self) -> Option<DocumentKind> {
        if self.current_tab == WizardTab::Documents {
            DocumentKind::all().get(self.focus).copied()
        } else {
            None
        }
    }

    /// Attach the typed path to the focused document slot.
    pub fn attach_focused_document(&mut self) -> Result<(), String> {
        let Some(kind) = self.focused_document() else {
            return Ok(());
        };
        let path = PathBuf::from(self.document_input.trim());
        self.attach_document(kind, &path)?;
        self.document_input.clear();
        Ok(())
    }

    /// Attach a document after checking existence and the 5 MiB cap.
    pub fn attach_document(&mut self, kind: DocumentKind, path: &Path) -> Result<(), String> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => {
                let message = format!("No se encontró el archivo: {}", path.display());
                self.document_errors.insert(kind, message.clone());
                return Err(message);
            }
        };
        if !metadata.is_file() {
            let message = format!("No es un archivo: {}", path.display());
            self.document_errors.insert(kind, message.clone());
            return Err(message);
        }
        if metadata.len() > MAX_UPLOAD_BYTES {
            // Oversized selections are dropped, matching the form behavior
            self.documents.remove(&kind);
            self.document_errors
                .insert(kind, rules::MSG_FILE_TOO_LARGE.to_string());
            return Err(rules::MSG_FILE_TOO_LARGE.to_string());
        }
        self.documents.insert(kind, path.to_path_buf());
        self.document_errors.remove(&kind);
        Ok(())
    }

    /// Full-form validation before submission.
    ///
    /// The required sweep aggregates every failure; the cross-field
    /// business rules then run in order and return on the first failure.
    pub fn validate_all(&mut self, today: NaiveDate) -> Result<(), String> {
        // Required sweep across every tab, no short-circuit
        let mut missing: Vec<&'static str> = Vec::new();
        for field in FieldId::all() {
            if field.required() && self.value(*field).trim().is_empty() {
                self.errors.insert(*field, MSG_REQUIRED_FIELD.to_string());
                missing.push(field.label());
            }
        }
        for kind in DocumentKind::all() {
            if kind.required() && !self.documents.contains_key(kind) {
                self.document_errors
                    .insert(*kind, MSG_REQUIRED_FIELD.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(format!("{}: {}", MSG_MISSING_FIELDS, missing.join(", ")));
        }

        // Cross-field business rules, first failure wins
        if self.value(FieldId::Password) != self.value(FieldId::ConfirmPassword) {
            self.errors
                .insert(FieldId::ConfirmPassword, MSG_PASSWORD_MISMATCH.to_string());
            return Err(MSG_PASSWORD_MISMATCH.to_string());
        }
        if let Err(message) = self.profile.password.validate(self.value(FieldId::Password)) {
            self.errors.insert(FieldId::Password, message.to_string());
            return Err(message.to_string());
        }
        if self.value(FieldId::NumeroCuenta).trim()
            != self.value(FieldId::ConfirmarNumeroCuenta).trim()
        {
            self.errors.insert(
                FieldId::ConfirmarNumeroCuenta,
                MSG_ACCOUNT_MISMATCH.to_string(),
            );
            return Err(MSG_ACCOUNT_MISMATCH.to_string());
        }
        if !is_numeric(self.value(FieldId::NumeroCuenta).trim()) {
            self.errors
                .insert(FieldId::NumeroCuenta, MSG_ACCOUNT_NOT_NUMERIC.to_string());
            return Err(MSG_ACCOUNT_NOT_NUMERIC.to_string());
        }

        let birth = parse_date(self.value(FieldId::FechaNacimiento))
            .ok_or_else(|| MSG_INVALID_DATE.to_string())?;
        if age_on(birth, today) < rules::MIN_DRIVER_AGE {
            self.errors
                .insert(FieldId::FechaNacimiento, rules::MSG_UNDER_AGE.to_string());
            return Err(rules::MSG_UNDER_AGE.to_string());
        }

        let plate = self.value(FieldId::Placa).trim().to_uppercase();
        if let Err(message) = self.profile.plate.validate(&plate) {
            self.errors.insert(FieldId::Placa, message.to_string());
            return Err(message.to_string());
        }

        let issue = parse_date(self.value(FieldId::LicenciaExpedicion))
            .ok_or_else(|| MSG_INVALID_DATE.to_string())?;
        let expiry = parse_date(self.value(FieldId::LicenciaVencimiento))
            .ok_or_else(|| MSG_INVALID_DATE.to_string())?;
        if let Err(message) = check_license_dates(issue, expiry, today) {
            self.errors
                .insert(FieldId::LicenciaVencimiento, message.to_string());
            return Err(message.to_string());
        }

        if let Err(message) = check_vehicle_year(self.value(FieldId::Anio), today) {
            self.errors.insert(FieldId::Anio, message.to_string());
            return Err(message.to_string());
        }

        if !self.missing_documents().is_empty() {
            return Err(MSG_MISSING_FILES.to_string());
        }

        Ok(())
    }

    fn missing_documents(&self) -> Vec<DocumentKind> {
        DocumentKind::all()
            .iter()
            .filter(|kind| kind.required() && !self.documents.contains_key(kind))
            .copied()
            .collect()
    }

    /// Build the multipart payload from the current state.
    pub fn build_registration(&self) -> DriverRegistration {
        let trimmed = |id: FieldId| self.value(id).trim().to_string();
        DriverRegistration {
            primer_nombre: trimmed(FieldId::PrimerNombre),
            segundo_nombre: trimmed(FieldId::SegundoNombre),
            primer_apellido: trimmed(FieldId::PrimerApellido),
            segundo_apellido: trimmed(FieldId::SegundoApellido),
            tipo_documento: trimmed(FieldId::TipoDocumento),
            numero_documento: trimmed(FieldId::NumeroDocumento),
            fecha_nacimiento: trimmed(FieldId::FechaNacimiento),
            correo: self.value(FieldId::Correo).trim().to_lowercase(),
            telefono_principal: trimmed(FieldId::TelefonoPrincipal),
            telefono_secundario: trimmed(FieldId::TelefonoSecundario),
            direccion: trimmed(FieldId::Direccion),
            ciudad: trimmed(FieldId::Ciudad),
            password: self.value(FieldId::Password).to_string(),
            confirm_password: self.value(FieldId::ConfirmPassword).to_string(),
            numero_licencia: trimmed(FieldId::NumeroLicencia),
            licencia_expedicion: trimmed(FieldId::LicenciaExpedicion),
            licencia_vencimiento: trimmed(FieldId::LicenciaVencimiento),
            tipo_cuenta: trimmed(FieldId::TipoCuenta),
            banco: trimmed(FieldId::Banco),
            numero_cuenta: trimmed(FieldId::NumeroCuenta),
            confirmar_numero_cuenta: trimmed(FieldId::ConfirmarNumeroCuenta),
            placa: self.value(FieldId::Placa).trim().to_uppercase(),
            marca: self.value(FieldId::Marca).trim().to_uppercase(),
            modelo: trimmed(FieldId::Modelo),
            anio: trimmed(FieldId::Anio),
            color: trimmed(FieldId::Color),
            tipo_vehiculo: trimmed(FieldId::TipoVehiculo),
            num_pasajeros: trimmed(FieldId::NumPasajeros),
            documents: {
                let mut docs: Vec<_> = self
                    .documents
                    .iter()
                    .map(|(kind, path)| (*kind, path.clone()))
                    .collect();
                docs.sort_by_key(|(kind, _)| kind.field_name());
                docs
            },
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

    /// Record a successful submission: clear markers and schedule the
    /// single navigation to login.
    pub fn record_success(&mut self, now: Instant) {
        self.errors.clear();
        self.document_errors.clear();
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

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_personal_tab(state: &mut WizardState) {
        state.set_value(FieldId::PrimerNombre, "Carlos".into());
        state.set_value(FieldId::PrimerApellido, "Mendoza".into());
        state.set_value(FieldId::TipoDocumento, "CC".into());
        state.set_value(FieldId::NumeroDocumento, "1094000222".into());
        state.set_value(FieldId::FechaNacimiento, "1995-04-12".into());
        state.set_value(FieldId::Correo, "carlos@evory.com".into());
        state.set_value(FieldId::TelefonoPrincipal, "3001234567".into());
        state.set_value(FieldId::Direccion, "Calle 10 # 4-21".into());
        state.set_value(FieldId::Ciudad, "Armenia".into());
        state.set_value(FieldId::Password, "Abcdefg1!".into());
        state.set_value(FieldId::ConfirmPassword, "Abcdefg1!".into());
    }

    #[test]
    fn test_next_blocked_on_empty_required_field() {
        let mut state = WizardState::new();
        assert!(!state.advance());
        assert_eq!(state.current_tab, WizardTab::Personal);
        assert_eq!(
            state.error(FieldId::PrimerNombre),
            Some(MSG_REQUIRED_FIELD)
        );
    }

    #[test]
    fn test_next_advances_once_tab_is_filled() {
        let mut state = WizardState::new();
        assert!(!state.advance());

        filled_personal_tab(&mut state);
        assert!(state.advance());
        assert_eq!(state.current_tab, WizardTab::License);
        assert_eq!(state.error(FieldId::PrimerNombre), None);
    }

    #[test]
    fn test_previous_always_allowed_and_jump_bypasses_validation() {
        let mut state = WizardState::new();
        state.jump_to(WizardTab::Vehicle);
        assert_eq!(state.current_tab, WizardTab::Vehicle);

        assert!(state.go_back());
        assert_eq!(state.current_tab, WizardTab::BankAccount);

        state.jump_to(WizardTab::Personal);
        assert!(!state.go_back());
    }

    #[test]
    fn test_final_tab_swaps_submit_control() {
        let mut state = WizardState::new();
        assert!(!state.is_final_tab());
        state.jump_to(WizardTab::Documents);
        assert!(state.is_final_tab());
    }

    #[test]
    fn test_plate_input_is_uppercased() {
        let mut state = WizardState::new();
        state.jump_to(WizardTab::Vehicle);
        for c in "abc123".chars() {
            state.input_char(FieldId::Placa, c);
        }
        assert_eq!(state.value(FieldId::Placa), "ABC123");
    }

    #[test]
    fn test_live_validation_marks_and_clears() {
        let mut state = WizardState::new();
        state.set_value(FieldId::TelefonoPrincipal, "300123".into());
        assert_eq!(
            state.error(FieldId::TelefonoPrincipal),
            Some(rules::MSG_INVALID_PHONE)
        );
        state.set_value(FieldId::TelefonoPrincipal, "3001234567".into());
        assert_eq!(state.error(FieldId::TelefonoPrincipal), None);
    }

    #[test]
    fn test_validate_all_aggregates_missing_labels() {
        let mut state = WizardState::new();
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let err = state.validate_all(today).unwrap_err();
        assert!(err.starts_with(MSG_MISSING_FIELDS));
        assert!(err.contains("Primer nombre"));
        assert!(err.contains("Placa"));
        // optional fields are not listed
        assert!(!err.contains("Segundo nombre"));
    }

    #[test]
    fn test_validate_all_business_rules_short_circuit_in_order() {
        let mut state = WizardState::new();
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

        filled_personal_tab(&mut state);
        state.set_value(FieldId::NumeroLicencia, "LIC-998".into());
        state.set_value(FieldId::LicenciaExpedicion, "2022-01-10".into());
        state.set_value(FieldId::LicenciaVencimiento, "2028-01-10".into());
        state.set_value(FieldId::TipoCuenta, "Ahorros".into());
        state.set_value(FieldId::Banco, "Bancolombia".into());
        state.set_value(FieldId::NumeroCuenta, "123456789".into());
        state.set_value(FieldId::ConfirmarNumeroCuenta, "123456789".into());
        state.set_value(FieldId::Placa, "ABC123".into());
        state.set_value(FieldId::Marca, "Renault".into());
        state.set_value(FieldId::Modelo, "Logan".into());
        state.set_value(FieldId::Anio, "2020".into());
        state.set_value(FieldId::Color, "Gris".into());
        state.set_value(FieldId::TipoVehiculo, "Sedán".into());
        state.set_value(FieldId::NumPasajeros, "4".into());

        // password mismatch reported before the account mismatch
        state.set_value(FieldId::ConfirmPassword, "Otra1234!".into());
        state.set_value(FieldId::ConfirmarNumeroCuenta, "999".into());
        assert_eq!(
            state.validate_all(today).unwrap_err(),
            MSG_PASSWORD_MISMATCH
        );

        state.set_value(FieldId::ConfirmPassword, "Abcdefg1!".into());
        assert_eq!(
            state.validate_all(today).unwrap_err(),
            MSG_ACCOUNT_MISMATCH
        );

        state.set_value(FieldId::ConfirmarNumeroCuenta, "123456789".into());
        // all scalars valid now; only the documents are missing
        assert_eq!(state.validate_all(today).unwrap_err(), MSG_MISSING_FILES);
    }

    #[test]
    fn test_under_age_driver_rejected() {
        let mut state = WizardState::new();
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        filled_personal_tab(&mut state);
        // 21 years minus one day
        state.set_value(FieldId::FechaNacimiento, "2005-08-08".into());
        state.set_value(FieldId::NumeroLicencia, "LIC-1".into());
        state.set_value(FieldId::LicenciaExpedicion, "2022-01-10".into());
        state.set_value(FieldId::LicenciaVencimiento, "2028-01-10".into());
        state.set_value(FieldId::TipoCuenta, "Ahorros".into());
        state.set_value(FieldId::Banco, "Davivienda".into());
        state.set_value(FieldId::NumeroCuenta, "42".into());
        state.set_value(FieldId::ConfirmarNumeroCuenta, "42".into());
        state.set_value(FieldId::Placa, "XYZ987".into());
        state.set_value(FieldId::Marca, "Kia".into());
        state.set_value(FieldId::Modelo, "Picanto".into());
        state.set_value(FieldId::Anio, "2021".into());
        state.set_value(FieldId::Color, "Rojo".into());
        state.set_value(FieldId::TipoVehiculo, "Hatchback".into());
        state.set_value(FieldId::NumPasajeros, "4".into());

        assert_eq!(
            state.validate_all(today).unwrap_err(),
            rules::MSG_UNDER_AGE
        );
    }

    #[test]
    fn test_attach_document_rejects_oversized_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soat.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 1024]).unwrap();

        let mut state = WizardState::new();
        assert!(state
            .attach_document(DocumentKind::DocumentoSoat, &path)
            .is_ok());
        assert!(state.documents.contains_key(&DocumentKind::DocumentoSoat));

        let missing = dir.path().join("nope.pdf");
        assert!(state
            .attach_document(DocumentKind::FotoLicencia, &missing)
            .is_err());
    }

    #[test]
    fn test_redirect_fires_exactly_once() {
        let mut state = WizardState::new();
        let now = Instant::now();
        state.record_success(now);

        assert!(!state.take_due_redirect(now));
        let later = now + REDIRECT_DELAY;
        assert!(state.take_due_redirect(later));
        assert!(!state.take_due_redirect(later));
    }
}
