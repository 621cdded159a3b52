// ABOUTME: Submission orchestration tests against a mocked backend
// Covers the success/rejection/transport outcomes, the busy-guard
// release and the single scheduled redirect

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;

use evory_admin::api::{
    ApiError, ClientSummary, CompanyDetail, CompanyRef, CompanySearchResult, PortalBackend,
    ReportKind, ReportRequest,
};
use evory_admin::app::state::{AsyncAction, NotificationType, View};
use evory_admin::app::App;
use evory_admin::components::client_registration::ClientField;
use evory_admin::components::driver_wizard::state::FieldId;
use evory_admin::components::REDIRECT_DELAY;
use evory_admin::config::AppConfig;
use evory_admin::models::{ClientRegistration, DocumentKind, DriverRegistration};

mock! {
    pub Backend {}

    #[async_trait]
    impl PortalBackend for Backend {
        async fn list_companies(&self) -> Result<Vec<CompanyRef>, ApiError>;
        async fn search_companies(&self, query: &str) -> Result<Vec<CompanySearchResult>, ApiError>;
        async fn company_detail(&self, company_id: i64) -> Result<CompanyDetail, ApiError>;
        async fn company_clients(&self, company_id: i64) -> Result<(u64, Vec<ClientSummary>), ApiError>;
        async fn toggle_client_status(&self, client_id: i64, activo: bool) -> Result<String, ApiError>;
        async fn register_client(&self, registration: &ClientRegistration) -> Result<String, ApiError>;
        async fn register_driver(&self, registration: &DriverRegistration) -> Result<String, ApiError>;
        async fn export_report(
            &self,
            kind: ReportKind,
            request: &ReportRequest,
            dest_dir: &Path,
        ) -> Result<PathBuf, ApiError>;
    }
}

fn app_with(backend: MockBackend) -> App {
    App::with_backend(AppConfig::default(), Arc::new(backend))
}

fn fill_client_form(app: &mut App) {
    let form = &mut app.state.client_form;
    form.set_companies(vec![CompanyRef {
        id: 3,
        nombre: "Transportes Andinos".into(),
    }]);
    form.selected_company = Some(0);
    form.set_value(ClientField::PrimerNombre, "Laura".into());
    form.set_value(ClientField::PrimerApellido, "Gómez".into());
    form.set_value(ClientField::TipoDocumento, "CC".into());
    form.set_value(ClientField::NumeroDocumento, "1094000111".into());
    form.set_value(ClientField::Correo, "laura@evory.com".into());
    form.set_value(ClientField::Telefono, "3001234567".into());
    form.set_value(ClientField::Password, "Abcdefg1".into());
    form.set_value(ClientField::ConfirmPassword, "Abcdefg1".into());
}

#[tokio::test]
async fn backend_rejection_surfaces_message_verbatim_and_re_enables_submit() {
    let mut backend = MockBackend::new();
    backend
        .expect_register_client()
        .times(1)
        .returning(|_| Err(ApiError::Rejected { message: "X".into() }));

    let mut app = app_with(backend);
    app.state.current_view = View::ClientRegistration;
    fill_client_form(&mut app);

    app.state.pending_async_action = Some(AsyncAction::SubmitClientRegistration);
    app.tick().await.unwrap();

    let notification = app.state.notification.as_ref().unwrap();
    assert_eq!(notification.message, "X");
    assert_eq!(notification.notification_type, NotificationType::Error);
    assert!(!app.state.client_form.submitting);
    // no redirect on failure
    assert!(app.state.client_form.redirect_at.is_none());
    assert_eq!(app.state.current_view, View::ClientRegistration);
    // form state preserved for correction
    assert_eq!(app.state.client_form.value(ClientField::PrimerNombre), "Laura");
}

#[tokio::test]
async fn successful_submission_shows_message_and_redirects_exactly_once() {
    let mut backend = MockBackend::new();
    backend
        .expect_register_client()
        .times(1)
        .returning(|_| Ok("OK".to_string()));

    let mut app = app_with(backend);
    app.state.current_view = View::ClientRegistration;
    fill_client_form(&mut app);

    app.state.pending_async_action = Some(AsyncAction::SubmitClientRegistration);
    app.tick().await.unwrap();

    let notification = app.state.notification.as_ref().unwrap();
    assert_eq!(notification.message, "OK");
    assert_eq!(notification.notification_type, NotificationType::Success);
    assert!(!app.state.client_form.submitting);

    // navigation happens once the fixed delay elapses, and only once
    let scheduled = app.state.client_form.redirect_at.unwrap();
    assert_eq!(app.state.current_view, View::ClientRegistration);
    app.state.take_due_redirects(scheduled);
    assert_eq!(app.state.current_view, View::Login);

    app.state.current_view = View::Dashboard;
    app.state.take_due_redirects(scheduled + REDIRECT_DELAY);
    assert_eq!(app.state.current_view, View::Dashboard);
}

#[tokio::test]
async fn validation_failure_aborts_without_network_call() {
    // No expectation on register_client: any call would panic
    let backend = MockBackend::new();
    let mut app = app_with(backend);
    app.state.current_view = View::ClientRegistration;

    app.state.pending_async_action = Some(AsyncAction::SubmitClientRegistration);
    app.tick().await.unwrap();

    let notification = app.state.notification.as_ref().unwrap();
    assert!(notification
        .message
        .starts_with("Error: faltan campos obligatorios"));
    assert!(!app.state.client_form.submitting);
}

#[tokio::test]
async fn transport_failure_gets_generic_message_and_preserves_form() {
    let mut backend = MockBackend::new();
    backend
        .expect_register_client()
        .times(1)
        .returning(|_| Err(ApiError::InvalidResponse));

    let mut app = app_with(backend);
    app.state.current_view = View::ClientRegistration;
    fill_client_form(&mut app);

    app.state.pending_async_action = Some(AsyncAction::SubmitClientRegistration);
    app.tick().await.unwrap();

    assert_eq!(
        app.state.notification.as_ref().unwrap().message,
        "Error de conexión. Por favor intente nuevamente."
    );
    assert!(!app.state.client_form.submitting);
    assert!(app.state.client_form.redirect_at.is_none());
}

fn fill_driver_wizard(app: &mut App, docs_dir: &Path) {
    let wizard = &mut app.state.wizard;
    wizard.set_value(FieldId::PrimerNombre, "Carlos".into());
    wizard.set_value(FieldId::PrimerApellido, "Mendoza".into());
    wizard.set_value(FieldId::TipoDocumento, "CC".into());
    wizard.set_value(FieldId::NumeroDocumento, "1094000222".into());
    wizard.set_value(FieldId::FechaNacimiento, "1995-04-12".into());
    wizard.set_value(FieldId::Correo, "carlos@evory.com".into());
    wizard.set_value(FieldId::TelefonoPrincipal, "3001234567".into());
    wizard.set_value(FieldId::Direccion, "Calle 10 # 4-21".into());
    wizard.set_value(FieldId::Ciudad, "Armenia".into());
    wizard.set_value(FieldId::Password, "Abcdefg1!".into());
    wizard.set_value(FieldId::ConfirmPassword, "Abcdefg1!".into());
    wizard.set_value(FieldId::NumeroLicencia, "LIC-998".into());
    wizard.set_value(FieldId::LicenciaExpedicion, "2022-01-10".into());
    wizard.set_value(FieldId::LicenciaVencimiento, "2030-01-10".into());
    wizard.set_value(FieldId::TipoCuenta, "Ahorros".into());
    wizard.set_value(FieldId::Banco, "Bancolombia".into());
    wizard.set_value(FieldId::NumeroCuenta, "123456789".into());
    wizard.set_value(FieldId::ConfirmarNumeroCuenta, "123456789".into());
    wizard.set_value(FieldId::Placa, "ABC123".into());
    wizard.set_value(FieldId::Marca, "Renault".into());
    wizard.set_value(FieldId::Modelo, "Logan".into());
    wizard.set_value(FieldId::Anio, "2020".into());
    wizard.set_value(FieldId::Color, "Gris".into());
    wizard.set_value(FieldId::TipoVehiculo, "Sedán".into());
    wizard.set_value(FieldId::NumPasajeros, "4".into());

    for kind in DocumentKind::all() {
        if kind.required() {
            let path = docs_dir.join(format!("{}.jpg", kind.field_name()));
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(b"stub").unwrap();
            wizard.attach_document(*kind, &path).unwrap();
        }
    }
}

#[tokio::test]
async fn driver_submission_sends_all_fields_and_documents() {
    let docs_dir = tempfile::tempdir().unwrap();

    let mut backend = MockBackend::new();
    backend
        .expect_register_driver()
        .times(1)
        .withf(|reg| {
            reg.placa == "ABC123"
                && reg.correo == "carlos@evory.com"
                && reg.documents.len() == 10
        })
        .returning(|_| {
            Ok("El registro del conductor fue exitoso. Estado: Pendiente de Verificación"
                .to_string())
        });

    let mut app = app_with(backend);
    app.state.current_view = View::DriverRegistration;
    fill_driver_wizard(&mut app, docs_dir.path());

    app.state.pending_async_action = Some(AsyncAction::SubmitDriverRegistration);
    app.tick().await.unwrap();

    let notification = app.state.notification.as_ref().unwrap();
    assert_eq!(notification.notification_type, NotificationType::Success);
    assert!(notification.message.contains("Pendiente de Verificación"));
    assert!(!app.state.wizard.submitting);
    assert!(app.state.wizard.redirect_at.is_some());
}

#[tokio::test]
async fn driver_submission_blocked_by_missing_documents() {
    // Backend must never be called
    let backend = MockBackend::new();
    let docs_dir = tempfile::tempdir().unwrap();

    let mut app = app_with(backend);
    app.state.current_view = View::DriverRegistration;
    fill_driver_wizard(&mut app, docs_dir.path());
    app.state.wizard.documents.remove(&DocumentKind::DocumentoSoat);

    app.state.pending_async_action = Some(AsyncAction::SubmitDriverRegistration);
    app.tick().await.unwrap();

    assert_eq!(
        app.state.notification.as_ref().unwrap().message,
        "Faltan archivos obligatorios"
    );
}

#[tokio::test]
async fn toggle_client_status_reloads_list_with_backend_message() {
    let mut backend = MockBackend::new();
    backend
        .expect_toggle_client_status()
        .with(eq(42), eq(false))
        .times(1)
        .returning(|_, _| Ok("Cliente desactivado correctamente".to_string()));
    backend
        .expect_company_clients()
        .with(eq(7))
        .times(1)
        .returning(|_| {
            Ok((
                1,
                vec![ClientSummary {
                    id: 42,
                    nombre_completo: "Laura Gómez".into(),
                    cargo: None,
                    numero_documento: "1094000111".into(),
                    email: "laura@evory.com".into(),
                    telefono: "3001234567".into(),
                    total_viajes: 12,
                    calificacion_promedio: 4.5,
                    ultimo_viaje: None,
                    activo: false,
                    fecha_registro: "2025-01-01".into(),
                }],
            ))
        });

    let mut app = app_with(backend);
    app.state.dashboard.load_company(7);

    app.state.pending_async_action = Some(AsyncAction::ToggleClientStatus {
        client_id: 42,
        activo: false,
    });
    app.tick().await.unwrap();

    assert_eq!(
        app.state.notification.as_ref().unwrap().message,
        "Cliente desactivado correctamente"
    );
    assert_eq!(app.state.dashboard.clients.len(), 1);
    assert!(!app.state.dashboard.clients[0].activo);
}

#[tokio::test]
async fn debounced_search_issues_exactly_one_lookup_for_final_value() {
    let mut backend = MockBackend::new();
    backend
        .expect_search_companies()
        .withf(|query| query == "and")
        .times(1)
        .returning(|_| {
            Ok(vec![CompanySearchResult {
                id: 1,
                nombre: "Transportes Andinos".into(),
                razon_social: None,
                nit: "900100200".into(),
                estado_cuenta: "Activa".into(),
            }])
        });

    let mut app = app_with(backend);
    let now = Instant::now();
    app.state.dashboard.search.input_char('a', now);
    app.state.dashboard.search.input_char('n', now);
    app.state.dashboard.search.input_char('d', now);

    // Before the quiet period: no lookup
    app.tick().await.unwrap();
    assert!(app.state.dashboard.search.results.is_empty());

    tokio::time::sleep(std::time::Duration::from_millis(350)).await;
    app.tick().await.unwrap();

    assert_eq!(app.state.dashboard.search.results.len(), 1);
    assert!(app.state.dashboard.search.open);

    // Further ticks do not re-issue the lookup
    app.tick().await.unwrap();
}
