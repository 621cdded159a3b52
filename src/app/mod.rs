// ABOUTME: Application orchestration: owns the state and the backend
// client, drains pending async actions from the tick loop

#![allow(dead_code)]

pub mod events;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use state::{AppState, AsyncAction, View};

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::api::{ApiError, PortalBackend, PortalClient, ReportRequest};
use crate::config::AppConfig;

/// The application: UI state plus the backend it talks to.
pub struct App {
    /// All mutable UI state.
    pub state: AppState,
    backend: Arc<dyn PortalBackend>,
}

impl App {
    /// Build the app against the real backend from config.
    pub fn new(config: AppConfig) -> Result<Self> {
        let backend = PortalClient::new(&config.backend)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Build the app against any backend implementation (used by tests).
    pub fn with_backend(config: AppConfig, backend: Arc<dyn PortalBackend>) -> Self {
        Self {
            state: AppState::new(config),
            backend,
        }
    }

    /// Initial data load: open the dashboard on the first known company.
    pub async fn init(&mut self) {
        match self.backend.list_companies().await {
            Ok(companies) => {
                if let Some(first) = companies.first() {
                    self.state.dashboard.load_company(first.id);
                    self.state.pending_async_action =
                        Some(AsyncAction::LoadCompanyDetail(first.id));
                }
                self.state.client_form.set_companies(companies);
            }
            Err(e) => {
                warn!("Initial company load failed: {}", e);
                self.state.client_form.companies_failed = true;
                self.state.notify_error(e.user_message());
            }
        }
    }

    /// One scheduler slot: fire due lookups, drain the pending action,
    /// expire the notification and take due redirects.
    pub async fn tick(&mut self) -> Result<()> {
        let now = Instant::now();

        if let Some(query) = self.state.dashboard.search.poll_query(now) {
            self.run_search(query).await;
        }

        if let Some(action) = self.state.pending_async_action.take() {
            self.process_async_action(action).await;
            self.state.ui_needs_refresh = true;
        }

        self.state.expire_notification(now);
        self.state.take_due_redirects(now);
        Ok(())
    }

    /// Whether the UI should redraw before the next slot.
    pub fn needs_ui_refresh(&mut self) -> bool {
        let needed = self.state.ui_needs_refresh;
        self.state.ui_needs_refresh = false;
        needed
    }

    async fn run_search(&mut self, query: String) {
        self.state.dashboard.search.searching = true;
        match self.backend.search_companies(&query).await {
            Ok(results) => {
                self.state.dashboard.search.set_results(results);
            }
            Err(e) => {
                // Search failures are quiet, matching the page behavior
                warn!("Company search failed: {}", e);
                self.state.dashboard.search.searching = false;
            }
        }
        self.state.ui_needs_refresh = true;
    }

    async fn process_async_action(&mut self, action: AsyncAction) {
        match action {
            AsyncAction::LoadCompanies => {
                match self.backend.list_companies().await {
                    Ok(companies) => self.state.client_form.set_companies(companies),
                    Err(e) => {
                        self.state.client_form.companies_failed = true;
                        self.state
                            .notify_error("No se pudieron cargar las compañías".to_string());
                        warn!("Company list load failed: {}", e);
                    }
                }
            }

            AsyncAction::LoadCompanyDetail(company_id) => {
                match self.backend.company_detail(company_id).await {
                    Ok(detail) => {
                        self.state.dashboard.set_detail(detail);
                        // Clients load next, as the page does after the detail call
                        self.load_clients(company_id).await;
                    }
                    Err(e) => {
                        error!("Company detail load failed: {}", e);
                        self.state
                            .notify_error("Error al cargar los datos de la compañía".to_string());
                    }
                }
            }

            AsyncAction::LoadCompanyClients(company_id) => {
                self.load_clients(company_id).await;
            }

            AsyncAction::ToggleClientStatus { client_id, activo } => {
                match self.backend.toggle_client_status(client_id, activo).await {
                    Ok(message) => {
                        self.state.notify_success(message);
                        if let Some(company_id) = self.state.dashboard.company_id {
                            self.load_clients(company_id).await;
                        }
                    }
                    Err(e) => self.state.notify_error(e.user_message()),
                }
            }

            AsyncAction::SubmitClientRegistration => self.submit_client_registration().await,

            AsyncAction::SubmitDriverRegistration => self.submit_driver_registration().await,

            AsyncAction::ExportReport => self.export_report().await,
        }
    }

    async fn load_clients(&mut self, company_id: i64) {
        self.state.dashboard.clients_loading = true;
        match self.backend.company_clients(company_id).await {
            Ok((count, clients)) => self.state.dashboard.set_clients(count, clients),
            Err(e) => {
                self.state.dashboard.clients_loading = false;
                self.state
                    .notify_error(error_or(&e, "Error al cargar clientes"));
            }
        }
    }

    /// Submission orchestration for the client form: validate, guard,
    /// send, surface the outcome, always release the guard.
    async fn submit_client_registration(&mut self) {
        if self.state.client_form.submitting {
            return;
        }
        if let Err(message) = self.state.client_form.validate_all() {
            // No network call on validation failure
            self.state.notify_error(message);
            return;
        }

        self.state.client_form.submitting = true;
        let registration = self.state.client_form.build_registration();
        info!("Submitting client registration");

        match self.backend.register_client(&registration).await {
            Ok(message) => {
                self.state.notify_success(message);
                self.state.client_form.record_success(Instant::now());
            }
            Err(e) => {
                // Form state stays intact for correction
                self.state.notify_error(e.user_message());
            }
        }

        // Guaranteed cleanup: re-enable the control on every exit path
        self.state.client_form.submitting = false;
    }

    /// Submission orchestration for the driver wizard.
    async fn submit_driver_registration(&mut self) {
        if self.state.wizard.submitting {
            return;
        }
        let today = chrono::Local::now().date_naive();
        if let Err(message) = self.state.wizard.validate_all(today) {
            self.state.notify_error(message);
            return;
        }

        self.state.wizard.submitting = true;
        let registration = self.state.wizard.build_registration();
        info!("Submitting driver registration");

        match self.backend.register_driver(&registration).await {
            Ok(message) => {
                self.state.notify_success(message);
                self.state.wizard.record_success(Instant::now());
            }
            Err(e) => {
                self.state.notify_error(e.user_message());
            }
        }

        self.state.wizard.submitting = false;
    }

    async fn export_report(&mut self) {
        let Some(company_id) = self.state.dashboard.company_id else {
            return;
        };
        let Some(kind) = self.state.dashboard.report.kind else {
            return;
        };
        if !self.state.dashboard.report.is_ready() {
            return;
        }

        let request = ReportRequest {
            company_id,
            fecha_inicio: self.state.dashboard.report.fecha_inicio.trim().to_string(),
            fecha_fin: self.state.dashboard.report.fecha_fin.trim().to_string(),
            export: true,
        };

        self.state.dashboard.report.exporting = true;
        self.state
            .notify_info("Generando archivo Excel...".to_string());

        let dest_dir = self.state.config.reports.download_dir.clone();
        match self.backend.export_report(kind, &request, &dest_dir).await {
            Ok(path) => {
                self.state.notify_success(format!(
                    "Archivo Excel descargado exitosamente: {}",
                    path.display()
                ));
            }
            Err(e) => {
                self.state
                    .notify_error(error_or(&e, "Error al generar el archivo Excel"));
            }
        }

        self.state.dashboard.report.exporting = false;
    }
}

/// Backend message for rejections, a context-specific fallback otherwise.
fn error_or(error: &ApiError, fallback: &str) -> String {
    if error.is_rejection() {
        error.user_message()
    } else {
        fallback.to_string()
    }
}
