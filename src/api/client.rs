// ABOUTME: reqwest client for the Evory Drive backend API
// One method per documented endpoint; JSON envelopes for data calls,
// multipart for the driver registration, a streamed download for reports

use crate::api::error::ApiError;
use crate::api::types::{
    ApiEnvelope, ClientSummary, CompanyDetail, CompanyRef, CompanySearchResult, ReportKind,
    ReportRequest,
};
use crate::config::BackendConfig;
use crate::models::{ClientRegistration, DriverRegistration};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Backend operations the UI and CLI depend on.
///
/// `PortalClient` is the production implementation; tests mock this trait
/// to drive the submission and dashboard flows without a server.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// `GET /api/companias/`: active companies for the form selector.
    async fn list_companies(&self) -> Result<Vec<CompanyRef>, ApiError>;

    /// `GET /api/companias/buscar/?q=`: search by name, NIT or razón social.
    async fn search_companies(&self, query: &str) -> Result<Vec<CompanySearchResult>, ApiError>;

    /// `GET /api/companias/{id}/detalle/`: company record with metrics.
    async fn company_detail(&self, company_id: i64) -> Result<CompanyDetail, ApiError>;

    /// `GET /api/companias/{id}/clientes/`: clients plus total count.
    async fn company_clients(&self, company_id: i64)
        -> Result<(u64, Vec<ClientSummary>), ApiError>;

    /// `PATCH /api/clientes/{id}/toggle-status/`: returns the backend message.
    async fn toggle_client_status(&self, client_id: i64, activo: bool)
        -> Result<String, ApiError>;

    /// `POST /api/clientes/registro/` (JSON): returns the backend message.
    async fn register_client(&self, registration: &ClientRegistration)
        -> Result<String, ApiError>;

    /// `POST /api/conductores/registro/` (multipart with files): returns
    /// the backend message.
    async fn register_driver(&self, registration: &DriverRegistration)
        -> Result<String, ApiError>;

    /// `POST /api/reportes/{kind}/`: stream the spreadsheet into
    /// `dest_dir` and return the written path.
    async fn export_report(
        &self,
        kind: ReportKind,
        request: &ReportRequest,
        dest_dir: &Path,
    ) -> Result<PathBuf, ApiError>;
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl PortalClient {
    /// Build a client from the backend section of the app config.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("evory-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_token: config.csrf_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode an envelope, mapping `success: false` to `ApiError::Rejected`.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|_| ApiError::InvalidResponse)?;
        if envelope.success {
            Ok(envelope)
        } else {
            Err(ApiError::rejected(envelope.message))
        }
    }
}

#[async_trait]
impl PortalBackend for PortalClient {
    async fn list_companies(&self) -> Result<Vec<CompanyRef>, ApiError> {
        debug!("Fetching company list");
        let response = self.client.get(self.url("/api/companias/")).send().await?;
        let envelope: ApiEnvelope<Vec<CompanyRef>> = Self::decode(response).await?;
        envelope.data.ok_or(ApiError::InvalidResponse)
    }

    async fn search_companies(&self, query: &str) -> Result<Vec<CompanySearchResult>, ApiError> {
        debug!("Searching companies: '{}'", query);
        let response = self
            .client
            .get(self.url("/api/companias/buscar/"))
            .query(&[("q", query)])
            .send()
            .await?;
        let envelope: ApiEnvelope<Vec<CompanySearchResult>> = Self::decode(response).await?;
        envelope.data.ok_or(ApiError::InvalidResponse)
    }

    async fn company_detail(&self, company_id: i64) -> Result<CompanyDetail, ApiError> {
        debug!("Fetching detail for company {}", company_id);
        let response = self
            .client
            .get(self.url(&format!("/api/companias/{company_id}/detalle/")))
            .send()
            .await?;
        let envelope: ApiEnvelope<CompanyDetail> = Self::decode(response).await?;
        envelope.data.ok_or(ApiError::InvalidResponse)
    }

    async fn company_clients(
        &self,
        company_id: i64,
    ) -> Result<(u64, Vec<ClientSummary>), ApiError> {
        debug!("Fetching clients for company {}", company_id);
        let response = self
            .client
            .get(self.url(&format!("/api/companias/{company_id}/clientes/")))
            .send()
            .await?;
        let envelope: ApiEnvelope<Vec<ClientSummary>> = Self::decode(response).await?;
        let clients = envelope.data.ok_or(ApiError::InvalidResponse)?;
        let count = envelope.count.unwrap_or(clients.len() as u64);
        Ok((count, clients))
    }

    async fn toggle_client_status(
        &self,
        client_id: i64,
        activo: bool,
    ) -> Result<String, ApiError> {
        info!("Toggling client {} to activo={}", client_id, activo);
        let response = self
            .client
            .patch(self.url(&format!("/api/clientes/{client_id}/toggle-status/")))
            .json(&serde_json::json!({ "activo": activo }))
            .send()
            .await?;
        let envelope: ApiEnvelope<serde_json::Value> = Self::decode(response).await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "Estado actualizado".to_string()))
    }

    async fn register_client(
        &self,
        registration: &ClientRegistration,
    ) -> Result<String, ApiError> {
        info!("Submitting client registration for {}", registration.correo);
        let response = self
            .client
            .post(self.url("/api/clientes/registro/"))
            .json(registration)
            .send()
            .await?;
        let envelope: ApiEnvelope<serde_json::Value> = Self::decode(response).await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "Registro exitoso".to_string()))
    }

    async fn register_driver(
        &self,
        registration: &DriverRegistration,
    ) -> Result<String, ApiError> {
        info!("Submitting driver registration for {}", registration.correo);

        let mut form = Form::new();
        if let Some(token) = &self.csrf_token {
            form = form.text("csrfmiddlewaretoken", token.clone());
        }
        for (name, value) in registration.text_fields() {
            form = form.text(name, value);
        }
        for (kind, path) in &registration.documents {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| kind.field_name().to_string());
            form = form.part(kind.field_name(), Part::bytes(bytes).file_name(file_name));
        }

        let response = self
            .client
            .post(self.url("/api/conductores/registro/"))
            .multipart(form)
            .send()
            .await?;
        let envelope: ApiEnvelope<serde_json::Value> = Self::decode(response).await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "Registro exitoso".to_string()))
    }

    async fn export_report(
        &self,
        kind: ReportKind,
        request: &ReportRequest,
        dest_dir: &Path,
    ) -> Result<PathBuf, ApiError> {
        info!(
            "Exporting {} report for company {} ({} - {})",
            kind, request.company_id, request.fecha_inicio, request.fecha_fin
        );
        let response = self
            .client
            .post(self.url(&format!("/api/reportes/{kind}/")))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Report export failed with status {}", response.status());
            return Err(ApiError::Rejected {
                message: "Error al generar el archivo Excel".to_string(),
            });
        }

        tokio::fs::create_dir_all(dest_dir).await?;
        let dest = dest_dir.join(request.filename(kind));
        let mut file = tokio::fs::File::create(&dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        info!("Report written to {}", dest.display());
        Ok(dest)
    }
}
