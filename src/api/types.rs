// ABOUTME: Wire types for the backend API responses
// Field names mirror the backend JSON contract (Spanish identifiers)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard response envelope: `{success, message?, count?, data?}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Company entry for the registration form selector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyRef {
    pub id: i64,
    pub nombre: String,
}

/// Company entry returned by the search endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanySearchResult {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub razon_social: Option<String>,
    pub nit: String,
    pub estado_cuenta: String,
}

/// Service metrics shown in the dashboard header.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompanyMetrics {
    pub servicios_realizados: i64,
    pub empleados_activos: i64,
    pub servicios_mes: i64,
    pub porcentaje_mes: f64,
}

/// Full company record with metrics.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyDetail {
    pub id: i64,
    pub nombre: String,
    pub razon_social: String,
    pub nit: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub email_corporativo: String,
    #[serde(default)]
    pub persona_contacto: String,
    #[serde(default)]
    pub fecha_membresia: String,
    pub estado_cuenta: String,
    pub metricas: CompanyMetrics,
}

/// Last trip summary attached to a client entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LastTrip {
    pub fecha: String,
    #[serde(default)]
    pub origen: String,
    #[serde(default)]
    pub destino: String,
    #[serde(default)]
    pub estado: String,
}

/// Client entry in a company's client list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientSummary {
    pub id: i64,
    pub nombre_completo: String,
    #[serde(default)]
    pub cargo: Option<String>,
    pub numero_documento: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub total_viajes: i64,
    #[serde(default)]
    pub calificacion_promedio: f64,
    #[serde(default)]
    pub ultimo_viaje: Option<LastTrip>,
    pub activo: bool,
    #[serde(default)]
    pub fecha_registro: String,
}

/// Report families the backend can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Every requested trip in the period, regardless of state.
    Servicios,
    /// Completed trips with amounts and payment method.
    Ingresos,
    /// Reported incidents with state and priority.
    Novedades,
}

impl ReportKind {
    /// Path segment and filename component for this report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Servicios => "servicios",
            Self::Ingresos => "ingresos",
            Self::Novedades => "novedades",
        }
    }

    /// All report kinds in menu order.
    pub fn all() -> &'static [ReportKind] {
        &[Self::Servicios, Self::Ingresos, Self::Novedades]
    }

    /// Description shown under the report selector.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Servicios => {
                "Incluye TODOS los viajes solicitados (completados, en progreso, cancelados) \
                 con cliente, empresa, fecha, conductor, origen, destino y estado."
            }
            Self::Ingresos => {
                "Incluye SOLO viajes completados con sus montos: viaje, fecha, empresa, \
                 monto pagado, método de pago, origen y destino."
            }
            Self::Novedades => {
                "Incluye las incidencias reportadas: quién la creó, descripción, tipo, \
                 estado actual, prioridad y fecha de resolución."
            }
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "servicios" => Ok(Self::Servicios),
            "ingresos" => Ok(Self::Ingresos),
            "novedades" => Ok(Self::Novedades),
            other => Err(format!(
                "tipo de reporte desconocido '{other}' (servicios|ingresos|novedades)"
            )),
        }
    }
}

/// Body of a report export request.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    pub company_id: i64,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub export: bool,
}

impl ReportRequest {
    /// Download filename for this request, e.g.
    /// `reporte_servicios_2026-01-01_2026-01-31.xlsx`.
    pub fn filename(&self, kind: ReportKind) -> String {
        format!(
            "reporte_{}_{}_{}.xlsx",
            kind.as_str(),
            self.fecha_inicio,
            self.fecha_fin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_tolerates_missing_fields() {
        let env: ApiEnvelope<Vec<CompanyRef>> =
            serde_json::from_str(r#"{"success": true, "data": [{"id": 1, "nombre": "ACME"}]}"#)
                .unwrap();
        assert!(env.success);
        assert!(env.message.is_none());
        assert_eq!(env.data.unwrap()[0].id, 1);
    }

    #[test]
    fn test_report_kind_round_trip() {
        for kind in ReportKind::all() {
            assert_eq!(kind.as_str().parse::<ReportKind>().unwrap(), *kind);
        }
        assert!("viajes".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_report_filename() {
        let req = ReportRequest {
            company_id: 9,
            fecha_inicio: "2026-01-01".into(),
            fecha_fin: "2026-01-31".into(),
            export: true,
        };
        assert_eq!(
            req.filename(ReportKind::Ingresos),
            "reporte_ingresos_2026-01-01_2026-01-31.xlsx"
        );
    }
}
