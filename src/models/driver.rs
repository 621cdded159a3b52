// ABOUTME: Driver registration payload for POST /api/conductores/registro/
// Sent as multipart form data with the document files attached

use std::path::PathBuf;

/// Document uploads collected by the driver wizard.
///
/// Variant order matches the backend's expected multipart field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    DocumentoFrontal,
    DocumentoReverso,
    TarjetaPropiedad,
    CertificadoReconocimiento,
    FotoLicencia,
    DocumentoSoat,
    AntecedentesJudiciales,
    FotoVehiculoFrontal,
    FotoVehiculoLateral,
    FotoVehiculoInterior,
    CertificadoTecnomecanica,
}

impl DocumentKind {
    /// Every document the wizard can attach, in display order.
    pub fn all() -> &'static [DocumentKind] {
        &[
            Self::DocumentoFrontal,
            Self::DocumentoReverso,
            Self::TarjetaPropiedad,
            Self::CertificadoReconocimiento,
            Self::FotoLicencia,
            Self::DocumentoSoat,
            Self::AntecedentesJudiciales,
            Self::FotoVehiculoFrontal,
            Self::FotoVehiculoLateral,
            Self::FotoVehiculoInterior,
            Self::CertificadoTecnomecanica,
        ]
    }

    /// Multipart field name expected by the backend.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::DocumentoFrontal => "documento_frontal",
            Self::DocumentoReverso => "documento_reverso",
            Self::TarjetaPropiedad => "tarjeta_propiedad",
            Self::CertificadoReconocimiento => "certificado_reconocimiento",
            Self::FotoLicencia => "foto_licencia",
            Self::DocumentoSoat => "documento_soat",
            Self::AntecedentesJudiciales => "antecedentes_judiciales",
            Self::FotoVehiculoFrontal => "foto_vehiculo_frontal",
            Self::FotoVehiculoLateral => "foto_vehiculo_lateral",
            Self::FotoVehiculoInterior => "foto_vehiculo_interior",
            Self::CertificadoTecnomecanica => "certificado_tecnomecanica",
        }
    }

    /// Label shown in the documents tab.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DocumentoFrontal => "Documento de identidad (frontal)",
            Self::DocumentoReverso => "Documento de identidad (reverso)",
            Self::TarjetaPropiedad => "Tarjeta de propiedad",
            Self::CertificadoReconocimiento => "Certificado de reconocimiento",
            Self::FotoLicencia => "Foto de la licencia",
            Self::DocumentoSoat => "SOAT",
            Self::AntecedentesJudiciales => "Antecedentes judiciales",
            Self::FotoVehiculoFrontal => "Foto del vehículo (frontal)",
            Self::FotoVehiculoLateral => "Foto del vehículo (lateral)",
            Self::FotoVehiculoInterior => "Foto del vehículo (interior)",
            Self::CertificadoTecnomecanica => "Certificado tecnomecánica",
        }
    }

    /// Whether the backend rejects a registration missing this document.
    pub fn required(&self) -> bool {
        !matches!(self, Self::DocumentoReverso)
    }
}

/// Full driver registration request.
///
/// Scalar fields travel as plain multipart values; `documents` are file
/// parts keyed by [`DocumentKind::field_name`].
#[derive(Debug, Clone, Default)]
pub struct DriverRegistration {
    // Personal
    pub primer_nombre: String,
    pub segundo_nombre: String,
    pub primer_apellido: String,
    pub segundo_apellido: String,
    pub tipo_documento: String,
    pub numero_documento: String,
    pub fecha_nacimiento: String,
    pub correo: String,
    pub telefono_principal: String,
    pub telefono_secundario: String,
    pub direccion: String,
    pub ciudad: String,
    pub password: String,
    pub confirm_password: String,

    // License
    pub numero_licencia: String,
    pub licencia_expedicion: String,
    pub licencia_vencimiento: String,

    // Bank account
    pub tipo_cuenta: String,
    pub banco: String,
    pub numero_cuenta: String,
    pub confirmar_numero_cuenta: String,

    // Vehicle
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    pub anio: String,
    pub color: String,
    pub tipo_vehiculo: String,
    pub num_pasajeros: String,

    /// Attached document files.
    pub documents: Vec<(DocumentKind, PathBuf)>,
}

impl DriverRegistration {
    /// Scalar multipart fields in backend order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("primer_nombre", self.primer_nombre.clone()),
            ("segundo_nombre", self.segundo_nombre.clone()),
            ("primer_apellido", self.primer_apellido.clone()),
            ("segundo_apellido", self.segundo_apellido.clone()),
            ("tipo_documento", self.tipo_documento.clone()),
            ("numero_documento", self.numero_documento.clone()),
            ("fecha_nacimiento", self.fecha_nacimiento.clone()),
            ("correo", self.correo.clone()),
            ("telefono_principal", self.telefono_principal.clone()),
            ("telefono_secundario", self.telefono_secundario.clone()),
            ("direccion", self.direccion.clone()),
            ("ciudad", self.ciudad.clone()),
            ("password", self.password.clone()),
            ("confirm_password", self.confirm_password.clone()),
            ("numero_licencia", self.numero_licencia.clone()),
            ("licencia_expedicion", self.licencia_expedicion.clone()),
            ("licencia_vencimiento", self.licencia_vencimiento.clone()),
            ("tipo_cuenta", self.tipo_cuenta.clone()),
            ("banco", self.banco.clone()),
            ("numero_cuenta", self.numero_cuenta.clone()),
            ("confirmar_numero_cuenta", self.confirmar_numero_cuenta.clone()),
            ("placa", self.placa.clone()),
            ("marca", self.marca.clone()),
            ("modelo", self.modelo.clone()),
            ("anio", self.anio.clone()),
            ("color", self.color.clone()),
            ("tipo_vehiculo", self.tipo_vehiculo.clone()),
            ("num_pasajeros", self.num_pasajeros.clone()),
        ]
    }

    /// Required documents not yet attached.
    pub fn missing_documents(&self) -> Vec<DocumentKind> {
        DocumentKind::all()
            .iter()
            .filter(|kind| kind.required())
            .filter(|kind| !self.documents.iter().any(|(k, _)| k == *kind))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_documents() {
        let required: Vec<_> = DocumentKind::all().iter().filter(|k| k.required()).collect();
        assert_eq!(required.len(), 10);
        assert!(!DocumentKind::DocumentoReverso.required());
    }

    #[test]
    fn test_missing_documents_ignores_optional() {
        let mut reg = DriverRegistration::default();
        assert_eq!(reg.missing_documents().len(), 10);

        for kind in DocumentKind::all() {
            if kind.required() {
                reg.documents.push((*kind, PathBuf::from("/tmp/doc.jpg")));
            }
        }
        assert!(reg.missing_documents().is_empty());
    }

    #[test]
    fn test_text_fields_cover_backend_contract() {
        let reg = DriverRegistration::default();
        let names: Vec<_> = reg.text_fields().iter().map(|(n, _)| *n).collect();
        for required in [
            "primer_nombre",
            "fecha_nacimiento",
            "numero_licencia",
            "confirmar_numero_cuenta",
            "num_pasajeros",
        ] {
            assert!(names.contains(&required), "missing field {required}");
        }
    }
}
