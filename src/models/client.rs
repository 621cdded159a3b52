// ABOUTME: Client registration payload for POST /api/clientes/registro/

use serde::Serialize;

/// JSON body of a client registration request.
///
/// Field names match the backend contract verbatim; optional name parts are
/// sent as empty strings, the way the web form does.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientRegistration {
    pub primer_nombre: String,
    pub segundo_nombre: String,
    pub primer_apellido: String,
    pub segundo_apellido: String,
    pub tipo_documento: String,
    pub numero_documento: String,
    pub correo: String,
    pub telefono: String,
    pub compania_id: i64,
    pub password: String,
    pub confirm_password: String,
}
