// ABOUTME: CLI clients commands - list a company's clients, toggle status

use anyhow::Result;

use super::{ClientsArgs, OutputFormat, ToggleClientArgs};
use crate::api::{PortalBackend, PortalClient};
use crate::config::AppConfig;

pub async fn execute(args: ClientsArgs, format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let client = PortalClient::new(&config.backend)?;

    let (count, clients) = client.company_clients(args.company_id).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&clients)?),
        OutputFormat::Text => {
            println!("Clientes: {count}");
            for c in clients {
                let estado = if c.activo { "Activo" } else { "Inactivo" };
                let ultimo = c
                    .ultimo_viaje
                    .as_ref()
                    .map(|t| t.fecha.clone())
                    .unwrap_or_else(|| "Sin viajes".to_string());
                println!(
                    "{:<6} {:<30} {:<12} viajes: {:<4} calif: {:<4.1} {:<9} {}",
                    c.id,
                    c.nombre_completo,
                    c.numero_documento,
                    c.total_viajes,
                    c.calificacion_promedio,
                    estado,
                    ultimo
                );
            }
        }
    }

    Ok(())
}

pub async fn toggle(args: ToggleClientArgs, format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let client = PortalClient::new(&config.backend)?;

    let message = client
        .toggle_client_status(args.client_id, args.activo)
        .await?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "success": true, "message": message })
        ),
        OutputFormat::Text => println!("{message}"),
    }

    Ok(())
}
