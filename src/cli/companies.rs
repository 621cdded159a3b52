// ABOUTME: CLI companies command - list or search companies

use anyhow::Result;

use super::{CompaniesArgs, OutputFormat};
use crate::api::{PortalBackend, PortalClient};
use crate::config::AppConfig;

pub async fn execute(args: CompaniesArgs, format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let client = PortalClient::new(&config.backend)?;

    match args.search {
        Some(term) => {
            let results = client.search_companies(&term).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                OutputFormat::Text => {
                    if results.is_empty() {
                        println!("No se encontraron resultados");
                        return Ok(());
                    }
                    println!("{:<6} {:<32} {:<14} ESTADO", "ID", "NOMBRE", "NIT");
                    for company in results {
                        println!(
                            "{:<6} {:<32} {:<14} {}",
                            company.id, company.nombre, company.nit, company.estado_cuenta
                        );
                    }
                }
            }
        }
        None => {
            let companies = client.list_companies().await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&companies)?),
                OutputFormat::Text => {
                    println!("{:<6} NOMBRE", "ID");
                    for company in companies {
                        println!("{:<6} {}", company.id, company.nombre);
                    }
                }
            }
        }
    }

    Ok(())
}
