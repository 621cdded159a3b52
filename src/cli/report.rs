// ABOUTME: CLI report command - export a report to an .xlsx file

use anyhow::{bail, Result};

use super::{OutputFormat, ReportArgs};
use crate::api::{PortalBackend, PortalClient, ReportRequest};
use crate::config::AppConfig;
use crate::validation::parse_date;

pub async fn execute(args: ReportArgs, format: OutputFormat) -> Result<()> {
    let (Some(start), Some(end)) = (parse_date(&args.from), parse_date(&args.to)) else {
        bail!("Las fechas deben tener el formato AAAA-MM-DD");
    };
    if end < start {
        bail!("La fecha de fin debe ser posterior a la fecha de inicio");
    }

    let config = AppConfig::load()?;
    let client = PortalClient::new(&config.backend)?;

    let request = ReportRequest {
        company_id: args.company,
        fecha_inicio: args.from.clone(),
        fecha_fin: args.to.clone(),
        export: true,
    };
    let dest_dir = args.output.unwrap_or(config.reports.download_dir);

    let path = client.export_report(args.kind, &request, &dest_dir).await?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "success": true, "path": path.display().to_string() })
        ),
        OutputFormat::Text => println!("Archivo Excel descargado: {}", path.display()),
    }

    Ok(())
}
