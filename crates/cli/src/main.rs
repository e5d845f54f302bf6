use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dx_core::{
    config::gateway_url_from_env_value, constants::COMMON_SYMPTOMS, report, ClientConfig,
    Demographics, DiagnosisOrchestrator, GatewayClient, Session, TriageLevel, VendorApi,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dxv2")]
#[command(about = "dxv2 symptom checker CLI")]
struct Cli {
    /// Gateway base URL (defaults to DX_GATEWAY_URL, then http://localhost:3000/api)
    #[arg(long, global = true)]
    gateway: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one diagnosis over the given symptoms
    Diagnose {
        /// Patient sex (male or female)
        #[arg(long)]
        sex: Option<String>,
        /// Patient age in years
        #[arg(long)]
        age: Option<String>,
        /// Symptom in free text; repeat for more than one
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
        /// Write the result as JSON into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Look up one term in the vendor concept search
    Search {
        /// Term to look up
        term: String,
    },
    /// List the common symptom shortlist
    Common,
    /// Show the tier a vendor triage level maps to
    TriageLevel {
        /// Vendor level, e.g. emergency_ambulance
        vendor_level: String,
    },
}

impl Cli {
    fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let gateway_url = match &self.gateway {
            Some(url) => url.clone(),
            None => gateway_url_from_env_value(std::env::var("DX_GATEWAY_URL").ok()),
        };
        let timeout = self.timeout_secs.map(Duration::from_secs);
        Ok(ClientConfig::new(gateway_url, timeout)?)
    }
}

/// Builds the session for a `diagnose` run. Duplicate and blank symptoms are skipped.
///
/// Demographics are only read once there is a symptom, so a run without symptoms reports
/// that first.
fn build_session(
    sex: Option<&str>,
    age: Option<&str>,
    symptoms: &[String],
) -> dx_core::DxResult<Session> {
    let mut session = Session::new();
    for symptom in symptoms {
        if !session.add_symptom(symptom) {
            tracing::debug!("skipping symptom '{}'", symptom);
        }
    }
    if session.symptoms().is_empty() {
        return Ok(session);
    }
    if sex.is_some() || age.is_some() {
        let demographics = Demographics::from_form(sex.unwrap_or(""), age.unwrap_or(""))?;
        session.set_demographics(demographics);
    }
    Ok(session)
}

fn triage_tier(vendor_level: &str) -> &'static str {
    TriageLevel::from_vendor(vendor_level.trim()).map_or("unmapped", |level| level.as_str())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("dx_core=warn".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Diagnose {
            sex,
            age,
            symptoms,
            export_dir,
        }) => {
            let session = match build_session(sex.as_deref(), age.as_deref(), symptoms) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("{}", report::error_message(&e));
                    return Ok(ExitCode::FAILURE);
                }
            };
            let client = GatewayClient::new(cli.client_config()?)?;
            let mut orchestrator = DiagnosisOrchestrator::new(client, session);
            tracing::info!(
                interview_id = %orchestrator.session().interview_id(),
                "starting diagnosis"
            );

            match orchestrator.start_diagnosis().await {
                Ok(result) => println!("{}", result),
                Err(e) => {
                    eprintln!("{}", report::error_message(&e));
                    return Ok(ExitCode::FAILURE);
                }
            }

            if let Some(dir) = export_dir {
                if let Some(document) = orchestrator.export()? {
                    let path = document.write_to(dir)?;
                    println!("Exported result to {}", path.display());
                }
            }
        }
        Some(Commands::Search { term }) => {
            let client = GatewayClient::new(cli.client_config()?)?;
            let hits = client.search(term).await?;
            if hits.is_empty() {
                println!("No matches for '{}'.", term);
            }
            for hit in hits {
                println!(
                    "{}\t{}\t{}",
                    hit.id.as_deref().unwrap_or("-"),
                    hit.label.as_deref().unwrap_or("-"),
                    hit.kind.as_deref().unwrap_or("-")
                );
            }
        }
        Some(Commands::Common) => {
            for symptom in COMMON_SYMPTOMS {
                println!("{}", symptom);
            }
        }
        Some(Commands::TriageLevel { vendor_level }) => {
            println!("{}", triage_tier(vendor_level));
        }
        None => {
            println!("No command given. Use --help for usage.");
        }
    }

    Ok(ExitCode::SUCCESS)
}
