//! Verify hook entry point
//!
//! Reads one CloudFormation custom resource request, runs it through the
//! lifecycle orchestrator and answers with a response document.
//!
//! The document is printed to stdout and uploaded to the request's
//! `ResponseURL` unless `--no-upload` is given. Logs go to stderr.

mod envelope;
mod responder;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use envelope::{CloudFormationRequest, CloudFormationResponse};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use verify_hook_core::config::{DEFAULT_POLL_INTERVAL, DEFAULT_RECORD_TTL};
use verify_hook_core::{
    CertificateValidationHandler, CoreResult, EmailDomainHandler, HookConfig,
    LifecycleOrchestrator, LifecycleResponse, ResourceHandler, ServiceContext,
};
use verify_hook_provider::{create_clients, AwsCredentials};

/// CloudFormation waits one hour for a custom resource; the rest is left
/// for the response upload.
const DEFAULT_TIME_BUDGET_SECS: u64 = 3600 - 300;

/// Resource kind handled by one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    /// SES sending domain: ownership TXT plus DKIM CNAMEs
    EmailDomain,
    /// ACM certificate: DNS validation CNAMEs
    Certificate,
}

#[derive(Debug, Parser)]
#[command(name = "verify-hook", version, about)]
struct Cli {
    /// Resource handled by this invocation
    #[arg(long, value_enum)]
    kind: ResourceKind,

    /// Request document path, `-` for stdin
    #[arg(long, default_value = "-")]
    event: String,

    /// Region of the SES and ACM endpoints
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,

    /// TTL of every published record
    #[arg(long, env = "HOOK_TTL_SECS", default_value_t = DEFAULT_RECORD_TTL.as_secs())]
    ttl_secs: u64,

    /// Sleep between certificate lookups
    #[arg(long, env = "HOOK_POLL_INTERVAL_SECS", default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    poll_interval_secs: u64,

    /// How long one invocation may wait for its certificate
    #[arg(long, env = "HOOK_TIME_BUDGET_SECS", default_value_t = DEFAULT_TIME_BUDGET_SECS)]
    time_budget_secs: u64,

    /// Transport retries per service request
    #[arg(long, env = "HOOK_MAX_RETRIES", default_value_t = 2)]
    max_retries: u32,

    /// Print the response document without uploading it
    #[arg(long)]
    no_upload: bool,
}

impl Cli {
    fn hook_config(&self) -> HookConfig {
        HookConfig::default()
            .with_record_ttl(Duration::from_secs(self.ttl_secs))
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
    }

    fn time_budget(&self) -> Duration {
        Duration::from_secs(self.time_budget_secs)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (stdout carries the response document)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let raw = read_request(&cli.event).await?;
    let request: CloudFormationRequest =
        serde_json::from_str(&raw).context("malformed custom resource request")?;
    tracing::info!(
        "{} {} ({:?}), request {}",
        request.request_type,
        request.logical_resource_id,
        cli.kind,
        request.request_id
    );

    let config = Arc::new(cli.hook_config());
    let response = match execute(cli, &config, &request).await {
        Ok(response) => {
            tracing::info!("Physical resource id: {}", response.physical_resource_id);
            CloudFormationResponse::success(&request, response)
        }
        Err(e) => {
            if e.is_expected() {
                tracing::warn!("Request failed: {e}");
            } else {
                tracing::error!("Request failed: {e}");
            }
            CloudFormationResponse::failure(&request, &e, config.unassigned_physical_id())
        }
    };

    let body = serde_json::to_string(&response).context("failed to serialize response")?;
    println!("{body}");

    if cli.no_upload {
        tracing::info!("Upload skipped");
    } else {
        responder::upload(&request.response_url, body).await?;
    }

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Everything that can fail here is reported back to CloudFormation.
async fn execute(
    cli: &Cli,
    config: &Arc<HookConfig>,
    request: &CloudFormationRequest,
) -> CoreResult<LifecycleResponse> {
    let event = request.to_event(Some(cli.time_budget()))?;

    let credentials = AwsCredentials::from_env()?;
    let clients = create_clients(&credentials, &cli.region, cli.max_retries);
    let ctx = Arc::new(ServiceContext::from_clients(clients, Arc::clone(config)));

    let handler: Arc<dyn ResourceHandler> = match cli.kind {
        ResourceKind::EmailDomain => Arc::new(EmailDomainHandler::new(ctx)),
        ResourceKind::Certificate => Arc::new(CertificateValidationHandler::new(ctx)),
    };

    LifecycleOrchestrator::new(Arc::clone(config), handler)
        .handle(&event)
        .await
}

async fn read_request(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("failed to read request from stdin")?;
        Ok(raw)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read request from {source}"))
    }
}
