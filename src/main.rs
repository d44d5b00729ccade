//! Release tickets CLI entrypoint.

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use release_tickets::config::normalise_flag_spellings;
use release_tickets::telemetry::init_tracing;
use release_tickets::{
    OctocrabReleaseGateway, PersonalAccessToken, ReleaseConfig, ReleaseError,
    ReleaseTicketCollector, TicketExtractor, TracingTelemetrySink, write_report,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReleaseError> {
    init_tracing()?;
    let config = load_config()?;

    let local = config.discover_local(Path::new("."))?;
    let request = config.release_request(local.as_ref())?;
    let format = config.output_format()?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;

    let gateway = OctocrabReleaseGateway::for_token(&token, &request.locator)?;
    let extractor = TicketExtractor::new()?;
    let telemetry = TracingTelemetrySink;
    let tickets = ReleaseTicketCollector::new(&gateway, &extractor, &telemetry)
        .collect(&request)
        .await?;

    write_report(&mut io::stdout().lock(), &tickets, format)
}

/// Loads configuration from CLI, environment, and files.
///
/// Long flag spellings such as `-owner` and `-prevRef` are normalised first.
///
/// # Errors
///
/// Returns [`ReleaseError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ReleaseConfig, ReleaseError> {
    ReleaseConfig::load_from_iter(normalise_flag_spellings(env::args_os())).map_err(|error| {
        ReleaseError::Configuration {
            message: error.to_string(),
        }
    })
}
