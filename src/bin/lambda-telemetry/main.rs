#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]

//! Builds an ingestion request for one payload read from stdin and reports
//! its shape. Transmission is left to the transport layer.

use lambda_telemetry::{
    config::{self, Config},
    logger,
    telemetry::request::RequestBuilder,
};
use std::{
    env,
    io::{Error, ErrorKind, Read, Result},
    path::Path,
};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = load_config()?;
    enable_logging_subsystem(&config);

    let (function_name, invoked_function_arn) =
        invocation_identity(env::var("AWS_LAMBDA_FUNCTION_NAME").ok(), env::args().nth(1))
            .inspect_err(|e| error!("{e}"))?;

    let mut payload = Vec::new();
    std::io::stdin().read_to_end(&mut payload)?;
    debug!("Read {} bytes from stdin", payload.len());

    let builder = RequestBuilder::from_config(&config);
    let request = builder
        .build(&payload, &function_name, &invoked_function_arn)
        .map_err(|e| {
            error!("Failed to build telemetry request: {e}");
            Error::new(ErrorKind::InvalidData, e.to_string())
        })?;

    let headers: Vec<&str> = request
        .headers()
        .keys()
        .map(reqwest::header::HeaderName::as_str)
        .collect();
    let body_size = request
        .body()
        .and_then(reqwest::Body::as_bytes)
        .map_or(0, <[u8]>::len);
    info!(
        "Built {} {} headers=[{}] body={} bytes",
        request.method(),
        request.url(),
        headers.join(", "),
        body_size
    );

    Ok(())
}

fn load_config() -> Result<Config> {
    let lambda_directory = env::var("LAMBDA_TASK_ROOT").unwrap_or_else(|_| "/var/task".to_string());
    config::get_config(Path::new(&lambda_directory)).map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        Error::new(ErrorKind::InvalidInput, e.to_string())
    })
}

/// Function name and invoked ARN both have to be present and non-empty.
fn invocation_identity(
    function_name: Option<String>,
    invoked_function_arn: Option<String>,
) -> Result<(String, String)> {
    let function_name = function_name.filter(|name| !name.is_empty()).ok_or_else(|| {
        Error::new(ErrorKind::InvalidInput, "AWS_LAMBDA_FUNCTION_NAME is not set")
    })?;
    let invoked_function_arn = invoked_function_arn
        .filter(|arn| !arn.is_empty())
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                "missing invoked function ARN argument",
            )
        })?;
    Ok((function_name, invoked_function_arn))
}

fn enable_logging_subsystem(config: &Config) {
    let filter = EnvFilter::builder()
        .parse_lossy("h2=off,hyper=off,rustls=off")
        .add_directive(LevelFilter::from(config.log_level).into());
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .event_format(logger::Formatter)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Setting default subscriber failed: {e}");
    }

    debug!("Logging subsystem enabled");
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:lambda:us-east-1:123456789012:function:my-func";

    #[test]
    fn test_invocation_identity() {
        let (function_name, arn) =
            invocation_identity(Some("my-func".to_string()), Some(ARN.to_string()))
                .expect("identity should be complete");
        assert_eq!(function_name, "my-func");
        assert_eq!(arn, ARN);
    }

    #[test]
    fn test_missing_function_name_is_invalid_input() {
        for function_name in [None, Some(String::new())] {
            let err = invocation_identity(function_name, Some(ARN.to_string()))
                .expect_err("function name is required");
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert!(err.to_string().contains("AWS_LAMBDA_FUNCTION_NAME"));
        }
    }

    #[test]
    fn test_missing_arn_is_invalid_input() {
        for arn in [None, Some(String::new())] {
            let err = invocation_identity(Some("my-func".to_string()), arn)
                .expect_err("ARN is required");
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert!(err.to_string().contains("ARN"));
        }
    }
}
