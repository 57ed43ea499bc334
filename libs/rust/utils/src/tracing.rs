use clap::ValueEnum;
use futures::{Future, FutureExt};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    #[value(alias = "text")]
    Compact,
    Json,
}

pub fn setup_tracing(format: LogFormat) {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter_layer);

    // Logs go to stderr so command output on stdout stays machine-readable.
    let result = match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_line_number(true)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}

/// Runs `future` with tracing installed, logging any panic with a backtrace.
pub async fn run_with_tracing<F, Fut>(format: LogFormat, future: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    setup_tracing(format);

    match std::panic::AssertUnwindSafe(future()).catch_unwind().await {
        Ok(result) => {
            if let Err(e) = &result {
                error!(error = ?e, "Command failed");
            }
            result
        }
        Err(panic) => {
            capture_panic_details(panic);
            Err(anyhow::anyhow!("command panicked"))
        }
    }
}

fn capture_panic_details(e: Box<dyn std::any::Any + Send>) {
    let backtrace = backtrace::Backtrace::new();
    if let Some(s) = e.downcast_ref::<&str>() {
        error!(panic_message = *s, backtrace = ?backtrace, "Panic occurred with message");
    } else if let Some(s) = e.downcast_ref::<String>() {
        error!(panic_message = s, backtrace = ?backtrace, "Panic occurred with message");
    } else {
        error!(backtrace = ?backtrace, "Panic occurred but the payload is not a string");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_format() {
        assert_eq!(LogFormat::from_str("json", true).unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("Compact", true).unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("text", false).unwrap(), LogFormat::Compact);
        assert!(LogFormat::from_str("xml", true).is_err());
    }

    #[tokio::test]
    async fn panics_become_errors() {
        let result = run_with_tracing(LogFormat::Compact, || async {
            panic!("boom");
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn errors_are_passed_through() {
        let result = run_with_tracing(LogFormat::Compact, || async {
            Err(anyhow::anyhow!("rpc down"))
        })
        .await;
        assert_eq!(result.unwrap_err().to_string(), "rpc down");
    }
}
