use std::fmt;
use std::time::Duration;

use services::config::{parse_endpoint, parse_timeout_secs};
use services::{
    ConfigError, QuizConfig, QuizLoopService, RemoteSourceConfig, SourceConfig, SourceKind,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        ArgsError::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--source static|remote] [--endpoint <url>] [--timeout-secs <n>] [--no-fallback]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --source static");
    eprintln!("  --timeout-secs 10");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SOURCE, QUIZ_ENDPOINT, QUIZ_FETCH_TIMEOUT_SECS, QUIZ_FALLBACK_STATIC, RUST_LOG");
}

/// Command-line overrides layered on top of the environment.
#[derive(Debug, Default)]
struct Overrides {
    source: Option<SourceKind>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    no_fallback: bool,
}

impl Overrides {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut overrides = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--source" => {
                    overrides.source = Some(require_value(args, "--source")?.parse::<SourceKind>()?);
                }
                "--endpoint" => {
                    overrides.endpoint = Some(require_value(args, "--endpoint")?);
                }
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    overrides.timeout = Some(parse_timeout_secs(&value)?);
                }
                "--no-fallback" => overrides.no_fallback = true,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Some(overrides))
    }

    fn apply(self, mut config: QuizConfig) -> Result<QuizConfig, ArgsError> {
        if self.no_fallback {
            config.fallback_to_static = false;
        }

        let kind = self.source.unwrap_or_else(|| config.source.kind());
        config.source = match (kind, config.source) {
            (SourceKind::Static, _) => SourceConfig::Static,
            (SourceKind::Remote, existing) => {
                let mut remote = match (self.endpoint, existing) {
                    (Some(raw), SourceConfig::Remote(existing)) => RemoteSourceConfig {
                        endpoint: parse_endpoint(&raw)?,
                        ..existing
                    },
                    (Some(raw), SourceConfig::Static) => RemoteSourceConfig::new(parse_endpoint(&raw)?),
                    (None, SourceConfig::Remote(existing)) => existing,
                    (None, SourceConfig::Static) => return Err(ConfigError::MissingEndpoint.into()),
                };
                if let Some(timeout) = self.timeout {
                    remote.timeout = timeout;
                }
                SourceConfig::Remote(remote)
            }
        };
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(overrides) = Overrides::parse(&mut args).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?
    else {
        print_usage();
        return Ok(());
    };

    init_tracing();

    // Environment first, flags win. Source selection stays in this binary glue.
    let config = overrides.apply(QuizConfig::from_env()?)?;
    tracing::info!(source = %config.source.kind(), fallback = config.fallback_to_static, "starting quiz");

    let service = QuizLoopService::from_config(&config)?;
    let session = service.start_session().await?;

    for (number, question) in session.questions().iter().enumerate() {
        println!("{}. {}", number + 1, question.text());
        for choice in question.choices() {
            println!("   [{}] {}", choice.id(), choice.text());
        }
    }

    let progress = session.progress();
    tracing::info!(
        total = progress.total,
        answered = progress.answered,
        "session ready"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
