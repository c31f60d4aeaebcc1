use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;
use termcolor::ColorChoice;

use cdn_clone::{AwsService, CloneConfig, CloneError, Console, Outcome};

// ============================================================================
// EXIT STATUS
// ============================================================================
//
//   0  distribution created (or dry run finished)
//   1  no ACM certificate covers --domain
//   2  AWS call failed, or the parameters are missing / invalid
//
// Steps report their own failures as they happen; main only maps the
// returned error to a status and prints what was not already reported.
// ============================================================================

#[derive(Parser)]
#[command(name = "cdn_clone")]
#[command(version, about = "Clone a CloudFront distribution onto a new domain and origin")]
struct Cli {
    /// Domain name served by the new distribution
    #[arg(long)]
    domain: Option<String>,

    /// Origin server host name
    #[arg(long)]
    origin: Option<String>,

    /// Id of the distribution to clone
    #[arg(long = "dist_ref", visible_alias = "dist-ref")]
    dist_ref: Option<String>,

    /// S3 bucket name for access logs
    #[arg(long = "log_bucket", visible_alias = "log-bucket")]
    log_bucket: Option<String>,

    /// Key prefix for access logs (default: empty)
    #[arg(long = "log_prefix", visible_alias = "log-prefix")]
    log_prefix: Option<String>,

    /// AWS credential profile
    #[arg(long)]
    profile: Option<String>,

    /// Path to a TOML file with any of the options above
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Print the derived config instead of creating the distribution.
    /// Output is the SDK's debug view, not a CloudFront JSON document
    #[arg(long)]
    dry_run: bool,

    /// Log filter, e.g. `info` or `cdn_clone=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Raise verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> CloneConfig {
        CloneConfig {
            domain: self.domain.clone(),
            origin: self.origin.clone(),
            dist_ref: self.dist_ref.clone(),
            log_bucket: self.log_bucket.clone(),
            log_prefix: self.log_prefix.clone(),
            profile: self.profile.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let console = Console::new(ColorChoice::Auto);

    match run(&cli, &console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                // Already reported by the failing step
                CloneError::Remote { .. } => {}
                CloneError::Resolution { .. } => console.error(&e.to_string(), None),
                _ => console.error("Clone failed", Some(e.to_string().as_str())),
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli, console: &Console) -> cdn_clone::Result<()> {
    let request = load_config(cli).await?.merge(cli.overrides()).into_request()?;
    tracing::debug!(?request, "resolved parameters");

    let service = AwsService::from_profile(&request.profile).await;

    match cdn_clone::run(&service, console, &request, SystemTime::now()).await? {
        Outcome::Created { .. } => {}
        Outcome::Planned { rendered } => console.block("Derived distribution config", &rendered),
    }
    Ok(())
}

/// Explicit `--config`, else the default file if present, else nothing.
async fn load_config(cli: &Cli) -> anyhow::Result<CloneConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => match CloneConfig::default_path() {
            Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => path,
            _ => return Ok(CloneConfig::default()),
        },
    };

    CloneConfig::load(&path)
        .await
        .with_context(|| format!("Failed to load config file: {}", path.display()))
}

fn init_tracing(cli: &Cli) {
    let level = match cli.verbose {
        0 => cli.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
