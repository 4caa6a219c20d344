use clap::{Args, Parser, Subcommand};
use reqwest::Url;
use sofa_relay::config::{
    AppConfig, DEFAULT_API_BASE_URL, DEFAULT_HOST, DEFAULT_IMAGE_BASE_URL, DEFAULT_PORT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_VAPID_SUBJECT, UpstreamConfig,
};
use sofa_relay::push::{VapidConfigStatus, load_vapid_config};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub(crate) enum RunOutcome {
    Serve(AppConfig),
    Exit(i32),
}

pub(crate) fn run() -> RunOutcome {
    let cli = Cli::parse();
    if let Some(Command::Init(args)) = cli.command {
        let code = run_init(args);
        return RunOutcome::Exit(code);
    }

    match resolve_config(&cli) {
        Ok(config) => RunOutcome::Serve(config),
        Err(err) => {
            tracing::error!("{err}");
            RunOutcome::Exit(2)
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sofa-relay",
    version,
    about = "SofaScore relay with player stats and web push fan-out"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[arg(long, env = "SOFA_RELAY_HOST", default_value = DEFAULT_HOST)]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, env = "SOFA_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: Url,
    #[arg(long, env = "SOFA_IMAGE_BASE_URL", default_value = DEFAULT_IMAGE_BASE_URL)]
    image_base_url: Url,
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    upstream_timeout_secs: u64,
    #[arg(long, env = "VAPID_PRIVATE_KEY", hide_env_values = true)]
    vapid_private_key: Option<String>,
    #[arg(long, env = "VAPID_PUBLIC_KEY")]
    vapid_public_key: Option<String>,
    #[arg(long, env = "VAPID_SUBJECT", default_value = DEFAULT_VAPID_SUBJECT)]
    vapid_subject: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a VAPID key pair and print it as environment variables.
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    #[arg(long)]
    subject: Option<String>,
}

fn run_init(args: InitArgs) -> i32 {
    let credentials = match sofa_relay::generate_vapid_credentials() {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::error!("failed to generate VAPID credentials: {err}");
            return 1;
        }
    };
    let (subject, show_subject_note) = match args.subject {
        Some(subject) => (subject, false),
        None => (DEFAULT_VAPID_SUBJECT.to_string(), true),
    };

    println!("VAPID credentials generated.");
    println!();
    println!("VAPID_PRIVATE_KEY=\"{}\"", credentials.private_key);
    println!("VAPID_PUBLIC_KEY=\"{}\"", credentials.public_key);
    println!("VAPID_SUBJECT=\"{subject}\"");
    if show_subject_note {
        println!();
        println!("Note: replace VAPID_SUBJECT with a contact URI you control.");
    }
    0
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, String> {
    let vapid = match load_vapid_config(
        cli.vapid_private_key.as_deref(),
        cli.vapid_public_key.as_deref(),
        &cli.vapid_subject,
    ) {
        VapidConfigStatus::Ready(vapid) => vapid,
        VapidConfigStatus::Incomplete => {
            return Err(
                "incomplete VAPID configuration: both VAPID_PUBLIC_KEY and VAPID_PRIVATE_KEY are required"
                    .to_string(),
            );
        }
        VapidConfigStatus::Missing => {
            return Err(
                "VAPID keys are not configured; run `sofa-relay init` to generate them".to_string(),
            );
        }
    };

    if cli.upstream_timeout_secs == 0 {
        return Err("upstream timeout must be greater than 0".to_string());
    }

    Ok(AppConfig {
        addr: SocketAddr::new(cli.host, cli.port),
        upstream: UpstreamConfig {
            api_base_url: cli.api_base_url.clone(),
            image_base_url: cli.image_base_url.clone(),
            timeout: Duration::from_secs(cli.upstream_timeout_secs),
        },
        vapid,
    })
}
