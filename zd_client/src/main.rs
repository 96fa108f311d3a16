//! Terminal driver for the ZoekDeware client core.
//!
//! Wires a file-backed credential store and the reqwest pipeline into the
//! controllers, then reads line commands from stdin until `quit` or EOF.

use anyhow::{Context, Result};
use log::info;
use pico_args::Arguments;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use zd_client::app::App;
use zd_client::commands::{Command, parse_command};
use zoekdeware::{ApiClient, ApiConfig, CredentialStore, Environment, FileStorage};

const HELP: &str = "\
Talk to a ZoekDeware API from the terminal

USAGE:
  zd_client [OPTIONS]

OPTIONS:
  --env NAME              development | staging | production  [default: by build profile]
  --base-url URL          Override the API base URL (including /api/v1)
  --credentials-dir DIR   Where the session is stored  [default: per-user data dir]
  --email EMAIL           Log in on start
  --password PASS         Password for --email

FLAGS:
  -h, --help              Print help information

ENVIRONMENT:
  RUST_LOG                Log filter (e.g., zoekdeware=debug)
";

struct Args {
    environment: Environment,
    base_url: Option<String>,
    credentials_dir: Option<PathBuf>,
    email: Option<String>,
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        environment: pargs
            .opt_value_from_fn("--env", str::parse::<Environment>)?
            .unwrap_or(Environment::current()),
        base_url: pargs.opt_value_from_str("--base-url")?,
        credentials_dir: pargs.opt_value_from_os_str("--credentials-dir", |s| {
            Ok::<_, std::convert::Infallible>(PathBuf::from(s))
        })?,
        email: pargs.opt_value_from_str("--email")?,
        password: pargs.opt_value_from_str("--password")?,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = match args.base_url {
        Some(url) => ApiConfig::with_base_url(url),
        None => ApiConfig::for_environment(args.environment),
    };
    info!("Using API at {}", config.base_url);

    let storage = match args.credentials_dir {
        Some(dir) => FileStorage::open_in(&dir),
        None => FileStorage::open_default(),
    }
    .context("Failed to open credential storage")?;
    info!("Credentials stored in {}", storage.path().display());

    let credentials = Arc::new(CredentialStore::new(Arc::new(storage)));
    let api = Arc::new(
        ApiClient::new(&config, credentials.clone()).context("Failed to create API client")?,
    );
    let mut app = App::new(api, credentials);

    if let Some(email) = args.email {
        let password = match args.password {
            Some(p) => p,
            None => prompt("Password: ")?,
        };
        if let Some(output) = app.dispatch(Command::Login { email, password }).await {
            println!("{output}");
        }
    } else if app.is_authenticated() {
        println!("Resuming stored session");
    }

    println!("Type 'help' to see available commands");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => match app.dispatch(command).await {
                Some(output) => println!("{output}"),
                None => break,
            },
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
