use std::fs::File;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tourdesk::api::types::LoginRequest;
use tourdesk::api::{ApiClient, CredentialStore, FileCredentialStore, HttpBackend};
use tourdesk::core::config::{self, CliOverrides};
use tourdesk::core::route::Route;
use tourdesk::core::state::App;
use tourdesk::tui;

#[derive(Parser)]
#[command(name = "tourdesk", about = "Admin console for a tour-booking backend")]
struct Args {
    /// Backend base URL, e.g. http://localhost:5000/api
    #[arg(long)]
    base_url: Option<String>,

    /// Route to open first, e.g. /bookings or /tours/<id>
    #[arg(long)]
    route: Option<String>,

    /// Bookings fetched per page
    #[arg(long)]
    page_size: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the token. Reads the password from TOURDESK_PASSWORD or stdin.
    Login {
        #[arg(long)]
        email: String,
    },
    /// Forget the stored token
    Logout,
    /// Download one month of bookings as CSV
    Export { year: i32, month: u32 },
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("tourdesk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using defaults");
        log::warn!("Config error: {}", e);
        Default::default()
    });
    let cfg = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            page_size: args.page_size,
        },
    );
    log::info!("Tourdesk starting against {}", cfg.base_url);

    let store = Arc::new(FileCredentialStore::new(&cfg.session_file));
    let credentials: Arc<dyn CredentialStore> = store.clone();
    let client = ApiClient::with_timeout(&cfg.base_url, credentials, cfg.request_timeout)
        .map_err(io::Error::other)?;

    match args.command {
        Some(Command::Login { email }) => {
            let password = match std::env::var("TOURDESK_PASSWORD") {
                Ok(password) => password,
                Err(_) => read_password()?,
            };
            let request = LoginRequest { email, password };
            client
                .auth()
                .login(&request)
                .await
                .map_err(io::Error::other)?;
            println!("Signed in as {}", request.email);
        }
        Some(Command::Logout) => {
            client.auth().logout().map_err(io::Error::other)?;
            println!("Signed out");
        }
        Some(Command::Export { year, month }) => {
            let path = client
                .bookings()
                .export_month(year, month, &cfg.download_dir)
                .await
                .map_err(io::Error::other)?;
            println!("Saved {}", path.display());
        }
        None => {
            let app = App::from_config(store.token().is_some(), &cfg);
            let start = Route::parse(args.route.as_deref().unwrap_or("/"));
            let backend = Arc::new(HttpBackend::new(client, cfg.download_dir.clone()));
            tui::run(app, backend, start)?;
        }
    }
    Ok(())
}

fn read_password() -> io::Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
