mod resolve;
mod server;
mod wiki;

pub const USER_AGENT: &str = concat!("regionwiki/", env!("CARGO_PKG_VERSION"));

use clap::{Parser, Subcommand};
use tracing::info;
use wiki::{Lang, WikiClient};

const DEFAULT_PORT: u16 = 3000;

#[derive(Parser)]
#[command(name = "regionwiki", version, about = "Look up Wikipedia articles for administrative divisions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve GET /wiki for the map UI
    Serve {
        /// Port to listen on (default: $PORT, then 3000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Resolve one name and print the result as JSON
    Resolve {
        /// Division name, e.g. "Guro-gu"
        target: String,
        /// Containing region, e.g. "Seoul"
        parent: String,
        /// Wikipedia edition: "en" or "ko"
        #[arg(long, default_value_t = Lang::default())]
        lang: Lang,
        /// Print only the sanitized HTML
        #[arg(long)]
        html: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("regionwiki=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let client = WikiClient::new()?;

    match cli.command {
        Command::Serve { port } => {
            let port = port
                .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
                .unwrap_or(DEFAULT_PORT);
            info!(port, "starting regionwiki server");
            server::serve(client, port)
                .await
                .inspect_err(|e| tracing::error!("server failed: {e}"))?;
            info!("server stopped");
        }
        Command::Resolve {
            target,
            parent,
            lang,
            html,
        } => match resolve::resolve(&client, &target, &parent, lang).await? {
            Some(article) if html => println!("{}", article.html()),
            Some(article) => println!("{}", serde_json::to_string_pretty(&article)?),
            None => {
                info!(name = %target, parent = %parent, "no article found");
                println!("null");
            }
        },
    }

    Ok(())
}
