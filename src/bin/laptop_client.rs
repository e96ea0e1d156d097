//! Demo client for the laptop catalog.
//!
//! ```text
//! laptop-client --username admin1 --password secret create --count 3
//! laptop-client search --max-price 3000 --min-cores 4 --min-ghz 2.5 --min-ram-gb 8
//! laptop-client upload --image tmp/laptop.jpg
//! laptop-client --username user1 rate --count 3
//! ```

use clap::{Parser, Subcommand};
use laptop_catalog::client::{
    AccessToken, AuthClient, AuthInterceptorClient, LaptopClient, TokenRefresher,
};
use laptop_catalog::pb::{memory, Filter, Memory};
use laptop_catalog::sample;
use laptop_catalog::telemetry::{get_subscriber, init_subscriber};
use std::path::PathBuf;
use std::time::Duration;
use tonic::transport::Endpoint;

#[derive(Parser, Debug)]
#[command(name = "laptop-client", version, about = "Talk to a laptop catalog server")]
struct Cli {
    /// Server address, e.g. http://127.0.0.1:8080
    #[arg(long, env = "CATALOG_SERVER_ADDRESS", default_value = "http://127.0.0.1:8080")]
    server_address: String,
    #[arg(long, env = "CATALOG_USERNAME", default_value = "admin1")]
    username: String,
    #[arg(long, env = "CATALOG_PASSWORD", default_value = "secret")]
    password: String,
    /// How often the access token is refreshed, in seconds
    #[arg(long, default_value_t = 30)]
    refresh_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create random laptops
    Create {
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Search the catalog
    Search {
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long, default_value_t = 0)]
        min_cores: u32,
        #[arg(long, default_value_t = 0.0)]
        min_ghz: f64,
        #[arg(long, default_value_t = 0)]
        min_ram_gb: u64,
    },
    /// Create a random laptop and upload an image for it
    Upload {
        #[arg(long, value_name = "FILE")]
        image: PathBuf,
    },
    /// Create random laptops and rate each of them with random scores
    Rate {
        #[arg(long, default_value_t = 3)]
        count: usize,
        /// Rounds of rating
        #[arg(long, default_value_t = 1)]
        rounds: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("laptop-client".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber).map_err(|err| anyhow::anyhow!(err))?;

    let cli = Cli::parse();
    tracing::info!("dial server {}", cli.server_address);

    let channel = Endpoint::from_shared(cli.server_address.clone())?
        .connect()
        .await?;

    let token = AccessToken::default();
    let auth = AuthClient::new(channel.clone(), cli.username.clone(), cli.password.clone());
    let refresher =
        TokenRefresher::start(auth, token.clone(), Duration::from_secs(cli.refresh_secs)).await?;

    let client = LaptopClient::new(channel, AuthInterceptorClient::new(token));
    let result = execute(&client, cli.command).await;

    refresher.stop().await;
    result
}

async fn execute(client: &LaptopClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Create { count } => {
            for _ in 0..count {
                client.create_laptop(sample::new_laptop()).await?;
            }
        }
        Command::Search {
            max_price,
            min_cores,
            min_ghz,
            min_ram_gb,
        } => {
            let filter = Filter {
                max_price_usd: max_price.unwrap_or(f64::INFINITY),
                min_cpu_cores: min_cores,
                min_cpu_ghz: min_ghz,
                min_ram: Some(Memory::new(min_ram_gb, memory::Unit::Gigabyte)),
            };
            let found = client.search_laptop(filter).await?;
            tracing::info!("{} laptops found", found.len());
        }
        Command::Upload { image } => {
            let laptop = sample::new_laptop();
            let laptop_id = client
                .create_laptop(laptop.clone())
                .await?
                .unwrap_or(laptop.id);
            client.upload_image(&laptop_id, &image).await?;
        }
        Command::Rate { count, rounds } => {
            let mut laptop_ids = Vec::with_capacity(count);
            for _ in 0..count {
                let laptop = sample::new_laptop();
                let id = client
                    .create_laptop(laptop.clone())
                    .await?
                    .unwrap_or(laptop.id);
                laptop_ids.push(id);
            }

            for _ in 0..rounds {
                let scores: Vec<f64> = laptop_ids.iter().map(|_| sample::new_score()).collect();
                client.rate_laptop(&laptop_ids, &scores).await?;
            }
        }
    }
    Ok(())
}
