use std::net::SocketAddr;

use clap::{Arg, Command};
use tracing::info;

use crate::config::AppConfig;

/// CLI entry point for the tripflow server
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("tripflow")
        .version("0.1.0")
        .about("Travel-assistant backend proxying chat and itinerary generation to an LLM completion API")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Address to bind the HTTP server to")
                .default_value("127.0.0.1"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to listen on")
                .default_value("5000"),
        )
        .get_matches();

    let host = matches.get_one::<String>("host").unwrap();
    let port: u16 = matches.get_one::<String>("port").unwrap().parse()?;
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let config = AppConfig::from_env();
    info!("Listening on {}", addr);

    crate::server::run_server(config, addr).await?;
    Ok(())
}
