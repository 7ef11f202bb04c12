use std::path::PathBuf;

use clap::Parser;
use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use common::{log, logger};

use bingo_server::broadcaster::Broadcaster;
use bingo_server::room::BingoRoom;
use bingo_server::server_config::{ServerConfig, DEFAULT_CONFIG_PATH};
use bingo_server::web_server::{run_web_server, WebServerState};

#[derive(Parser)]
#[command(name = "bingo_server", about = "Single-room multiplayer bingo server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides the port of `listen_addr`.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the default config to `--config` and exit.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Bingo".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> =
        ConfigManager::from_yaml_file(&args.config);

    if args.write_default_config {
        config_manager.set_config(&ServerConfig::default())?;
        log!("Wrote default config to {}", args.config.display());
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(port) = args.port {
        config = config.with_port(port)?;
    }
    let addr = config.socket_addr()?;

    let broadcaster = Broadcaster::new();
    let room = BingoRoom::new(broadcaster.clone(), config.reset_delay());
    let state = WebServerState {
        room,
        broadcaster,
        client_channel_capacity: config.client_channel_capacity,
    };

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    run_web_server(addr, state, config.static_files_path.clone(), shutdown_signal).await?;

    log!("Server shut down gracefully");
    Ok(())
}
