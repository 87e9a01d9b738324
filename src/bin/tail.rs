use std::path::PathBuf;

use clap::Parser;

use monopoly_watch::config::{self, ClientConfig};
use monopoly_watch::logging;
use monopoly_watch::net::{ConnectionState, WsConnector};
use monopoly_watch::state::Observation;
use monopoly_watch::view;
use monopoly_watch::{Session, Step};

#[derive(Parser)]
#[command(name = "monopoly-tail")]
#[command(about = "Follow a live Monopoly game from the terminal")]
struct Cli {
	#[arg(short, long, env = "MONOPOLY_ENDPOINT")]
	endpoint: Option<String>,

	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Ask the server to start a game once connected
	#[arg(long)]
	start: bool,
}

fn load_config(cli: &Cli) -> Result<ClientConfig, String> {
	let config = config::load_client_or_default(cli.config.as_deref())?.with_endpoint(cli.endpoint.clone());
	config.validate()?;
	Ok(config)
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	let config = match load_config(&cli) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("{}", e);
			std::process::exit(1);
		}
	};
	logging::init(config.logging.dir.clone(), config.logging.enabled);

	let mut session = Session::new(&config, WsConnector::current());
	let mut start_pending = cli.start;
	let mut last_line: Option<String> = None;

	println!("[conn] connecting to {}", session.endpoint());
	session.connect();

	let failed = loop {
		let Some(step) = session.next_event().await else {
			break false;
		};
		match step {
			Step::Transport(state) => {
				println!("[conn] {}", state.label());
				match state {
					ConnectionState::Connected if start_pending => {
						start_pending = false;
						if session.start_game() {
							println!("[cmd] start_game sent");
						}
					}
					ConnectionState::Disconnected => break false,
					ConnectionState::Error => break true,
					_ => {}
				}
			}
			Step::Update(observation) => {
				let snapshot = session.snapshot();
				if let Some(line) = snapshot.game_log.last() {
					if last_line.as_ref() != Some(line) {
						println!("[game] {}", line);
						last_line = Some(line.clone());
					}
				}
				match observation {
					Observation::Reset => println!("[hist] new game, history cleared"),
					Observation::Recorded(round) => {
						if let Some(record) = session.history().record(round) {
							println!("[hist] round {}", round);
							for row in view::tooltip(record) {
								println!(
									"       {}: {} properties, {} ({})",
									row.name, row.property_count, row.money, row.properties
								);
							}
						}
					}
					Observation::Unchanged(_) => {}
				}
			}
		}
	};

	session.disconnect();
	if failed {
		std::process::exit(1);
	}
}
