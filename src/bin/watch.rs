use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
	event::{self, Event},
	execute,
	terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use monopoly_watch::config::{self, ClientConfig};
use monopoly_watch::defaults;
use monopoly_watch::logging;
use monopoly_watch::net::WsConnector;
use monopoly_watch::theme::Theme;
use monopoly_watch::tui::WatchUI;
use monopoly_watch::Session;

#[derive(Parser)]
#[command(name = "monopoly-watch")]
#[command(about = "Watch a live Monopoly game")]
struct Cli {
	#[arg(short, long, env = "MONOPOLY_ENDPOINT")]
	endpoint: Option<String>,

	#[arg(short, long, env = "MONOPOLY_THEME")]
	theme: Option<String>,

	#[arg(short, long)]
	config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<ClientConfig, String> {
	let config = config::load_client_or_default(cli.config.as_deref())?
		.with_endpoint(cli.endpoint.clone())
		.with_theme(cli.theme.clone());
	config.validate()?;
	Ok(config)
}

fn main() -> io::Result<()> {
	let cli = Cli::parse();
	defaults::ensure_config();

	let config = match load_config(&cli) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("{}", e);
			std::process::exit(1);
		}
	};
	logging::init(config.logging.dir.clone(), config.logging.enabled);

	let theme_name = config.theme_name().to_string();
	let theme = Theme::load_named(&theme_name).unwrap_or_default();

	let runtime = tokio::runtime::Runtime::new()?;
	let mut session = Session::new(&config, WsConnector::new(runtime.handle().clone()));
	let mut ui = WatchUI::new(theme, theme_name);
	session.connect();

	enable_raw_mode()?;
	let mut stdout = stdout();
	execute!(stdout, EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	let result = run_app(&mut terminal, &mut ui, &mut session);

	session.disconnect();
	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

	result
}

fn run_app(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	ui: &mut WatchUI,
	session: &mut Session<WsConnector>,
) -> io::Result<()> {
	loop {
		session.poll();

		terminal.draw(|f| ui.render(f, session))?;

		if event::poll(Duration::from_millis(50))? {
			if let Event::Key(key) = event::read()? {
				let action = ui.handle_key(key);
				if !ui.perform(action, session) {
					return Ok(());
				}
			}
		}
	}
}
