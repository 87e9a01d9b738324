use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
	style::{Modifier, Style},
	text::{Line, Span},
	widgets::{Block, Borders, Paragraph},
	Frame,
};

use crate::net::client::ConnectionState;
use crate::net::transport::Connector;
use crate::session::Session;
use crate::theme::Theme;
use crate::tui::layout::WatchLayout;
use crate::tui::widgets::{BoardWidget, GameLogWidget, HistoryChart, PlayersWidget, ReasoningWidget};
use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchAction {
	None,
	Start,
	Stop,
	Reconnect,
	Quit,
}

pub struct WatchUI {
	pub theme: Theme,
	theme_name: String,
	pub status_message: Option<String>,
}

impl WatchUI {
	pub fn new(theme: Theme, theme_name: String) -> Self {
		Self { theme, theme_name, status_message: None }
	}

	pub fn theme_name(&self) -> &str {
		&self.theme_name
	}

	pub fn handle_key(&mut self, key: KeyEvent) -> WatchAction {
		if key.kind != KeyEventKind::Press {
			return WatchAction::None;
		}
		if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
			return WatchAction::Quit;
		}
		match key.code {
			KeyCode::Char('s') => WatchAction::Start,
			KeyCode::Char('x') => WatchAction::Stop,
			KeyCode::Char('r') => WatchAction::Reconnect,
			KeyCode::Char('q') | KeyCode::Esc => WatchAction::Quit,
			KeyCode::Char('t') => {
				self.cycle_theme();
				WatchAction::None
			}
			_ => WatchAction::None,
		}
	}

	// Runs the action against the session and notes the outcome for the
	// status bar. Returns false once the viewer should exit.
	pub fn perform<C: Connector>(&mut self, action: WatchAction, session: &mut Session<C>) -> bool {
		match action {
			WatchAction::None => {}
			WatchAction::Start => {
				self.status_message = Some(if session.start_game() {
					"Start requested".to_string()
				} else {
					"Cannot start right now".to_string()
				});
			}
			WatchAction::Stop => {
				self.status_message = Some(if session.stop_game() {
					"Stop requested".to_string()
				} else {
					"Nothing to stop".to_string()
				});
			}
			WatchAction::Reconnect => {
				if session.connection_state().is_live() {
					self.status_message = Some("Already connected".to_string());
				} else {
					session.connect();
					self.status_message = Some(format!("Reconnecting to {}", session.endpoint()));
				}
			}
			WatchAction::Quit => return false,
		}
		true
	}

	pub fn cycle_theme(&mut self) {
		let available = Theme::list_available();
		if available.is_empty() {
			return;
		}

		let current_idx = available
			.iter()
			.position(|name| name == &self.theme_name)
			.unwrap_or(0);
		let next_name = &available[(current_idx + 1) % available.len()];

		match Theme::load_named(next_name) {
			Ok(theme) => {
				self.theme = theme;
				self.theme_name = next_name.clone();
				self.status_message = Some(format!("Theme: {}", next_name));
			}
			Err(e) => self.status_message = Some(e),
		}
	}

	pub fn render<C: Connector>(&self, frame: &mut Frame, session: &Session<C>) {
		let area = frame.area();
		let snapshot = session.snapshot();
		let theme = &self.theme;

		frame.render_widget(Block::default().style(Style::default().bg(theme.background())), area);

		let layout = WatchLayout::compute(area, snapshot.players.len());

		let state = session.connection_state();
		let mut status = vec![
			Span::styled(
				view::connection_banner(state, session.endpoint()),
				Style::default().fg(theme.connection(state)).add_modifier(Modifier::BOLD),
			),
			Span::raw("  |  "),
			Span::styled(view::status_banner(snapshot), Style::default().fg(theme.game_status(snapshot.is_running))),
		];
		if let Some(msg) = &self.status_message {
			status.push(Span::raw("  |  "));
			status.push(Span::raw(msg.as_str()));
		}
		let status_border = if state == ConnectionState::Error {
			theme.connection(state)
		} else {
			theme.players_border()
		};
		frame.render_widget(
			Paragraph::new(Line::from(status)).block(
				Block::default()
					.borders(Borders::ALL)
					.border_style(Style::default().fg(status_border))
					.title(" Monopoly Watch "),
			),
			layout.status,
		);

		frame.render_widget(BoardWidget::new(snapshot, theme), layout.board);

		let cards = view::player_cards(snapshot);
		frame.render_widget(PlayersWidget::new(&cards, theme), layout.players);

		frame.render_widget(GameLogWidget::new(&snapshot.game_log, theme), layout.game_log);

		let reasoning = view::reasoning_lines(&snapshot.ai_log);
		frame.render_widget(ReasoningWidget::new(&reasoning, theme), layout.reasoning);

		frame.render_widget(HistoryChart::new(session.history(), theme), layout.chart);

		frame.render_widget(
			Paragraph::new(" s start  x stop  r reconnect  t theme  q quit")
				.style(Style::default().fg(theme.unowned())),
			layout.help,
		);
	}
}
