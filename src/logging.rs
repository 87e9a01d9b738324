use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;

struct LogState {
	enabled: bool,
	dir: Option<PathBuf>,
	file: Option<std::fs::File>,
	current_date: String,
	session_id: String,
	round: u32,
}

static LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
	enabled: false,
	dir: None,
	file: None,
	current_date: String::new(),
	session_id: String::new(),
	round: 0,
});

fn today() -> String {
	Local::now().format("%Y-%m-%d").to_string()
}

fn timestamp() -> String {
	Local::now().format("%H:%M:%S%.3f").to_string()
}

fn ensure_log_file(state: &mut LogState) {
	let date = today();
	if state.current_date != date || state.file.is_none() {
		let dir = state.dir.clone().unwrap_or_else(|| PathBuf::from("logs"));
		let _ = fs::create_dir_all(&dir);
		let path = dir.join(format!("monopoly-{}.log", date));
		if let Ok(file) = OpenOptions::new()
			.create(true)
			.append(true)
			.open(&path)
		{
			state.file = Some(file);
			state.current_date = date;
		}
	}
}

fn format_line(time: &str, session_id: &str, round: u32, module: &str, log_type: &str, message: &str) -> String {
	let session_id = if session_id.is_empty() { "--------" } else { session_id };
	format!(
		"[{}][{}][R{}][{}:{}] {}\n",
		time,
		session_id,
		round,
		module,
		log_type,
		message
	)
}

fn flatten(content: &str) -> String {
	content.replace('\n', " ").replace('\r', "")
}

pub fn init(dir: impl Into<PathBuf>, enabled: bool) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.dir = Some(dir.into());
		state.enabled = enabled;
		state.file = None;
	}
}

pub fn set_session_id(session_id: u64) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.session_id = format!("{:08x}", session_id & 0xFFFFFFFF);
	}
}

pub fn set_round(round: u32) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.round = round;
	}
}

pub fn log(module: &str, log_type: &str, message: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		if !state.enabled {
			return;
		}
		ensure_log_file(&mut state);

		let line = format_line(&timestamp(), &state.session_id, state.round, module, log_type, message);

		if let Some(ref mut file) = state.file {
			let _ = file.write_all(line.as_bytes());
			let _ = file.flush();
		}
	}
}

pub fn log_verbatim(module: &str, log_type: &str, label: &str, content: &str) {
	log(module, log_type, &format!("{}: <<<{}>>>", label, flatten(content)));
}

pub mod net {
	use super::{log, log_verbatim};

	pub fn connecting(endpoint: &str, link: u64) {
		log("Net", "CONNECT", &format!("link={} endpoint={}", link, endpoint));
	}

	pub fn opened(link: u64) {
		log("Net", "OPEN", &format!("link={}", link));
	}

	pub fn closed(link: u64) {
		log("Net", "CLOSE", &format!("link={}", link));
	}

	pub fn disconnected(reason: &str) {
		log("Net", "DISCONNECT", reason);
	}

	pub fn error(link: u64, msg: &str) {
		log("Net", "ERROR", &format!("link={}: {}", link, msg));
	}

	pub fn malformed(err: &str, payload: &str) {
		log_verbatim("Net", "MALFORMED", err, payload);
	}

	pub fn ignored(kind: &str) {
		log("Net", "IGNORED", &format!("message type '{}'", kind));
	}

	pub fn stale(link: u64, current: Option<u64>) {
		match current {
			Some(current) => log("Net", "STALE", &format!("link={} current={}", link, current)),
			None => log("Net", "STALE", &format!("link={} current=none", link)),
		}
	}

	pub fn send_failed(msg: &str) {
		log("Net", "SEND", &format!("failed: {}", msg));
	}
}

pub mod state {
	use super::log;

	pub fn applied(players: usize, game_log: usize, ai_log: usize, running: bool) {
		log(
			"State",
			"APPLY",
			&format!("players={} game_log={} ai_log={} running={}", players, game_log, ai_log, running),
		);
	}

	pub fn reset() {
		log("State", "RESET", "snapshot cleared");
	}
}

pub mod history {
	use super::{log, set_round};

	pub fn recorded(round: u32, players: usize) {
		set_round(round);
		log("History", "RECORD", &format!("round={} players={}", round, players));
	}

	pub fn reset(dropped: usize) {
		set_round(0);
		log("History", "RESET", &format!("dropped {} records", dropped));
	}
}

pub mod command {
	use super::log;

	pub fn sent(command: &str) {
		log("Command", "SENT", command);
	}

	pub fn skipped(command: &str, reason: &str) {
		log("Command", "SKIP", &format!("{}: {}", command, reason));
	}
}
