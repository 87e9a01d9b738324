use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:5000/ws";

fn config_paths(filename: &str) -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(home) = std::env::var_os("HOME") {
		let user_config = PathBuf::from(home).join(".config/monopoly-watch").join(filename);
		paths.push(user_config);
	}

	paths.push(PathBuf::from("config").join(filename));

	paths
}

fn find_config(filename: &str) -> Option<PathBuf> {
	config_paths(filename).into_iter().find(|p| p.exists())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
	#[serde(default = "default_logging_enabled")]
	pub enabled: bool,
	#[serde(default = "default_log_dir")]
	pub dir: String,
}

fn default_logging_enabled() -> bool {
	true
}

fn default_log_dir() -> String {
	"logs".to_string()
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			enabled: default_logging_enabled(),
			dir: default_log_dir(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
	#[serde(default = "default_endpoint")]
	pub endpoint: String,
	#[serde(default)]
	pub theme: Option<String>,
	#[serde(default)]
	pub reasoning_log_limit: Option<usize>,
	#[serde(default)]
	pub logging: LoggingConfig,
}

fn default_endpoint() -> String {
	DEFAULT_ENDPOINT.to_string()
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			endpoint: default_endpoint(),
			theme: None,
			reasoning_log_limit: None,
			logging: LoggingConfig::default(),
		}
	}
}

impl ClientConfig {
	pub fn validate(&self) -> Result<(), String> {
		if !(self.endpoint.starts_with("ws://") || self.endpoint.starts_with("wss://")) {
			return Err(format!("Endpoint '{}' must start with ws:// or wss://", self.endpoint));
		}
		if self.reasoning_log_limit == Some(0) {
			return Err("reasoning_log_limit must be at least 1".to_string());
		}
		Ok(())
	}

	pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
		if let Some(endpoint) = endpoint {
			self.endpoint = endpoint;
		}
		self
	}

	pub fn with_theme(mut self, theme: Option<String>) -> Self {
		if theme.is_some() {
			self.theme = theme;
		}
		self
	}

	pub fn theme_name(&self) -> &str {
		self.theme.as_deref().unwrap_or("classic")
	}
}

pub fn parse_client(content: &str) -> Result<ClientConfig, String> {
	let config: ClientConfig = toml::from_str(content)
		.map_err(|e| format!("Failed to parse client config: {}", e))?;
	config.validate()?;
	Ok(config)
}

pub fn load_client<P: AsRef<Path>>(path: P) -> Result<ClientConfig, String> {
	let content = fs::read_to_string(&path)
		.map_err(|e| format!("Failed to read {}: {}", path.as_ref().display(), e))?;

	parse_client(&content)
}

// An explicit path must exist; otherwise the usual search applies and a
// missing file means defaults.
pub fn load_client_or_default(explicit: Option<&Path>) -> Result<ClientConfig, String> {
	match explicit {
		Some(path) => load_client(path),
		None => match find_config("client.toml") {
			Some(path) => load_client(&path),
			None => Ok(ClientConfig::default()),
		},
	}
}
