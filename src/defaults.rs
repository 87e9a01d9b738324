use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;

static CONFIG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/config");

pub const APP_DIR: &str = "monopoly-watch";

// Copies the bundled config files into the user config directory. Files the
// user already has are left alone.
pub fn ensure_config() {
	let Some(user_config) = dirs::config_dir() else {
		return;
	};
	extract_dir(&CONFIG_DIR, &user_config.join(APP_DIR));
}

fn extract_dir(dir: &Dir, dest: &Path) {
	for file in dir.files() {
		let file_dest = dest.join(file.path());
		if file_dest.exists() {
			continue;
		}
		if let Some(parent) = file_dest.parent() {
			let _ = fs::create_dir_all(parent);
		}
		let _ = fs::write(&file_dest, file.contents());
	}

	for subdir in dir.dirs() {
		extract_dir(subdir, dest);
	}
}

pub fn bundled_client_config() -> Option<&'static str> {
	CONFIG_DIR.get_file("client.toml").and_then(|f| f.contents_utf8())
}

pub fn list_themes() -> Vec<String> {
	let mut themes: Vec<String> = CONFIG_DIR
		.get_dir("themes")
		.map(|dir| {
			dir.files()
				.filter_map(|f| f.path().file_stem())
				.map(|stem| stem.to_string_lossy().to_string())
				.collect()
		})
		.unwrap_or_default();

	if let Some(config_dir) = dirs::config_dir() {
		let user_themes = config_dir.join(APP_DIR).join("themes");
		if let Ok(entries) = fs::read_dir(user_themes) {
			for path in entries.flatten().map(|e| e.path()) {
				if path.extension().map(|e| e == "toml").unwrap_or(false) {
					if let Some(stem) = path.file_stem() {
						let name = stem.to_string_lossy().to_string();
						if !themes.contains(&name) {
							themes.push(name);
						}
					}
				}
			}
		}
	}

	themes.sort();
	themes
}
