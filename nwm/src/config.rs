//! `nwm` general configuration

mod default;
mod keybind;

pub use self::keybind::{Keybind, Modifier};

use anyhow::Result;
use nwm_core::config::BarPosition;
use nwm_core::models::FocusBehaviour;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use xdg::BaseDirectories;

/// General configuration
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub modkey: String,
    pub mousekey: Option<Modifier>,
    pub workspaces: Vec<String>,
    pub focus_behaviour: FocusBehaviour,
    pub border_width: i32,
    pub default_border_color: String,
    pub floating_border_color: String,
    pub focused_border_color: String,
    pub gap_size: i32,
    pub gaps_enabled: bool,
    pub bar_height: i32,
    pub bar_position: BarPosition,
    pub bar_visible: bool,
    /// Pixels `ResizeMaster` moves the master edge when a binding gives `+` or `-`.
    pub resize_step: i32,
    pub scroll_step: i32,
    pub scroll_visible: i32,
    pub master_factor: f32,
    pub status_interval_ms: u64,
    // NOTE: any newly added parameters must be inserted before `pub keybind: Vec<Keybind>,`
    //       tables have to come after plain values in TOML.
    pub keybind: Vec<Keybind>,
}

#[must_use]
pub fn load() -> Config {
    load_from_file()
        .map_err(|err| tracing::error!("Unable to load the config, using defaults: {:?}", err))
        .unwrap_or_default()
}

/// # Errors
///
/// Function will throw an error if `BaseDirectories` doesn't exist, if user doesn't have
/// permissions to place config.toml, if config.toml cannot be read (access rights, malformed
/// file, etc.).
/// Function can also error from inability to save config.toml (if it is the first time running
/// `nwm`).
fn load_from_file() -> Result<Config> {
    tracing::debug!("Loading config file");
    let path = BaseDirectories::with_prefix("nwm")?;
    let config_file = path.place_config_file("config.toml")?;
    load_from_path(&config_file)
}

/// Reads the config at `path`, writing the defaults there first if there is nothing yet.
///
/// # Errors
///
/// Errors when the file can't be read, parsed or written.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if path.exists() {
        tracing::debug!("Config file '{}' found.", path.to_string_lossy());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    } else {
        tracing::debug!("Config file not found. Using default config file.");
        let config = Config::default();
        let toml = toml::to_string(&config)?;
        fs::write(path, toml)?;
        Ok(config)
    }
}

impl Config {
    fn resize_amount(&self, value: &str) -> Option<String> {
        match value.trim() {
            "+" | "" => Some(self.resize_step.to_string()),
            "-" => Some((-self.resize_step).to_string()),
            _ => None,
        }
    }
}

impl nwm_core::Config for Config {
    fn workspace_labels(&self) -> Vec<String> {
        if self.workspaces.is_empty() {
            return Self::default().workspaces;
        }
        self.workspaces.clone()
    }

    fn mapped_bindings(&self) -> Vec<nwm_core::Keybind> {
        self.keybind
            .iter()
            .filter_map(|keybind| {
                let mut keybind = keybind.clone();
                if keybind.command == crate::BaseCommand::ResizeMaster {
                    if let Some(amount) = self.resize_amount(&keybind.value) {
                        keybind.value = amount;
                    }
                }
                match keybind.try_convert_to_core_keybind(&self.modkey) {
                    Ok(core_keybind) => Some(core_keybind),
                    Err(err) => {
                        tracing::warn!("Invalid key binding: {}\n{:?}", err, keybind);
                        None
                    }
                }
            })
            .collect()
    }

    fn mousekey(&self) -> Vec<String> {
        self.mousekey
            .clone()
            .unwrap_or_else(|| "Mod4".into())
            .into()
    }

    fn focus_behaviour(&self) -> FocusBehaviour {
        self.focus_behaviour
    }

    fn border_width(&self) -> i32 {
        self.border_width
    }

    fn default_border_color(&self) -> String {
        self.default_border_color.clone()
    }

    fn floating_border_color(&self) -> String {
        self.floating_border_color.clone()
    }

    fn focused_border_color(&self) -> String {
        self.focused_border_color.clone()
    }

    fn gap_size(&self) -> i32 {
        self.gap_size
    }

    fn gaps_enabled(&self) -> bool {
        self.gaps_enabled
    }

    fn bar_height(&self) -> i32 {
        self.bar_height
    }

    fn bar_position(&self) -> BarPosition {
        self.bar_position
    }

    fn bar_visible(&self) -> bool {
        self.bar_visible
    }

    fn scroll_step(&self) -> i32 {
        self.scroll_step
    }

    fn scroll_visible(&self) -> i32 {
        self.scroll_visible
    }

    fn master_factor(&self) -> f32 {
        self.master_factor
    }

    fn status_interval_ms(&self) -> u64 {
        self.status_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwm_core::Command;
    use nwm_core::Config as _;
    use nwm_core::utils::modmask_lookup::ModMask;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.workspace_labels().len(), 9);
        assert_eq!(config.workspace_labels()[0], "1");
        assert_eq!(config.border_width, 3);
        assert_eq!(config.default_border_color, "#181818");
        assert_eq!(config.focused_border_color, "#005577");
        assert_eq!(config.gap_size, 2);
        assert!(config.gaps_enabled);
        assert_eq!(config.bar_height, 20);
        assert_eq!(config.bar_position, BarPosition::Top);
        assert_eq!(config.scroll_step, 0);
        assert_eq!(config.scroll_visible, 2);
        assert_eq!(config.status_interval_ms, 1000);
        assert_eq!(config.mousekey(), vec!["Mod4".to_owned()]);
    }

    #[test]
    fn every_default_binding_maps() {
        let config = Config::default();
        assert_eq!(config.mapped_bindings().len(), config.keybind.len());
    }

    #[test]
    fn resize_bindings_use_the_resize_step() {
        let config = Config::default();
        let shrink = config
            .mapped_bindings()
            .into_iter()
            .find(|k| k.key == "h" && k.modifier == ModMask::Super)
            .map(|k| k.command);
        assert_eq!(shrink, Some(Command::ResizeMaster(-60)));
    }

    #[test]
    fn invalid_bindings_are_dropped() {
        let config = Config {
            keybind: vec![Keybind {
                command: crate::BaseCommand::SwitchWorkspace,
                value: "first".to_owned(),
                modifier: Some("modkey".into()),
                key: "1".to_owned(),
            }],
            ..Config::default()
        };
        assert!(config.mapped_bindings().is_empty());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        let reread = load_from_path(&path).unwrap();
        assert_eq!(reread, config);
    }

    #[test]
    fn partial_files_fall_back_to_defaults_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "gap_size = 8\nworkspaces = [\"web\", \"code\"]\nfocus_behaviour = \"ClickTo\"\n",
        )
        .unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.gap_size, 8);
        assert_eq!(config.workspace_labels(), vec!["web", "code"]);
        assert_eq!(config.focus_behaviour, FocusBehaviour::ClickTo);
        assert_eq!(config.border_width, 3);
        assert!(config.keybind.len() > 10);
    }

    #[test]
    fn malformed_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "gap_size = \"wide\"").unwrap();
        assert!(load_from_path(&path).is_err());
    }
}
