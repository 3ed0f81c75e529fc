use crate::BaseCommand;
use anyhow::{Context, Result, ensure};
use nwm_core::Command;
use nwm_core::utils::modmask_lookup;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub command: BaseCommand,
    #[serde(default)]
    pub value: String,
    pub modifier: Option<Modifier>,
    pub key: String,
}

impl Keybind {
    /// Resolves the binding into the chord and command the manager works with. `modkey` in
    /// the modifier list stands for the configured modkey.
    ///
    /// # Errors
    ///
    /// Errors when the value doesn't parse as the argument the command needs.
    pub fn try_convert_to_core_keybind(&self, modkey: &str) -> Result<nwm_core::Keybind> {
        let command = self.command()?;
        let modifiers: Vec<String> = self
            .modifier
            .iter()
            .flatten()
            .map(|m| if m == "modkey" { modkey.to_owned() } else { m })
            .collect();
        Ok(nwm_core::Keybind {
            modifier: modmask_lookup::into_modmask(&modifiers),
            key: self.key.clone(),
            command,
        })
    }

    fn command(&self) -> Result<Command> {
        let value = self.value.trim();
        let command = match self.command {
            BaseCommand::Execute => {
                ensure!(!value.is_empty(), "value must not be empty");
                Command::Execute(value.to_owned())
            }
            BaseCommand::CloseWindow => Command::CloseWindow,
            BaseCommand::FocusNext => Command::FocusNext,
            BaseCommand::FocusPrev => Command::FocusPrev,
            BaseCommand::SwapNext => Command::SwapNext,
            BaseCommand::SwapPrev => Command::SwapPrev,
            BaseCommand::ResizeMaster => Command::ResizeMaster(
                i32::from_str(value).context("invalid pixel value for ResizeMaster")?,
            ),
            BaseCommand::ScrollLeft => Command::ScrollLeft,
            BaseCommand::ScrollRight => Command::ScrollRight,
            BaseCommand::ToggleLayout => Command::ToggleLayout,
            BaseCommand::ToggleGap => Command::ToggleGap,
            BaseCommand::ToggleBar => Command::ToggleBar,
            BaseCommand::ToggleFloat => Command::ToggleFloat,
            BaseCommand::ToggleFullscreen => Command::ToggleFullscreen,
            BaseCommand::ToggleScrollMaximize => Command::ToggleScrollMaximize,
            BaseCommand::SwitchWorkspace => Command::SwitchWorkspace(
                usize::from_str(value).context("invalid index value for SwitchWorkspace")?,
            ),
            BaseCommand::MoveToWorkspace => Command::MoveToWorkspace(
                usize::from_str(value).context("invalid index value for MoveToWorkspace")?,
            ),
            BaseCommand::FocusMonitor => Command::FocusMonitor(
                usize::from_str(value).context("invalid index value for FocusMonitor")?,
            ),
            BaseCommand::SetScrollVisible => Command::SetScrollVisible(
                i32::from_str(value).context("invalid count for SetScrollVisible")?,
            ),
            BaseCommand::IncrementScrollVisible => Command::IncrementScrollVisible,
            BaseCommand::DecrementScrollVisible => Command::DecrementScrollVisible,
            BaseCommand::Quit => Command::Quit { restart: false },
            BaseCommand::Restart => Command::Quit { restart: true },
        };
        Ok(command)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl From<Modifier> for Vec<String> {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Single(modifier) => vec![modifier],
            Modifier::List(modifiers) => modifiers,
        }
    }
}

impl IntoIterator for &Modifier {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        Vec::from(self.clone()).into_iter()
    }
}

impl From<Vec<&str>> for Modifier {
    fn from(l: Vec<&str>) -> Self {
        Self::List(l.into_iter().map(str::to_owned).collect())
    }
}

impl From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{modifier}"),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwm_core::utils::modmask_lookup::ModMask;

    fn bind(command: BaseCommand, value: &str, modifier: Option<Modifier>) -> Keybind {
        Keybind {
            command,
            value: value.to_owned(),
            modifier,
            key: "x".to_owned(),
        }
    }

    #[test]
    fn modkey_is_substituted_in_the_modifier_list() {
        let keybind = bind(
            BaseCommand::MoveToWorkspace,
            "3",
            Some(vec!["modkey", "Shift"].into()),
        );
        let converted = keybind.try_convert_to_core_keybind("Mod1").unwrap();
        assert_eq!(converted.modifier, ModMask::Alt | ModMask::Shift);
        assert_eq!(converted.command, Command::MoveToWorkspace(3));
        assert_eq!(converted.key, "x");
    }

    #[test]
    fn missing_modifier_means_no_modifier() {
        let keybind = bind(BaseCommand::ToggleBar, "", None);
        let converted = keybind.try_convert_to_core_keybind("Mod4").unwrap();
        assert_eq!(converted.modifier, ModMask::Zero);
        assert_eq!(converted.command, Command::ToggleBar);
    }

    #[test]
    fn arguments_are_parsed_per_command() {
        let resize = bind(BaseCommand::ResizeMaster, "-60", Some("modkey".into()));
        let converted = resize.try_convert_to_core_keybind("Mod4").unwrap();
        assert_eq!(converted.command, Command::ResizeMaster(-60));

        let restart = bind(BaseCommand::Restart, "", Some("modkey".into()));
        let converted = restart.try_convert_to_core_keybind("Mod4").unwrap();
        assert_eq!(converted.command, Command::Quit { restart: true });
    }

    #[test]
    fn bad_values_are_rejected() {
        let modifier = Some(Modifier::from("modkey"));
        assert!(
            bind(BaseCommand::Execute, "  ", modifier.clone())
                .try_convert_to_core_keybind("Mod4")
                .is_err()
        );
        assert!(
            bind(BaseCommand::SwitchWorkspace, "two", modifier.clone())
                .try_convert_to_core_keybind("Mod4")
                .is_err()
        );
        assert!(
            bind(BaseCommand::SetScrollVisible, "", modifier)
                .try_convert_to_core_keybind("Mod4")
                .is_err()
        );
    }
}
