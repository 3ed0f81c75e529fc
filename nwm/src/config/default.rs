use super::{Config, Keybind, Modifier};
use crate::BaseCommand;
use nwm_core::config::BarPosition;
use nwm_core::models::FocusBehaviour;

const WORKSPACES_NUM: usize = 9;

fn bind(modifier: &[&str], key: &str, command: BaseCommand, value: &str) -> Keybind {
    Keybind {
        command,
        value: value.to_owned(),
        modifier: Some(Modifier::from(modifier.to_vec())),
        key: key.to_owned(),
    }
}

impl Default for Config {
    fn default() -> Self {
        const MOD: &[&str] = &["modkey"];
        const MOD_SHIFT: &[&str] = &["modkey", "Shift"];

        let mut keybind = vec![
            bind(MOD, "Return", BaseCommand::Execute, "st"),
            bind(MOD, "d", BaseCommand::Execute, "dmenu_run"),
            bind(MOD, "r", BaseCommand::ToggleBar, ""),
            bind(MOD, "q", BaseCommand::CloseWindow, ""),
            bind(MOD, "a", BaseCommand::ToggleGap, ""),
            bind(MOD, "t", BaseCommand::ToggleLayout, ""),
            bind(MOD, "f", BaseCommand::ToggleFullscreen, ""),
            bind(MOD_SHIFT, "f", BaseCommand::ToggleScrollMaximize, ""),
            bind(MOD_SHIFT, "space", BaseCommand::ToggleFloat, ""),
            bind(MOD, "j", BaseCommand::FocusNext, ""),
            bind(MOD, "k", BaseCommand::FocusPrev, ""),
            bind(MOD_SHIFT, "h", BaseCommand::SwapPrev, ""),
            bind(MOD_SHIFT, "l", BaseCommand::SwapNext, ""),
            bind(MOD, "h", BaseCommand::ResizeMaster, "-"),
            bind(MOD, "l", BaseCommand::ResizeMaster, "+"),
            bind(MOD, "Left", BaseCommand::ScrollLeft, ""),
            bind(MOD, "Right", BaseCommand::ScrollRight, ""),
            bind(MOD, "equal", BaseCommand::IncrementScrollVisible, ""),
            bind(MOD, "minus", BaseCommand::DecrementScrollVisible, ""),
            bind(MOD_SHIFT, "q", BaseCommand::Quit, ""),
            bind(MOD_SHIFT, "r", BaseCommand::Restart, ""),
        ];

        for (monitor, key) in ["comma", "period", "slash"].into_iter().enumerate() {
            keybind.push(bind(
                MOD,
                key,
                BaseCommand::FocusMonitor,
                &monitor.to_string(),
            ));
            keybind.push(bind(
                MOD_SHIFT,
                key,
                BaseCommand::SetScrollVisible,
                &(monitor + 2).to_string(),
            ));
        }

        // add "goto workspace" and "move to workspace" for each workspace
        for i in 0..WORKSPACES_NUM {
            let key = (i + 1).to_string();
            keybind.push(bind(MOD, &key, BaseCommand::SwitchWorkspace, &i.to_string()));
            keybind.push(bind(MOD_SHIFT, &key, BaseCommand::MoveToWorkspace, &i.to_string()));
        }

        Self {
            modkey: "Mod4".to_owned(),
            mousekey: Some("Mod4".into()),
            workspaces: (1..=WORKSPACES_NUM).map(|i| i.to_string()).collect(),
            focus_behaviour: FocusBehaviour::Sloppy,
            border_width: 3,
            default_border_color: "#181818".to_owned(),
            floating_border_color: "#181818".to_owned(),
            focused_border_color: "#005577".to_owned(),
            gap_size: 2,
            gaps_enabled: true,
            bar_height: 20,
            bar_position: BarPosition::Top,
            bar_visible: true,
            resize_step: 60,
            scroll_step: 0,
            scroll_visible: 2,
            master_factor: 0.5,
            status_interval_ms: 1000,
            keybind,
        }
    }
}
