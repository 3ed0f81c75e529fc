/// What an external status bar needs to label the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarStatus {
    pub labels: Vec<String>,
    pub active_workspace: usize,
    pub occupied: Vec<bool>,
    pub layout: String,
    pub title: Option<String>,
    pub visible: bool,
}
