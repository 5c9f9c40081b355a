/// User preferences persisted alongside the workout data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub name: Option<String>,
    /// Rest timer duration in seconds.
    pub rest_timer: u32,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: None,
            rest_timer: 90,
            dark_mode: true,
        }
    }
}
