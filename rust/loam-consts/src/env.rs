//! Narrow interface to the host subsystems consulted by constant lookup.
//!
//! The windowing, preferences, localization, input, and networking layers
//! live elsewhere; this crate only ever asks them for scalars through
//! [`Environment`]. [`StaticEnvironment`] is a plain-data implementation for
//! tests and headless tools.

use std::collections::HashMap;

use strum::{Display, EnumIter};

/// The logical controls whose key-binding display names are exposed as
/// constants (`UP_KEY`, `DOWN_KEY`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Jump,
    Attack,
}

/// Read-only view of the host environment.
pub trait Environment {
    /// Whether the display runs at doubled scale.
    fn double_scale(&self) -> bool;
    fn screen_width(&self) -> i64;
    fn screen_height(&self) -> i64;
    /// True on hardware where expensive effects should be skipped.
    fn low_end_system(&self) -> bool;
    /// True on handheld/touch form factors.
    fn handheld_system(&self) -> bool;
    fn server_host(&self) -> String;
    fn server_port(&self) -> i64;
    fn username(&self) -> String;
    fn password(&self) -> String;
    /// Display name of the key currently bound to `control`.
    fn key_name(&self, control: Control) -> String;
    fn locale(&self) -> String;
    /// Feature flags the running build was compiled with.
    fn build_options(&self) -> Vec<String>;
}

/// Fixed-data [`Environment`].
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    pub double_scale: bool,
    pub screen_width: i64,
    pub screen_height: i64,
    pub low_end_system: bool,
    pub handheld_system: bool,
    pub server_host: String,
    pub server_port: i64,
    pub username: String,
    pub password: String,
    pub key_names: HashMap<Control, String>,
    pub locale: String,
    pub build_options: Vec<String>,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        let key_names = [
            (Control::Up, "Up"),
            (Control::Down, "Down"),
            (Control::Left, "Left"),
            (Control::Right, "Right"),
            (Control::Jump, "Space"),
            (Control::Attack, "Ctrl"),
        ]
        .into_iter()
        .map(|(control, name)| (control, name.to_string()))
        .collect();
        Self {
            double_scale: false,
            screen_width: 1024,
            screen_height: 768,
            low_end_system: false,
            handheld_system: false,
            server_host: "localhost".to_string(),
            server_port: 8000,
            username: String::new(),
            password: String::new(),
            key_names,
            locale: "en_US".to_string(),
            build_options: Vec::new(),
        }
    }
}

impl Environment for StaticEnvironment {
    fn double_scale(&self) -> bool {
        self.double_scale
    }
    fn screen_width(&self) -> i64 {
        self.screen_width
    }
    fn screen_height(&self) -> i64 {
        self.screen_height
    }
    fn low_end_system(&self) -> bool {
        self.low_end_system
    }
    fn handheld_system(&self) -> bool {
        self.handheld_system
    }
    fn server_host(&self) -> String {
        self.server_host.clone()
    }
    fn server_port(&self) -> i64 {
        self.server_port
    }
    fn username(&self) -> String {
        self.username.clone()
    }
    fn password(&self) -> String {
        self.password.clone()
    }
    fn key_name(&self, control: Control) -> String {
        self.key_names.get(&control).cloned().unwrap_or_default()
    }
    fn locale(&self) -> String {
        self.locale.clone()
    }
    fn build_options(&self) -> Vec<String> {
        self.build_options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn default_environment_names_every_control() {
        let env = StaticEnvironment::default();
        for control in Control::iter() {
            assert!(!env.key_name(control).is_empty(), "{control} unnamed");
        }
    }
}
