#![deny(warnings)]
pub mod belief;
pub mod game;
pub mod guess;
pub mod hooks;
pub mod host;
pub mod model;
pub mod persona;
pub mod power;
pub mod score;
pub mod wait;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "veil"
    }

    pub const fn codename() -> &'static str {
        "Hidden Hand"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
