//! `[serve]` section configuration.
//!
//! Contains reference server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5277                 # HTTP port number
//! mode = "development"        # "development" (read from `base`) or "compiled" (load `pack`)
//! base = "web/dist"           # Directory for development mode
//! pack = "dist/site.pack"     # Pack file for compiled mode
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::resolve::Mode;

/// Reference server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Resolver mode, fixed for the lifetime of the server.
    pub mode: Mode,

    /// Base directory read in development mode.
    pub base: Option<PathBuf>,

    /// Pack loaded in compiled mode.
    pub pack: Option<PathBuf>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5277,
            mode: Mode::default(),
            base: None,
            pack: None,
        }
    }
}
