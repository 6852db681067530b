//! Configuration section definitions.
//!
//! Each module corresponds to a section in `assetbake.toml`:
//!
//! | Module  | TOML Section | Purpose                              |
//! |---------|--------------|--------------------------------------|
//! | `bake`  | `[bake]`     | Input root, artifact path and format |
//! | `serve` | `[serve]`    | Reference server and resolver mode   |

mod bake;
mod serve;

pub use bake::{BakeConfig, is_valid_tag};
pub use serve::ServeConfig;
