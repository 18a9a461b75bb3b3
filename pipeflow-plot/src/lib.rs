//! The pipeflow dashboard.
//!
//! [`run`] opens a native window with the parameter controls, the regime
//! banner, the streamline plot and the particle animation. The animation is
//! also written to disk as a GIF through [`export`].

mod asset;
mod banner;
mod dashboard;
mod plots;

pub mod export;

pub use asset::{AssetError, load_reference_image};
pub use banner::{Banner, Severity, regime_banner};
pub use dashboard::{Dashboard, DashboardOptions, run};
pub use export::{ExportError, GifSettings, encode_gif, write_gif};
