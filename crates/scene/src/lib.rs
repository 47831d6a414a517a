//! Ethereal Tree - a procedural particle Christmas tree.
//!
//! Generates the tree once when the scene mounts, animates falling snow and
//! the star every frame, and hands the buffers to whatever draws them.

pub mod assets;
pub mod config;
pub mod greeting;
pub mod profile;
pub mod scene;

pub use assets::SceneAssets;
pub use config::SceneConfig;
pub use greeting::{greeting_or_fallback, parse_greeting, GreetingSource, HolidayGreeting};
pub use profile::{CameraRig, LightRig, PresentationProfile};
pub use scene::TreeScene;
