//! Hat-switch trim router
//!
//! While the "hold to trim" command is held, the four cardinal directions of a
//! joystick hat switch are forwarded to the simulator's pitch and rudder trim
//! commands instead of panning the camera. Diagonals are swallowed.
//!
//! The simulator itself is reached through the [`CommandHost`] trait; the
//! X-Plane binding lives in the `trimhat-xplane` crate.

pub mod config;
pub mod direction;
pub mod error;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod router;
pub mod table;

pub use config::PreferenceStore;
pub use direction::{HatDirection, TrimCommand, HOLD_COMMAND, HOLD_DESCRIPTION};
pub use error::{ConfigError, StartupError};
pub use host::{CommandHost, CommandPhase, Disposition, HandlerBinding, HostCall, RecordingHost};
pub use plugin::{PluginInfo, TrimHat};
pub use router::{RouterState, TrimRouter};
pub use table::CommandTable;
