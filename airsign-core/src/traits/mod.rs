//! Collaborator traits
//!
//! These traits define the interface between the mode-control core and
//! the parts of the sign it does not implement: the pub/sub link, the
//! weather service, the asset filesystem and the fault log.

pub mod assets;
pub mod fault_log;
pub mod transport;
pub mod weather;

pub use assets::{AllAssets, AssetStore};
pub use fault_log::FaultLog;
pub use transport::{Transport, TransportError};
pub use weather::{FetchError, WeatherSource};
