//! Transport fault handling

pub mod recovery;

pub use recovery::{RecoveryStats, RecoveryTier, TransportFaultHandler};
