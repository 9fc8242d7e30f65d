//! Outlet directory
//!
//! Durable registry of outlets. Read paths degrade to a fixed synthetic
//! dataset when the store is unreachable; mutating paths never do.

pub mod directory;
pub mod fallback;
pub mod seed;

pub use directory::OutletDirectory;
pub use fallback::{FALLBACK_IMAGE_ID, fallback_outlets, is_synthetic, synthetic_outlet};
pub use seed::{SeedFailure, SeedReport, seed_outlets};
