//! Domain layer containing business entities and logic.
//!
//! Independent of infrastructure and presentation concerns.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`redirect`] - Direct vs. warning-interstitial redirect decision

pub mod entities;
pub mod redirect;
pub mod repositories;
