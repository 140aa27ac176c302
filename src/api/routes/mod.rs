//! API Routes
//!
//! Route handlers organized by page.

pub mod design;
pub mod health;
pub mod notes;
pub mod pdf;
pub mod plans;
pub mod profile;
pub mod resources;
pub mod stats;
