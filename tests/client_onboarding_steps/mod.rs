//! Step definitions for client onboarding behaviour tests.

pub mod given;
pub mod then;
pub mod world;
