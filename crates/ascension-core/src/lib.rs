//! Ascension Core -- shared vocabulary for the research and ascension engine.
//!
//! This crate holds the small value types every other crate in the
//! workspace speaks: deterministic fixed-point progress, technology
//! identifiers, the seven ordered ascension tiers, and the empire metrics
//! that gate advanced technologies and tier transitions.
//!
//! # Key Types
//!
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type used for research progress.
//! - [`id::TechId`] -- Stable string identifier of a technology.
//! - [`tier::AscensionTier`] -- `k0.6` through `k3.0`, totally ordered.
//! - [`empire::EmpireState`] / [`empire::EmpireRequirement`] -- the non-tech
//!   conditions (planets controlled, home-system majority, intel level).

pub mod empire;
pub mod fixed;
pub mod id;
pub mod tier;
