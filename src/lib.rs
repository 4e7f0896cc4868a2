//! SkillScope - Adaptive Skills Assessment Engine
//!
//! This crate estimates a learner's ability across five competency
//! dimensions by asking as few questions as possible: each answer
//! narrows a per-dimension ability interval until every interval is
//! tight enough to report with confidence.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
