//! SkillFlow - Learning Path Tracker
//!
//! Backend for a personal learning path tracker: paths with milestones and
//! resource links, where a path's completion flag is kept consistent with
//! its milestones.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
