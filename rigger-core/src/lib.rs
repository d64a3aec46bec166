//! Rigger Core
//!
//! Core types shared by the rigger provisioning tools.
//!
//! This crate contains:
//! - Domain types: the Team Services resources rigger resolves or creates
//!   (team project, service endpoints, agent queues, build and release
//!   definitions)
//! - DTOs: request and envelope shapes for the Team Services REST API
//! - Credential codec: the personal-access-token to `Basic` token encoding

pub mod credential;
pub mod domain;
pub mod dto;
pub mod target;

pub use credential::EncodedPat;
pub use target::{ProjectType, Target};
