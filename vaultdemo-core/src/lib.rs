//! Shared building blocks for the vaultdemo web apps
//!
//! This crate provides the pieces both demo apps need:
//! - AppRole credential loading from local files
//! - one-shot user notices
//! - minimal HTML rendering helpers

pub mod credentials;
pub mod html;
pub mod notice;

pub use credentials::{AppRoleCredentials, CredentialError, CredentialPaths};
pub use notice::{Notice, NoticeLevel};
