//! # contactbook-core
//!
//! Core types, traits, and validation rules for Contactbook.
//!
//! This crate provides:
//! - The [`Contact`] document model and its [`ContactId`]
//! - The [`ContactStore`] trait implemented by storage backends
//! - Field validation rules shared by the add and edit workflows
//! - The crate-wide [`Error`] type

#![warn(clippy::all)]

pub mod contact;
pub mod error;
pub mod traits;
pub mod validation;

pub use contact::{Contact, ContactFields, ContactId};
pub use error::{Error, Result};
pub use traits::ContactStore;
pub use validation::{NameCheck, ValidationErrors, validate_contact};
