#![deny(missing_docs)]

//! # Contacts Models
//!
//! Core data types shared by the contacts server and the client SDK.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`contact`] | `ContactId`, `ContactRecord`, `ContactUpdate`, display labels |
//! | [`navigation`] | `Location`, `NavigationState`, `HistoryAction` |
//! | [`favorites`] | Per-contact optimistic favorite overrides |
//! | [`shell`] | Root loader data and the shell view model |
//! | [`error`] | `ModelError` |

pub mod contact;
pub mod error;
pub mod favorites;
pub mod navigation;
pub mod shell;

// Re-export all public types at crate root for convenience.
pub use contact::*;
pub use error::*;
pub use favorites::*;
pub use navigation::*;
pub use shell::*;
