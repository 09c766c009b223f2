//! # Contacts SDK
//!
//! Client for the contacts server.
//!
//! The SDK provides:
//!
//! * [`ContactsClient`]: typed access to the loader, the actions and the
//!   contact routes over HTTP.
//! * [`ShellSession`]: the client-side shell state: history, navigation
//!   state, optimistic favorites and supersession of in-flight requests.
//! * [`SdkError`]: unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use contacts_sdk::{ContactsClient, ShellSession};
//!
//! # async fn run() -> Result<(), contacts_sdk::SdkError> {
//! let client = ContactsClient::new("http://localhost:3000")?;
//! let mut session = ShellSession::open(client).await?;
//!
//! session.search("ada");
//! while let Some(event) = session.next_event().await {
//!     println!("{event:?}");
//! }
//! for link in session.view().contacts {
//!     println!("{}{}", link.label.text(), if link.favorite { " ★" } else { "" });
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod session;

pub use client::ContactsClient;
pub use error::SdkError;
pub use session::{History, Purpose, SessionEvent, ShellSession};
