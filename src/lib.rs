//! # Knack Client
//!
//! A typed async client for the Knack v1 REST API.
//!
//! ## Features
//!
//! - **Records**: create, read, update and delete through objects or views
//! - **Listings**: pagination, sorting and typed filters
//! - **Sessions**: user login with the token attached to later requests
//! - **Uploads**: file and image assets written into record fields
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use knack_client::filters::{FilterRule, FilterStatement, TextField, TextOperator};
//! use knack_client::records::GetRecordsArgs;
//! use knack_client::{AuthenticateArgs, KnackClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = KnackClient::with_credentials("app_id", "api_key")?;
//!     client
//!         .authenticate(&AuthenticateArgs::new("user@example.com", "secret"))
//!         .await?;
//!
//!     let filters = FilterStatement::all([
//!         FilterRule::text("field_1", TextField::ShortText, TextOperator::Contains).value("Ada"),
//!     ]);
//!     let page = client
//!         .get_records(&GetRecordsArgs::new("object_1").filters(filters).rows_per_page(50))
//!         .await?;
//!
//!     for record in page.records {
//!         println!("{}", record.id);
//!     }
//!     Ok(())
//! }
//! ```

// ============================================================================
// Modules
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Client configuration
pub mod config;

/// Credentials and session token handling
pub mod auth;

/// HTTP dispatcher
pub mod http;

/// Typed record filters
pub mod filters;

/// Record operation arguments and payloads
pub mod records;

/// The Knack API client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::AuthenticateArgs;
pub use client::KnackClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
