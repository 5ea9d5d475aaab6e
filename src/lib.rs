//! Async client for the LithoMaker backend.
//!
//! Upload an image (optionally with embossed text) or a bare text, get back
//! the generated STL untouched. [`PlacementDescriptor`] records how a
//! generated model should sit in a 3D scene.
//!
//! ```no_run
//! use lithoclient::{ClientConfig, LithoClient, ModelGenerationRequest};
//!
//! # async fn run() -> lithoclient::Result<()> {
//! let client = LithoClient::new(ClientConfig::from_env())?;
//! let image = std::fs::read("photo.png").unwrap();
//! let stl = client
//!     .generate_model(ModelGenerationRequest::new(image).with_text("MAMÁ"))
//!     .await?;
//! println!("{} bytes", stl.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;

pub use api::{LithoClient, ModelClient, TextBaseClient};
pub use config::ClientConfig;
pub use error::{LithoError, Result};
pub use models::*;
