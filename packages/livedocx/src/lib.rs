//! # livedocx
//!
//! A client for the LiveDocx mail-merge service: bind values to a template
//! stored on the service or on disk, merge them remotely and fetch the
//! result.
//!
//! Most callers only need a [`Livedocx`] and a [`DocumentBuilder`]:
//!
//! ```no_run
//! use livedocx::{Livedocx, Row};
//! use livedocx_soap::ServiceConfig;
//!
//! let livedocx = Livedocx::connect(&ServiceConfig::from_env()?)?;
//! let mut invoice = livedocx
//!     .builder()
//!     .create_document("invoice")
//!     .from_template("invoice.docx", true)
//!     .with_field("customer", "Acme")
//!     .with_block("items", vec![Row::new().with("sku", "A1").with("qty", 2)]);
//!
//! invoice.retrieve("pdf")?;
//! let path = invoice.save()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The proxies ([`RemoteTemplate`], [`LocalTemplate`], [`Image`]) and
//! [`Livedocx::declare`] expose the individual steps for finer control.

pub mod builder;
pub mod config;
pub mod document;
mod encoding;
pub mod error;
pub mod image;
pub mod livedocx;
pub mod template;
pub mod tools;

pub use builder::DocumentBuilder;
pub use config::Directories;
pub use document::Document;
pub use error::{Error, ErrorKind, Result};
pub use image::Image;
pub use livedocx::Livedocx;
pub use template::{LocalTemplate, RemoteTemplate, ResolvedTemplate, Template, TemplateResolver};
pub use tools::{ping_service, PingOptions, PingReport, PingResult, PingStatus};

pub use livedocx_core::{Assignment, Block, ImageRef, Row, Scalar, ValueContainer};
