//! # livedocx-core
//!
//! The value model of a LiveDocx mail merge, independent of any transport.
//!
//! Callers collect everything a template needs in a [`ValueContainer`]:
//!
//! - scalar fields (`customer = "Acme"`)
//! - named [`Block`]s of rows for repeating regions
//! - images bound to fields, declared as `image:<field>`
//!
//! The [`encode`] module turns those bindings into the nested string arrays
//! the service expects.
//!
//! ```
//! use livedocx_core::{encode, Block, Row, ValueContainer};
//!
//! let mut items = Block::named("items")?;
//! items.bind_rows(vec![
//!     Row::new().with("sku", "A1").with("qty", 2),
//!     Row::new().with("sku", "B2").with("qty", 1),
//! ])?;
//!
//! let mut values = ValueContainer::new();
//! values.assign_field("customer", "Acme")?.assign_block(items)?;
//!
//! let table = encode::encode_tabular(values.blocks()["items"].retrieve_values())?;
//! assert_eq!(table.rows()[0], vec!["sku", "qty"]);
//! # Ok::<(), livedocx_core::Error>(())
//! ```

pub mod block;
pub mod container;
pub mod encode;
pub mod error;
pub mod value;

pub use block::Block;
pub use container::{Assignment, ImageRef, ValueContainer, IMAGE_FIELD_PREFIX};
pub use encode::{encode_flat, encode_json, encode_tabular, Table};
pub use error::{Error, Result};
pub use value::{FieldMap, Row, Scalar};
