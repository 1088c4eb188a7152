//! Thin client-library surfaces over two cloud services.
//!
//! The main surface is a lazy, identity-keyed attribute view over a remote
//! object store: bind an [`ObjectAttributeView`] to a `gs://bucket/key`
//! address and [`read_attributes`] fetches the object's metadata on demand,
//! synthesizing a pseudo-directory record when the address only matches a
//! key prefix. The store itself is reached through the
//! [`store::ObjectStoreClient`] collaborator; [`store::GcsStore`] talks to
//! Google Cloud Storage and [`store::MemoryStore`] is an in-process double.
//!
//! The second, unrelated surface is [`sheets::SheetsOptions`], an options
//! record for one data-import format of a data-warehouse query service.
//!
//! [`read_attributes`]: ObjectAttributeView::read_attributes

pub mod addr;
pub mod attrs;
pub mod errors;
pub mod sheets;
pub mod store;
pub mod view;

pub use addr::ObjectAddress;
pub use attrs::{Attributes, ObjectAttributes, PseudoDirectoryAttributes};
pub use errors::{Error, Result};
pub use sheets::{SheetsOptions, SheetsOptionsBuilder};
pub use view::{ObjectAttributeView, VIEW_NAME};
