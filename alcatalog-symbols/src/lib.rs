//! Symbol archives (`.app`).
//!
//! A symbol archive is a zip file produced by the AL compiler. The only
//! entry the catalog reads is `SymbolReference.json`, which lists the
//! application's identity and its declared objects grouped into one
//! collection per object kind:
//!
//! ```json
//! { "AppId": "...", "Name": "Base Application", "Publisher": "Microsoft",
//!   "Version": "14.0.0.0", "Tables": [ { "Id": 18, "Name": "Customer" } ],
//!   "Codeunits": [ ... ], ... }
//! ```
//!
//! Reading tags each object with the kind of the collection it came from.

mod error;
mod manifest;
mod package;

pub use error::SymbolError;
pub use package::{MANIFEST_ENTRY, SymbolArchiveBuilder, SymbolPackage};
