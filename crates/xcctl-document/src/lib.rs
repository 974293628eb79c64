//! Query, filter, and patch engines for schemaless resource documents.
//!
//! Resource documents returned by the management API are arbitrary nested
//! JSON or YAML. This crate holds everything the `xcctl` client does with
//! them once they are decoded:
//!
//! - [`Value`]: the recursive document model.
//! - [`DotPath`] and [`evaluate`]: dot-path reads with `[*]` fan-out, used by
//!   output renderers and the wait poller. Reads never fail.
//! - [`apply`]: pointer-addressed `add`/`remove`/`replace` patches that fail
//!   fast with a typed [`PatchError`].
//! - [`merge`]: recursive merge patches where `null` deletes a key.
//! - [`LabelSelector`] and [`FieldSelector`]: client-side filters applied
//!   after a list has been fetched.
//! - [`PatchInput`], [`LabelChanges`], and [`WaitCondition`]: the small
//!   input grammars the commands build on top of the engines.
//!
//! All engines are pure functions over borrowed input. None of them mutates
//! the caller's document.
//!
//! # Example
//!
//! ```
//! use xcctl_document::{FieldSelector, Selector, Value, evaluate};
//!
//! let doc = Value::parse_text(r#"{"metadata":{"name":"web","namespace":"default"}}"#)
//!     .expect("valid JSON");
//! assert_eq!(evaluate(&doc, ".metadata.name"), Value::from("web"));
//! assert!(FieldSelector::parse("metadata.namespace=default").matches(&doc));
//! ```

mod condition;
mod error;
mod label_changes;
mod merge;
mod patch_input;
mod path;
mod pointer;
mod selector;
mod value;

pub use condition::WaitCondition;
pub use error::{ConditionError, DecodeError, LabelChangeError, PatchError, PatchInputError};
pub use label_changes::{LabelChange, LabelChanges, MetadataField};
pub use merge::merge;
pub use patch_input::{PatchInput, PatchType};
pub use path::{DotPath, Segment, evaluate};
pub use pointer::{PatchOp, PatchOperation, Pointer, apply};
pub use selector::{
    FieldCondition, FieldOperator, FieldSelector, LabelCondition, LabelOperator, LabelSelector,
    Selector, filter_items, labels_of,
};
pub use value::{Map, Number, Value};

#[cfg(test)]
mod tests;
