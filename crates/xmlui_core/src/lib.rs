//! xmlui_core: Core utilities for the XMLUI language front-end.
//!
//! Provides the position-tracking input stream shared by the script and
//! markup lexers, the offset-to-line map, and the map aliases used by the
//! rest of the pipeline.

pub mod input;
pub mod text;

// Re-export commonly used types
pub use input::InputStream;
pub use text::{LineAndColumn, LineMap, TextPos};

/// Hash map with the fast non-cryptographic hasher used across the workspace.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
/// Hash set counterpart of [`FxHashMap`].
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
/// Insertion-ordered map; output maps (props, vars, module errors) keep
/// source order.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V>;
