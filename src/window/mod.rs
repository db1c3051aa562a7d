//! Temporal window resolution: padding policies, the resolver, and reference selection.

pub mod policy;
pub mod reference;
pub mod resolve;

pub use policy::PaddingPolicy;
pub use reference::{reference_range, select_reference};
pub use resolve::{
    effective_policy, resolve_window, resolve_window_named, window_len, ResolvedWindow,
    WindowConfig, WindowResolver, MAX_EXTENT, MAX_WINDOW,
};
