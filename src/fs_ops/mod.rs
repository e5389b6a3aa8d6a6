//! Filesystem primitives used by `FileManager`: conflict resolution,
//! staged copies, moves and io-error description.

mod copy;
pub mod duplicate;
mod helpers;
mod relocate;
mod util;

pub use copy::{copy_file_staged, copy_tree_staged};
pub use duplicate::{
    copy_candidate, resolve_copy_name, CopyConflictPolicy, EntryKind, Exhausted, Resolved,
};
pub use helpers::describe_io_error;
pub use relocate::relocate;

pub(crate) use util::is_writable_dir;
