pub mod format;
pub mod init;
pub mod tree;
pub mod validate;

pub use format::{format, FormatArgs};
pub use init::{init, InitArgs};
pub use tree::{tree, TreeArgs};
pub use validate::{validate, ValidateArgs};

use std::path::{Path, PathBuf};

/// Resolve a user-supplied path against the working directory
pub(crate) fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
