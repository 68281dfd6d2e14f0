//! Edit outcome wrapper.

use std::fmt;

/// An edit together with whether it was written to the snapshot.
///
/// # Examples
///
/// ```rust
/// use furrow_core::display::{EditResult, Repairs};
///
/// let dry_run = EditResult::new(Repairs::default(), false);
/// assert!(dry_run.to_string().contains("Dry run"));
/// ```
pub struct EditResult<T> {
    pub edit: T,
    pub applied: bool,
}

impl<T> EditResult<T> {
    pub fn new(edit: T, applied: bool) -> Self {
        Self { edit, applied }
    }
}

impl<T: fmt::Display> fmt::Display for EditResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.edit)?;
        if self.applied {
            writeln!(f, "\nChanges saved.")
        } else {
            writeln!(f, "\n_Dry run: nothing was written. Pass `--apply` to save._")
        }
    }
}
