use std::{error, fmt};

use backtrace::Backtrace;

/// A structural impossibility: an update stepped outside the map, or one of
/// the cross-structure invariants broke mid-insertion. These indicate bugs
/// (or input violating the general-position precondition in a way the
/// boundary filters could not detect), not recoverable runtime conditions.
#[derive(Debug)]
pub struct InternalError {
    pub msg: String,
    pub backtrace: Backtrace,
}

impl InternalError {
    #[cold]
    #[inline(always)]
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{:?}", self.msg, self.backtrace)
    }
}

impl error::Error for InternalError { }
