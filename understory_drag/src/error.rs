// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by drag observers.

use thiserror::Error;

/// Failure reported by a drag-start or drag-end observer.
///
/// Observer failures are isolated: the session logs them and keeps notifying
/// the remaining observers. They never abort a drag.
#[derive(Debug, Error)]
pub enum DragError {
    /// The observer declined to take part in this drag.
    #[error("drag observer rejected the drag: {0}")]
    Rejected(String),
    /// The observer failed while handling the notification.
    #[error("drag observer failed: {0}")]
    Failed(#[source] Box<dyn core::error::Error + 'static>),
}

impl DragError {
    /// Wrap an arbitrary error as [`DragError::Failed`].
    pub fn failed(err: impl core::error::Error + 'static) -> Self {
        Self::Failed(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::error::Error as _;
    use core::fmt;

    #[derive(Debug)]
    struct Offline;

    impl fmt::Display for Offline {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("inventory service offline")
        }
    }

    impl core::error::Error for Offline {}

    #[test]
    fn failed_keeps_its_source() {
        let err = DragError::failed(Offline);
        assert_eq!(err.to_string(), "drag observer failed: inventory service offline");
        assert!(err.source().is_some_and(|source| source.is::<Offline>()));
    }

    #[test]
    fn rejected_has_no_source() {
        let err = DragError::Rejected("slot is locked".into());
        assert_eq!(err.to_string(), "drag observer rejected the drag: slot is locked");
        assert!(err.source().is_none());
    }
}
