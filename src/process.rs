//! File processing capability
//!
//! Workers never implement processing themselves: they invoke a
//! [`Processor`] handed to them at spawn time. The dispatcher stays
//! ignorant of what processing means, which keeps the scheduling core
//! testable with synthetic processors and keeps real I/O strictly
//! outside the dispatch lock.

use crate::catalog::WorkItem;
use crate::error::{ProcessError, ProcessResult};
use std::fs;
use tracing::trace;

/// Capability invoked once per assigned file, outside any shared lock
///
/// Implementations must be shareable across worker threads. A failure
/// applies to that file only; the worker logs it and advances.
pub trait Processor: Send + Sync {
    /// Process one file
    fn process(&self, item: &WorkItem) -> ProcessResult<()>;
}

/// Default processor: reads the file's contents and derives line
/// statistics
pub struct FileReader;

impl Processor for FileReader {
    fn process(&self, item: &WorkItem) -> ProcessResult<()> {
        let contents = fs::read(&item.path)
            .map_err(|e| ProcessError::from_io(item.path.clone(), e))?;

        let lines = contents.iter().filter(|&&b| b == b'\n').count();
        trace!(
            path = %item.path.display(),
            bytes = contents.len(),
            lines = lines,
            "File read"
        );

        Ok(())
    }
}
