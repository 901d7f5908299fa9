//! The relay lifecycle: buffered appends, single-flight flushing, sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pr_common::Category;
use pr_encode::{EncodeScratch, Fragment, Render, WallClock};

use crate::buffer::CategoryBuffers;
use crate::config::RelayConfig;
use crate::error::RelayError;

/// Sanity cap on forced-flush retries for one append.
const MAX_APPEND_RETRIES: usize = 1 << 10;

/// Output sink receiving completed documents.
///
/// Registered once at relay construction; invoked zero or more times, never
/// concurrently with itself, with a complete self-contained JSON document
/// each time. The document is borrowed for the duration of the call. A slow
/// sink stalls the thread that won the flush race, so keep it fast and
/// non-blocking.
pub trait Sink: Send + Sync {
    fn emit(&self, document: &str);
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, document: &str) {
        self(document)
    }
}

/// What a flush call accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// This call drained the buffers and emitted a document.
    Flushed,
    /// This call drained the buffers and found nothing to emit.
    Empty,
    /// Another thread was already draining; nothing was done here.
    Busy,
}

/// Aggregates rendered fragments and delivers documents to the sink.
///
/// Instances are independent: construct one per stream, share it across
/// worker threads by reference, and [`Relay::shutdown`] it when the stream
/// ends. All operations are synchronous.
pub struct Relay {
    config: RelayConfig,
    clock: Arc<WallClock>,
    buffers: CategoryBuffers,
    flushing: AtomicBool,
    sink: Box<dyn Sink>,
}

impl Relay {
    pub fn new(config: RelayConfig, sink: impl Sink + 'static) -> Self {
        Relay {
            clock: Arc::new(WallClock::new()),
            buffers: CategoryBuffers::new(config.buffer_capacity),
            flushing: AtomicBool::new(false),
            sink: Box::new(sink),
            config,
        }
    }

    /// Relay with default configuration.
    pub fn with_defaults(sink: impl Sink + 'static) -> Self {
        Relay::new(RelayConfig::new(), sink)
    }

    /// The shared clock feeding `cf:date` attributes.
    pub fn clock(&self) -> &Arc<WallClock> {
        &self.clock
    }

    /// A fragment encoder for the calling thread.
    ///
    /// Scratch encoders are never shared between threads; create one per
    /// worker and reuse it across records.
    pub fn scratch(&self) -> EncodeScratch {
        EncodeScratch::new(Arc::clone(&self.clock), self.config.buffer_capacity)
    }

    /// Render a record and buffer it under its category.
    pub fn post<R: Render>(
        &self,
        scratch: &mut EncodeScratch,
        record: &R,
    ) -> Result<(), RelayError> {
        let fragment = record.render(scratch)?;
        self.append(record.category(), &fragment)
    }

    /// Buffer an already-rendered fragment.
    ///
    /// When the fragment does not fit the remaining capacity a flush is
    /// forced and the append retried; the forced flush's document does not
    /// contain the new fragment. A fragment larger than a whole buffer
    /// fails fast instead of retrying forever.
    pub fn append(&self, category: Category, fragment: &Fragment) -> Result<(), RelayError> {
        if fragment.len() > self.config.buffer_capacity {
            return Err(RelayError::FragmentTooLarge {
                len: fragment.len(),
                capacity: self.config.buffer_capacity,
            });
        }
        for retries in 0..MAX_APPEND_RETRIES {
            if self.buffers.try_append(category, fragment.as_str()) {
                return Ok(());
            }
            tracing::debug!(
                %category,
                len = fragment.len(),
                retries,
                "category buffer full, forcing flush"
            );
            self.flush()?;
            std::thread::yield_now();
        }
        Err(RelayError::AppendStalled {
            retries: MAX_APPEND_RETRIES,
        })
    }

    /// Drain all categories into one document and hand it to the sink.
    ///
    /// Non-blocking single flight: when another thread is already draining,
    /// the call returns [`FlushOutcome::Busy`] immediately and the caller's
    /// data stays buffered for that (or a later) flush. The sink runs on the
    /// winning thread with no category locks held.
    pub fn flush(&self) -> Result<FlushOutcome, RelayError> {
        if self
            .flushing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(FlushOutcome::Busy);
        }
        let _clear = ClearOnDrop(&self.flushing);

        self.clock.refresh();
        match self.buffers.drain_all()? {
            Some(document) => {
                tracing::trace!(bytes = document.len(), "emitting document");
                self.sink.emit(&document);
                Ok(FlushOutcome::Flushed)
            }
            None => Ok(FlushOutcome::Empty),
        }
    }

    /// Final drain, waiting out a concurrent flush before returning.
    pub fn shutdown(self) -> Result<(), RelayError> {
        loop {
            match self.flush()? {
                FlushOutcome::Busy => std::thread::yield_now(),
                _ => return Ok(()),
            }
        }
    }
}

/// Clears the flush flag even if the sink panics.
struct ClearOnDrop<'a>(&'a AtomicBool);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
