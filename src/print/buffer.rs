//! Output buffers for the printer.

use tracing::debug;

use crate::error::{Error, Result};

/// Destination for serialized text.
pub(crate) trait Sink {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// A growable buffer that doubles its capacity when it runs out.
///
/// Growth uses fallible reservation, so an allocation failure surfaces as
/// [`Error::Allocation`] instead of aborting.
pub(crate) struct Growable {
    buf: String,
}

impl Growable {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = String::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation {
                requested: capacity,
            })?;
        Ok(Self { buf })
    }

    fn ensure(&mut self, additional: usize) -> Result<()> {
        let needed = self.buf.len() + additional;
        if needed <= self.buf.capacity() {
            return Ok(());
        }
        let target = needed.max(self.buf.capacity().saturating_mul(2));
        self.buf
            .try_reserve_exact(target - self.buf.len())
            .map_err(|_| Error::Allocation { requested: target })
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

impl Sink for Growable {
    fn write(&mut self, text: &str) -> Result<()> {
        self.ensure(text.len())?;
        self.buf.push_str(text);
        Ok(())
    }
}

/// A caller-supplied buffer of fixed length. Never written past its end.
pub(crate) struct Fixed<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl<'b> Fixed<'b> {
    pub(crate) fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl Sink for Fixed<'_> {
    fn write(&mut self, text: &str) -> Result<()> {
        let end = self.len + text.len();
        let Some(dest) = self.buf.get_mut(self.len..end) else {
            debug!(capacity = self.buf.len(), needed = end, "preallocated buffer too small");
            return Err(Error::BufferTooSmall {
                capacity: self.buf.len(),
            });
        };
        dest.copy_from_slice(text.as_bytes());
        self.len = end;
        Ok(())
    }
}
