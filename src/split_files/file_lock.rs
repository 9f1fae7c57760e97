use std::fs::File;
use std::io::{self, Read, Write};

use fs2::FileExt;

/// Write access to a split file; concurrent readers and writers wait until it is dropped
pub struct ExclusiveLock {
    file: File,
}

impl ExclusiveLock {
    pub fn new(file: File) -> io::Result<Self> {
        file.lock_exclusive()?;
        Ok(ExclusiveLock { file })
    }

    /// discard the previous content
    pub fn truncate(&mut self) -> io::Result<()> {
        self.file.set_len(0)
    }
}

impl Drop for ExclusiveLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!("Failed to release exclusive lock: {}", e);
        }
    }
}

impl Write for ExclusiveLock {
    #[inline(always)]
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.file.write(data)
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Read access to a split file that may be shared with other readers
pub struct SharedLock {
    file: File,
}

impl SharedLock {
    pub fn new(file: File) -> io::Result<Self> {
        file.lock_shared()?;
        Ok(SharedLock { file })
    }
}

impl Drop for SharedLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!("Failed to release shared lock: {}", e);
        }
    }
}

impl Read for SharedLock {
    #[inline(always)]
    fn read(&mut self, data: &mut [u8]) -> io::Result<usize> {
        self.file.read(data)
    }
}
