use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A `Write` sink whose contents can be read back while a clone is owned
/// elsewhere (e.g. by a runtime under test).
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }

    /// Number of times `needle` occurs in the captured output.
    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
