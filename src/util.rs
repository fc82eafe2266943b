use anyhow::{Context, Result};
use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

/// Transient/retriable I/O errors often seen on Windows when filter drivers
/// (AV/backup), USB/NAS volumes, or sharing violations get in the way.
fn is_retriable_io_error(e: &io::Error) -> bool {
    matches!(
        e.raw_os_error(),
        // 5 = access denied (AV/share), 32/33 = sharing/lock violation,
        // 225 = AV blocked file, 1117 = device I/O error, 21 = not ready
        Some(5) | Some(32) | Some(33) | Some(225) | Some(1117) | Some(21)
    )
}

/// Run an I/O operation with linear backoff over transient errors.
fn retry_io<T>(tries: usize, delay_ms: u64, mut op: impl FnMut() -> io::Result<T>) -> io::Result<T> {
    let tries = tries.max(1);
    let mut last_err: Option<io::Error> = None;
    for i in 0..tries {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if is_retriable_io_error(&e) => {
                last_err = Some(e);
                sleep(Duration::from_millis(delay_ms.saturating_mul((i + 1) as u64)));
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "io retries exhausted")))
}

pub fn open_with_backoff(path: &Path) -> io::Result<File> {
    retry_io(16, 50, || File::open(path))
}

pub fn create_with_backoff(path: &Path) -> io::Result<File> {
    retry_io(16, 50, || File::create(path))
}

/// Remove a file; succeeds if it doesn't exist.
pub fn remove_with_backoff(path: &Path) -> Result<()> {
    retry_io(10, 25, || match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    })
    .with_context(|| format!("remove {}", path.display()))
}

/// Atomically replace `dest` with `tmp`. If rename fails (e.g. a sharing
/// violation on the destination), fall back to copy+remove.
pub fn replace_file_atomic(tmp: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        remove_with_backoff(dest)?;
    }
    match retry_io(20, 50, || fs::rename(tmp, dest)) {
        Ok(_) => Ok(()),
        Err(_) => {
            retry_io(20, 50, || fs::copy(tmp, dest).map(|_| ()))
                .with_context(|| format!("copy {} -> {}", tmp.display(), dest.display()))?;
            remove_with_backoff(tmp)?;
            Ok(())
        }
    }
}
