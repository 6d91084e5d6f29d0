// ABOUTME: In-process locks that serialize installs into the same target directory.
// ABOUTME: Targets are keyed by resolved path; locks release on drop.

use parking_lot::{Condvar, Mutex};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    busy: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

/// Registry of targets currently being installed into. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct TargetLocks {
    inner: Arc<Inner>,
}

/// A held target lock that releases on drop.
#[must_use = "the target is unlocked as soon as the guard is dropped"]
#[derive(Debug)]
pub struct TargetGuard {
    target: PathBuf,
    key: PathBuf,
    inner: Arc<Inner>,
}

impl TargetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `target` is free, then hold it until the guard drops.
    ///
    /// Relative paths and symlinked aliases of one directory share a lock.
    pub fn lock(&self, target: &Path) -> TargetGuard {
        let key = lock_key(target);
        let mut busy = self.inner.busy.lock();
        while busy.contains(&key) {
            tracing::debug!(target = %target.display(), "waiting for target lock");
            self.inner.released.wait(&mut busy);
        }
        busy.insert(key.clone());
        self.guard(target, key)
    }

    /// Take `target` if nobody holds it.
    pub fn try_lock(&self, target: &Path) -> Option<TargetGuard> {
        let key = lock_key(target);
        let mut busy = self.inner.busy.lock();
        if !busy.insert(key.clone()) {
            return None;
        }
        Some(self.guard(target, key))
    }

    fn guard(&self, target: &Path, key: PathBuf) -> TargetGuard {
        TargetGuard {
            target: target.to_path_buf(),
            key,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl TargetGuard {
    /// The target as the caller spelled it.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// The resolved path the lock is held under.
    pub fn key(&self) -> &Path {
        &self.key
    }
}

impl Drop for TargetGuard {
    fn drop(&mut self) {
        self.inner.busy.lock().remove(&self.key);
        self.inner.released.notify_all();
    }
}

/// Absolute form of `target` with its longest existing ancestor canonicalized.
///
/// The target itself usually does not exist before its first install, so the
/// missing tail is re-attached to the resolved ancestor.
fn lock_key(target: &Path) -> PathBuf {
    let absolute = if target.is_absolute() {
        target.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(target),
            Err(_) => return target.to_path_buf(),
        }
    };

    let mut tail = Vec::new();
    let mut current = absolute.as_path();
    loop {
        if let Ok(resolved) = current.canonicalize() {
            return tail
                .iter()
                .rev()
                .fold(resolved, |path, part| path.join(part));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                current = parent;
            }
            _ => return absolute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[test]
    fn same_target_is_exclusive() {
        let locks = TargetLocks::new();
        let target = Path::new("/var/vcap/packages/ruby");

        let held = locks.lock(target);
        assert!(locks.try_lock(target).is_none());

        drop(held);
        assert!(locks.try_lock(target).is_some());
    }

    #[test]
    fn distinct_targets_do_not_contend() {
        let locks = TargetLocks::new();

        let _ruby = locks.lock(Path::new("/var/vcap/packages/ruby"));
        let nginx = locks.try_lock(Path::new("/var/vcap/packages/nginx"));

        assert!(nginx.is_some());
    }

    #[test]
    fn clones_share_locks() {
        let locks = TargetLocks::new();
        let other = locks.clone();
        let target = Path::new("/var/vcap/packages/ruby");

        let held = locks.lock(target);
        assert_eq!(held.target(), target);
        assert!(other.try_lock(target).is_none());
    }

    #[test]
    fn relative_and_absolute_spellings_share_a_lock() {
        let locks = TargetLocks::new();
        let relative = Path::new("bosun-lock-test-missing/ruby");
        let absolute = std::env::current_dir().unwrap().join(relative);

        let held = locks.lock(relative);
        assert!(locks.try_lock(&absolute).is_none());
        assert_eq!(held.target(), relative);

        drop(held);
        assert!(locks.try_lock(&absolute).is_some());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_alias_shares_a_lock() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("packages");
        std::fs::create_dir(&real).unwrap();
        let alias = dir.path().join("alias");
        std::os::unix::fs::symlink(&real, &alias).unwrap();
        let locks = TargetLocks::new();

        let held = locks.lock(&real.join("ruby"));

        assert!(locks.try_lock(&alias.join("ruby")).is_none());
        assert!(locks.try_lock(&alias.join("nginx")).is_some());
        assert_eq!(held.key(), real.canonicalize().unwrap().join("ruby"));
    }

    #[test]
    fn blocked_lock_proceeds_after_release() {
        let locks = TargetLocks::new();
        let target = PathBuf::from("/var/vcap/packages/ruby");
        let acquired = Arc::new(AtomicBool::new(false));

        let held = locks.lock(&target);
        let waiter = {
            let locks = locks.clone();
            let target = target.clone();
            let acquired = Arc::clone(&acquired);
            std::thread::spawn(move || {
                let _guard = locks.lock(&target);
                acquired.store(true, Ordering::SeqCst);
            })
        };

        std::thread::sleep(Duration::from_millis(50));
        assert!(!acquired.load(Ordering::SeqCst));

        drop(held);
        waiter.join().unwrap();
        assert!(acquired.load(Ordering::SeqCst));
    }
}
