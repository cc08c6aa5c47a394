//! Hand-off of finished results to whoever saves them.
//!
//! A `DownloadSlot` holds at most one result. Publishing a new result
//! releases the previous one, and every published result is released after
//! the slot's time-to-live even if nobody touches it again. `DownloadLink`s
//! are cheap handles that stop resolving once their result is gone.

use crate::constants::DEFAULT_DOWNLOAD_TTL;
use crate::error::{SqueezeError, Result};
use crate::processing::CompressedResult;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    current: Option<Published>,
}

#[derive(Debug)]
struct Published {
    generation: u64,
    /// `None` when the TTL is too long to represent; such results never expire.
    expires_at: Option<Instant>,
    result: Arc<CompressedResult>,
}

impl SlotState {
    fn release_if(&mut self, generation: u64) -> bool {
        if self.current.as_ref().map(|p| p.generation) == Some(generation) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

fn lock_slot(state: &Mutex<SlotState>) -> MutexGuard<'_, SlotState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
pub struct DownloadSlot {
    state: Arc<Mutex<SlotState>>,
    ttl: Duration,
}

impl Default for DownloadSlot {
    fn default() -> Self {
        Self::new(DEFAULT_DOWNLOAD_TTL)
    }
}

impl DownloadSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `result` as the current download, releasing whatever was there.
    ///
    /// Inside a tokio runtime a timer task releases the result after the
    /// TTL; outside one, expiry is enforced when a link is resolved.
    pub fn publish(&self, result: CompressedResult) -> DownloadLink {
        let file_name = result.file_name().to_string();
        let expires_at = Instant::now().checked_add(self.ttl);
        let generation = {
            let mut state = lock_slot(&self.state);
            state.generation += 1;
            let generation = state.generation;
            if let Some(previous) = state.current.take() {
                crate::verbose!("releasing superseded download {}", previous.result.file_name());
            }
            state.current = Some(Published {
                generation,
                expires_at,
                result: Arc::new(result),
            });
            generation
        };

        let runtime = tokio::runtime::Handle::try_current().ok();
        if let (Some(handle), Some(_)) = (runtime, expires_at) {
            let state = Arc::clone(&self.state);
            let ttl = self.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                if lock_slot(&state).release_if(generation) {
                    crate::verbose!("download expired after {:?}", ttl);
                }
            });
        }

        DownloadLink {
            state: Arc::clone(&self.state),
            generation,
            file_name,
        }
    }

    /// The current result, if one is published and has not expired
    pub fn current(&self) -> Option<Arc<CompressedResult>> {
        let mut state = lock_slot(&self.state);
        let generation = state.current.as_ref()?.generation;
        resolve_locked(&mut state, generation)
    }

    /// Release the current result, if any
    pub fn clear(&self) {
        lock_slot(&self.state).current = None;
    }
}

fn resolve_locked(state: &mut SlotState, generation: u64) -> Option<Arc<CompressedResult>> {
    let published = state.current.as_ref()?;
    if published.generation != generation {
        return None;
    }
    if published.expires_at.is_some_and(|at| Instant::now() >= at) {
        state.current = None;
        return None;
    }
    Some(Arc::clone(&published.result))
}

/// Revocable reference to one published result
#[derive(Debug, Clone)]
pub struct DownloadLink {
    state: Arc<Mutex<SlotState>>,
    generation: u64,
    file_name: String,
}

impl DownloadLink {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The result, or `None` once superseded, revoked or expired
    pub fn resolve(&self) -> Option<Arc<CompressedResult>> {
        resolve_locked(&mut lock_slot(&self.state), self.generation)
    }

    pub fn is_revoked(&self) -> bool {
        self.resolve().is_none()
    }

    /// Release the result now. Does nothing if a newer result replaced it.
    pub fn revoke(self) {
        lock_slot(&self.state).release_if(self.generation);
    }

    /// Write the result into `dir`.
    ///
    /// # Returns
    /// * `Err(SqueezeError::DownloadRevoked)` if the link no longer resolves
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let result = self
            .resolve()
            .ok_or_else(|| SqueezeError::DownloadRevoked(self.file_name.clone()))?;
        result.save_to(dir)
    }
}
