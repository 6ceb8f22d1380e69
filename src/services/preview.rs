//! Off-thread effect previews with latest-wins semantics.
//!
//! Interactive callers submit a request on every parameter change. Each
//! request gets a generation number and runs on tokio's blocking pool. When
//! a request finishes after a newer one was submitted, its result is
//! dropped; running work is never interrupted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use pixfx_engine::{ParamSet, PixelBuffer};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::EffectService;

/// One preview invocation.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub effect: String,
    pub source: Arc<PixelBuffer>,
    pub params: ParamSet,
}

/// The published result of the most recent request.
#[derive(Debug)]
pub struct PreviewFrame {
    pub generation: u64,
    pub effect: String,
    pub output: Result<PixelBuffer, String>,
}

pub struct PreviewWorker {
    service: Arc<EffectService>,
    generation: Arc<AtomicU64>,
    frames: watch::Sender<Option<Arc<PreviewFrame>>>,
}

impl PreviewWorker {
    pub fn new(service: Arc<EffectService>) -> Self {
        let (frames, _) = watch::channel(None);
        Self {
            service,
            generation: Arc::new(AtomicU64::new(0)),
            frames,
        }
    }

    /// Receiver that sees every published frame.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<PreviewFrame>>> {
        self.frames.subscribe()
    }

    /// Generation of the most recently submitted request.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start rendering `request`. Must be called within a tokio runtime.
    ///
    /// The handle resolves to `true` if the result was published, `false`
    /// if a newer request superseded it.
    pub fn submit(&self, request: PreviewRequest) -> JoinHandle<bool> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = self.generation.clone();
        let service = self.service.clone();
        let frames = self.frames.clone();

        tokio::spawn(async move {
            let effect = request.effect.clone();
            let rendered = tokio::task::spawn_blocking(move || {
                service
                    .apply(&request.effect, &request.source, &request.params)
                    .map_err(|e| e.to_string())
            })
            .await;

            let output = match rendered {
                Ok(output) => output,
                Err(e) => Err(format!("Render task failed: {e}")),
            };

            let frame = PreviewFrame {
                generation,
                effect,
                output,
            };
            if !publish(&frames, &latest, frame) {
                tracing::debug!(generation, "Discarding superseded preview");
                return false;
            }
            true
        })
    }
}

/// Publish `frame` if it is still the latest request.
///
/// The check runs under the channel's lock, so a late frame can never replace
/// one with a higher generation.
fn publish(
    frames: &watch::Sender<Option<Arc<PreviewFrame>>>,
    latest: &AtomicU64,
    frame: PreviewFrame,
) -> bool {
    frames.send_if_modified(|slot| {
        if latest.load(Ordering::SeqCst) != frame.generation {
            return false;
        }
        if slot.as_ref().is_some_and(|s| s.generation >= frame.generation) {
            return false;
        }
        *slot = Some(Arc::new(frame));
        true
    })
}
