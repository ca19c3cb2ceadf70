/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use spindle_core::prelude::{EventLoop, TimerKey};

type Callable = Box<dyn FnOnce() + Send>;

enum Job {
    Run(Callable),
    Stop,
}

/// An event loop on a tokio task.
///
/// Callables funnel through an unbounded channel into one task, which
/// preserves the strictly serial execution the kernel requires. Timers are
/// detached sleeps guarded by a cancellation token; on expiry the trigger
/// is posted back through the channel so it also runs on the loop task.
///
/// Both [`TokioLoop::spawn`] and timer arming must happen inside a tokio
/// runtime.
pub struct TokioLoop {
    jobs: mpsc::UnboundedSender<Job>,
    timers: Arc<DashMap<TimerKey, CancellationToken>>,
}

impl TokioLoop {
    /// Spawns the loop task on the current tokio runtime.
    pub fn spawn() -> Arc<TokioLoop> {
        let (jobs, mut inbox) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            trace!("loop task running");
            while let Some(job) = inbox.recv().await {
                match job {
                    Job::Run(callable) => callable(),
                    Job::Stop => break,
                }
            }
            trace!("loop task stopped");
        });
        Arc::new(TokioLoop {
            jobs,
            timers: Arc::new(DashMap::new()),
        })
    }

    /// Stops the loop task once the jobs queued so far have run.
    pub fn stop(&self) {
        let _ = self.jobs.send(Job::Stop);
    }
}

impl EventLoop for TokioLoop {
    fn post(&self, f: Callable) {
        if self.jobs.send(Job::Run(f)).is_err() {
            warn!("loop task already stopped, callable dropped");
        }
    }

    fn start_timer(&self, timeout: Duration, key: TimerKey, on_trigger: Callable) {
        let token = CancellationToken::new();
        if let Some(previous) = self.timers.insert(key, token.clone()) {
            previous.cancel();
        }
        let jobs = self.jobs.clone();
        let timers = Arc::clone(&self.timers);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(timeout) => {
                    timers.remove(&key);
                    if jobs.send(Job::Run(on_trigger)).is_err() {
                        warn!("loop task already stopped, timer trigger dropped");
                    }
                }
            }
        });
    }

    fn cancel_timer(&self, key: TimerKey) {
        if let Some((_, token)) = self.timers.remove(&key) {
            token.cancel();
        }
    }
}

impl fmt::Debug for TokioLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioLoop")
            .field("timers", &self.timers.len())
            .finish()
    }
}
