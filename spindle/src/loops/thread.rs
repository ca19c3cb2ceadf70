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

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{error, trace};

use spindle_core::prelude::{EventLoop, TimerKey};

type Callable = Box<dyn FnOnce() + Send>;

struct Timer {
    key: TimerKey,
    deadline: Instant,
    on_trigger: Callable,
}

#[derive(Default)]
struct LoopState {
    posts: VecDeque<Callable>,
    timers: Vec<Timer>,
    stopping: bool,
}

#[derive(Default)]
struct Shared {
    state: Mutex<LoopState>,
    wakeup: Condvar,
}

/// An event loop on a dedicated OS thread.
///
/// The thread parks on a condition variable and wakes for posted
/// callables, due timers or a stop request. Callables run strictly one at
/// a time in submission order; timers fire on the loop thread. `stop`
/// lets the current backlog finish before the thread exits.
pub struct ThreadLoop {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ThreadLoop {
    /// Spawns the loop thread.
    pub fn spawn() -> Arc<ThreadLoop> {
        let shared = Arc::new(Shared::default());
        let runner = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("spindle-loop".into())
            .spawn(move || run(&runner))
            .expect("failed to spawn the loop thread");
        Arc::new(ThreadLoop {
            shared,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Asks the loop thread to exit once its backlog is drained.
    pub fn stop(&self) {
        self.shared.state.lock().stopping = true;
        self.shared.wakeup.notify_one();
    }

    /// Waits for the loop thread to exit; call after [`ThreadLoop::stop`].
    pub fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("loop thread panicked");
            }
        }
    }
}

fn run(shared: &Shared) {
    trace!("loop thread running");
    let mut state = shared.state.lock();
    loop {
        loop {
            let now = Instant::now();
            let due = state
                .timers
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.deadline <= now)
                .min_by_key(|(_, timer)| timer.deadline)
                .map(|(index, _)| index);
            if let Some(index) = due {
                let timer = state.timers.remove(index);
                MutexGuard::unlocked(&mut state, || (timer.on_trigger)());
                continue;
            }
            if let Some(callable) = state.posts.pop_front() {
                MutexGuard::unlocked(&mut state, callable);
                continue;
            }
            break;
        }
        if state.stopping {
            break;
        }
        match state.timers.iter().map(|timer| timer.deadline).min() {
            Some(deadline) => {
                shared.wakeup.wait_until(&mut state, deadline);
            }
            None => shared.wakeup.wait(&mut state),
        }
    }
    trace!("loop thread stopped");
}

impl EventLoop for ThreadLoop {
    fn post(&self, f: Callable) {
        self.shared.state.lock().posts.push_back(f);
        self.shared.wakeup.notify_one();
    }

    fn start_timer(&self, timeout: Duration, key: TimerKey, on_trigger: Callable) {
        let mut state = self.shared.state.lock();
        state.timers.retain(|timer| timer.key != key);
        state.timers.push(Timer {
            key,
            deadline: Instant::now() + timeout,
            on_trigger,
        });
        drop(state);
        self.shared.wakeup.notify_one();
    }

    fn cancel_timer(&self, key: TimerKey) {
        self.shared.state.lock().timers.retain(|timer| timer.key != key);
    }
}

impl fmt::Debug for ThreadLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ThreadLoop")
            .field("posts", &state.posts.len())
            .field("timers", &state.timers.len())
            .field("stopping", &state.stopping)
            .finish()
    }
}
