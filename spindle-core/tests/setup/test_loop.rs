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
use std::time::Duration;

use parking_lot::Mutex;

use spindle_core::prelude::{EventLoop, TimerKey};

type Callable = Box<dyn FnOnce() + Send>;

struct TimerEntry {
    key: TimerKey,
    deadline: Duration,
    on_trigger: Callable,
}

#[derive(Default)]
struct LoopInner {
    posts: VecDeque<Callable>,
    timers: Vec<TimerEntry>,
    cancelled: Vec<TimerKey>,
    now: Duration,
}

/// A deterministic in-process event loop: posted callables run when the
/// test says so, timers fire only when virtual time is advanced.
#[derive(Default)]
pub struct TestLoop {
    inner: Mutex<LoopInner>,
}

impl TestLoop {
    pub fn new() -> Arc<TestLoop> {
        Arc::new(TestLoop::default())
    }

    /// Runs posted callables until none remain.
    pub fn run(&self) {
        loop {
            let next = self.inner.lock().posts.pop_front();
            match next {
                Some(callable) => callable(),
                None => break,
            }
        }
    }

    /// Advances virtual time, firing due timers in deadline order and
    /// draining the posts they produce.
    pub fn advance(&self, delta: Duration) {
        let target = self.inner.lock().now + delta;
        loop {
            let due = {
                let mut inner = self.inner.lock();
                let next = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.deadline <= target)
                    .min_by_key(|(_, timer)| timer.deadline)
                    .map(|(index, _)| index);
                match next {
                    Some(index) => {
                        let timer = inner.timers.remove(index);
                        inner.now = timer.deadline;
                        Some(timer.on_trigger)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };
            match due {
                Some(on_trigger) => {
                    on_trigger();
                    self.run();
                }
                None => break,
            }
        }
        self.run();
    }

    pub fn pending_posts(&self) -> usize {
        self.inner.lock().posts.len()
    }

    pub fn timer_armed(&self, key: TimerKey) -> bool {
        self.inner.lock().timers.iter().any(|timer| timer.key == key)
    }

    pub fn was_cancelled(&self, key: TimerKey) -> bool {
        self.inner.lock().cancelled.contains(&key)
    }
}

impl EventLoop for TestLoop {
    fn post(&self, f: Callable) {
        self.inner.lock().posts.push_back(f);
    }

    fn start_timer(&self, timeout: Duration, key: TimerKey, on_trigger: Callable) {
        let mut inner = self.inner.lock();
        let deadline = inner.now + timeout;
        inner.timers.retain(|timer| timer.key != key);
        inner.timers.push(TimerEntry {
            key,
            deadline,
            on_trigger,
        });
    }

    fn cancel_timer(&self, key: TimerKey) {
        let mut inner = self.inner.lock();
        inner.timers.retain(|timer| timer.key != key);
        inner.cancelled.push(key);
    }
}

impl fmt::Debug for TestLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("TestLoop")
            .field("posts", &inner.posts.len())
            .field("timers", &inner.timers.len())
            .field("now", &inner.now)
            .finish()
    }
}

/// Alternates between loops until every queue is quiet, so cross-locality
/// forwards settle deterministically.
pub fn run_until_idle(loops: &[&Arc<TestLoop>]) {
    loop {
        let mut busy = false;
        for event_loop in loops {
            if event_loop.pending_posts() > 0 {
                busy = true;
                event_loop.run();
            }
        }
        if !busy {
            break;
        }
    }
}
