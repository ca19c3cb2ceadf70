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

use std::fmt::Debug;
use std::time::Duration;

use crate::common::TimerKey;

/// The contract the kernel requires from a host event loop.
///
/// A supervisor never blocks and never spawns threads on its own; instead it
/// asks its loop to run a callable soon (`post`, used to wake the message
/// pump after a cross-thread `enqueue`) and to arm or cancel timers. Every
/// callable handed to the loop must be executed on the loop's thread, one at
/// a time, in submission order.
pub trait EventLoop: Send + Sync + Debug + 'static {
    /// Runs `f` on this loop soon. Safe to call from any thread.
    fn post(&self, f: Box<dyn FnOnce() + Send>);

    /// Arms a timer. At expiry the loop runs `on_trigger` on its thread.
    ///
    /// Timer ids are only unique per supervisor, which is why the key
    /// carries the owning supervisor's identity. Arming a key that is
    /// already armed replaces the previous timer.
    fn start_timer(&self, timeout: Duration, key: TimerKey, on_trigger: Box<dyn FnOnce() + Send>);

    /// Cancels a previously armed timer. Idempotent; cancelling a timer
    /// that already fired or was never armed is a no-op.
    fn cancel_timer(&self, key: TimerKey);
}
