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

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide unique identity of an [`Address`](crate::prelude::Address).
pub type AddressId = u64;

/// Identity of a supervisor; equal to the id of the address block it was
/// allocated from.
pub type SupervisorId = u64;

/// Identity of a timer owned by a supervisor. Id 0 is reserved for the
/// shutdown timer.
pub type TimerId = u32;

/// Identity of an outstanding request. Requests share the timer id space
/// of their supervisor; behaviour is undefined past 2^32 requests per
/// supervisor lifetime.
pub type RequestId = u32;

/// Opaque token shared by supervisors that run on the same event loop.
///
/// Supervisors with equal locality share one effective message queue, so
/// delivery between them never crosses a thread boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LocalityId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_global_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) fn next_locality() -> LocalityId {
    LocalityId(next_global_id())
}

/// A timer handle as seen by an event loop: timer ids are only unique per
/// supervisor, so the adapter keys timers by (supervisor, id).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerKey {
    /// The supervisor that armed the timer.
    pub supervisor: SupervisorId,
    /// The supervisor-scoped timer id.
    pub id: TimerId,
}
