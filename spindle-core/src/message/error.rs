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

use thiserror::Error;

/// Error conditions surfaced by the runtime.
///
/// Transient protocol errors travel as ordinary messages (a timed-out
/// request is answered with a response carrying
/// [`ErrorCode::RequestTimeout`]). Structural errors indicate invariant
/// violations no handler can recover from and are asserted or fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request timer fired before a response arrived.
    #[error("request timed out")]
    RequestTimeout,

    /// The actor reported a permanent failure from its init phase.
    #[error("actor could not be initialized")]
    ActorNotInitializable,

    /// An unsubscription named a point the subscription table never held.
    #[error("subscription point not found")]
    SubscriptionMissing,

    /// The shutdown timer fired before shutdown completed.
    #[error("shutdown deadline exceeded")]
    ShutdownDeadlineExceeded,
}
