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

use std::any::Any;
use std::fmt::Debug;

/// Marker trait for every payload that can travel through the runtime.
///
/// Payloads are immutable once constructed and are shared by reference;
/// dispatch compares the payload's [`TypeId`](std::any::TypeId) only, so no
/// registration step is needed. The blanket implementation covers every
/// eligible type.
pub trait ActorMessage: Any + Send + Sync + Debug {
    /// Returns a reference to the payload as `Any`, enabling downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T> ActorMessage for T
where
    T: Any + Send + Sync + Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Payload of a request message. The associated type names the payload the
/// destination actor is expected to answer with.
pub trait RequestPayload: ActorMessage {
    /// The payload type of the matching response.
    type Response: ActorMessage;
}
