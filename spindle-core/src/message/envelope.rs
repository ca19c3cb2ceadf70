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

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

use static_assertions::assert_impl_all;

use crate::common::AddressPtr;
use crate::traits::ActorMessage;

/// Shared pointer to a [`Message`]. Messages sit in queues, in pending
/// request slots, and may be delivered to several handlers at once, so they
/// always travel by shared ownership.
pub type MessagePtr = Arc<Message>;

/// An envelope carrying a typed payload to a destination address.
///
/// Immutable once constructed. Routing never inspects the payload; it needs
/// only the destination's owning supervisor and locality, plus the cached
/// payload type for dispatch.
pub struct Message {
    dest: AddressPtr,
    payload: Arc<dyn ActorMessage>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Message {
    /// Wraps `payload` for delivery to `dest`.
    pub fn new<M: ActorMessage>(dest: AddressPtr, payload: M) -> MessagePtr {
        Arc::new(Message {
            dest,
            payload: Arc::new(payload),
            type_id: TypeId::of::<M>(),
            type_name: type_name::<M>(),
        })
    }

    /// Re-addresses an already constructed payload without copying it.
    pub(crate) fn forward(
        dest: AddressPtr,
        payload: Arc<dyn ActorMessage>,
        type_name: &'static str,
    ) -> MessagePtr {
        let type_id = payload.as_any().type_id();
        Arc::new(Message {
            dest,
            payload,
            type_id,
            type_name,
        })
    }

    /// The destination address.
    pub fn dest(&self) -> &AddressPtr {
        &self.dest
    }

    /// The process-wide identity of the payload type.
    pub fn payload_type(&self) -> TypeId {
        self.type_id
    }

    /// The payload's type name, for diagnostics only.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the payload if it is of type `M`.
    pub fn downcast_ref<M: ActorMessage>(&self) -> Option<&M> {
        self.payload.as_any().downcast_ref::<M>()
    }

    pub(crate) fn payload_arc(&self) -> Arc<dyn ActorMessage> {
        Arc::clone(&self.payload)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("dest", &self.dest)
            .field("type", &self.type_name)
            .finish()
    }
}

assert_impl_all!(Message: Send, Sync);
