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

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::common::{AddressPtr, Supervisor, SupervisorId};
use crate::message::MessagePtr;
use crate::traits::{ActorMessage, HostedActor};

/// Type-erased callable bound to an actor.
///
/// Equality is value equality over (actor identity, method identity); the
/// hash is precomputed at wrap time. A handler owns a strong reference to
/// its actor, so the actor outlives every handler bound to it.
pub trait Handler: Send + Sync {
    /// Invokes the bound method if the message payload matches the
    /// expected type; messages of other types are silently ignored.
    fn call(&self, message: &MessagePtr);

    /// The payload type this handler dispatches on.
    fn payload_type(&self) -> TypeId;

    /// Identity of the bound actor.
    fn actor_id(&self) -> u64;

    /// Identity of the bound method.
    fn method_id(&self) -> TypeId;

    /// Hash over (actor, method), computed once at wrap time.
    fn precalc_hash(&self) -> u64;

    /// The bound actor's own address, where subscription bookkeeping
    /// messages are delivered.
    fn actor_address(&self) -> AddressPtr;

    /// The supervisor hosting the bound actor, used when a foreign
    /// dispatch has to be forwarded as a handler call.
    fn home_supervisor(&self) -> Option<Arc<Supervisor>>;

    fn home_supervisor_id(&self) -> SupervisorId;
}

/// Shared, comparable handle to a [`Handler`].
#[derive(Clone)]
pub struct HandlerPtr(Arc<dyn Handler>);

impl HandlerPtr {
    pub(crate) fn wrap<T, M, F>(target: &Arc<T>, method_id: TypeId, f: F) -> HandlerPtr
    where
        T: HostedActor,
        M: ActorMessage,
        F: Fn(&Arc<T>, &MessagePtr, &M) + Send + Sync + 'static,
    {
        let h1 = target.hosted_id();
        let h2 = type_id_hash(method_id);
        HandlerPtr(Arc::new(MethodHandler {
            target: Arc::clone(target),
            f,
            method_id,
            hash: h1 ^ (h2 << 1),
            _payload: PhantomData,
        }))
    }

    pub fn call(&self, message: &MessagePtr) {
        self.0.call(message);
    }

    pub fn payload_type(&self) -> TypeId {
        self.0.payload_type()
    }

    pub(crate) fn actor_id(&self) -> u64 {
        self.0.actor_id()
    }

    pub(crate) fn actor_address(&self) -> AddressPtr {
        self.0.actor_address()
    }

    pub(crate) fn home_supervisor(&self) -> Option<Arc<Supervisor>> {
        self.0.home_supervisor()
    }

    pub(crate) fn home_supervisor_id(&self) -> SupervisorId {
        self.0.home_supervisor_id()
    }
}

impl PartialEq for HandlerPtr {
    fn eq(&self, other: &Self) -> bool {
        self.0.actor_id() == other.0.actor_id() && self.0.method_id() == other.0.method_id()
    }
}

impl Eq for HandlerPtr {}

impl Hash for HandlerPtr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.precalc_hash());
    }
}

impl fmt::Debug for HandlerPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handler(actor={}, method={:?})",
            self.0.actor_id(),
            self.0.method_id()
        )
    }
}

fn type_id_hash(id: TypeId) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

struct MethodHandler<T, M, F> {
    target: Arc<T>,
    f: F,
    method_id: TypeId,
    hash: u64,
    _payload: PhantomData<fn(&M)>,
}

impl<T, M, F> Handler for MethodHandler<T, M, F>
where
    T: HostedActor,
    M: ActorMessage,
    F: Fn(&Arc<T>, &MessagePtr, &M) + Send + Sync + 'static,
{
    fn call(&self, message: &MessagePtr) {
        if let Some(payload) = message.downcast_ref::<M>() {
            (self.f)(&self.target, message, payload);
        }
    }

    fn payload_type(&self) -> TypeId {
        TypeId::of::<M>()
    }

    fn actor_id(&self) -> u64 {
        self.target.hosted_id()
    }

    fn method_id(&self) -> TypeId {
        self.method_id
    }

    fn precalc_hash(&self) -> u64 {
        self.hash
    }

    fn actor_address(&self) -> AddressPtr {
        self.target.hosted_address()
    }

    fn home_supervisor(&self) -> Option<Arc<Supervisor>> {
        self.target.hosted_supervisor()
    }

    fn home_supervisor_id(&self) -> SupervisorId {
        self.target.hosted_supervisor_id()
    }
}
