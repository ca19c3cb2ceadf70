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
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use crate::common::types::{AddressId, LocalityId, SupervisorId};
use crate::common::Supervisor;

/// Shared pointer to an [`Address`]. Addresses are reference counted and may
/// be held across localities; they are destroyed when no actor, handler or
/// message references them.
pub type AddressPtr = Arc<Address>;

/// An opaque routing identity owned by exactly one supervisor.
///
/// Two addresses are equal iff they are the same identity. The back
/// reference to the owning supervisor is non-owning; a message addressed to
/// a supervisor that is already gone is dropped during routing.
pub struct Address {
    id: AddressId,
    supervisor: Weak<Supervisor>,
    supervisor_id: SupervisorId,
    locality: LocalityId,
}

impl Address {
    pub(crate) fn from_parts(
        id: AddressId,
        supervisor: Weak<Supervisor>,
        supervisor_id: SupervisorId,
        locality: LocalityId,
    ) -> AddressPtr {
        Arc::new(Address {
            id,
            supervisor,
            supervisor_id,
            locality,
        })
    }

    /// The unique identity of this address.
    pub fn id(&self) -> AddressId {
        self.id
    }

    /// The locality tag of the owning supervisor.
    pub fn locality(&self) -> LocalityId {
        self.locality
    }

    /// The owning supervisor, if it is still alive.
    pub fn supervisor(&self) -> Option<Arc<Supervisor>> {
        self.supervisor.upgrade()
    }

    pub(crate) fn supervisor_id(&self) -> SupervisorId {
        self.supervisor_id
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}@{})", self.id, self.supervisor_id)
    }
}
