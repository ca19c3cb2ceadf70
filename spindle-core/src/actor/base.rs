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
use std::sync::{Arc, Weak};

use tracing::{debug, error, trace};

use crate::common::types::SupervisorId;
use crate::common::{AddressPtr, SubscriptionPoint, Supervisor};
use crate::message::control::{InitConfirmation, ShutdownConfirmation};
use crate::message::{ErrorCode, Message};
use crate::plugin::{Plugin, ProcessingResult, Slot};
use crate::traits::ActorMessage;

/// Lifecycle state of an actor.
///
/// States advance strictly forward; there is no restart path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LifecycleState {
    /// Constructed, not yet asked to initialize.
    New,
    /// Init request received, init slot in progress.
    Initializing,
    /// Init slot completed, waiting for start.
    Initialized,
    /// Processing messages.
    Operational,
    /// Shutdown request received, shutdown slot in progress.
    ShuttingDown,
    /// Final state; the actor is removed from its supervisor.
    ShutDown,
}

#[derive(Clone, Copy)]
enum SlotEvent<'a> {
    Init,
    Shutdown,
    Subscription(&'a SubscriptionPoint),
    Unsubscription(&'a SubscriptionPoint, bool),
}

#[derive(Default, Debug)]
struct SlotTable {
    init: Vec<TypeId>,
    shutdown: Vec<TypeId>,
    subscription: Vec<TypeId>,
    unsubscription: Vec<TypeId>,
}

impl SlotTable {
    fn list(&self, slot: Slot) -> &Vec<TypeId> {
        match slot {
            Slot::Init => &self.init,
            Slot::Shutdown => &self.shutdown,
            Slot::Subscription => &self.subscription,
            Slot::Unsubscription => &self.unsubscription,
        }
    }

    fn list_mut(&mut self, slot: Slot) -> &mut Vec<TypeId> {
        match slot {
            Slot::Init => &mut self.init,
            Slot::Shutdown => &mut self.shutdown,
            Slot::Subscription => &mut self.subscription,
            Slot::Unsubscription => &mut self.unsubscription,
        }
    }

    fn remove(&mut self, slot: Slot, id: TypeId) {
        self.list_mut(slot).retain(|entry| *entry != id);
    }

    fn clear(&mut self) {
        self.init.clear();
        self.shutdown.clear();
        self.subscription.clear();
        self.unsubscription.clear();
    }
}

/// Per-actor lifecycle machinery shared by plain actors and supervisors:
/// identity, state, the plugin chain with its slots, and the pending init
/// and shutdown requests.
pub struct ActorBase {
    pub(crate) actor_id: u64,
    pub(crate) address: AddressPtr,
    pub(crate) supervisor: Weak<Supervisor>,
    pub(crate) supervisor_id: SupervisorId,
    pub(crate) state: LifecycleState,
    plugins: Vec<(TypeId, Option<Box<dyn Plugin>>)>,
    slots: SlotTable,
    pub(crate) init_request: Option<AddressPtr>,
    pub(crate) init_error: Option<ErrorCode>,
    pub(crate) shutdown_request: Option<AddressPtr>,
    pub(crate) resources: u32,
}

impl ActorBase {
    pub(crate) fn new(
        actor_id: u64,
        address: AddressPtr,
        supervisor: Weak<Supervisor>,
        supervisor_id: SupervisorId,
        plugins: Vec<Box<dyn Plugin>>,
    ) -> Self {
        ActorBase {
            actor_id,
            address,
            supervisor,
            supervisor_id,
            state: LifecycleState::New,
            plugins: plugins
                .into_iter()
                .map(|plugin| (plugin.id(), Some(plugin)))
                .collect(),
            slots: SlotTable::default(),
            init_request: None,
            init_error: None,
            shutdown_request: None,
            resources: 0,
        }
    }

    /// The actor's own address.
    pub fn address(&self) -> &AddressPtr {
        &self.address
    }

    /// The supervisor hosting this actor, if still alive.
    pub fn supervisor(&self) -> Option<Arc<Supervisor>> {
        self.supervisor.upgrade()
    }

    /// Constructs a message and puts it on the hosting supervisor's queue.
    /// Same-loop only; producers on other threads go through
    /// [`send_to`](crate::prelude::send_to).
    pub(crate) fn send<M: ActorMessage>(&self, dest: AddressPtr, payload: M) {
        match self.supervisor.upgrade() {
            Some(sup) => sup.put(Message::new(dest, payload)),
            None => trace!(actor = self.actor_id, "send after supervisor teardown, dropped"),
        }
    }

    /// Records `slot` membership for the plugin identified by `id`.
    pub(crate) fn install_plugin(&mut self, id: TypeId, slot: Slot) {
        let list = self.slots.list_mut(slot);
        if !list.contains(&id) {
            list.push(id);
        }
    }

    pub(crate) fn activate_plugins(&mut self) {
        for index in 0..self.plugins.len() {
            let Some(mut plugin) = self.plugins[index].1.take() else {
                continue;
            };
            plugin.activate(self);
            self.plugins[index].1 = Some(plugin);
        }
    }

    fn deactivate_plugins(&mut self) {
        for index in 0..self.plugins.len() {
            let Some(mut plugin) = self.plugins[index].1.take() else {
                continue;
            };
            plugin.deactivate(self);
        }
        self.plugins.clear();
        self.slots.clear();
    }

    fn run_slot(&mut self, slot: Slot, event: SlotEvent<'_>) -> bool {
        let order = self.slots.list(slot).clone();
        for id in order {
            if !self.slots.list(slot).contains(&id) {
                continue;
            }
            let Some(index) = self
                .plugins
                .iter()
                .position(|(pid, plugin)| *pid == id && plugin.is_some())
            else {
                continue;
            };
            let mut plugin = self.plugins[index].1.take().expect("plugin present");
            let result = match event {
                SlotEvent::Init => plugin.handle_init(self),
                SlotEvent::Shutdown => plugin.handle_shutdown(self),
                SlotEvent::Subscription(point) => plugin.handle_subscription(self, point),
                SlotEvent::Unsubscription(point, external) => {
                    plugin.handle_unsubscription(self, point, external)
                }
            };
            if let Some(entry) = self.plugins.iter_mut().find(|(pid, _)| *pid == id) {
                entry.1 = Some(plugin);
            }
            match result {
                ProcessingResult::Pending => return false,
                ProcessingResult::Finished => self.slots.remove(slot, id),
                ProcessingResult::Consumed => {}
            }
        }
        self.slots.list(slot).is_empty()
    }

    /// Resumes the init phase; called when the init request arrives and
    /// again whenever an external event unblocks an init slot plugin.
    pub(crate) fn init_continue(&mut self) {
        if self.state != LifecycleState::Initializing {
            return;
        }
        if self.run_slot(Slot::Init, SlotEvent::Init) {
            self.state = LifecycleState::Initialized;
            debug!(actor = self.actor_id, "initialized");
        }
    }

    /// Resumes the shutdown phase; called when the shutdown request arrives
    /// and again whenever an external event unblocks a shutdown slot
    /// plugin (a drained subscription, a released resource, a confirmed
    /// child shutdown).
    pub(crate) fn shutdown_continue(&mut self) {
        if self.state != LifecycleState::ShuttingDown {
            return;
        }
        if self.run_slot(Slot::Shutdown, SlotEvent::Shutdown) {
            self.shutdown_finish();
        }
    }

    fn shutdown_finish(&mut self) {
        self.deactivate_plugins();
        if let Some(reply_to) = self.shutdown_request.take() {
            self.send(
                reply_to,
                ShutdownConfirmation {
                    address: self.address.clone(),
                },
            );
        } else {
            error!(actor = self.actor_id, "shutdown finished without a pending request");
        }
        self.state = LifecycleState::ShutDown;
        debug!(actor = self.actor_id, "shut down");
    }

    /// Replies to the pending init request, carrying the init error if the
    /// actor reported one.
    pub(crate) fn confirm_init(&mut self) -> bool {
        let Some(reply_to) = self.init_request.take() else {
            return false;
        };
        let error = self.init_error.take();
        self.send(
            reply_to,
            InitConfirmation {
                address: self.address.clone(),
                error,
            },
        );
        true
    }

    pub(crate) fn on_subscription_event(&mut self, point: &SubscriptionPoint) {
        self.run_slot(Slot::Subscription, SlotEvent::Subscription(point));
    }

    pub(crate) fn on_unsubscription_event(&mut self, point: &SubscriptionPoint, external: bool) {
        self.run_slot(
            Slot::Unsubscription,
            SlotEvent::Unsubscription(point, external),
        );
        if self.state == LifecycleState::ShuttingDown {
            self.shutdown_continue();
        }
    }
}

impl fmt::Debug for ActorBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorBase")
            .field("actor", &self.actor_id)
            .field("state", &self.state)
            .finish()
    }
}
