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
use std::collections::VecDeque;
use std::env;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, error, instrument, trace, warn};

use crate::actor::{ActorBase, ActorCell, ActorRef, LifecycleState};
use crate::common::subscription::{Relation, Subscription};
use crate::common::types::{next_global_id, next_locality, LocalityId, RequestId, SupervisorId, TimerId, TimerKey};
use crate::common::{Address, AddressPtr, HandlerPtr, SubscriptionPoint};
use crate::message::control::{
    CommitUnsubscription, CreateActor, ExternalSubscription, ExternalUnsubscription,
    HandlerCall, InitConfirmation, InitRequest, ShutdownConfirmation, ShutdownRequest, StartActor,
    StateRequest, StateResponse, SubscriptionConfirmed, UnsubscriptionConfirmed,
};
use crate::message::request::ReplyRoute;
use crate::message::{ErrorCode, Message, MessagePtr, Response};
use crate::plugin::{ChildManager, InitShutdown, Lifetime, Plugin, Resources};
use crate::traits::{Actor, ActorMessage, EventLoop, HostedActor, RequestPayload};

const SHUTDOWN_TIMER_ID: TimerId = 0;
const SHUTDOWN_TIMEOUT_ENV: &str = "SPINDLE_SHUTDOWN_TIMEOUT_MS";
const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 10_000;

/// Construction parameters for a supervisor.
#[derive(Clone, Debug)]
pub struct SupervisorConfig {
    /// How long a shutdown may take before it is treated as fatal.
    pub shutdown_timeout: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        let timeout_ms: u64 = env::var(SHUTDOWN_TIMEOUT_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_MS);
        SupervisorConfig {
            shutdown_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// The message queue effectively drained by a locality. Supervisors sharing
/// a locality share one queue, so ordering holds across all their
/// addresses.
#[derive(Default)]
pub(crate) struct MessageQueue {
    deque: Mutex<VecDeque<MessagePtr>>,
    draining: AtomicBool,
}

impl MessageQueue {
    fn push(&self, message: MessagePtr) {
        self.deque.lock().push_back(message);
    }

    fn pop(&self) -> Option<MessagePtr> {
        self.deque.lock().pop_front()
    }
}

/// A special actor owning a message queue, a subscription table, a child
/// table and a request table.
///
/// The supervisor sorts messages by destination address: addresses of its
/// own locality are delivered in place, everything else is forwarded to the
/// owning supervisor. During delivery it invokes local handlers
/// immediately and forwards foreign handlers as handler calls to the
/// supervisor hosting their actor.
///
/// Supervisors form a tree; a supervisor shuts down only after every child
/// has confirmed its own shutdown. Unlike its Erlang namesake it never
/// respawns terminated actors.
pub struct Supervisor {
    id: SupervisorId,
    locality: LocalityId,
    queue: Arc<MessageQueue>,
    event_loop: Arc<dyn EventLoop>,
    address: AddressPtr,
    parent: Option<Weak<Supervisor>>,
    this: Weak<Supervisor>,
    base: Mutex<ActorBase>,
    subscriptions: DashMap<AddressPtr, Subscription>,
    children: DashMap<AddressPtr, Arc<dyn HostedActor>>,
    request_map: DashMap<RequestId, MessagePtr>,
    request_subscriptions: DashMap<TypeId, AddressPtr>,
    next_request_id: AtomicU32,
    shutdown_timeout: Duration,
}

impl Supervisor {
    pub(crate) fn build(
        parent: Option<&Arc<Supervisor>>,
        shared: Option<(LocalityId, Arc<MessageQueue>)>,
        event_loop: Arc<dyn EventLoop>,
        config: SupervisorConfig,
    ) -> Arc<Supervisor> {
        let id = next_global_id();
        let (locality, queue) = match shared {
            Some(pair) => pair,
            None => (next_locality(), Arc::new(MessageQueue::default())),
        };
        Arc::new_cyclic(|weak: &Weak<Supervisor>| {
            let address = Address::from_parts(next_global_id(), weak.clone(), id, locality);
            let plugins: Vec<Box<dyn Plugin>> = vec![
                Box::new(ChildManager::default()),
                Box::new(Resources),
                Box::new(Lifetime::default()),
                Box::new(InitShutdown),
            ];
            let base = ActorBase::new(id, address.clone(), weak.clone(), id, plugins);
            Supervisor {
                id,
                locality,
                queue,
                event_loop,
                address,
                parent: parent.map(Arc::downgrade),
                this: weak.clone(),
                base: Mutex::new(base),
                subscriptions: DashMap::new(),
                children: DashMap::new(),
                request_map: DashMap::new(),
                request_subscriptions: DashMap::new(),
                next_request_id: AtomicU32::new(1),
                shutdown_timeout: config.shutdown_timeout,
            }
        })
    }

    /// Installs the supervisor's plugin chain and its control handlers.
    pub(crate) fn activate(self: &Arc<Self>) {
        self.base.lock().activate_plugins();
        let addr = self.address.clone();
        // Bookkeeping handlers first: the last to drain during shutdown.
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_unsubscription_confirmed));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_external_unsubscription));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_subscription_confirmed));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_commit_unsubscription));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_external_subscription));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_handler_call));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_create));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_initialize_confirm));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_shutdown_confirm));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_state_request));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_init_request));
        self.subscribe_actor(addr.clone(), self.control_handler(Self::on_start_actor));
        self.subscribe_actor(addr, self.control_handler(Self::on_shutdown_request));
    }

    fn control_handler<M, F>(self: &Arc<Self>, f: F) -> HandlerPtr
    where
        M: ActorMessage,
        F: Fn(&Arc<Supervisor>, &M) + Copy + Send + Sync + 'static,
    {
        HandlerPtr::wrap::<_, M, _>(self, TypeId::of::<F>(), move |sup, _message, payload| {
            f(sup, payload)
        })
    }

    /// The supervisor's identity.
    pub fn id(&self) -> SupervisorId {
        self.id
    }

    /// The locality tag shared by every supervisor on this loop.
    pub fn locality(&self) -> LocalityId {
        self.locality
    }

    /// The supervisor's outbound-facing address.
    pub fn address(&self) -> &AddressPtr {
        &self.address
    }

    /// The supervisor's own lifecycle state.
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.base.lock().state
    }

    /// Number of live children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of handlers registered for `address`.
    pub fn subscription_count(&self, address: &AddressPtr) -> usize {
        self.subscriptions
            .get(address)
            .map(|entry| entry.handler_count())
            .unwrap_or(0)
    }

    /// Number of requests still waiting for a response or a timeout.
    pub fn pending_request_count(&self) -> usize {
        self.request_map.len()
    }

    /// Creates a fresh address owned by this supervisor.
    pub fn make_address(self: &Arc<Self>) -> AddressPtr {
        Address::from_parts(next_global_id(), Arc::downgrade(self), self.id, self.locality)
    }

    /// Constructs a child actor, assigns it an address and enrolls it with
    /// this supervisor during normal message processing.
    pub fn create_actor<A: Actor>(self: &Arc<Self>, state: A) -> ActorRef<A> {
        let cell = ActorCell::create(state, self);
        cell.activate(self);
        trace!(supervisor = self.id, child = ?cell.hosted_address(), "actor created");
        self.enqueue(Message::new(
            self.address.clone(),
            CreateActor {
                child: cell.clone() as Arc<dyn HostedActor>,
                is_supervisor: false,
            },
        ));
        ActorRef::new(cell)
    }

    /// Constructs a child supervisor. With `event_loop` given the child
    /// runs its own locality on that loop; without it the child joins this
    /// supervisor's locality and shares its queue. Child supervisors manage
    /// their own initialization.
    pub fn create_supervisor(
        self: &Arc<Self>,
        event_loop: Option<Arc<dyn EventLoop>>,
        config: SupervisorConfig,
    ) -> Arc<Supervisor> {
        let child = match event_loop {
            Some(child_loop) => Supervisor::build(Some(self), None, child_loop, config),
            None => Supervisor::build(
                Some(self),
                Some((self.locality, Arc::clone(&self.queue))),
                Arc::clone(&self.event_loop),
                config,
            ),
        };
        child.activate();
        trace!(supervisor = self.id, child = child.id, "supervisor created");
        self.enqueue(Message::new(
            self.address.clone(),
            CreateActor {
                child: child.clone() as Arc<dyn HostedActor>,
                is_supervisor: true,
            },
        ));
        child.enqueue(Message::new(
            child.address.clone(),
            InitRequest {
                reply_to: self.address.clone(),
            },
        ));
        child
    }

    /// Asks the supervisor to initialize and start itself. Thread-safe.
    pub fn start(self: &Arc<Self>) {
        self.enqueue(Message::new(
            self.address.clone(),
            InitRequest {
                reply_to: self.address.clone(),
            },
        ));
    }

    /// Asks the supervisor to shut down, cascading to every child.
    /// Thread-safe.
    pub fn shutdown(self: &Arc<Self>) {
        let reply_to = self
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|parent| parent.address.clone())
            .unwrap_or_else(|| self.address.clone());
        self.enqueue(Message::new(self.address.clone(), ShutdownRequest { reply_to }));
    }

    /// Appends `message` to the effective queue and wakes the host loop.
    /// The only legal cross-thread entry point.
    pub fn enqueue(self: &Arc<Self>, message: MessagePtr) {
        self.queue.push(message);
        let sup = Arc::clone(self);
        self.event_loop.post(Box::new(move || sup.do_process()));
    }

    /// Appends `message` to the effective queue without waking the loop.
    /// Same-loop only.
    pub fn put(&self, message: MessagePtr) {
        self.queue.push(message);
    }

    /// Drains the effective queue. Messages enqueued while draining are
    /// processed in the same drain; invoking `do_process` while a drain is
    /// already running is a no-op.
    #[instrument(skip(self), fields(supervisor = self.id))]
    pub fn do_process(self: &Arc<Self>) {
        if self.queue.draining.swap(true, Ordering::AcqRel) {
            return;
        }
        while let Some(message) = self.queue.pop() {
            self.route(message);
        }
        self.queue.draining.store(false, Ordering::Release);
    }

    fn route(&self, message: MessagePtr) {
        let dest = message.dest().clone();
        let Some(owner) = dest.supervisor() else {
            trace!(?dest, "destination supervisor gone, message dropped");
            return;
        };
        if dest.locality() == self.locality {
            owner.deliver_local(message);
        } else {
            owner.enqueue(message);
        }
    }

    /// Delivers a message to the handlers subscribed on its destination.
    /// Local handlers run immediately; foreign handlers are forwarded to
    /// the supervisor hosting their actor. An address with no entry for the
    /// payload type is a no-op, which keeps pure routing addresses cheap.
    pub fn deliver_local(&self, message: MessagePtr) {
        let rows = self
            .subscriptions
            .get(message.dest())
            .and_then(|entry| entry.rows_for(message.payload_type()));
        let Some(rows) = rows else {
            trace!(message = ?message, "no subscribers, dropped");
            return;
        };
        for row in rows {
            match row.relation {
                Relation::Mine => row.handler.call(&message),
                Relation::Foreign => {
                    let Some(home) = row.handler.home_supervisor() else {
                        trace!("foreign handler's supervisor gone, skipped");
                        continue;
                    };
                    self.put(Message::new(
                        home.address.clone(),
                        HandlerCall {
                            message: Arc::clone(&message),
                            handler: row.handler.clone(),
                        },
                    ));
                }
            }
        }
    }

    /// Records a subscription point. For a local address the point enters
    /// the table and a confirmation goes to the handler's actor; for a
    /// foreign address the request is forwarded to the owning supervisor.
    pub fn subscribe_actor(self: &Arc<Self>, address: AddressPtr, handler: HandlerPtr) {
        if address.supervisor_id() == self.id {
            let relation = if handler.home_supervisor_id() == self.id {
                Relation::Mine
            } else {
                Relation::Foreign
            };
            let point = SubscriptionPoint {
                address: address.clone(),
                handler: handler.clone(),
            };
            let fresh = self
                .subscriptions
                .entry(address)
                .or_default()
                .subscribe(handler.clone(), relation);
            if !fresh {
                trace!(?point, "duplicate subscription, table unchanged");
            }
            self.put(Message::new(handler.actor_address(), SubscriptionConfirmed { point }));
        } else {
            let Some(owner) = address.supervisor() else {
                warn!(?address, "subscription to an address without a live supervisor, dropped");
                return;
            };
            let point = SubscriptionPoint { address, handler };
            self.put(Message::new(owner.address.clone(), ExternalSubscription { point }));
        }
    }

    /// Removes a subscription point, routing the confirmation through the
    /// handler's actor so its lifetime bookkeeping stays in sync.
    pub fn unsubscribe_actor(&self, address: AddressPtr, handler: HandlerPtr) {
        let dest = handler.actor_address();
        let point = SubscriptionPoint { address: address.clone(), handler };
        if address.supervisor_id() == self.id {
            self.put(Message::new(dest, UnsubscriptionConfirmed { point }));
        } else {
            self.put(Message::new(dest, ExternalUnsubscription { point }));
        }
    }

    /// Drops the table entry for a point. Missing entries are benign: a
    /// cascading shutdown may have removed the address block already.
    pub(crate) fn commit_unsubscription(&self, point: &SubscriptionPoint) {
        let removed = self
            .subscriptions
            .get_mut(&point.address)
            .map(|mut entry| entry.unsubscribe(&point.handler))
            .unwrap_or(false);
        if !removed {
            trace!(?point, "unsubscription for an entry already gone");
        }
        self.subscriptions
            .remove_if(&point.address, |_, entry| entry.is_empty());
    }

    pub(crate) fn signal_children_shutdown(&self) {
        for entry in self.children.iter() {
            self.put(Message::new(
                entry.key().clone(),
                ShutdownRequest {
                    reply_to: self.address.clone(),
                },
            ));
        }
    }

    /// Arms a timer on the host loop; expiry is reported back to this
    /// supervisor on its own loop.
    pub fn start_timer(self: &Arc<Self>, timeout: Duration, id: TimerId) {
        let weak = Arc::downgrade(self);
        self.event_loop.start_timer(
            timeout,
            TimerKey {
                supervisor: self.id,
                id,
            },
            Box::new(move || {
                if let Some(sup) = weak.upgrade() {
                    sup.on_timer_trigger(id);
                }
            }),
        );
    }

    /// Cancels a timer; idempotent.
    pub fn cancel_timer(&self, id: TimerId) {
        self.event_loop.cancel_timer(TimerKey {
            supervisor: self.id,
            id,
        });
    }

    fn on_timer_trigger(self: &Arc<Self>, id: TimerId) {
        if id == SHUTDOWN_TIMER_ID {
            let state = self.base.lock().state;
            if state != LifecycleState::ShutDown {
                error!(
                    supervisor = self.id,
                    ?state,
                    code = %ErrorCode::ShutdownDeadlineExceeded,
                    "shutdown did not finish in time"
                );
                std::process::abort();
            }
            return;
        }
        if let Some((_, timeout_message)) = self.request_map.remove(&id) {
            debug!(supervisor = self.id, request = id, "request timed out");
            self.put(timeout_message);
            self.do_process();
        }
    }

    // Request support, used by the request builder.

    pub(crate) fn allocate_request_id(&self) -> RequestId {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// The imaginary reply address for responses of type `Response<M>`,
    /// synthesized once per response type and cached. The second component
    /// is true when the caller has to install the reply route.
    pub(crate) fn reply_address_for<M: RequestPayload>(self: &Arc<Self>) -> (AddressPtr, bool) {
        let key = TypeId::of::<Response<M>>();
        if let Some(existing) = self.request_subscriptions.get(&key) {
            return (existing.clone(), false);
        }
        let imaginary = self.make_address();
        self.request_subscriptions.insert(key, imaginary.clone());
        (imaginary, true)
    }

    pub(crate) fn install_reply_route<M: RequestPayload>(self: &Arc<Self>, imaginary: AddressPtr) {
        let handler = HandlerPtr::wrap::<_, Response<M>, _>(
            self,
            TypeId::of::<ReplyRoute<M>>(),
            move |sup: &Arc<Supervisor>, message: &MessagePtr, response: &Response<M>| {
                let id = response.request.id;
                if let Some((_, timeout_message)) = sup.request_map.remove(&id) {
                    sup.cancel_timer(id);
                    sup.put(Message::forward(
                        timeout_message.dest().clone(),
                        message.payload_arc(),
                        message.type_name(),
                    ));
                }
                // A response without a request map entry means the timer
                // already fired or nothing was expected; drop it silently.
            },
        );
        self.subscribe_actor(imaginary, handler);
    }

    pub(crate) fn register_request(&self, id: RequestId, timeout_message: MessagePtr) {
        self.request_map.insert(id, timeout_message);
    }

    // Control-message handlers, subscribed on the supervisor's own address.

    fn on_create(sup: &Arc<Supervisor>, message: &CreateActor) {
        let address = message.child.hosted_address();
        sup.children.insert(address.clone(), Arc::clone(&message.child));
        let shutting_down = sup.base.lock().state == LifecycleState::ShuttingDown;
        if shutting_down {
            sup.put(Message::new(
                address,
                ShutdownRequest {
                    reply_to: sup.address.clone(),
                },
            ));
            return;
        }
        if !message.is_supervisor {
            sup.put(Message::new(
                address,
                InitRequest {
                    reply_to: sup.address.clone(),
                },
            ));
        }
    }

    fn on_initialize_confirm(sup: &Arc<Supervisor>, message: &InitConfirmation) {
        if let Some(code) = message.error {
            error!(address = ?message.address, %code, "child failed to initialize, shutting it down");
            sup.put(Message::new(
                message.address.clone(),
                ShutdownRequest {
                    reply_to: sup.address.clone(),
                },
            ));
            return;
        }
        let shutting_down = sup.base.lock().state == LifecycleState::ShuttingDown;
        if shutting_down {
            sup.put(Message::new(
                message.address.clone(),
                ShutdownRequest {
                    reply_to: sup.address.clone(),
                },
            ));
            return;
        }
        sup.put(Message::new(message.address.clone(), StartActor));
    }

    fn on_shutdown_confirm(sup: &Arc<Supervisor>, message: &ShutdownConfirmation) {
        if sup.children.remove(&message.address).is_some() {
            debug!(supervisor = sup.id, child = ?message.address, "child shut down");
        }
        let state = {
            let mut base = sup.base.lock();
            base.shutdown_continue();
            base.state
        };
        if state == LifecycleState::ShutDown {
            sup.after_shutdown();
        }
    }

    fn on_external_subscription(sup: &Arc<Supervisor>, message: &ExternalSubscription) {
        sup.subscribe_actor(message.point.address.clone(), message.point.handler.clone());
    }

    fn on_commit_unsubscription(sup: &Arc<Supervisor>, message: &CommitUnsubscription) {
        sup.commit_unsubscription(&message.point);
    }

    fn on_handler_call(_sup: &Arc<Supervisor>, message: &HandlerCall) {
        message.handler.call(&message.message);
    }

    fn on_state_request(sup: &Arc<Supervisor>, message: &StateRequest) {
        let state = if message.subject == sup.address {
            Some(sup.base.lock().state)
        } else {
            sup.children
                .get(&message.subject)
                .map(|child| child.lifecycle_state())
        };
        sup.put(Message::new(
            message.reply_to.clone(),
            StateResponse {
                subject: message.subject.clone(),
                state,
            },
        ));
    }

    // The supervisor's own lifecycle, driven by the same control messages
    // as any actor.

    fn on_init_request(sup: &Arc<Supervisor>, message: &InitRequest) {
        let mut base = sup.base.lock();
        if base.state != LifecycleState::New {
            debug_assert!(false, "init request outside the NEW state");
            error!(state = ?base.state, "init request outside the NEW state, ignored");
            return;
        }
        base.state = LifecycleState::Initializing;
        base.init_request = Some(message.reply_to.clone());
        base.init_continue();
    }

    fn on_start_actor(sup: &Arc<Supervisor>, _message: &StartActor) {
        let mut base = sup.base.lock();
        if base.state != LifecycleState::Initialized {
            trace!(state = ?base.state, "start outside the INITIALIZED state, ignored");
            return;
        }
        base.state = LifecycleState::Operational;
        debug!(supervisor = sup.id, "operational");
    }

    fn on_shutdown_request(sup: &Arc<Supervisor>, message: &ShutdownRequest) {
        {
            let mut base = sup.base.lock();
            match base.state {
                LifecycleState::ShuttingDown | LifecycleState::ShutDown => {
                    debug_assert!(false, "duplicate shutdown request");
                    error!(supervisor = sup.id, "duplicate shutdown request, ignored");
                    return;
                }
                _ => {}
            }
            base.state = LifecycleState::ShuttingDown;
            base.shutdown_request = Some(message.reply_to.clone());
        }
        sup.start_timer(sup.shutdown_timeout, SHUTDOWN_TIMER_ID);
        let state = {
            let mut base = sup.base.lock();
            base.shutdown_continue();
            base.state
        };
        if state == LifecycleState::ShutDown {
            sup.after_shutdown();
        }
    }

    fn on_subscription_confirmed(sup: &Arc<Supervisor>, message: &SubscriptionConfirmed) {
        sup.base.lock().on_subscription_event(&message.point);
    }

    fn on_unsubscription_confirmed(sup: &Arc<Supervisor>, message: &UnsubscriptionConfirmed) {
        let state = {
            let mut base = sup.base.lock();
            base.on_unsubscription_event(&message.point, false);
            base.state
        };
        if state == LifecycleState::ShutDown {
            sup.after_shutdown();
        }
    }

    fn on_external_unsubscription(sup: &Arc<Supervisor>, message: &ExternalUnsubscription) {
        let state = {
            let mut base = sup.base.lock();
            base.on_unsubscription_event(&message.point, true);
            base.state
        };
        if state == LifecycleState::ShutDown {
            sup.after_shutdown();
        }
    }

    fn after_shutdown(&self) {
        self.cancel_timer(SHUTDOWN_TIMER_ID);
        debug!(supervisor = self.id, "supervisor shut down");
    }
}

impl HostedActor for Supervisor {
    fn hosted_id(&self) -> u64 {
        self.id
    }

    fn hosted_address(&self) -> AddressPtr {
        self.address.clone()
    }

    fn hosted_supervisor(&self) -> Option<Arc<Supervisor>> {
        self.this.upgrade()
    }

    fn hosted_supervisor_id(&self) -> SupervisorId {
        self.id
    }

    fn lifecycle_state(&self) -> LifecycleState {
        self.base.lock().state
    }
}

impl fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("id", &self.id)
            .field("locality", &self.locality)
            .finish()
    }
}

/// Sends `payload` to `address` from outside the runtime: constructs the
/// message and enqueues it on the owning supervisor. Thread-safe.
pub fn send_to<M: ActorMessage>(address: &AddressPtr, payload: M) {
    match address.supervisor() {
        Some(sup) => sup.enqueue(Message::new(address.clone(), payload)),
        None => warn!(?address, "message to an address without a live supervisor, dropped"),
    }
}
