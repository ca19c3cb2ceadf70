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

use parking_lot::Mutex;
use tracing::{debug_span, error, trace, warn};

use crate::actor::{ActorBase, LifecycleState};
use crate::common::types::{next_global_id, SupervisorId};
use crate::common::{AddressPtr, HandlerPtr, Supervisor};
use crate::message::control::{
    ExternalUnsubscription, InitRequest, ShutdownRequest, StartActor, SubscriptionConfirmed,
    UnsubscriptionConfirmed,
};
use crate::message::{MessagePtr, Request, RequestBuilder, Response};
use crate::plugin::{InitShutdown, Lifetime, Plugin, Resources};
use crate::traits::{Actor, ActorMessage, HostedActor, RequestPayload};

/// The runtime's side of one actor: the user state plus the lifecycle base,
/// behind a single lock so handlers get exclusive access to both.
///
/// Handlers for actors of one locality run serially on that locality's
/// loop; the lock is uncontended there and only orders the rare cross-loop
/// peeks (state inspection).
pub struct ActorCell<A: Actor> {
    id: u64,
    address: AddressPtr,
    supervisor: Weak<Supervisor>,
    supervisor_id: SupervisorId,
    inner: Mutex<CellInner<A>>,
}

struct CellInner<A> {
    base: ActorBase,
    state: A,
}

impl<A: Actor> ActorCell<A> {
    pub(crate) fn create(state: A, supervisor: &Arc<Supervisor>) -> Arc<Self> {
        let id = next_global_id();
        let address = supervisor.make_address();
        let plugins: Vec<Box<dyn Plugin>> = vec![
            Box::new(Resources),
            Box::new(Lifetime::default()),
            Box::new(InitShutdown),
        ];
        Arc::new(ActorCell {
            id,
            address: address.clone(),
            supervisor: Arc::downgrade(supervisor),
            supervisor_id: supervisor.id(),
            inner: Mutex::new(CellInner {
                base: ActorBase::new(
                    id,
                    address,
                    Arc::downgrade(supervisor),
                    supervisor.id(),
                    plugins,
                ),
                state,
            }),
        })
    }

    /// Installs the plugin chain and subscribes the control handlers on the
    /// actor's own address. Bookkeeping handlers are subscribed first so
    /// they are the last to drain during shutdown and keep working through
    /// it.
    pub(crate) fn activate(self: &Arc<Self>, supervisor: &Arc<Supervisor>) {
        self.inner.lock().base.activate_plugins();
        let addr = self.address.clone();
        supervisor.subscribe_actor(addr.clone(), self.control_handler(on_unsubscription_confirmed));
        supervisor.subscribe_actor(addr.clone(), self.control_handler(on_external_unsubscription));
        supervisor.subscribe_actor(addr.clone(), self.control_handler(on_subscription_confirmed));
        supervisor.subscribe_actor(addr.clone(), self.control_handler(on_init_request));
        supervisor.subscribe_actor(addr.clone(), self.control_handler(on_start_actor));
        supervisor.subscribe_actor(addr, self.control_handler(on_shutdown_request));
    }

    fn control_handler<M, F>(self: &Arc<Self>, f: F) -> HandlerPtr
    where
        M: ActorMessage,
        F: Fn(&Arc<ActorCell<A>>, &M) + Copy + Send + Sync + 'static,
    {
        HandlerPtr::wrap::<_, M, _>(self, TypeId::of::<F>(), move |cell, _message, payload| {
            f(cell, payload)
        })
    }

    fn with_agent<R>(self: &Arc<Self>, f: impl FnOnce(&mut A, &mut Context<'_, A>) -> R) -> R {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let mut ctx = Context {
            base: &mut inner.base,
            cell: Arc::clone(self),
        };
        f(&mut inner.state, &mut ctx)
    }
}

impl<A: Actor> HostedActor for ActorCell<A> {
    fn hosted_id(&self) -> u64 {
        self.id
    }

    fn hosted_address(&self) -> AddressPtr {
        self.address.clone()
    }

    fn hosted_supervisor(&self) -> Option<Arc<Supervisor>> {
        self.supervisor.upgrade()
    }

    fn hosted_supervisor_id(&self) -> SupervisorId {
        self.supervisor_id
    }

    fn lifecycle_state(&self) -> LifecycleState {
        self.inner.lock().base.state
    }
}

impl<A: Actor> fmt::Debug for ActorCell<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorCell({:?})", self.address)
    }
}

fn on_init_request<A: Actor>(cell: &Arc<ActorCell<A>>, message: &InitRequest) {
    cell.with_agent(|state, ctx| {
        if ctx.base.state != LifecycleState::New {
            debug_assert!(false, "init request outside the NEW state");
            error!(state = ?ctx.base.state, "init request outside the NEW state, ignored");
            return;
        }
        ctx.base.state = LifecycleState::Initializing;
        ctx.base.init_request = Some(message.reply_to.clone());
        let span = debug_span!("on_initialize", actor = ctx.base.actor_id);
        let result = span.in_scope(|| state.on_initialize(ctx));
        if let Err(code) = result {
            ctx.base.init_error = Some(code);
        }
        ctx.base.init_continue();
    });
}

fn on_start_actor<A: Actor>(cell: &Arc<ActorCell<A>>, _message: &StartActor) {
    cell.with_agent(|state, ctx| {
        if ctx.base.state != LifecycleState::Initialized {
            trace!(state = ?ctx.base.state, "start outside the INITIALIZED state, ignored");
            return;
        }
        ctx.base.state = LifecycleState::Operational;
        state.on_start(ctx);
    });
}

fn on_shutdown_request<A: Actor>(cell: &Arc<ActorCell<A>>, message: &ShutdownRequest) {
    cell.with_agent(|state, ctx| {
        match ctx.base.state {
            LifecycleState::ShuttingDown | LifecycleState::ShutDown => {
                debug_assert!(false, "duplicate shutdown request");
                error!("duplicate shutdown request, ignored");
                return;
            }
            _ => {}
        }
        ctx.base.state = LifecycleState::ShuttingDown;
        ctx.base.shutdown_request = Some(message.reply_to.clone());
        state.on_shutdown(ctx);
        ctx.base.shutdown_continue();
    });
}

fn on_subscription_confirmed<A: Actor>(cell: &Arc<ActorCell<A>>, message: &SubscriptionConfirmed) {
    cell.with_agent(|_state, ctx| ctx.base.on_subscription_event(&message.point));
}

fn on_unsubscription_confirmed<A: Actor>(
    cell: &Arc<ActorCell<A>>,
    message: &UnsubscriptionConfirmed,
) {
    cell.with_agent(|_state, ctx| ctx.base.on_unsubscription_event(&message.point, false));
}

fn on_external_unsubscription<A: Actor>(
    cell: &Arc<ActorCell<A>>,
    message: &ExternalUnsubscription,
) {
    cell.with_agent(|_state, ctx| ctx.base.on_unsubscription_event(&message.point, true));
}

/// Handle to a created actor, for wiring addresses together and observing
/// lifecycle progress. Cheap to clone.
pub struct ActorRef<A: Actor> {
    cell: Arc<ActorCell<A>>,
}

impl<A: Actor> ActorRef<A> {
    pub(crate) fn new(cell: Arc<ActorCell<A>>) -> Self {
        ActorRef { cell }
    }

    /// The actor's address.
    pub fn address(&self) -> AddressPtr {
        self.cell.address.clone()
    }

    /// The actor's current lifecycle state.
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.cell.lifecycle_state()
    }
}

impl<A: Actor> Clone for ActorRef<A> {
    fn clone(&self) -> Self {
        ActorRef {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<A: Actor> fmt::Debug for ActorRef<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorRef({:?})", self.cell.address)
    }
}

/// The actor-facing surface of the runtime, handed to every lifecycle hook
/// and message handler.
pub struct Context<'a, A: Actor> {
    pub(crate) base: &'a mut ActorBase,
    pub(crate) cell: Arc<ActorCell<A>>,
}

impl<A: Actor> Context<'_, A> {
    /// The actor's own address.
    pub fn address(&self) -> &AddressPtr {
        self.base.address()
    }

    /// The hosting supervisor.
    pub fn supervisor(&self) -> Option<Arc<Supervisor>> {
        self.base.supervisor()
    }

    /// The actor's current lifecycle state.
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.base.state
    }

    /// Sends `payload` to `dest`.
    pub fn send<M: ActorMessage>(&self, dest: &AddressPtr, payload: M) {
        self.base.send(dest.clone(), payload);
    }

    /// Subscribes `method` on the actor's own address.
    pub fn subscribe<M, F>(&self, method: F)
    where
        M: ActorMessage,
        F: Fn(&mut A, &mut Context<'_, A>, &M) + Send + Sync + 'static,
    {
        let addr = self.base.address().clone();
        self.subscribe_to(&addr, method);
    }

    /// Subscribes `method` on an arbitrary address, which may be owned by a
    /// foreign supervisor.
    pub fn subscribe_to<M, F>(&self, address: &AddressPtr, method: F)
    where
        M: ActorMessage,
        F: Fn(&mut A, &mut Context<'_, A>, &M) + Send + Sync + 'static,
    {
        let handler = user_handler(&self.cell, method);
        match self.base.supervisor() {
            Some(sup) => sup.subscribe_actor(address.clone(), handler),
            None => warn!("subscribe after supervisor teardown, ignored"),
        }
    }

    /// Removes the subscription of `method` from the actor's own address.
    pub fn unsubscribe<M, F>(&self, method: F)
    where
        M: ActorMessage,
        F: Fn(&mut A, &mut Context<'_, A>, &M) + Send + Sync + 'static,
    {
        let addr = self.base.address().clone();
        self.unsubscribe_from(&addr, method);
    }

    /// Removes the subscription of `method` from `address`.
    pub fn unsubscribe_from<M, F>(&self, address: &AddressPtr, method: F)
    where
        M: ActorMessage,
        F: Fn(&mut A, &mut Context<'_, A>, &M) + Send + Sync + 'static,
    {
        let handler = user_handler(&self.cell, method);
        match self.base.supervisor() {
            Some(sup) => sup.unsubscribe_actor(address.clone(), handler),
            None => warn!("unsubscribe after supervisor teardown, ignored"),
        }
    }

    /// Starts a request to `dest`; the exchange is armed once a timeout is
    /// set on the returned builder. The response arrives at this actor's
    /// address as a [`Response<M>`].
    pub fn request<M: RequestPayload>(&self, dest: &AddressPtr, payload: M) -> RequestBuilder<M> {
        RequestBuilder::new(
            self.base.supervisor(),
            dest.clone(),
            self.base.address().clone(),
            payload,
        )
    }

    /// Answers a request.
    pub fn reply_to<M: RequestPayload>(&self, request: &Request<M>, payload: M::Response) {
        self.base
            .send(request.reply_to.clone(), Response::ok(request, payload));
    }

    /// Marks one external resource as in use; shutdown will not finish
    /// while any is held.
    pub fn acquire_resource(&mut self) {
        self.base.resources += 1;
    }

    /// Releases one external resource, resuming shutdown when it was the
    /// last one.
    pub fn release_resource(&mut self) {
        debug_assert!(self.base.resources > 0, "resource counter underflow");
        self.base.resources = self.base.resources.saturating_sub(1);
        if self.base.resources == 0 {
            self.base.shutdown_continue();
        }
    }
}

fn user_handler<A, M, F>(cell: &Arc<ActorCell<A>>, method: F) -> HandlerPtr
where
    A: Actor,
    M: ActorMessage,
    F: Fn(&mut A, &mut Context<'_, A>, &M) + Send + Sync + 'static,
{
    HandlerPtr::wrap::<_, M, _>(
        cell,
        TypeId::of::<F>(),
        move |cell: &Arc<ActorCell<A>>, _message: &MessagePtr, payload: &M| {
            cell.with_agent(|state, ctx| method(state, ctx, payload));
        },
    )
}
