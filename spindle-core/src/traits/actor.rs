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

use std::sync::Arc;

use crate::actor::{Context, LifecycleState};
use crate::common::{AddressPtr, Supervisor, SupervisorId};
use crate::message::ErrorCode;

/// User-defined actor behaviour.
///
/// An actor is plain state plus lifecycle hooks. Message handlers are not
/// part of the trait; they are registered from [`Actor::on_initialize`]
/// through the [`Context`], bound to the actor by value identity, and run to
/// completion on the locality's loop.
///
/// ```ignore
/// struct Counter { count: u64 }
///
/// impl Actor for Counter {
///     fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
///         ctx.subscribe(Self::on_tick);
///         Ok(())
///     }
/// }
///
/// impl Counter {
///     fn on_tick(&mut self, _ctx: &mut Context<'_, Self>, _msg: &Tick) {
///         self.count += 1;
///     }
/// }
/// ```
pub trait Actor: Send + Sized + 'static {
    /// Called when the actor receives its init request, before it becomes
    /// operational. The usual place to subscribe handlers. Returning an
    /// error marks the actor as not initializable; the supervisor responds
    /// by shutting it down.
    fn on_initialize(&mut self, _ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        Ok(())
    }

    /// Called when the supervisor starts the initialized actor.
    fn on_start(&mut self, _ctx: &mut Context<'_, Self>) {}

    /// Called when the actor begins shutting down, before its
    /// subscriptions drain.
    fn on_shutdown(&mut self, _ctx: &mut Context<'_, Self>) {}
}

/// Type-erased view of an entity hosted by a supervisor, as kept in the
/// children table and consulted for state requests.
pub(crate) trait HostedActor: Send + Sync + 'static {
    fn hosted_id(&self) -> u64;
    fn hosted_address(&self) -> AddressPtr;
    fn hosted_supervisor(&self) -> Option<Arc<Supervisor>>;
    fn hosted_supervisor_id(&self) -> SupervisorId;
    fn lifecycle_state(&self) -> LifecycleState;
}
