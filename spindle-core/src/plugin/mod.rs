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

//! Pluggable participants in an actor's lifecycle phases.
//!
//! An actor offers a set of slots; a plugin installs itself into zero or
//! more of them during activation. When a phase runs, the slot's installed
//! plugins are asked in insertion order; a plugin that is not done yet
//! halts the phase until an external event resumes it.

mod child_manager;
mod init_shutdown;
mod lifetime;
mod resources;

use std::any::TypeId;
use std::fmt::Debug;

use crate::actor::ActorBase;
use crate::common::SubscriptionPoint;

pub(crate) use child_manager::ChildManager;
pub(crate) use init_shutdown::InitShutdown;
pub(crate) use lifetime::Lifetime;
pub(crate) use resources::Resources;

/// Lifecycle phases a plugin can install itself into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Slot {
    /// Runs while the actor answers its init request.
    Init,
    /// Runs while the actor drains towards its final state.
    Shutdown,
    /// Runs when a subscription point is confirmed.
    Subscription,
    /// Runs when a subscription point is removed.
    Unsubscription,
}

/// Outcome of one plugin invocation within a slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProcessingResult {
    /// The plugin handled the event; continue with the next plugin.
    Consumed,
    /// The plugin is done for good; remove it from this slot, continue.
    Finished,
    /// The plugin is not done yet; halt the phase. An external event will
    /// resume it later.
    Pending,
}

/// A modular participant in the lifecycle of one actor.
///
/// Plugins are state machines over the actor's base: they never re-enter
/// phase traversal themselves. Progress they unblock is picked up when the
/// base machinery resumes the phase.
pub trait Plugin: Send + Debug + 'static {
    /// Stable identity of this plugin kind.
    fn id(&self) -> TypeId;

    /// Installs the plugin into its slots.
    fn activate(&mut self, base: &mut ActorBase);

    /// Final cleanup once the owning actor finishes shutting down.
    fn deactivate(&mut self, _base: &mut ActorBase) {}

    /// One step of the init phase.
    fn handle_init(&mut self, _base: &mut ActorBase) -> ProcessingResult {
        ProcessingResult::Consumed
    }

    /// One step of the shutdown phase.
    fn handle_shutdown(&mut self, _base: &mut ActorBase) -> ProcessingResult {
        ProcessingResult::Consumed
    }

    /// A subscription point owned by this actor was confirmed.
    fn handle_subscription(
        &mut self,
        _base: &mut ActorBase,
        _point: &SubscriptionPoint,
    ) -> ProcessingResult {
        ProcessingResult::Consumed
    }

    /// A subscription point owned by this actor was removed. `external` is
    /// true when the point's address belongs to a foreign supervisor and
    /// the removal still has to be committed there.
    fn handle_unsubscription(
        &mut self,
        _base: &mut ActorBase,
        _point: &SubscriptionPoint,
        _external: bool,
    ) -> ProcessingResult {
        ProcessingResult::Consumed
    }
}
