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

//! Control payloads driving actor lifecycles and subscription bookkeeping.
//!
//! These travel through the same queues and dispatch tables as user
//! payloads; the runtime grants them no special treatment beyond the
//! handlers it installs for them.

use std::fmt;
use std::sync::Arc;

use crate::actor::LifecycleState;
use crate::common::{AddressPtr, HandlerPtr, SubscriptionPoint};
use crate::message::MessagePtr;
use crate::traits::HostedActor;

/// Asks an actor to run its init phase and confirm to `reply_to`.
#[derive(Clone, Debug)]
pub(crate) struct InitRequest {
    pub(crate) reply_to: AddressPtr,
}

/// Init phase outcome, delivered to the address the request named.
#[derive(Clone, Debug)]
pub(crate) struct InitConfirmation {
    pub(crate) address: AddressPtr,
    pub(crate) error: Option<crate::message::ErrorCode>,
}

/// Moves an initialized actor into its operational state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StartActor;

/// Asks an actor to shut down and confirm to `reply_to`.
#[derive(Clone, Debug)]
pub(crate) struct ShutdownRequest {
    pub(crate) reply_to: AddressPtr,
}

/// Confirms that the actor behind `address` reached its final state.
#[derive(Clone, Debug)]
pub(crate) struct ShutdownConfirmation {
    pub(crate) address: AddressPtr,
}

/// Enrolls a freshly constructed child with its supervisor during normal
/// message processing.
#[derive(Clone)]
pub(crate) struct CreateActor {
    pub(crate) child: Arc<dyn HostedActor>,
    pub(crate) is_supervisor: bool,
}

impl fmt::Debug for CreateActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateActor")
            .field("child", &self.child.hosted_address())
            .field("is_supervisor", &self.is_supervisor)
            .finish()
    }
}

/// Confirms that a point was recorded in the owning supervisor's table.
#[derive(Clone, Debug)]
pub(crate) struct SubscriptionConfirmed {
    pub(crate) point: SubscriptionPoint,
}

/// Asks the supervisor owning the point's address to record a handler that
/// lives on another supervisor.
#[derive(Clone, Debug)]
pub(crate) struct ExternalSubscription {
    pub(crate) point: SubscriptionPoint,
}

/// Confirms removal of a point whose address is owned by the actor's own
/// supervisor.
#[derive(Clone, Debug)]
pub(crate) struct UnsubscriptionConfirmed {
    pub(crate) point: SubscriptionPoint,
}

/// Confirms removal of a point whose address is owned by a foreign
/// supervisor; the receiving actor still has to commit the removal there.
#[derive(Clone, Debug)]
pub(crate) struct ExternalUnsubscription {
    pub(crate) point: SubscriptionPoint,
}

/// Removes the entry from the authoritative subscription table.
#[derive(Clone, Debug)]
pub(crate) struct CommitUnsubscription {
    pub(crate) point: SubscriptionPoint,
}

/// Carries a message to the supervisor hosting a foreign handler's actor,
/// so the handler runs on its own locality.
#[derive(Clone)]
pub(crate) struct HandlerCall {
    pub(crate) message: MessagePtr,
    pub(crate) handler: HandlerPtr,
}

impl fmt::Debug for HandlerCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerCall")
            .field("message", &self.message)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Asks a supervisor for the lifecycle state of the actor behind `subject`.
#[derive(Clone, Debug)]
pub struct StateRequest {
    /// Address whose hosting actor is being asked about.
    pub subject: AddressPtr,
    /// Where the [`StateResponse`] is delivered.
    pub reply_to: AddressPtr,
}

/// Answer to a [`StateRequest`]. `state` is `None` when the supervisor has
/// no information about the subject, including actors not yet created or
/// already destroyed.
#[derive(Clone, Debug)]
pub struct StateResponse {
    /// The address the request asked about.
    pub subject: AddressPtr,
    /// The lifecycle state, or `None` for unknown subjects.
    pub state: Option<LifecycleState>,
}
