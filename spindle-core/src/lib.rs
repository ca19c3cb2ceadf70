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

#![forbid(unsafe_code)]
//! Spindle Core Library
//!
//! The event-loop agnostic kernel of the Spindle actor runtime: addresses,
//! messages, type-erased handlers, the per-supervisor subscription table,
//! the actor lifecycle state machine with its plugin slots, and the
//! request/response protocol with per-request timers.
//!
//! Concrete event-loop bindings live in the `spindle` facade crate; the
//! kernel only requires the small adapter surface described by
//! [`traits::EventLoop`](crate::prelude::EventLoop).

pub(crate) mod actor;
pub(crate) mod common;
pub(crate) mod message;
pub(crate) mod plugin;
/// Trait definitions used throughout the kernel.
pub(crate) mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::actor::{ActorBase, ActorRef, Context, LifecycleState};
    pub use crate::common::{
        send_to, Address, AddressPtr, HandlerPtr, SubscriptionPoint, Supervisor, SupervisorConfig,
        System, TimerKey,
    };
    pub use crate::message::{
        ErrorCode, Message, MessagePtr, Request, RequestBuilder, Response, StateRequest,
        StateResponse,
    };
    pub use crate::plugin::{Plugin, ProcessingResult, Slot};
    pub use crate::traits::{Actor, ActorMessage, EventLoop, RequestPayload};
}
