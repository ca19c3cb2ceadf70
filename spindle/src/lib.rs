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
//! Spindle actor runtime
//!
//! Actors communicate exclusively by asynchronous messages addressed to
//! logical endpoints; supervisors own queues and routing tables and manage
//! their children's lifecycles, cascading shutdown through the tree. The
//! kernel lives in `spindle-core`; this crate adds the ready-made event
//! loop bindings.
//!
//! ```ignore
//! use spindle::prelude::*;
//!
//! let system = System::launch();
//! let event_loop = ThreadLoop::spawn();
//! let sup = system.create_supervisor(event_loop.clone(), SupervisorConfig::default());
//! let greeter = sup.create_actor(Greeter::default());
//! sup.start();
//! send_to(&greeter.address(), Greet("world".into()));
//! ```

pub mod loops;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use spindle_core::prelude::*;

    pub use crate::loops::{ThreadLoop, TokioLoop};
}
