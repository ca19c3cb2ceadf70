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

//! Ready-made event loop bindings.
//!
//! The kernel only needs the small adapter surface of
//! [`EventLoop`](spindle_core::prelude::EventLoop): run a callable on the
//! loop soon, arm a timer, cancel a timer. [`ThreadLoop`] provides it on a
//! dedicated OS thread, [`TokioLoop`] on a tokio task.

mod thread;
mod tokio;

pub use self::thread::ThreadLoop;
pub use self::tokio::TokioLoop;
