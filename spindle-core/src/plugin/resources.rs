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

use tracing::trace;

use crate::actor::ActorBase;
use crate::plugin::{Plugin, ProcessingResult, Slot};

/// Blocks shutdown while the actor's external resource counter is nonzero.
///
/// The counter itself lives on the base and is driven through the context
/// (`acquire_resource` / `release_resource`); releasing the last resource
/// resumes the halted phase.
#[derive(Debug, Default)]
pub(crate) struct Resources;

impl Plugin for Resources {
    fn id(&self) -> TypeId {
        TypeId::of::<Resources>()
    }

    fn activate(&mut self, base: &mut ActorBase) {
        base.install_plugin(self.id(), Slot::Shutdown);
    }

    fn handle_shutdown(&mut self, base: &mut ActorBase) -> ProcessingResult {
        if base.resources == 0 {
            ProcessingResult::Finished
        } else {
            trace!(actor = base.actor_id, resources = base.resources, "shutdown blocked on resources");
            ProcessingResult::Pending
        }
    }
}
