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

/// Supervisor-only plugin: signals every child to shut down and blocks the
/// supervisor's own shutdown until the children table drains.
#[derive(Debug, Default)]
pub(crate) struct ChildManager {
    signalled: bool,
}

impl Plugin for ChildManager {
    fn id(&self) -> TypeId {
        TypeId::of::<ChildManager>()
    }

    fn activate(&mut self, base: &mut ActorBase) {
        base.install_plugin(self.id(), Slot::Shutdown);
    }

    fn handle_shutdown(&mut self, base: &mut ActorBase) -> ProcessingResult {
        let Some(sup) = base.supervisor() else {
            return ProcessingResult::Finished;
        };
        if sup.child_count() == 0 {
            return ProcessingResult::Finished;
        }
        if !self.signalled {
            self.signalled = true;
            trace!(supervisor = base.actor_id, children = sup.child_count(), "signalling children to shut down");
            sup.signal_children_shutdown();
        }
        ProcessingResult::Pending
    }
}
