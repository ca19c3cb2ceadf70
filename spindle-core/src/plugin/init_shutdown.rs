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

use crate::actor::ActorBase;
use crate::plugin::{Plugin, ProcessingResult, Slot};

/// Terminal participant of both the init and the shutdown phase.
///
/// Runs last in either slot: its init step answers the pending init
/// request, its shutdown step lets the phase finish. Everything that has to
/// drain first (subscriptions, resources, children) is installed ahead of
/// it.
#[derive(Debug, Default)]
pub(crate) struct InitShutdown;

impl Plugin for InitShutdown {
    fn id(&self) -> TypeId {
        TypeId::of::<InitShutdown>()
    }

    fn activate(&mut self, base: &mut ActorBase) {
        base.install_plugin(self.id(), Slot::Init);
        base.install_plugin(self.id(), Slot::Shutdown);
    }

    fn handle_init(&mut self, base: &mut ActorBase) -> ProcessingResult {
        if base.confirm_init() {
            ProcessingResult::Finished
        } else {
            ProcessingResult::Pending
        }
    }

    fn handle_shutdown(&mut self, _base: &mut ActorBase) -> ProcessingResult {
        ProcessingResult::Finished
    }
}
