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

use dashmap::DashMap;
use tracing::trace;

use crate::common::types::SupervisorId;
use crate::common::{Supervisor, SupervisorConfig};
use crate::traits::EventLoop;

/// The system context: the entry point of the runtime and the registry of
/// root supervisors.
///
/// ```ignore
/// let system = System::launch();
/// let root = system.create_supervisor(event_loop, SupervisorConfig::default());
/// root.start();
/// ```
#[derive(Debug, Default)]
pub struct System {
    roots: DashMap<SupervisorId, Arc<Supervisor>>,
}

impl System {
    /// Launches the system context.
    pub fn launch() -> System {
        trace!("system context launched");
        System::default()
    }

    /// Creates a root supervisor hosted on `event_loop`. The supervisor is
    /// inert until [`Supervisor::start`] is called.
    pub fn create_supervisor(
        &self,
        event_loop: Arc<dyn EventLoop>,
        config: SupervisorConfig,
    ) -> Arc<Supervisor> {
        let supervisor = Supervisor::build(None, None, event_loop, config);
        supervisor.activate();
        trace!(supervisor = supervisor.id(), "root supervisor created");
        self.roots.insert(supervisor.id(), Arc::clone(&supervisor));
        supervisor
    }

    /// Number of root supervisors registered with this context.
    pub fn supervisor_count(&self) -> usize {
        self.roots.len()
    }

    /// Asks every root supervisor to shut down. Each cascade runs on its
    /// own loop; observe progress through the supervisors' lifecycle
    /// states.
    pub fn shutdown_all(&self) {
        for entry in self.roots.iter() {
            entry.value().shutdown();
        }
    }
}
