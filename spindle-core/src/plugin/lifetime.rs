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

use tracing::{trace, warn};

use crate::actor::ActorBase;
use crate::common::SubscriptionPoint;
use crate::message::control::CommitUnsubscription;
use crate::plugin::{Plugin, ProcessingResult, Slot};

/// Tracks the subscription points of one actor and refuses to let shutdown
/// finish while any remain.
///
/// Points drain in reverse recording order, so the bookkeeping handlers an
/// actor subscribes first are the last to go and keep working through the
/// drain. Once the list is empty the plugin reports itself finished.
#[derive(Debug, Default)]
pub(crate) struct Lifetime {
    points: Vec<SubscriptionPoint>,
    draining: bool,
}

impl Plugin for Lifetime {
    fn id(&self) -> TypeId {
        TypeId::of::<Lifetime>()
    }

    fn activate(&mut self, base: &mut ActorBase) {
        base.install_plugin(self.id(), Slot::Shutdown);
        base.install_plugin(self.id(), Slot::Subscription);
        base.install_plugin(self.id(), Slot::Unsubscription);
    }

    fn handle_shutdown(&mut self, base: &mut ActorBase) -> ProcessingResult {
        if self.points.is_empty() {
            return ProcessingResult::Finished;
        }
        if !self.draining {
            self.draining = true;
            let Some(sup) = base.supervisor() else {
                self.points.clear();
                return ProcessingResult::Finished;
            };
            trace!(actor = base.actor_id, points = self.points.len(), "draining subscriptions");
            for point in self.points.iter().rev() {
                sup.unsubscribe_actor(point.address.clone(), point.handler.clone());
            }
        }
        ProcessingResult::Pending
    }

    fn handle_subscription(
        &mut self,
        base: &mut ActorBase,
        point: &SubscriptionPoint,
    ) -> ProcessingResult {
        if !self.points.contains(point) {
            trace!(actor = base.actor_id, ?point, "subscription recorded");
            self.points.push(point.clone());
        }
        ProcessingResult::Consumed
    }

    fn handle_unsubscription(
        &mut self,
        base: &mut ActorBase,
        point: &SubscriptionPoint,
        external: bool,
    ) -> ProcessingResult {
        if external {
            // The address belongs to a foreign supervisor; ask it to drop
            // the authoritative table entry.
            if let Some(owner) = point.address.supervisor() {
                base.send(
                    owner.address().clone(),
                    CommitUnsubscription {
                        point: point.clone(),
                    },
                );
            }
        } else if let Some(sup) = base.supervisor() {
            sup.commit_unsubscription(point);
        }
        match self.points.iter().rposition(|known| known == point) {
            Some(position) => {
                self.points.remove(position);
            }
            None => {
                debug_assert!(false, "unsubscription for a point never recorded");
                warn!(
                    actor = base.actor_id,
                    ?point,
                    code = %crate::message::ErrorCode::SubscriptionMissing,
                    "unsubscription for unknown point"
                );
            }
        }
        if self.points.is_empty() {
            ProcessingResult::Finished
        } else {
            ProcessingResult::Consumed
        }
    }
}
