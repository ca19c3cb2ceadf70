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
use std::collections::HashMap;

use crate::common::{AddressPtr, HandlerPtr};

/// A subscription point: the pair of an address and a handler registered on
/// it. A live point exists in exactly two places, the subscription table of
/// the address's owning supervisor and the lifetime bookkeeping of the
/// handler's actor; removal from either side triggers removal from the
/// other.
#[derive(Clone, Debug)]
pub struct SubscriptionPoint {
    /// The subscribed address.
    pub address: AddressPtr,
    /// The registered handler.
    pub handler: HandlerPtr,
}

impl PartialEq for SubscriptionPoint {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.handler == other.handler
    }
}

impl Eq for SubscriptionPoint {}

/// Whether a handler's actor lives on the supervisor owning the table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Relation {
    Mine,
    Foreign,
}

#[derive(Clone, Debug)]
pub(crate) struct SubscriptionRow {
    pub(crate) handler: HandlerPtr,
    pub(crate) relation: Relation,
}

/// Per-address dispatch table: an ordered handler list per payload type,
/// each entry tagged mine or foreign.
#[derive(Default, Debug)]
pub(crate) struct Subscription {
    rows: HashMap<TypeId, Vec<SubscriptionRow>>,
}

impl Subscription {
    /// Appends a handler. Subscribing a handler equal to an existing entry
    /// is idempotent: no second entry is created and `false` is returned.
    pub(crate) fn subscribe(&mut self, handler: HandlerPtr, relation: Relation) -> bool {
        let rows = self.rows.entry(handler.payload_type()).or_default();
        if rows.iter().any(|row| row.handler == handler) {
            return false;
        }
        rows.push(SubscriptionRow { handler, relation });
        true
    }

    /// Removes the last entry equal to `handler`. The reverse scan matches
    /// the order in which the lifetime bookkeeping records points, so the
    /// two sides stay consistent. Returns `false` when no entry matched.
    pub(crate) fn unsubscribe(&mut self, handler: &HandlerPtr) -> bool {
        let Some(rows) = self.rows.get_mut(&handler.payload_type()) else {
            return false;
        };
        let Some(pos) = rows.iter().rposition(|row| &row.handler == handler) else {
            return false;
        };
        rows.remove(pos);
        if rows.is_empty() {
            self.rows.remove(&handler.payload_type());
        }
        true
    }

    /// Clones out the handler rows for one payload type. Rows are cloned so
    /// the table lock is never held while handlers run.
    pub(crate) fn rows_for(&self, payload_type: TypeId) -> Option<Vec<SubscriptionRow>> {
        self.rows.get(&payload_type).cloned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn handler_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}
