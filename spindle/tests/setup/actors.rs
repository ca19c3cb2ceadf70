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

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use spindle_core::prelude::*;

use super::messages::{AttachTick, Ping, PingQuery, Pong, Tick};

/// Answers every [`Ping`] with a [`Pong`].
#[derive(Default)]
pub struct Ponger {
    pub pings: Arc<AtomicU32>,
}

impl Actor for Ponger {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_ping);
        Ok(())
    }
}

impl Ponger {
    fn on_ping(&mut self, ctx: &mut Context<'_, Self>, msg: &Ping) {
        self.pings.fetch_add(1, Ordering::SeqCst);
        ctx.send(&msg.reply_to, Pong { seq: msg.seq });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered(u32),
    TimedOut(u32),
}

/// Issues one [`PingQuery`] on start and records every response.
pub struct Requester {
    pub target: AddressPtr,
    pub timeout: Duration,
    pub outcomes: Arc<Mutex<Vec<Outcome>>>,
}

impl Actor for Requester {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_response);
        Ok(())
    }

    fn on_start(&mut self, ctx: &mut Context<'_, Self>) {
        ctx.request(&self.target.clone(), PingQuery { seq: 3 })
            .timeout(self.timeout);
    }
}

impl Requester {
    fn on_response(&mut self, _ctx: &mut Context<'_, Self>, msg: &Response<PingQuery>) {
        let seq = msg.request().payload().seq;
        let outcome = match msg.error() {
            None => Outcome::Answered(msg.payload().expect("payload on success").seq),
            Some(ErrorCode::RequestTimeout) => Outcome::TimedOut(seq),
            Some(other) => panic!("unexpected error code: {other}"),
        };
        self.outcomes.lock().push(outcome);
    }
}

/// Request target that either echoes or stays silent.
pub struct Responder {
    pub echo: bool,
}

impl Actor for Responder {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_query);
        Ok(())
    }
}

impl Responder {
    fn on_query(&mut self, ctx: &mut Context<'_, Self>, msg: &Request<PingQuery>) {
        if self.echo {
            ctx.reply_to(msg, Pong { seq: msg.payload().seq });
        }
    }
}

/// Subscribes a tick handler on a watched (possibly foreign) address when
/// poked and records what it sees.
pub struct Recorder {
    pub watch: AddressPtr,
    pub seen: Arc<Mutex<Vec<u32>>>,
}

impl Actor for Recorder {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_attach);
        Ok(())
    }
}

impl Recorder {
    fn on_attach(&mut self, ctx: &mut Context<'_, Self>, _msg: &AttachTick) {
        let watch = self.watch.clone();
        ctx.subscribe_to(&watch, Self::on_tick);
    }

    fn on_tick(&mut self, _ctx: &mut Context<'_, Self>, msg: &Tick) {
        self.seen.lock().push(msg.seq);
    }
}
