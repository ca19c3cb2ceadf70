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

use super::messages::{
    AttachTick, DetachTick, FlushReplies, Ping, PingQuery, Pong, ReleaseResource, Tick,
};

/// Answers every [`Ping`] with a [`Pong`] to the address the ping names.
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

/// Opens an exchange with one ping on start and records the pongs.
pub struct Pinger {
    pub target: AddressPtr,
    pub pongs: Arc<Mutex<Vec<u32>>>,
}

impl Actor for Pinger {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_pong);
        Ok(())
    }

    fn on_start(&mut self, ctx: &mut Context<'_, Self>) {
        ctx.send(
            &self.target.clone(),
            Ping {
                seq: 1,
                reply_to: ctx.address().clone(),
            },
        );
    }
}

impl Pinger {
    fn on_pong(&mut self, _ctx: &mut Context<'_, Self>, msg: &Pong) {
        self.pongs.lock().push(msg.seq);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered(u32),
    TimedOut(u32),
}

/// Issues one [`PingQuery`] request on start and records every response.
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
        ctx.request(&self.target.clone(), PingQuery { seq: 7 })
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

/// How a [`Responder`] treats incoming queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderMode {
    /// Reply immediately.
    Echo,
    /// Never reply.
    Silent,
    /// Keep the request and reply only when poked with `FlushReplies`.
    Stash,
}

/// Configurable request target.
pub struct Responder {
    pub mode: ResponderMode,
    pub stashed: Vec<Request<PingQuery>>,
}

impl Responder {
    pub fn new(mode: ResponderMode) -> Self {
        Responder {
            mode,
            stashed: Vec::new(),
        }
    }
}

impl Actor for Responder {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_query);
        ctx.subscribe(Self::on_flush);
        Ok(())
    }
}

impl Responder {
    fn on_query(&mut self, ctx: &mut Context<'_, Self>, msg: &Request<PingQuery>) {
        match self.mode {
            ResponderMode::Echo => ctx.reply_to(msg, Pong { seq: msg.payload().seq }),
            ResponderMode::Silent => {}
            ResponderMode::Stash => self.stashed.push(msg.clone()),
        }
    }

    fn on_flush(&mut self, ctx: &mut Context<'_, Self>, _msg: &FlushReplies) {
        for request in self.stashed.drain(..) {
            ctx.reply_to(&request, Pong { seq: request.payload().seq });
        }
    }
}

/// Attaches a tick handler to a watched address on demand and records what
/// it sees. Optionally re-invokes the message pump from inside a handler.
pub struct Recorder {
    pub watch: AddressPtr,
    pub seen: Arc<Mutex<Vec<u32>>>,
    pub reenter_pump: bool,
}

impl Actor for Recorder {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_attach);
        ctx.subscribe(Self::on_detach);
        Ok(())
    }
}

impl Recorder {
    fn on_attach(&mut self, ctx: &mut Context<'_, Self>, _msg: &AttachTick) {
        let watch = self.watch.clone();
        ctx.subscribe_to(&watch, Self::on_tick);
    }

    fn on_detach(&mut self, ctx: &mut Context<'_, Self>, _msg: &DetachTick) {
        let watch = self.watch.clone();
        ctx.unsubscribe_from(&watch, Self::on_tick);
    }

    fn on_tick(&mut self, ctx: &mut Context<'_, Self>, msg: &Tick) {
        self.seen.lock().push(msg.seq);
        if self.reenter_pump {
            // Recursive pump invocations must be no-ops.
            if let Some(sup) = ctx.supervisor() {
                sup.do_process();
            }
        }
    }
}

/// Grabs one external resource on start and keeps it until told to let
/// go, so shutdown has something to wait on.
#[derive(Default)]
pub struct ResourceHolder;

impl Actor for ResourceHolder {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_release);
        Ok(())
    }

    fn on_start(&mut self, ctx: &mut Context<'_, Self>) {
        ctx.acquire_resource();
    }
}

impl ResourceHolder {
    fn on_release(&mut self, ctx: &mut Context<'_, Self>, _msg: &ReleaseResource) {
        ctx.release_resource();
    }
}

/// Reports a permanent init failure.
#[derive(Default)]
pub struct Unstartable;

impl Actor for Unstartable {
    fn on_initialize(&mut self, _ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        Err(ErrorCode::ActorNotInitializable)
    }
}

/// Collects [`StateResponse`] answers.
#[derive(Default)]
pub struct Prober {
    pub answers: Arc<Mutex<Vec<Option<LifecycleState>>>>,
}

impl Actor for Prober {
    fn on_initialize(&mut self, ctx: &mut Context<'_, Self>) -> Result<(), ErrorCode> {
        ctx.subscribe(Self::on_state);
        Ok(())
    }
}

impl Prober {
    fn on_state(&mut self, _ctx: &mut Context<'_, Self>, msg: &StateResponse) {
        self.answers.lock().push(msg.state);
    }
}
