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

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::ensure;

use spindle::prelude::*;

use crate::setup::actors::Ponger;
use crate::setup::messages::Ping;
use crate::setup::{block_until, initialize_tracing};

mod setup;

/// A full init, start, message exchange and shutdown cycle on the
/// dedicated-thread loop; the fatal shutdown timer stays quiet.
#[test]
fn thread_loop_runs_full_lifecycle() -> anyhow::Result<()> {
    initialize_tracing();
    let event_loop = ThreadLoop::spawn();
    let system = System::launch();
    let sup = system.create_supervisor(
        event_loop.clone() as Arc<dyn EventLoop>,
        SupervisorConfig::default(),
    );
    let pings = Arc::new(AtomicU32::new(0));
    let ponger = sup.create_actor(Ponger {
        pings: pings.clone(),
    });

    sup.start();
    ensure!(
        block_until(
            || sup.lifecycle_state() == LifecycleState::Operational,
            Duration::from_secs(1),
        ),
        "supervisor never became operational"
    );
    ensure!(
        block_until(
            || ponger.lifecycle_state() == LifecycleState::Operational,
            Duration::from_secs(1),
        ),
        "actor never became operational"
    );

    send_to(
        &ponger.address(),
        Ping {
            seq: 1,
            reply_to: sup.address().clone(),
        },
    );
    ensure!(
        block_until(|| pings.load(Ordering::SeqCst) == 1, Duration::from_secs(1)),
        "ping was never delivered"
    );

    sup.shutdown();
    ensure!(
        block_until(
            || sup.lifecycle_state() == LifecycleState::ShutDown,
            Duration::from_secs(1),
        ),
        "supervisor did not shut down in time"
    );
    assert_eq!(sup.child_count(), 0);

    event_loop.stop();
    event_loop.join();
    Ok(())
}

/// Two supervisors in one process, each on its own thread loop, tearing
/// down independently.
#[test]
fn independent_thread_loops_shut_down_separately() -> anyhow::Result<()> {
    initialize_tracing();
    let loop_one = ThreadLoop::spawn();
    let loop_two = ThreadLoop::spawn();
    let system = System::launch();
    let sup_one = system.create_supervisor(
        loop_one.clone() as Arc<dyn EventLoop>,
        SupervisorConfig::default(),
    );
    let sup_two = system.create_supervisor(
        loop_two.clone() as Arc<dyn EventLoop>,
        SupervisorConfig::default(),
    );

    sup_one.start();
    sup_two.start();
    ensure!(
        block_until(
            || {
                sup_one.lifecycle_state() == LifecycleState::Operational
                    && sup_two.lifecycle_state() == LifecycleState::Operational
            },
            Duration::from_secs(1),
        ),
        "supervisors never became operational"
    );

    sup_one.shutdown();
    ensure!(
        block_until(
            || sup_one.lifecycle_state() == LifecycleState::ShutDown,
            Duration::from_secs(1),
        ),
        "first supervisor did not shut down in time"
    );
    assert_eq!(sup_two.lifecycle_state(), LifecycleState::Operational);

    sup_two.shutdown();
    ensure!(
        block_until(
            || sup_two.lifecycle_state() == LifecycleState::ShutDown,
            Duration::from_secs(1),
        ),
        "second supervisor did not shut down in time"
    );

    loop_one.stop();
    loop_two.stop();
    loop_one.join();
    loop_two.join();
    Ok(())
}
