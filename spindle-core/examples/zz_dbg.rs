use std::sync::Arc;
use spindle_core::prelude::*;

#[path = "../tests/setup/mod.rs"]
mod setup;

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
    let event_loop = setup::test_loop::TestLoop::new();
    let system = System::launch();
    let sup = system.create_supervisor(event_loop.clone() as Arc<dyn EventLoop>, SupervisorConfig::default());
    println!("pending before start: {}", event_loop.pending_posts());
    sup.start();
    println!("pending after start: {}", event_loop.pending_posts());
    event_loop.run();
    println!("pending after run: {}", event_loop.pending_posts());
    println!("sup state: {:?}", sup.lifecycle_state());
}
