//! Poll loop — supplies the polling cadence for an [`Integration`].
//!
//! The loop runs `setup` once, then calls `update` on every tick and
//! forwards the resulting entities to the [`IntegrationContext`]. A failed
//! cycle is logged and retried on the next tick; there is no other retry.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use neviweb_domain::entity::Entity;

use crate::ports::{Integration, IntegrationContext};

/// Shortest accepted polling interval; shorter ones are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running [`PollLoop`].
pub struct PollHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Ask the loop to stop, run the integration's teardown and wait for it.
    pub async fn shutdown(self) {
        // The loop may already be gone; nothing left to stop then.
        let _ = self.stop.send(());
        if let Err(err) = self.task.await {
            tracing::warn!(%err, "poll loop task ended abnormally");
        }
    }

    /// Stop the loop immediately without running teardown.
    pub fn abort(self) {
        self.task.abort();
    }
}

/// Drives an integration on a fixed interval.
pub struct PollLoop<I, C> {
    integration: I,
    context: C,
    interval: Duration,
}

impl<I, C> PollLoop<I, C>
where
    I: Integration + Send + 'static,
    C: IntegrationContext + 'static,
{
    /// Spawn the loop on the current tokio runtime.
    ///
    /// An `interval` below [`MIN_INTERVAL`] is raised to it.
    pub fn start(integration: I, context: C, interval: Duration) -> PollHandle {
        let interval = if interval < MIN_INTERVAL {
            tracing::warn!(
                integration = integration.name(),
                ?interval,
                min = ?MIN_INTERVAL,
                "poll interval too short, using minimum"
            );
            MIN_INTERVAL
        } else {
            interval
        };
        let (stop, stopped) = oneshot::channel();
        let poll_loop = Self {
            integration,
            context,
            interval,
        };
        PollHandle {
            stop,
            task: tokio::spawn(poll_loop.run(stopped)),
        }
    }

    async fn run(mut self, mut stopped: oneshot::Receiver<()>) {
        let name = self.integration.name();

        match self.integration.setup().await {
            Ok(entities) => {
                tracing::info!(integration = name, count = entities.len(), "integration set up");
                forward(&self.context, entities).await;
            }
            Err(err) => {
                tracing::error!(integration = name, %err, "integration setup failed");
                return;
            }
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; setup already produced fresh state.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut stopped => break,
                _ = ticker.tick() => self.iterate().await,
            }
        }

        if let Err(err) = self.integration.teardown().await {
            tracing::warn!(integration = name, %err, "integration teardown failed");
        }
        tracing::info!(integration = name, "poll loop stopped");
    }

    async fn iterate(&mut self) {
        let name = self.integration.name();
        match self.integration.update().await {
            Ok(entities) => forward(&self.context, entities).await,
            Err(err) => {
                tracing::warn!(integration = name, %err, "poll cycle failed, retrying next interval");
            }
        }
    }
}

async fn forward<C: IntegrationContext>(context: &C, entities: Vec<Entity>) {
    if let Err(err) = context.upsert_all(entities).await {
        tracing::warn!(%err, "failed to forward entities to host");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use neviweb_domain::entity::AttributeValue;
    use neviweb_domain::error::NeviwebError;
    use neviweb_domain::id::DeviceId;

    #[derive(Default)]
    struct Counters {
        setups: AtomicUsize,
        updates: AtomicUsize,
        torn_down: AtomicBool,
    }

    struct CountingIntegration {
        counters: Arc<Counters>,
        fail_setup: bool,
    }

    fn entity(value: f64) -> Entity {
        Entity::builder()
            .entity_id("sensor.neviweb130_1")
            .unique_id(DeviceId::from(1))
            .friendly_name("neviweb130 sensor Basement")
            .state(Some(AttributeValue::Float(value)))
            .build()
            .unwrap()
    }

    impl Integration for CountingIntegration {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn setup(&mut self) -> Result<Vec<Entity>, NeviwebError> {
            self.counters.setups.fetch_add(1, Ordering::SeqCst);
            if self.fail_setup {
                return Err(NeviwebError::Upstream("catalog unavailable".into()));
            }
            Ok(vec![entity(0.0)])
        }

        async fn update(&mut self) -> Result<Vec<Entity>, NeviwebError> {
            let n = self.counters.updates.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 1 {
                return Err(NeviwebError::Upstream("flaky".into()));
            }
            Ok(vec![entity(f64::from(u8::try_from(n).unwrap()))])
        }

        async fn teardown(&mut self) -> Result<(), NeviwebError> {
            self.counters.torn_down.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingContext {
        seen: Arc<Mutex<Vec<Entity>>>,
    }

    impl IntegrationContext for RecordingContext {
        async fn upsert_entity(&self, entity: Entity) -> Result<(), NeviwebError> {
            self.seen.lock().unwrap().push(entity);
            Ok(())
        }
    }

    fn integration(fail_setup: bool) -> (CountingIntegration, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        (
            CountingIntegration {
                counters: Arc::clone(&counters),
                fail_setup,
            },
            counters,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn should_setup_once_then_update_on_each_tick() {
        let (integration, counters) = integration(false);
        let ctx = RecordingContext::default();
        let handle = PollLoop::start(integration, ctx.clone(), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(150)).await;

        assert_eq!(counters.setups.load(Ordering::SeqCst), 1);
        assert_eq!(counters.updates.load(Ordering::SeqCst), 2);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_a_failed_cycle() {
        let (integration, _counters) = integration(false);
        let ctx = RecordingContext::default();
        let handle = PollLoop::start(integration, ctx.clone(), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(150)).await;
        handle.shutdown().await;

        let seen = ctx.seen.lock().unwrap();
        // setup snapshot + second update; the first update failed
        let states: Vec<_> = seen.iter().map(|e| e.state.clone()).collect();
        assert_eq!(
            states,
            vec![
                Some(AttributeValue::Float(0.0)),
                Some(AttributeValue::Float(2.0)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_teardown_on_shutdown() {
        let (integration, counters) = integration(false);
        let handle = PollLoop::start(
            integration,
            RecordingContext::default(),
            Duration::from_secs(60),
        );
        tokio::time::sleep(Duration::from_secs(1)).await;

        handle.shutdown().await;
        assert!(counters.torn_down.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn should_raise_zero_interval_to_minimum() {
        let (integration, counters) = integration(false);
        let handle = PollLoop::start(integration, RecordingContext::default(), Duration::ZERO);

        tokio::time::sleep(MIN_INTERVAL * 2 + MIN_INTERVAL / 2).await;

        assert_eq!(counters.updates.load(Ordering::SeqCst), 2);
        handle.shutdown().await;
        assert!(counters.torn_down.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_setup_fails() {
        let (integration, counters) = integration(true);
        let ctx = RecordingContext::default();
        let handle = PollLoop::start(integration, ctx.clone(), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(300)).await;

        assert_eq!(counters.updates.load(Ordering::SeqCst), 0);
        assert!(ctx.seen.lock().unwrap().is_empty());
        handle.shutdown().await;
        assert!(!counters.torn_down.load(Ordering::SeqCst));
    }
}
