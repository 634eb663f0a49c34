use crate::common::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something that happened to one aggregate.
pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    fn aggregate_id(&self) -> &str;
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Event-sourced state. Commands record events; `apply` is the only place
/// state changes, so replaying the same events rebuilds the same state.
pub trait AggregateRoot: Send + Sync + Clone {
    type Event: DomainEvent + Serialize + for<'de> Deserialize<'de>;

    fn aggregate_id(&self) -> &str;

    /// Number of events applied so far.
    fn version(&self) -> u64;

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()>;

    fn uncommitted_events(&self) -> &[Self::Event];

    fn mark_events_as_committed(&mut self);

    fn add_event(&mut self, event: Self::Event);

    /// Apply `event` and queue it for publishing. A rejected event is not queued.
    fn record(&mut self, event: Self::Event) -> DomainResult<()> {
        self.apply(&event)?;
        self.add_event(event);
        Ok(())
    }
}

/// Rebuild an aggregate by applying previously published events to `seed`.
/// Events addressed to a different aggregate are rejected.
pub fn rehydrate<A, I>(mut seed: A, history: I) -> DomainResult<A>
where
    A: AggregateRoot,
    I: IntoIterator<Item = A::Event>,
{
    for event in history {
        if event.aggregate_id() != seed.aggregate_id() {
            return Err(DomainError::InvalidCommand {
                reason: format!(
                    "{} belongs to {}, not {}",
                    event.event_type(),
                    event.aggregate_id(),
                    seed.aggregate_id()
                ),
            });
        }
        seed.apply(&event)?;
    }
    Ok(seed)
}
