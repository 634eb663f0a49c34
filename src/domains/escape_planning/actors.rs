use super::events::EscapeEvent;
use tokio::sync::mpsc;

/// Publishes session events to whoever listens on the other end of the channel.
pub struct EscapeCommandActor {
    event_sender: mpsc::Sender<EscapeEvent>,
}

impl EscapeCommandActor {
    pub fn new(event_sender: mpsc::Sender<EscapeEvent>) -> Self {
        Self { event_sender }
    }

    pub async fn publish(&self, event: EscapeEvent) -> Result<(), String> {
        self.event_sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    pub async fn publish_all(&self, events: &[EscapeEvent]) -> Result<(), String> {
        for event in events {
            self.publish(event.clone()).await?;
        }
        Ok(())
    }
}
