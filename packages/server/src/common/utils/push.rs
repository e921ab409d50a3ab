use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// FCM legacy topic endpoint. Subscribers of the member app opt into topics
/// ("news", "events", "payments") client-side; the server only addresses the
/// topic, never individual devices.
const PUSH_SEND_URL: &str = "https://fcm.googleapis.com/fcm/send";

/// Topic Push Notification Client
/// Sends push notifications to member app subscribers of a topic
pub struct PushClient {
    client: Client,
    server_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct TopicMessage {
    to: String,
    notification: MessagePayload,
    data: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct MessagePayload {
    title: String,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    message_id: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

impl PushClient {
    pub fn new(server_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            server_key,
        }
    }

    /// Send a push notification to every subscriber of a topic
    pub async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()> {
        let message = TopicMessage {
            to: format!("/topics/{}", topic),
            notification: MessagePayload {
                title: title.to_string(),
                body: body.to_string(),
                sound: Some("default".to_string()),
            },
            data,
        };

        let mut request = self.client.post(PUSH_SEND_URL).json(&message);

        if let Some(key) = &self.server_key {
            request = request.header("Authorization", format!("key={}", key));
        }

        info!("Sending push notification to topic: {}", topic);

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            error!("Push send failed {}: {}", status, body);
            anyhow::bail!("Push API error {}: {}", status, body);
        }

        let send_response: SendResponse = response.json().await?;

        if let Some(err) = send_response.error {
            error!("Push gateway rejected message: {}", err);
            anyhow::bail!("Push gateway rejected message: {}", err);
        }

        info!(
            message_id = ?send_response.message_id,
            "Push notification accepted"
        );
        Ok(())
    }
}
