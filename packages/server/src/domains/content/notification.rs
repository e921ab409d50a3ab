//! Notification message composition.
//!
//! Messages are ephemeral: composed at the moment a publish transition is
//! detected, handed to the push gateway, then discarded. Delivery is not
//! tracked or retried.

use super::collection::OrderedCollection;

/// Named notification channels subscribers opt into from the member app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    News,
    Events,
    Payments,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::News => "news",
            Topic::Events => "events",
            Topic::Payments => "payments",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visible characters of the excerpt kept in the notification body.
pub const EXCERPT_LIMIT: usize = 70;

/// Body shown when the entity has no excerpt.
pub const PLACEHOLDER_BODY: &str = "Confira a novidade no aplicativo.";

/// A composed push notification, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub topic: Topic,
    pub title: String,
    pub body: String,
    pub url: String,
}

/// Truncate an excerpt to the first [`EXCERPT_LIMIT`] characters, appending
/// an ellipsis when truncation occurred. Empty excerpts fall back to the
/// placeholder body.
pub fn notification_body(excerpt: &str) -> String {
    if excerpt.is_empty() {
        return PLACEHOLDER_BODY.to_string();
    }
    if excerpt.chars().count() <= EXCERPT_LIMIT {
        return excerpt.to_string();
    }
    let truncated: String = excerpt.chars().take(EXCERPT_LIMIT).collect();
    format!("{}…", truncated)
}

/// Compose the message for a newly published entity, if its kind has a topic.
pub fn compose(
    collection: OrderedCollection,
    title: &str,
    excerpt: &str,
) -> Option<NotificationMessage> {
    let topic = collection.topic()?;
    Some(NotificationMessage {
        topic,
        title: format!("{}{}", collection.notification_prefix(), title),
        body: notification_body(excerpt),
        url: collection.deep_link().to_string(),
    })
}
