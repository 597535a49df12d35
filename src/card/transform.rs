//! Uptime Kuma notification to Google Chat card conversion.

use super::models::{
    Card, CardHeader, CardSection, CardV2, ChatMessage, UptimeKumaNotification, Widget,
};

use chrono::{DateTime, Utc};

/// Placeholder values Kuma fills in for fields it has no data for.
const NULL_MARKERS: [&str; 3] = ["N/A", "NA", "NULL"];

/// Trim a field and blank it out if it only holds a null placeholder.
pub fn sanitize(value: &str) -> String {
    let trimmed = value.trim();
    if NULL_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return String::new();
    }
    trimmed.to_string()
}

/// Convert a notification into a Google Chat card message.
pub fn transform(notification: &UptimeKumaNotification) -> ChatMessage {
    transform_at(notification, Utc::now())
}

/// Convert a notification, stamping the card id with `now`.
pub fn transform_at(notification: &UptimeKumaNotification, now: DateTime<Utc>) -> ChatMessage {
    let heartbeat = &notification.heartbeat;
    let monitor = &notification.monitor;

    let msg = sanitize(&notification.msg);
    let heartbeat_msg = sanitize(&heartbeat.msg);
    let url = sanitize(&monitor.url);
    let hostname = sanitize(&monitor.hostname);

    let status = Status::from_code(heartbeat.status);
    let title = format!("{} - {}", status.label(), monitor.name);

    let subtitle = first_non_empty(&msg, &heartbeat_msg)
        .map(str::to_string)
        .unwrap_or_else(|| status.fallback_subtitle().to_string());

    let mut widgets = Vec::new();

    if !heartbeat_msg.is_empty() {
        widgets.push(Widget::paragraph(heartbeat_msg.as_str()));
    }

    let display_url = if url.is_empty() { &hostname } else { &url };
    if !display_url.is_empty() {
        widgets.push(Widget::labeled("URL", display_url.as_str()));
    }

    if heartbeat.ping > 0.0 {
        widgets.push(Widget::labeled(
            "Response Time",
            format!("{:.2} ms", heartbeat.ping),
        ));
    }

    if !heartbeat.time.is_empty() {
        widgets.push(Widget::labeled("Time", heartbeat.time.as_str()));
    }

    // The button needs a real URL; a bare hostname is not clickable.
    if !url.is_empty() {
        widgets.push(Widget::link_button("Visit Site", url.as_str()));
    }

    let text = preview_text(status, &monitor.name, &msg, &heartbeat_msg);

    ChatMessage {
        text,
        cards_v2: vec![CardV2 {
            card_id: format!("uptime-kuma-{}-{}", monitor.id, now.timestamp()),
            card: Card {
                header: CardHeader { title, subtitle },
                sections: vec![CardSection { widgets }],
            },
        }],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Up,
    Down,
}

impl Status {
    fn from_code(code: i64) -> Self {
        if code == 1 {
            Status::Up
        } else {
            Status::Down
        }
    }

    fn label(self) -> &'static str {
        match self {
            Status::Up => "Up",
            Status::Down => "Down",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Status::Up => "✅",
            Status::Down => "🔴",
        }
    }

    fn headline(self) -> &'static str {
        match self {
            Status::Up => "Application is back online",
            Status::Down => "Application went down",
        }
    }

    fn fallback_subtitle(self) -> &'static str {
        match self {
            Status::Up => "Service is operational",
            Status::Down => "Service is experiencing issues",
        }
    }
}

fn first_non_empty<'a>(primary: &'a str, secondary: &'a str) -> Option<&'a str> {
    [primary, secondary].into_iter().find(|s| !s.is_empty())
}

/// Build the text shown in mobile and desktop notification previews.
fn preview_text(status: Status, monitor_name: &str, msg: &str, heartbeat_msg: &str) -> String {
    let inspected = first_non_empty(msg, heartbeat_msg).unwrap_or_default();

    if is_certificate_expiry(inspected) {
        return strip_down_prefix(inspected).to_string();
    }

    let mut lines = vec![
        format!("{} {}", status.emoji(), status.headline()),
        monitor_name.to_string(),
        format!("[{}] [{} {}]", monitor_name, status.emoji(), status.label()),
    ];
    if !heartbeat_msg.is_empty() {
        lines.push(heartbeat_msg.to_string());
    }

    lines.join("\n")
}

fn is_certificate_expiry(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.contains("certificate") && (lower.contains("expire") || lower.contains("expiration"))
}

/// Drop a leading "Down -" marker, in any casing, and the whitespace around it.
fn strip_down_prefix(msg: &str) -> &str {
    const PREFIX: &str = "down -";

    let trimmed = msg.trim();
    match trimmed.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => trimmed[PREFIX.len()..].trim(),
        _ => trimmed,
    }
}
