use serde::{Deserialize, Serialize};

/// Static configuration for the synthetic thread: the event being approved,
/// the requesting sender, and organizational metadata. Mutated only by the
/// profile layer; read-only to the composer and renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreadConfig {
    pub event_name: String,
    pub amount: String,
    pub vendor: String,
    pub invoice_link: String,
    /// Calendar date of the request, `YYYY-MM-DD`. May be empty or malformed;
    /// timestamps then degrade to sentinel strings instead of failing.
    pub base_date: String,
    /// 24-hour time of the request, `HH:MM`. Same degradation rules as `base_date`.
    pub base_time: String,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_title: String,
    /// Minutes between the request and the sender's own approval.
    /// User-editable and unvalidated: zero and negative values are preserved.
    #[serde(default)]
    pub sender_delay_minutes: i64,
    /// Opaque markup, appended to message bodies verbatim. Never parsed
    /// or sanitized here; that is the editing boundary's concern.
    #[serde(default)]
    pub sender_signature: String,
    pub organization: String,
    pub cc_email: String,
}

/// One approver in the reply chain.
///
/// `id` is stable for the life of a profile: assigned at creation, unique
/// within the list, never reused after deletion. `recipient_order` references
/// approvers by id, so ids must survive edits to the rest of the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Approver {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Minutes elapsed between the previous message in the reply chain and
    /// this approver's reply. Unvalidated; may be zero or negative.
    #[serde(default)]
    pub delay_minutes: i64,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    SenderApproval,
    Approval,
}

/// A single synthetic message, derived from the profile on every composition
/// pass and never persisted. Recipient lists hold display strings
/// (`Name <email>`) ready for the To:/Cc: lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub from_name: String,
    pub from_email: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    /// Formatted display timestamp, or a sentinel ("Invalid"/"Error") when
    /// the profile's base date or time is missing or unparsable.
    pub timestamp: String,
    /// Cumulative minutes after the request. The request itself is always 0.
    pub offset_minutes: i64,
    pub body: String,
}

/// One fixed-height window into the continuously rendered thread.
/// `offset` is the vertical distance (in points) from the top of the
/// rendered stream to the top of this page's content window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageWindow {
    pub index: usize,
    pub offset: f32,
}

pub fn mailbox(name: &str, email: &str) -> String {
    if name.is_empty() {
        email.to_string()
    } else {
        format!("{name} <{email}>")
    }
}
