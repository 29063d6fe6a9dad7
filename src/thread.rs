use crate::model::{Approver, Message, MessageKind, ThreadConfig, mailbox};
use crate::timestamp::format_timestamp;

/// A fully composed thread plus the total elapsed minutes across the reply
/// chain. The total is returned alongside the messages (rather than left in
/// shared state) so callers can reuse it without re-deriving it.
#[derive(Clone, Debug)]
pub struct ComposedThread {
    pub messages: Vec<Message>,
    pub total_delay_minutes: i64,
}

/// Resolve the display order for the original request's To line: every id in
/// `order` that still names a live approver first (in `order`'s order), then
/// every approver not mentioned in `order` (in list order). Ids with no
/// matching approver are silently dropped, and a repeated id resolves only
/// once; drift between the two inputs is never an error. Pure and
/// referentially transparent — this is also the basis for reconciling the
/// order itself.
pub fn resolve_recipients<'a>(approvers: &'a [Approver], order: &[u32]) -> Vec<&'a Approver> {
    let mut resolved: Vec<&Approver> = Vec::with_capacity(approvers.len());
    for id in order {
        let Some(approver) = approvers.iter().find(|a| a.id == *id) else {
            continue;
        };
        if !resolved.iter().any(|a| a.id == approver.id) {
            resolved.push(approver);
        }
    }
    for approver in approvers {
        if !resolved.iter().any(|a| a.id == approver.id) {
            resolved.push(approver);
        }
    }
    resolved
}

/// Repair a recipient order after the approver set changed: vanished ids are
/// dropped, duplicates collapse to their first occurrence, surviving ids keep
/// their relative order, and approvers missing from the order are appended in
/// list order. The result is always a
/// set-equal permutation of the current approver ids, and reapplying the
/// operation is a no-op.
pub fn reconcile_order(approvers: &[Approver], order: &[u32]) -> Vec<u32> {
    resolve_recipients(approvers, order)
        .iter()
        .map(|a| a.id)
        .collect()
}

fn organization_mailbox(config: &ThreadConfig) -> String {
    mailbox(&config.organization, &config.cc_email)
}

fn request_body(config: &ThreadConfig) -> String {
    let mut body = format!(
        "Hi all,\n\nRequesting approval for {}.\n\nAmount: {}\nVendor: {}\nInvoice: {}\n\nBest regards,\n{}\n{}",
        config.event_name,
        config.amount,
        config.vendor,
        config.invoice_link,
        config.sender_name,
        config.sender_title,
    );
    if !config.sender_signature.is_empty() {
        // Signature fragments are opaque markup from the profile; passed
        // through verbatim, never parsed or sanitized.
        body.push('\n');
        body.push_str(&config.sender_signature);
    }
    body
}

fn sender_approval_body(config: &ThreadConfig) -> String {
    let mut body = format!(
        "Approved from my side.\n\nOver to you for sign-off.\n\n{}\n{}",
        config.sender_name, config.sender_title,
    );
    if !config.sender_signature.is_empty() {
        body.push('\n');
        body.push_str(&config.sender_signature);
    }
    body
}

fn approver_body(approver: &Approver) -> String {
    let mut body = String::from("Approved.\n\n");
    body.push_str(&approver.name);
    if let Some(role) = &approver.role {
        body.push('\n');
        body.push_str(role);
    }
    if let Some(sig) = &approver.signature {
        body.push('\n');
        body.push_str(sig);
    }
    body
}

/// Build the ordered message sequence for a thread: the request, the
/// sender's own approval, then one approval per approver in list order.
/// Always exactly `approvers.len() + 2` messages.
///
/// Timestamp offsets accumulate the sender delay and then each approver
/// delay in turn; the request is always at offset 0. Delays are unvalidated
/// user input, so the accumulator is not guaranteed monotonic (negative
/// delays are preserved as-is).
pub fn compose(
    config: &ThreadConfig,
    approvers: &[Approver],
    recipient_order: &[u32],
) -> ComposedThread {
    let org = organization_mailbox(config);
    let sender = mailbox(&config.sender_name, &config.sender_email);
    let all_approvers: Vec<String> = approvers
        .iter()
        .map(|a| mailbox(&a.name, &a.email))
        .collect();

    let mut messages = Vec::with_capacity(approvers.len() + 2);

    let mut request_to: Vec<String> = resolve_recipients(approvers, recipient_order)
        .iter()
        .map(|a| mailbox(&a.name, &a.email))
        .collect();
    request_to.push(org.clone());

    messages.push(Message {
        kind: MessageKind::Request,
        from_name: config.sender_name.clone(),
        from_email: config.sender_email.clone(),
        to: request_to,
        cc: Vec::new(),
        timestamp: format_timestamp(&config.base_date, &config.base_time, 0),
        offset_minutes: 0,
        body: request_body(config),
    });

    let mut offset = config.sender_delay_minutes;
    messages.push(Message {
        kind: MessageKind::SenderApproval,
        from_name: config.sender_name.clone(),
        from_email: config.sender_email.clone(),
        to: all_approvers.clone(),
        cc: vec![org.clone()],
        timestamp: format_timestamp(&config.base_date, &config.base_time, offset),
        offset_minutes: offset,
        body: sender_approval_body(config),
    });

    for approver in approvers {
        offset += approver.delay_minutes;
        // Each approver replies to the requester and keeps every other
        // approver (plus the organization address) in the loop via Cc.
        let mut cc: Vec<String> = approvers
            .iter()
            .filter(|other| other.id != approver.id)
            .map(|other| mailbox(&other.name, &other.email))
            .collect();
        cc.push(org.clone());

        messages.push(Message {
            kind: MessageKind::Approval,
            from_name: approver.name.clone(),
            from_email: approver.email.clone(),
            to: vec![sender.clone()],
            cc,
            timestamp: format_timestamp(&config.base_date, &config.base_time, offset),
            offset_minutes: offset,
            body: approver_body(approver),
        });
    }

    log::debug!(
        "composed thread: {} messages, total delay {} min",
        messages.len(),
        offset,
    );

    ComposedThread {
        messages,
        total_delay_minutes: offset,
    }
}
