mod common;

use common::{approver, sample_config, two_approvers};
use mailproof_pdf::{MessageKind, compose, mailbox, reconcile_order, resolve_recipients};

#[test]
fn message_count_and_kind_order() {
    let config = sample_config();
    for n in 0u32..6 {
        let approvers: Vec<_> = (0..n)
            .map(|i| approver(i + 1, &format!("A{i}"), &format!("a{i}@example.com"), 10))
            .collect();
        let order: Vec<u32> = approvers.iter().map(|a| a.id).collect();
        let thread = compose(&config, &approvers, &order);

        assert_eq!(thread.messages.len(), n as usize + 2);
        assert_eq!(thread.messages[0].kind, MessageKind::Request);
        assert_eq!(thread.messages[1].kind, MessageKind::SenderApproval);
        for msg in &thread.messages[2..] {
            assert_eq!(msg.kind, MessageKind::Approval);
        }
    }
}

#[test]
fn cumulative_offsets_and_timestamps() {
    // Spec worked example: base 2024-03-01 09:00, sender delay 5, one
    // approver with delay 45.
    let config = sample_config();
    let approvers = vec![approver(1, "Alex Moe", "alex@example.com", 45)];
    let thread = compose(&config, &approvers, &[1]);

    assert_eq!(thread.messages.len(), 3);
    assert_eq!(thread.messages[0].offset_minutes, 0);
    assert_eq!(thread.messages[1].offset_minutes, 5);
    assert_eq!(thread.messages[2].offset_minutes, 50);
    assert_eq!(thread.total_delay_minutes, 50);

    assert_eq!(thread.messages[0].timestamp, "Friday, March 1, 2024 9:00 AM");
    assert_eq!(thread.messages[1].timestamp, "Friday, March 1, 2024 9:05 AM");
    assert_eq!(thread.messages[2].timestamp, "Friday, March 1, 2024 9:50 AM");
}

#[test]
fn offsets_accumulate_in_list_order() {
    let config = sample_config();
    let approvers = two_approvers(); // delays 45, 30; sender delay 5
    let thread = compose(&config, &approvers, &[1, 2]);

    let offsets: Vec<i64> = thread.messages.iter().map(|m| m.offset_minutes).collect();
    assert_eq!(offsets, vec![0, 5, 50, 80]);
}

#[test]
fn negative_delays_are_preserved() {
    // Delays are unvalidated user input; the composer keeps them as-is even
    // when the resulting offsets run backwards.
    let mut config = sample_config();
    config.sender_delay_minutes = -10;
    let approvers = vec![approver(1, "Alex", "alex@example.com", 3)];
    let thread = compose(&config, &approvers, &[1]);

    assert_eq!(thread.messages[1].offset_minutes, -10);
    assert_eq!(thread.messages[1].timestamp, "Friday, March 1, 2024 8:50 AM");
    assert_eq!(thread.messages[2].offset_minutes, -7);
}

#[test]
fn recipient_rotation() {
    let config = sample_config();
    let approvers = two_approvers();
    let thread = compose(&config, &approvers, &[1, 2]);

    let sender = mailbox(&config.sender_name, &config.sender_email);
    let org = mailbox(&config.organization, &config.cc_email);
    let alex = mailbox(&approvers[0].name, &approvers[0].email);
    let berit = mailbox(&approvers[1].name, &approvers[1].email);

    // Request: resolved recipients plus the organization address, no Cc.
    assert_eq!(thread.messages[0].to, vec![alex.clone(), berit.clone(), org.clone()]);
    assert!(thread.messages[0].cc.is_empty());

    // Sender approval: all approvers in list order, organization in Cc.
    assert_eq!(thread.messages[1].to, vec![alex.clone(), berit.clone()]);
    assert_eq!(thread.messages[1].cc, vec![org.clone()]);

    // Each approver replies to the sender, every other approver plus the
    // organization in Cc.
    assert_eq!(thread.messages[2].to, vec![sender.clone()]);
    assert_eq!(thread.messages[2].cc, vec![berit, org.clone()]);
    assert_eq!(thread.messages[3].to, vec![sender]);
    assert_eq!(thread.messages[3].cc, vec![alex, org]);
}

#[test]
fn display_order_controls_request_to_line_only() {
    let config = sample_config();
    let approvers = two_approvers();
    let thread = compose(&config, &approvers, &[2, 1]);

    let alex = mailbox(&approvers[0].name, &approvers[0].email);
    let berit = mailbox(&approvers[1].name, &approvers[1].email);
    let org = mailbox(&config.organization, &config.cc_email);

    // Request To follows the display permutation...
    assert_eq!(thread.messages[0].to, vec![berit.clone(), alex.clone(), org]);
    // ...while the reply chain stays in approver list order.
    assert_eq!(thread.messages[2].from_name, approvers[0].name);
    assert_eq!(thread.messages[3].from_name, approvers[1].name);
}

#[test]
fn duplicated_order_ids_do_not_repeat_request_recipients() {
    let config = sample_config();
    let approvers = two_approvers();
    let thread = compose(&config, &approvers, &[2, 2]);

    let alex = mailbox(&approvers[0].name, &approvers[0].email);
    let berit = mailbox(&approvers[1].name, &approvers[1].email);
    let org = mailbox(&config.organization, &config.cc_email);
    assert_eq!(thread.messages[0].to, vec![berit, alex, org]);
}

#[test]
fn signatures_pass_through_verbatim() {
    let mut config = sample_config();
    config.sender_signature = "<b>Dana Berg</b><br/>Northwind Events".to_string();
    let mut approvers = two_approvers();
    approvers[0].role = Some("Finance Lead".to_string());
    approvers[0].signature = Some("<i>Sent from my phone</i>".to_string());

    let thread = compose(&config, &approvers, &[1, 2]);

    assert!(thread.messages[0].body.contains("<b>Dana Berg</b><br/>Northwind Events"));
    assert!(thread.messages[2].body.contains("Finance Lead"));
    assert!(thread.messages[2].body.contains("<i>Sent from my phone</i>"));
}

#[test]
fn request_body_carries_event_details() {
    let config = sample_config();
    let thread = compose(&config, &two_approvers(), &[1, 2]);
    let body = &thread.messages[0].body;

    assert!(body.contains(&config.amount));
    assert!(body.contains(&config.vendor));
    assert!(body.contains(&config.invoice_link));
}

#[test]
fn resolver_orders_and_drops() {
    let approvers = two_approvers();

    // Spec example: order [2] resolves to [2, 1].
    assert_eq!(reconcile_order(&approvers, &[2]), vec![2, 1]);

    // Unknown ids are silently dropped.
    assert_eq!(reconcile_order(&approvers, &[9, 2, 7]), vec![2, 1]);

    // Repeated ids resolve once, keeping the first occurrence's position.
    assert_eq!(reconcile_order(&approvers, &[2, 2]), vec![2, 1]);
    assert_eq!(reconcile_order(&approvers, &[2, 1, 2, 1]), vec![2, 1]);

    // Empty order falls back to list order.
    assert_eq!(reconcile_order(&approvers, &[]), vec![1, 2]);

    let resolved = resolve_recipients(&approvers, &[2, 1]);
    assert_eq!(resolved.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 1]);
}

#[test]
fn reconcile_is_a_permutation_and_idempotent() {
    let approvers = vec![
        approver(1, "A", "a@example.com", 1),
        approver(2, "B", "b@example.com", 1),
        approver(3, "C", "c@example.com", 1),
    ];
    let cases: Vec<Vec<u32>> = vec![
        vec![],
        vec![3],
        vec![2, 3],
        vec![3, 1, 2],
        vec![7, 3, 7, 1],
        vec![2, 2, 2],
        vec![3, 1, 3, 2, 1],
    ];
    for order in cases {
        let once = reconcile_order(&approvers, &order);

        let mut sorted = once.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3], "not a permutation for {order:?}");

        let twice = reconcile_order(&approvers, &once);
        assert_eq!(once, twice, "not idempotent for {order:?}");
    }
}

#[test]
fn resolver_is_referentially_transparent() {
    let approvers = two_approvers();
    let order = vec![2u32, 1];
    let a = reconcile_order(&approvers, &order);
    let b = reconcile_order(&approvers, &order);
    assert_eq!(a, b);
    assert_eq!(order, vec![2, 1]); // inputs untouched
}
