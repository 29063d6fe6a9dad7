use mailproof_pdf::{Approver, ThreadConfig};

pub fn sample_config() -> ThreadConfig {
    ThreadConfig {
        event_name: "Spring Offsite 2024".to_string(),
        amount: "$1,840.00".to_string(),
        vendor: "Harbor Catering AS".to_string(),
        invoice_link: "https://invoices.example.com/8831".to_string(),
        base_date: "2024-03-01".to_string(),
        base_time: "09:00".to_string(),
        sender_name: "Dana Berg".to_string(),
        sender_email: "dana.berg@example.com".to_string(),
        sender_title: "Event Coordinator".to_string(),
        sender_delay_minutes: 5,
        sender_signature: String::new(),
        organization: "Northwind Events".to_string(),
        cc_email: "approvals@northwind.example".to_string(),
    }
}

pub fn approver(id: u32, name: &str, email: &str, delay: i64) -> Approver {
    Approver {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: None,
        delay_minutes: delay,
        signature: None,
    }
}

pub fn two_approvers() -> Vec<Approver> {
    vec![
        approver(1, "Alex Moe", "alex.moe@example.com", 45),
        approver(2, "Berit Strand", "berit.strand@example.com", 30),
    ]
}

pub fn profile_json() -> String {
    let config = serde_json::to_string(&sample_config()).unwrap();
    let approvers = serde_json::to_string(&two_approvers()).unwrap();
    format!(
        "{{\"config\":{config},\"approvers\":{approvers},\"recipient_order\":[2,1]}}"
    )
}
