/*
[INPUT]:  Session snapshots and notices
[OUTPUT]: Styled terminal lines
[POS]:    CLI rendering
[UPDATE]: When the snapshot gains fields worth showing
*/

use console::style;

use wepin_session::{Notice, NoticeLevel, SessionSnapshot};

pub fn print_notice(notice: &Notice) {
    let line = match notice.level {
        NoticeLevel::Info => style(notice.message.as_str()).green(),
        NoticeLevel::Warning => style(notice.message.as_str()).yellow(),
        NoticeLevel::Error => style(notice.message.as_str()).red().bold(),
    };
    println!("{line}");
}

pub fn print_snapshot(snapshot: &SessionSnapshot) {
    println!("{}", style("Session").bold().cyan());
    for (label, value) in snapshot_rows(snapshot) {
        println!("  {:<14} {}", style(label).dim(), value);
    }
}

/// Label/value rows for the session summary
pub fn snapshot_rows(snapshot: &SessionSnapshot) -> Vec<(&'static str, String)> {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    vec![
        ("status", snapshot.status.to_string()),
        (
            "email",
            or_dash(
                snapshot
                    .profile
                    .as_ref()
                    .and_then(|p| p.email())
                    .map(str::to_string),
            ),
        ),
        ("register", snapshot.registration_needed.to_string()),
        ("network", snapshot.network.clone()),
        ("chain id", or_dash(snapshot.chain_id.map(|id| id.to_string()))),
        ("provider", snapshot.provider_ready.to_string()),
        ("address", or_dash(snapshot.current_address.clone())),
        (
            "accounts",
            or_dash(snapshot.accounts.as_ref().map(|a| a.join(", "))),
        ),
        ("balance", or_dash(snapshot.balance.clone())),
    ]
}
