use chrono::{Local, TimeZone};
use dioxus::prelude::*;
use photo_session::Notice;

fn format_hms(ts_ms: i64) -> String {
    match Local.timestamp_millis_opt(ts_ms).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => String::from("--:--:--"),
    }
}

fn notice_style(notice: &Notice) -> &'static str {
    if notice.is_failure() {
        "font-size: 12px; color: #c62828; margin: 4px 0;"
    } else {
        "font-size: 12px; color: #2e7d32; margin: 4px 0;"
    }
}

/// Toast-style list of the latest session notices, newest first
#[component]
pub fn NoticeList(notices: Vec<Notice>) -> Element {
    if notices.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { style: "background: #f8f9fa; padding: 12px; margin: 16px 0; border-radius: 8px; border: 1px solid #e0e0e0;",
            for (i, notice) in notices.iter().rev().enumerate() {
                p {
                    key: "{i}",
                    style: "{notice_style(notice)}",
                    "{format_hms(notice.ts_ms)}  {notice.message}"
                }
            }
        }
    }
}
