use dioxus::prelude::*;
use photo_session::{FetchFailure, SessionState};

fn failure_text(failure: &FetchFailure) -> &'static str {
    match failure {
        FetchFailure::EmptySelection => "No photos available",
        FetchFailure::Network(_) => "Failed to load photos",
    }
}

/// Renders one session state: spinner, photo or failure view
#[component]
pub fn PhotoCard(title: String, state: SessionState) -> Element {
    rsx! {
        div { style: "background: white; border-radius: 12px; padding: 12px; margin-bottom: 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.12);",
            h2 { style: "margin: 0 0 8px 0; font-size: 18px; color: #333;", "{title}" }
            match state {
                SessionState::Loading => rsx! {
                    div { style: "height: 240px; display: flex; align-items: center; justify-content: center; color: #888;",
                        "⏳ Loading..."
                    }
                },
                SessionState::Success { message, photo } => {
                    let author = photo.author.clone().unwrap_or_default();
                    rsx! {
                        img {
                            src: "{photo.image_url}",
                            alt: "{title} photo {photo.id}",
                            style: "width: 100%; max-height: 320px; object-fit: cover; border-radius: 8px; background: #eee;",
                        }
                        p { style: "font-size: 13px; color: #555; margin: 8px 0 0 0;", "{message}" }
                        if !author.is_empty() {
                            p { style: "font-size: 12px; color: #888; margin: 4px 0 0 0;", "© {author}" }
                        }
                    }
                }
                SessionState::Error(failure) => {
                    let text = failure_text(&failure);
                    rsx! {
                        div { style: "height: 240px; display: flex; flex-direction: column; align-items: center; justify-content: center; color: #c62828;",
                            span { style: "font-size: 32px;", "⚠️" }
                            p { style: "margin: 8px 0 0 0; font-size: 14px;", "{text}" }
                        }
                    }
                }
            }
        }
    }
}
