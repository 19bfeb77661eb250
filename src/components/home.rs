use crate::components::{NoticeList, PhotoCard};
use crate::services;
use dioxus::prelude::*;
use photo_session::{Notice, PhotoSession, SessionState};
use tokio::sync::broadcast::error::RecvError;

/// Notices kept on screen
const MAX_VISIBLE_NOTICES: usize = 5;

const BUTTON_STYLE: &str = "flex: 1; padding: 14px; font-size: 16px; background: #0066cc; color: white; border: none; border-radius: 8px;";

/// Mirror the session state into a signal
fn follow_state(session: &PhotoSession, mut target: Signal<SessionState>) {
    let mut rx = session.subscribe_state();
    spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            target.set(state);
        }
    });
}

fn follow_rolls(session: &PhotoSession, mut target: Signal<u64>) {
    let mut rx = session.subscribe_rolls();
    spawn(async move {
        while rx.changed().await.is_ok() {
            let rolls = *rx.borrow_and_update();
            target.set(rolls);
        }
    });
}

fn follow_notices(session: &PhotoSession, mut target: Signal<Vec<Notice>>) {
    let mut rx = session.subscribe_notices();
    spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notice) => {
                    let mut list = target.write();
                    list.push(notice);
                    let len = list.len();
                    if len > MAX_VISIBLE_NOTICES {
                        list.drain(0..len - MAX_VISIBLE_NOTICES);
                    }
                }
                Err(RecvError::Lagged(skipped)) => log::warn!("Skipped {} notices", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

// Operation results already reach the screen through state and notices,
// so the spawned tasks drop them.

fn roll(session: &PhotoSession) {
    let session = session.clone();
    spawn(async move {
        let _ = session.fetch_random_photo().await;
    });
}

fn blur(session: &PhotoSession) {
    let session = session.clone();
    spawn(async move {
        let _ = session.apply_blur().await;
    });
}

fn grayscale(session: &PhotoSession) {
    let session = session.clone();
    spawn(async move {
        let _ = session.apply_grayscale().await;
    });
}

fn save(session: &PhotoSession) {
    let session = session.clone();
    spawn(async move {
        let _ = session.save().await;
    });
}

fn load(session: &PhotoSession) {
    let session = session.clone();
    spawn(async move {
        let _ = session.load().await;
    });
}

#[component]
pub fn HomeScreen() -> Element {
    let sessions = use_hook(|| {
        services::open_sessions().map_err(|e| {
            log::error!("Failed to open photo sessions: {}", e);
            e.user_message()
        })
    });
    let picsum_state = use_signal(|| SessionState::Loading);
    let mars_state = use_signal(|| SessionState::Loading);
    let rolls = use_signal(|| 0u64);
    let notices = use_signal(Vec::<Notice>::new);

    // Wire the channels and roll once on mount
    let wiring = sessions.clone();
    use_hook(move || {
        if let Ok(sessions) = wiring {
            follow_state(&sessions.picsum, picsum_state);
            follow_state(&sessions.mars, mars_state);
            follow_rolls(&sessions.picsum, rolls);
            for session in sessions.all() {
                follow_notices(session, notices);
                roll(session);
            }
        }
    });

    let teardown = sessions.clone();
    use_drop(move || {
        if let Ok(sessions) = &teardown {
            sessions.close();
        }
    });

    let sessions = match sessions {
        Ok(sessions) => sessions,
        Err(message) => {
            return rsx! {
                div { style: "padding: 16px; max-width: 600px; margin: 0 auto;",
                    div { style: "background: #fdecea; padding: 16px; border-radius: 8px; color: #c62828;",
                        h2 { style: "margin: 0 0 8px 0; font-size: 18px;", "❌ Startup failed" }
                        p { style: "margin: 0; font-size: 14px;", "{message}" }
                    }
                }
            };
        }
    };

    let roll_all = sessions.clone();
    let blur_picsum = sessions.picsum.clone();
    let gray_picsum = sessions.picsum.clone();
    let save_all = sessions.clone();
    let load_all = sessions.clone();

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            h1 { style: "color: #0066cc; text-align: center; margin: 24px 0; font-size: 28px; font-weight: 700;",
                "🪐 Mars Photos"
            }

            PhotoCard { title: "Picsum".to_string(), state: picsum_state() }
            PhotoCard { title: "Mars".to_string(), state: mars_state() }

            p { style: "font-size: 14px; color: #555; margin: 0 0 12px 0;", "Rolls: {rolls()}" }

            div { style: "display: flex; gap: 12px; margin-bottom: 12px;",
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        for session in roll_all.all() {
                            roll(session);
                        }
                    },
                    "🎲 Roll"
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| blur(&blur_picsum),
                    "Blur"
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| grayscale(&gray_picsum),
                    "Gray"
                }
            }
            div { style: "display: flex; gap: 12px; margin-bottom: 12px;",
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        for session in save_all.all() {
                            save(session);
                        }
                    },
                    "💾 Save"
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        for session in load_all.all() {
                            load(session);
                        }
                    },
                    "📂 Load"
                }
            }

            NoticeList { notices: notices() }
        }
    }
}
