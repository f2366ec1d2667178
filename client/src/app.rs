use leptos::prelude::*;
use wasm_bindgen::JsCast;

use std::cell::RefCell;

use gloo_storage::Storage;
use stopwatch_shared::{
    Controls, DisplaySettings, ElapsedTimeTracker, HourPolicy, Lap, Precision, Theme,
    TrackerSink, format_elapsed,
};

use crate::clock::BrowserClock;
use crate::interval::IntervalScheduler;

const SETTINGS_KEY: &str = "stopwatch_settings";

type BrowserTracker = ElapsedTimeTracker<BrowserClock, IntervalScheduler, SignalSink>;

struct KeydownBinding {
    window: web_sys::Window,
    _handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static TRACKER: RefCell<Option<BrowserTracker>> = const { RefCell::new(None) };
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// UI preferences persisted across visits. Timer state is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Settings {
    theme: Theme,
    display: DisplaySettings,
}

/// Pushes tracker output into the signals the view renders from.
#[derive(Clone, Copy)]
struct SignalSink {
    elapsed: RwSignal<String>,
    laps: RwSignal<Vec<Lap>>,
    controls: RwSignal<Controls>,
}

impl TrackerSink for SignalSink {
    fn show_elapsed(&mut self, formatted: &str) {
        self.elapsed.update(|text| {
            text.clear();
            text.push_str(formatted);
        });
    }

    fn show_laps(&mut self, laps: &[Lap]) {
        self.laps.set(laps.to_vec());
    }

    fn show_controls(&mut self, controls: Controls) {
        self.controls.set(controls);
    }
}

/// Run `f` against the mounted tracker. No-op before mount, after unmount,
/// or if the tracker is already borrowed further up the stack.
fn with_tracker(f: impl FnOnce(&mut BrowserTracker)) {
    TRACKER.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            web_sys::console::warn_1(&"stopwatch tracker busy, dropping event".into());
            return;
        };
        if let Some(tracker) = slot.as_mut() {
            f(tracker);
        }
    });
}

fn install_tracker(tracker: BrowserTracker) {
    let old = TRACKER.with(|slot| slot.borrow_mut().replace(tracker));
    // Dropped outside the borrow; its Drop cancels any live interval.
    drop(old);
}

fn uninstall_tracker() {
    let old = TRACKER.with(|slot| slot.borrow_mut().take());
    drop(old);
}

fn unbind_keydown() {
    KEYDOWN_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old
                .window
                .remove_event_listener_with_callback("keydown", old._handler.as_ref().unchecked_ref());
        }
    });
}

fn toggle_running(tracker: &mut BrowserTracker) {
    if tracker.is_running() {
        tracker.stop();
    } else {
        tracker.start();
    }
}

fn apply_theme_class(theme: Theme) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(body) = window.document().and_then(|doc| doc.body()) else {
        return;
    };
    let _ = body
        .class_list()
        .toggle_with_force(Theme::DARK_CLASS, theme.is_dark());
}

/// Split `HH:MM:SS.mmm` into the clock part and the `.mmm` suffix.
fn split_millis(text: &str) -> (&str, Option<&str>) {
    match text.find('.') {
        Some(idx) => (&text[..idx], Some(&text[idx..])),
        None => (text, None),
    }
}

/// Root component. Owns the tracker for the lifetime of the mount and maps
/// clicks and shortcuts onto its operations.
#[component]
pub fn App() -> impl IntoView {
    let saved: Settings = gloo_storage::LocalStorage::get(SETTINGS_KEY).unwrap_or_default();
    let theme: RwSignal<Theme> = RwSignal::new(saved.theme);
    let display: RwSignal<DisplaySettings> = RwSignal::new(saved.display);
    let elapsed: RwSignal<String> = RwSignal::new(String::new());
    let laps: RwSignal<Vec<Lap>> = RwSignal::new(Vec::new());
    let controls: RwSignal<Controls> = RwSignal::new(Controls::derive(false, 0));

    let sink = SignalSink {
        elapsed,
        laps,
        controls,
    };
    install_tracker(ElapsedTimeTracker::new(
        BrowserClock::new(),
        IntervalScheduler::new(|| with_tracker(BrowserTracker::tick)),
        sink,
        saved.display,
    ));
    with_tracker(BrowserTracker::render);
    on_cleanup(|| {
        unbind_keydown();
        uninstall_tracker();
    });

    // Persist settings to localStorage on any change
    Effect::new(move || {
        let settings = Settings {
            theme: theme.get(),
            display: display.get(),
        };
        if let Err(e) = gloo_storage::LocalStorage::set(SETTINGS_KEY, settings) {
            web_sys::console::warn_1(&format!("Failed to save settings: {e}").into());
        }
    });

    Effect::new(move || {
        apply_theme_class(theme.get());
    });

    Effect::new(move || {
        let settings = display.get();
        with_tracker(|tracker| {
            if tracker.settings() != settings {
                tracker.apply_settings(settings);
            }
        });
    });

    // Keyboard shortcuts: Space start/stop, L lap, R reset, T theme
    Effect::new(move || {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            return;
        };

        unbind_keydown();

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                if e.repeat() || e.ctrl_key() || e.meta_key() || e.alt_key() {
                    return;
                }
                let key = e.key();
                let target_tag = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| el.tag_name())
                    .unwrap_or_default();

                if target_tag == "INPUT" || target_tag == "TEXTAREA" {
                    return;
                }
                // A focused button already turns Space into a click.
                if target_tag == "BUTTON" && key == " " {
                    return;
                }

                match key.as_str() {
                    " " => {
                        e.prevent_default();
                        with_tracker(toggle_running);
                    }
                    "l" | "L" => {
                        with_tracker(|tracker| {
                            tracker.record_lap();
                        });
                    }
                    "r" | "R" => with_tracker(BrowserTracker::reset),
                    "t" | "T" => theme.update(|t| *t = t.toggled()),
                    _ => {}
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        } else {
            web_sys::console::warn_1(&"Failed to bind keyboard shortcuts".into());
        }
    });

    let clock_text = move || elapsed.with(|text| split_millis(text).0.to_string());
    let millis_text = move || elapsed.with(|text| split_millis(text).1.map(str::to_string));

    view! {
        <main class="stopwatch">
            <header class="stopwatch-header">
                <h1>"Stopwatch"</h1>
                <button
                    class="theme-toggle"
                    title=move || theme.get().toggle_title()
                    on:click=move |_| theme.update(|t| *t = t.toggled())
                >
                    {move || theme.get().toggle_icon()}
                </button>
            </header>

            <div class="timer-display" aria-live="off">
                {clock_text}
                <span class="milliseconds">{millis_text}</span>
            </div>

            <div class="controls">
                <button
                    class="btn btn-start"
                    title="Start (Space)"
                    disabled=move || !controls.get().start
                    on:click=move |_| with_tracker(BrowserTracker::start)
                >
                    "Start"
                </button>
                <button
                    class="btn btn-stop"
                    title="Stop (Space)"
                    disabled=move || !controls.get().stop
                    on:click=move |_| with_tracker(BrowserTracker::stop)
                >
                    "Stop"
                </button>
                <button
                    class="btn btn-lap"
                    title="Lap (L)"
                    disabled=move || !controls.get().lap
                    on:click=move |_| {
                        with_tracker(|tracker| {
                            tracker.record_lap();
                        })
                    }
                >
                    "Lap"
                </button>
                <button
                    class="btn btn-reset"
                    title="Reset (R)"
                    disabled=move || !controls.get().reset
                    on:click=move |_| with_tracker(BrowserTracker::reset)
                >
                    "Reset"
                </button>
            </div>

            <div class="options">
                <label class="option">
                    <input
                        type="checkbox"
                        prop:checked=move || display.get().precision == Precision::Millis
                        on:change=move |e| {
                            let precision = if event_target_checked(&e) {
                                Precision::Millis
                            } else {
                                Precision::Seconds
                            };
                            display.update(|d| d.precision = precision);
                        }
                    />
                    " Milliseconds"
                </label>
                <label class="option">
                    <input
                        type="checkbox"
                        prop:checked=move || display.get().hours == HourPolicy::Wrap24
                        on:change=move |e| {
                            let hours = if event_target_checked(&e) {
                                HourPolicy::Wrap24
                            } else {
                                HourPolicy::Unbounded
                            };
                            display.update(|d| d.hours = hours);
                        }
                    />
                    " Wrap hours at 24"
                </label>
            </div>

            <ul class="laps">
                <For
                    each=move || laps.get()
                    key=|lap| (lap.index, lap.elapsed_ms)
                    children=move |lap: Lap| {
                        view! {
                            <li>
                                <span class="lap-label">{format!("Lap {}:", lap.index)}</span>
                                " "
                                <span class="lap-time">
                                    {move || format_elapsed(lap.elapsed_ms, &display.get())}
                                </span>
                                <span class="lap-split">
                                    {move || format!("+{}", format_elapsed(lap.split_ms, &display.get()))}
                                </span>
                            </li>
                        }
                    }
                />
            </ul>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_when_storage_is_partial() {
        let parsed: Settings =
            serde_json::from_str(r#"{"theme":"dark"}"#).expect("partial settings should parse");
        assert_eq!(parsed.theme, Theme::Dark);
        assert_eq!(parsed.display, DisplaySettings::default());
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings {
            theme: Theme::Dark,
            display: DisplaySettings::default()
                .with_precision(Precision::Seconds)
                .with_hours(HourPolicy::Wrap24),
        };
        let json = serde_json::to_string(&settings).expect("settings should serialize");
        let parsed: Settings = serde_json::from_str(&json).expect("settings should parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn splits_millis_suffix() {
        assert_eq!(split_millis("01:02:03.456"), ("01:02:03", Some(".456")));
        assert_eq!(split_millis("01:02:03"), ("01:02:03", None));
    }
}
