//! Built-in icon catalog.
//!
//! Registered into the component registry before mount. Paths are drawn on
//! a 1024 unit grid.

#[cfg(feature = "csr")]
use leptos::prelude::*;

#[cfg(feature = "csr")]
use crate::registry::ComponentRegistry;
use crate::registry::ComponentDef;

const VIEW_BOX: &str = "0 0 1024 1024";

const fn icon(paths: &'static [&'static str]) -> ComponentDef {
    ComponentDef { view_box: VIEW_BOX, paths }
}

pub const CLOSE: ComponentDef = icon(&["M195 240l45-45 272 272 272-272 45 45-272 272 272 272-45 45-272-272-272 272-45-45 272-272z"]);
pub const DELETE: ComponentDef = icon(&[
    "M160 256h704v64H160z",
    "M384 128h256v64H384z",
    "M256 320h64v512h384V320h64v576H256z",
]);
pub const HEADSET: ComponentDef = icon(&[
    "M512 128a352 352 0 0 0-352 352v224h64V480a288 288 0 0 1 576 0v224h64V480A352 352 0 0 0 512 128z",
    "M160 576h160v256H160zM704 576h160v256H704z",
]);
pub const MICROPHONE: ComponentDef = icon(&[
    "M384 192a128 128 0 0 1 256 0v256a128 128 0 0 1-256 0z",
    "M256 448h64a192 192 0 0 0 384 0h64a256 256 0 0 1-224 254v130h-64V702a256 256 0 0 1-224-254z",
]);
pub const PLUS: ComponentDef = icon(&["M480 192h64v288h288v64H544v288h-64V544H192v-64h288z"]);
pub const REFRESH: ComponentDef = icon(&[
    "M771 353A288 288 0 1 0 800 512h64a352 352 0 1 1-48-177V224h64v224H656v-64h115z",
]);
pub const SEARCH: ComponentDef = icon(&[
    "M448 128a320 320 0 0 1 253 516l195 195-45 45-195-195A320 320 0 1 1 448 128zm0 64a256 256 0 1 0 0 512 256 256 0 0 0 0-512z",
]);
pub const SETTING: ComponentDef = icon(&[
    "M448 96h128l24 112 72 42 109-36 64 111-85 76v82l85 76-64 111-109-36-72 42-24 112H448l-24-112-72-42-109 36-64-111 85-76v-82l-85-76 64-111 109 36 72-42z",
    "M512 384a128 128 0 1 0 0 256 128 128 0 0 0 0-256z",
]);
pub const STAR: ComponentDef = icon(&["M512 96l122 264 286 34-212 196 58 282-254-144-254 144 58-282-212-196 286-34z"]);
pub const USER: ComponentDef = icon(&[
    "M512 128a192 192 0 1 1 0 384 192 192 0 0 1 0-384z",
    "M192 896a320 320 0 0 1 640 0h-64a256 256 0 0 0-512 0z",
]);
pub const VIDEO_PAUSE: ComponentDef = icon(&["M352 256h96v512h-96zM576 256h96v512h-96z"]);
pub const VIDEO_PLAY: ComponentDef = icon(&["M352 224l448 288-448 288z"]);

/// Every built-in icon, in registration order.
pub const CATALOG: &[(&str, ComponentDef)] = &[
    ("Close", CLOSE),
    ("Delete", DELETE),
    ("Headset", HEADSET),
    ("Microphone", MICROPHONE),
    ("Plus", PLUS),
    ("Refresh", REFRESH),
    ("Search", SEARCH),
    ("Setting", SETTING),
    ("Star", STAR),
    ("User", USER),
    ("VideoPause", VIDEO_PAUSE),
    ("VideoPlay", VIDEO_PLAY),
];

/// Render a registered icon by name. Unknown names render nothing.
#[cfg(feature = "csr")]
#[component]
pub fn Icon(#[prop(into)] name: String, #[prop(optional, into)] class: Option<String>) -> impl IntoView {
    let def = use_context::<ComponentRegistry>().and_then(|registry| registry.get(&name).copied());
    if def.is_none() {
        log::warn!(target: crate::diagnostics::LOG_TARGET, "unknown icon `{name}`");
    }
    def.map(|def| {
        view! {
            <svg class=class viewBox=def.view_box xmlns="http://www.w3.org/2000/svg" fill="currentColor" aria-hidden="true">
                {def.paths.iter().map(|d| view! { <path d=*d/> }).collect_view()}
            </svg>
        }
    })
}

#[cfg(test)]
#[path = "icons_test.rs"]
mod icons_test;
