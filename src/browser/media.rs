fn media_matches(query: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(query).ok().flatten())
        .map(|list| list.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

/// Mouse-class input: can hover and points precisely. Touch screens fail this.
pub fn fine_pointer() -> bool {
    media_matches("(hover: hover) and (pointer: fine)")
}
