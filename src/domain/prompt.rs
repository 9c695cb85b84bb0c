//! Prompt helpers: validation and "surprise me" suggestions.

/// Example prompts offered by the "surprise me" action.
pub const SURPRISE_PROMPTS: &[&str] = &[
    "an armchair in the shape of an avocado",
    "a futuristic city floating in the clouds, digital art",
    "a synthwave style sunset above the reflecting water of the sea",
    "a macro 35mm photograph of two mice in Hawaii wearing tiny swimsuits",
    "a fortune-telling shiba inu reading your fate in a giant hamburger",
    "an oil painting of a lighthouse in a storm by a moonlit sea",
    "a hedgehog astronaut planting a flag on a cheese moon",
    "a stained glass window depicting a robot chef",
    "a cozy library inside a hollow tree, warm lantern light",
    "a cat wearing a monocle painted in the style of a Dutch master",
    "a comic book cover of a superhero wearing headphones",
    "a Van Gogh style painting of an astronaut riding a horse",
];

/// Returns whether a prompt has any non-whitespace content.
#[must_use]
pub fn is_blank(prompt: &str) -> bool {
    prompt.trim().is_empty()
}

/// Picks a random example prompt that differs from `current`.
#[must_use]
pub fn surprise_prompt(current: &str) -> &'static str {
    let index = rand::random_range(0..SURPRISE_PROMPTS.len());
    surprise_prompt_at(current, index)
}

/// Deterministic core of [`surprise_prompt`].
///
/// Returns the prompt at `index` (wrapped), stepping to the next entry when
/// it equals `current` so the user always sees a change.
///
/// # Examples
///
/// ```
/// use artfeed::domain::prompt::{surprise_prompt_at, SURPRISE_PROMPTS};
///
/// assert_eq!(surprise_prompt_at("", 0), SURPRISE_PROMPTS[0]);
/// assert_eq!(surprise_prompt_at(SURPRISE_PROMPTS[0], 0), SURPRISE_PROMPTS[1]);
/// ```
#[must_use]
pub fn surprise_prompt_at(current: &str, index: usize) -> &'static str {
    let len = SURPRISE_PROMPTS.len();
    let candidate = SURPRISE_PROMPTS[index % len];
    if candidate == current {
        SURPRISE_PROMPTS[(index + 1) % len]
    } else {
        candidate
    }
}
