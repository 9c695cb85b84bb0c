//! Plain-terminal rendering of view models.
//!
//! Renderers return strings rather than printing, so the CLI decides where
//! output goes and tests can inspect it.
//!
//! ```text
//! AppState → compute_*_viewmodel → FeedViewModel / CreateViewModel → render_* → String
//! ```

use crate::ui::helpers::{highlighted_text, truncate};
use crate::ui::theme::ThemeMode;
use crate::ui::viewmodel::{CardItem, CreateViewModel, FeedViewModel};

/// Longest prompt shown on one card line.
const PROMPT_WIDTH: usize = 72;

/// Renders the feed page.
#[must_use]
pub fn render_feed(vm: &FeedViewModel, mode: ThemeMode) -> String {
    let palette = mode.palette();
    let mut out = String::new();

    if vm.loading {
        out.push_str(&format!("{}Loading...{}\n", ThemeMode::fg(palette.text_dim), ThemeMode::reset()));
    }

    if let Some(error) = &vm.error {
        out.push_str(&format!("{}{error}{}\n", ThemeMode::fg(palette.error), ThemeMode::reset()));
    }

    if let Some(heading) = &vm.heading {
        out.push_str(&format!(
            "{}{heading}{}\n\n",
            ThemeMode::fg(palette.text_dim),
            ThemeMode::reset()
        ));
    }

    if let Some(empty) = &vm.empty_state {
        out.push_str(&format!(
            "{}{}{}{}\n",
            ThemeMode::bold(),
            ThemeMode::fg(palette.heading),
            empty.title.to_uppercase(),
            ThemeMode::reset()
        ));
        return out;
    }

    for card in &vm.cards {
        out.push_str(&render_card(card, mode));
    }
    out
}

fn render_card(card: &CardItem, mode: ThemeMode) -> String {
    let palette = mode.palette();
    let prompt = truncate(&card.prompt, PROMPT_WIDTH);
    let prompt_highlights: Vec<(usize, usize)> = if prompt == card.prompt {
        card.prompt_highlights.clone()
    } else {
        vec![]
    };

    format!(
        "{}[{}]{} {}\n    {}\n    {}{}{}\n",
        ThemeMode::fg(palette.author),
        card.initial,
        ThemeMode::reset(),
        highlighted_text(&card.author_name, &card.author_highlights, &palette),
        highlighted_text(&prompt, &prompt_highlights, &palette),
        ThemeMode::fg(palette.text_dim),
        truncate(&card.image_uri, PROMPT_WIDTH),
        ThemeMode::reset(),
    )
}

/// Renders the create page status block.
#[must_use]
pub fn render_create(vm: &CreateViewModel, mode: ThemeMode) -> String {
    let palette = mode.palette();
    let mut out = String::new();

    let preview = vm
        .preview
        .as_deref()
        .map_or_else(|| "(preview)".to_string(), |p| truncate(p, PROMPT_WIDTH));
    out.push_str(&format!("Image: {preview}\n"));
    out.push_str(&format!("[{}]  [{}]\n", vm.generate_label, vm.share_label));

    if let Some(error) = &vm.error {
        out.push_str(&format!("{}{error}{}\n", ThemeMode::fg(palette.error), ThemeMode::reset()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::Phase;
    use crate::ui::viewmodel::EmptyState;

    #[test]
    fn empty_feed_shows_title_only() {
        let vm = FeedViewModel {
            loading: false,
            heading: Some("Showing results for zebra".into()),
            cards: vec![],
            empty_state: Some(EmptyState { title: "No Search Results Found".into() }),
            error: None,
        };
        let out = render_feed(&vm, ThemeMode::Light);
        assert!(out.contains("Showing results for zebra"));
        assert!(out.contains("NO SEARCH RESULTS FOUND"));
    }

    #[test]
    fn cards_show_author_and_prompt() {
        let vm = FeedViewModel {
            loading: false,
            heading: None,
            cards: vec![CardItem {
                id: "1".into(),
                author_name: "Alice".into(),
                initial: "A".into(),
                prompt: "a cat".into(),
                image_uri: "https://img/1.png".into(),
                author_highlights: vec![],
                prompt_highlights: vec![],
            }],
            empty_state: None,
            error: None,
        };
        let out = render_feed(&vm, ThemeMode::Dark);
        assert!(out.contains("Alice"));
        assert!(out.contains("a cat"));
        assert!(out.contains("https://img/1.png"));
    }

    #[test]
    fn create_labels_follow_phases() {
        let vm = CreateViewModel::from_phases(Phase::Pending, Phase::Idle, None, None);
        let out = render_create(&vm, ThemeMode::Light);
        assert!(out.contains("Generating..."));
        assert!(out.contains("Share with the Community"));
        assert!(out.contains("(preview)"));
    }
}
