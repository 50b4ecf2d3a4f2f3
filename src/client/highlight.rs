use crate::models::Recipe;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

pub const HIGHLIGHT_OPEN: &str = r#"<span class="bg-yellow-200 font-semibold">"#;
pub const HIGHLIGHT_CLOSE: &str = "</span>";

pub const EMPTY_RESULTS_MESSAGE: &str = "No recipes found. Try different ingredients.";

const ANSI_OPEN: &str = "\x1b[1;33m";
const ANSI_CLOSE: &str = "\x1b[0m";

/// Wraps case-insensitive ingredient occurrences in emphasis markers.
///
/// Ingredients are applied one after another in search order, each pass
/// running over the text left unwrapped or already wrapped by earlier passes,
/// never over the markers. Overlaps are not merged: with `["egg", "eggplant"]`
/// the first pass already splits "Eggplant", so the second never matches.
/// Matching happens on the raw record text; HTML escaping is applied to each
/// segment only when the output is assembled, so entities are never split.
#[derive(Debug, Clone)]
pub struct Highlighter {
    open: String,
    close: String,
    escape_html: bool,
}

/// Text split into plain runs and marker boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Open,
    Close,
}

impl Highlighter {
    /// HTML emphasis; record text is escaped, markup is not
    pub fn html() -> Self {
        Self {
            open: HIGHLIGHT_OPEN.to_string(),
            close: HIGHLIGHT_CLOSE.to_string(),
            escape_html: true,
        }
    }

    /// Bold yellow terminal output
    pub fn ansi() -> Self {
        Self {
            open: ANSI_OPEN.to_string(),
            close: ANSI_CLOSE.to_string(),
            escape_html: false,
        }
    }

    pub fn custom(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            escape_html: false,
        }
    }

    pub fn highlight(&self, text: &str, ingredients: &[String]) -> String {
        let mut segments = vec![Segment::Text(text.to_string())];

        for ingredient in ingredients.iter().filter(|i| !i.is_empty()) {
            let regex = match RegexBuilder::new(&regex::escape(ingredient))
                .case_insensitive(true)
                .build()
            {
                Ok(regex) => regex,
                Err(e) => {
                    tracing::warn!(ingredient = %ingredient, error = %e, "Skipping highlight");
                    continue;
                }
            };

            segments = segments
                .into_iter()
                .flat_map(|segment| match segment {
                    Segment::Text(run) => wrap_matches(&regex, &run),
                    marker => vec![marker],
                })
                .collect();
        }

        let mut out = String::with_capacity(text.len());
        for segment in &segments {
            match segment {
                Segment::Text(run) if self.escape_html => {
                    out.push_str(&html_escape::encode_text(run))
                }
                Segment::Text(run) => out.push_str(run),
                Segment::Open => out.push_str(&self.open),
                Segment::Close => out.push_str(&self.close),
            }
        }
        out
    }
}

fn wrap_matches(regex: &Regex, run: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in regex.find_iter(run) {
        if m.start() > last {
            segments.push(Segment::Text(run[last..m.start()].to_string()));
        }
        segments.push(Segment::Open);
        segments.push(Segment::Text(m.as_str().to_string()));
        segments.push(Segment::Close);
        last = m.end();
    }

    if last < run.len() {
        segments.push(Segment::Text(run[last..].to_string()));
    }
    segments
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::html()
    }
}

/// Highlight with HTML emphasis markup
pub fn highlight(text: &str, ingredients: &[String]) -> String {
    Highlighter::html().highlight(text, ingredients)
}

/// One result row, ready to inject as markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRecipe {
    pub name: String,
    pub description: String,
    pub ingredients_html: String,
    pub instructions_html: String,
}

/// Render a recipe with the searched ingredients highlighted in its
/// ingredient and instruction text
pub fn render_recipe(recipe: &Recipe, ingredients: &[String]) -> RenderedRecipe {
    let highlighter = Highlighter::html();

    RenderedRecipe {
        name: html_escape::encode_text(&recipe.name).into_owned(),
        description: html_escape::encode_text(recipe.description.as_deref().unwrap_or_default())
            .into_owned(),
        ingredients_html: format!(
            "<b>Ingredients:</b> {}",
            highlighter.highlight(recipe.ingredient_text(), ingredients)
        ),
        instructions_html: format!(
            "<b>Instructions:</b> {}",
            highlighter.highlight(recipe.instruction_text(), ingredients)
        ),
    }
}

/// "3 recipes found", or `None` for an empty page
pub fn result_summary(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 recipe found".to_string()),
        n => Some(format!("{n} recipes found")),
    }
}

pub fn page_label(page: u32) -> String {
    format!("Page {page}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_highlight_case_insensitive() {
        let out = highlight("Eggs, Milk", &terms(&["egg"]));
        assert_eq!(
            out,
            r#"<span class="bg-yellow-200 font-semibold">Egg</span>s, Milk"#
        );
    }

    #[test]
    fn test_highlight_every_occurrence() {
        let out = Highlighter::custom("[", "]").highlight("Egg yolk, egg white", &terms(&["egg"]));
        assert_eq!(out, "[Egg] yolk, [egg] white");
    }

    #[test]
    fn test_highlight_in_search_order() {
        let out = Highlighter::custom("[", "]")
            .highlight("tomato, onion, garlic", &terms(&["onion", "tomato"]));
        assert_eq!(out, "[tomato], [onion], garlic");
    }

    #[test]
    fn test_overlapping_terms_not_deduplicated() {
        let out = Highlighter::custom("[", "]").highlight("Eggplant", &terms(&["egg", "eggplant"]));
        assert_eq!(out, "[Egg]plant");

        let out = Highlighter::custom("[", "]").highlight("Eggplant", &terms(&["eggplant", "egg"]));
        assert_eq!(out, "[[Egg]plant]");
    }

    #[test]
    fn test_no_terms_leaves_text() {
        assert_eq!(highlight("Eggs, Milk", &[]), "Eggs, Milk");
        assert_eq!(highlight("Eggs, Milk", &terms(&[""])), "Eggs, Milk");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let out = Highlighter::custom("[", "]").highlight("flour (1.5 cups)", &terms(&["(1.5"]));
        assert_eq!(out, "flour [(1.5] cups)");

        let out = Highlighter::custom("[", "]").highlight("flour 1x5", &terms(&["1.5"]));
        assert_eq!(out, "flour 1x5");
    }

    #[test]
    fn test_html_escaped_before_markup() {
        let out = highlight("<script>salt</script> & pepper", &terms(&["salt"]));
        assert!(out.starts_with("&lt;script&gt;"));
        assert!(out.contains(r#"<span class="bg-yellow-200 font-semibold">salt</span>"#));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_entities_survive_needles_inside_them() {
        assert_eq!(highlight("Salt & pepper", &terms(&["amp"])), "Salt &amp; pepper");

        assert_eq!(
            highlight("Salt & pepper", &terms(&["a"])),
            r#"S<span class="bg-yellow-200 font-semibold">a</span>lt &amp; pepper"#
        );

        let out = highlight("1 < 2", &terms(&["lt", "t"]));
        assert_eq!(out, "1 &lt; 2");
    }

    #[test]
    fn test_needles_with_markup_characters() {
        assert_eq!(
            highlight("Salt & pepper", &terms(&["&"])),
            r#"Salt <span class="bg-yellow-200 font-semibold">&amp;</span> pepper"#
        );
    }

    #[test]
    fn test_markers_never_matched() {
        let out = highlight("Spanish onion", &terms(&["onion", "span"]));
        assert_eq!(
            out,
            r#"<span class="bg-yellow-200 font-semibold">Span</span>ish <span class="bg-yellow-200 font-semibold">onion</span>"#
        );
    }

    #[test]
    fn test_render_recipe() {
        let recipe = Recipe::new("Omelette", "Quick", "Eggs, Milk", "Whisk the eggs.");
        let rendered = render_recipe(&recipe, &terms(&["egg"]));

        assert_eq!(rendered.name, "Omelette");
        assert_eq!(
            rendered.ingredients_html,
            r#"<b>Ingredients:</b> <span class="bg-yellow-200 font-semibold">Egg</span>s, Milk"#
        );
        assert!(rendered
            .instructions_html
            .contains(r#"the <span class="bg-yellow-200 font-semibold">egg</span>s."#));
    }

    #[test]
    fn test_result_summary() {
        assert_eq!(result_summary(0), None);
        assert_eq!(result_summary(1).as_deref(), Some("1 recipe found"));
        assert_eq!(result_summary(7).as_deref(), Some("7 recipes found"));
        assert_eq!(page_label(3), "Page 3");
    }
}
