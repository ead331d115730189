//! HTML generation from a saved card

use crate::config::{FieldKey, FieldLayout, PropName, SavedCard, TextAlign};

/// Configuration options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Whether to emit the DOCTYPE and full document shell
    pub standalone: bool,
    /// Document title; falls back to the card name
    pub title: Option<String>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            title: None,
        }
    }
}

impl HtmlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Base stylesheet embedded into every snapshot. The custom properties the
/// card carries do the actual theming.
const CARD_CSS: &str = "\
body { background: #0d0d0d; margin: 0; }
.scene { position: relative; width: var(--card-width, 320px); height: var(--card-height, 448px); margin: 40px auto; }
.card { position: absolute; inset: 0; border-radius: var(--card-radius, 18px); overflow: hidden; background: #111; }
.card__art { position: absolute; inset: 0; width: 100%; height: 100%; object-fit: cover; }
.card__frame { position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none; }
.card__shine { position: absolute; inset: 0; background-image: var(--holo-bg-image, var(--holo-gradient, none)); mix-blend-mode: var(--holo-blend-mode, color-dodge); opacity: var(--holo-opacity, 0.6); background-size: var(--holo-scale, 100%); -webkit-mask-image: var(--holo-mask-texture, none), var(--template-mask, none); -webkit-mask-composite: source-in; mask-composite: intersect; }
.card__name, .card__grade, .card__edition, .card__label, .card__back-title, .card__back-body, .card__back-info { position: absolute; color: #fff; white-space: nowrap; }
.card__label img { width: 100%; height: 100%; object-fit: contain; }
";

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Unwrap `url('...')` custom-property values back to the bare URL
fn css_url_value(value: &str) -> Option<&str> {
    value
        .strip_prefix("url('")
        .and_then(|rest| rest.strip_suffix("')"))
        .or_else(|| {
            value
                .strip_prefix("url(")
                .and_then(|rest| rest.strip_suffix(')'))
        })
}

/// Inline declarations for one captured field, re-deriving the same
/// alignment positioning the resolver applied.
fn field_css(layout: &FieldLayout) -> String {
    let mut decls: Vec<String> = Vec::new();
    let mut push = |name: &str, value: &str| decls.push(format!("{name}: {value}"));

    let align = layout.text_align.unwrap_or(TextAlign::Left);
    push("text-align", align.as_css());

    match align {
        TextAlign::Center => {
            push("left", "50%");
            push("right", "auto");
            match (layout.left.as_deref(), layout.right.as_deref()) {
                (Some(left), _) if !left.is_empty() => {
                    push("transform", &format!("translateX(calc(-50% + {left}))"));
                }
                (_, Some(right)) if !right.is_empty() => {
                    push("transform", &format!("translateX(calc(-50% - {right}))"));
                }
                _ => push("transform", "translateX(-50%)"),
            }
        }
        TextAlign::Right => {
            push("left", "auto");
            push("right", layout.right.as_deref().unwrap_or("28px"));
        }
        TextAlign::Left | TextAlign::Justify => {
            push("right", "auto");
            push("left", layout.left.as_deref().unwrap_or("28px"));
        }
    }

    if let Some(top) = layout.top.as_deref().filter(|s| !s.is_empty()) {
        push("top", top);
    }
    if let Some(bottom) = layout.bottom.as_deref().filter(|s| !s.is_empty()) {
        push("bottom", bottom);
    }
    if let Some(size) = layout.font_size.as_deref() {
        push("font-size", size);
    }
    if let Some(family) = layout.font_family.as_deref() {
        push("font-family", family);
    }
    if let Some(color) = layout.color.as_deref() {
        push("color", color);
    }

    decls.join("; ")
}

/// Render a saved card with the default configuration
pub fn render_card(card: &SavedCard) -> String {
    render_card_with_config(card, &HtmlConfig::default())
}

/// Render a saved card as a self-contained HTML document
pub fn render_card_with_config(card: &SavedCard, config: &HtmlConfig) -> String {
    let mut out = String::new();

    if config.standalone {
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let title = config.title.as_deref().unwrap_or(&card.name);
        out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        out.push_str("<style>\n");
        if !card.styles.is_empty() {
            out.push_str(".scene {\n");
            for (name, value) in &card.styles {
                out.push_str(&format!("  {name}: {value};\n"));
            }
            out.push_str("}\n");
        }
        out.push_str(CARD_CSS);
        out.push_str("</style>\n</head>\n<body>\n");
    }

    out.push_str("<div class=\"scene\">\n  <div class=\"card\">\n");

    if !card.image_src.is_empty() {
        let transform = card
            .img_transform
            .map(|t| {
                format!(
                    " style=\"transform: translate({}px, {}px) scale({})\"",
                    t.x, t.y, t.scale
                )
            })
            .unwrap_or_default();
        out.push_str(&format!(
            "    <img class=\"card__art\" src=\"{}\"{}>\n",
            escape_html(&card.image_src),
            transform
        ));
    }

    if let Some(frame_url) = card
        .styles
        .get(&PropName::from("--template-frame"))
        .and_then(|v| css_url_value(v))
    {
        out.push_str(&format!(
            "    <img class=\"card__frame\" src=\"{}\">\n",
            escape_html(frame_url)
        ));
    }

    out.push_str("    <div class=\"card__shine\"></div>\n");

    let grade_hidden = card
        .styles
        .get(&PropName::from("--grade-display"))
        .map(String::as_str)
        == Some("none");

    for key in FieldKey::ALL {
        let Some(layout) = card.layout.get(&key) else {
            continue;
        };
        let mut css = field_css(layout);
        if key == FieldKey::Grade && grade_hidden {
            css.push_str("; display: none");
        }

        let content = match key {
            FieldKey::Name => escape_html(&card.name),
            FieldKey::Grade => escape_html(&card.grade),
            FieldKey::Edition => escape_html(&card.edition),
            FieldKey::Label => match card.label_snapshot.as_deref() {
                // Snapshots are data URIs produced by the logo generator
                Some(snapshot) if !snapshot.is_empty() => {
                    format!("<img src=\"{}\">", escape_html(snapshot))
                }
                _ => escape_html(&card.label),
            },
            _ => String::new(),
        };

        out.push_str(&format!(
            "    <div class=\"{}\" style=\"{}\">{}</div>\n",
            key.base_class(),
            css,
            content
        ));
    }

    out.push_str("  </div>\n</div>\n");

    if config.standalone {
        out.push_str("</body>\n</html>\n");
    }

    out
}
