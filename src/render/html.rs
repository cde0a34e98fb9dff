//! HTML preview rendering.

use super::block::{
    Align, BlockHeight, Node, Pane, PaneWidth, RenderedBlock, RenderedDocument,
};
use super::RenderOptions;

/// Keyframes referenced by effect animations.
const KEYFRAMES: &str = "\
@keyframes fadeIn { from { opacity: 0 } to { opacity: 1 } }
@keyframes slideUp { from { opacity: 0; transform: translateY(24px) } to { opacity: 1; transform: none } }
@keyframes slideDown { from { opacity: 0; transform: translateY(-24px) } to { opacity: 1; transform: none } }
@keyframes slideLeft { from { opacity: 0; transform: translateX(24px) } to { opacity: 1; transform: none } }
@keyframes slideRight { from { opacity: 0; transform: translateX(-24px) } to { opacity: 1; transform: none } }
@keyframes zoomIn { from { opacity: 0; transform: scale(0.9) } to { opacity: 1; transform: none } }
@keyframes zoomOut { from { opacity: 0; transform: scale(1.1) } to { opacity: 1; transform: none } }
@keyframes bounce { 0%, 100% { transform: translateY(0) } 50% { transform: translateY(-12px) } }
@keyframes pulse { 0%, 100% { opacity: 1 } 50% { opacity: 0.6 } }
@keyframes shake { 0%, 100% { transform: translateX(0) } 25% { transform: translateX(-6px) } 75% { transform: translateX(6px) } }
";

/// Convert a rendered document to HTML.
pub fn to_html(rendered: &RenderedDocument, options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render(rendered)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to HTML.
    pub fn render(&self, rendered: &RenderedDocument) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "<div class=\"brochure-page\" style=\"max-width: {}px; margin: 0 auto; background: #ffffff\">\n",
            rendered.page_width
        ));
        for block in &rendered.blocks {
            self.render_block(&mut output, block);
        }
        output.push_str("</div>\n");

        if self.options.standalone_html {
            output = format!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
                escape(&rendered.title),
                KEYFRAMES,
                output
            );
        }

        output
    }

    fn render_block(&self, output: &mut String, block: &RenderedBlock) {
        let mut style = String::from("display: flex; position: relative; overflow: hidden");
        if let Some(px) = block.height.px() {
            let property = if block.height == BlockHeight::Page {
                "min-height"
            } else {
                "height"
            };
            style.push_str(&format!("; {}: {}px", property, px));
        }

        let id = block
            .section_id
            .as_ref()
            .map(|id| format!(" data-section-id=\"{}\"", escape(id.as_str())))
            .unwrap_or_default();

        output.push_str(&format!(
            "<section class=\"brochure-section\"{} style=\"{}\">\n",
            id, style
        ));
        for pane in &block.panes {
            self.render_pane(output, pane);
        }
        output.push_str("</section>\n");
    }

    fn render_pane(&self, output: &mut String, pane: &Pane) {
        let mut decls = vec![match pane.width {
            PaneWidth::Full => "width: 100%".to_string(),
            PaneWidth::Half => "width: 50%".to_string(),
            PaneWidth::Constrained(px) => format!("max-width: {}px; margin: auto", px),
        }];
        if pane.align == Align::Center {
            decls.push("text-align: center".to_string());
        }
        if let Some(ref background) = pane.background {
            decls.push(background.to_css());
        }
        if let Some(edge) = pane.clip {
            decls.push(format!("clip-path: {}", edge.clip_path()));
        }
        if let Some(ref style) = pane.style {
            decls.push(style.to_css());
        }
        if pane.corner_radius > 0 {
            decls.push(format!("border-radius: {}px", pane.corner_radius));
        }

        output.push_str(&format!("<div style=\"{}\">\n", escape(&decls.join("; "))));
        for node in &pane.nodes {
            render_node(output, node);
        }
        output.push_str("</div>\n");
    }
}

fn render_node(output: &mut String, node: &Node) {
    match node {
        Node::Heading { level, text } => {
            output.push_str(&format!("<h{0}>{1}</h{0}>\n", level, escape(text)));
        }
        Node::Text { lines } => {
            let lines: Vec<String> = lines.iter().map(|l| escape(l)).collect();
            output.push_str(&format!("<p>{}</p>\n", lines.join("<br>")));
        }
        Node::Subtitle { text } => {
            output.push_str(&format!("<p class=\"subtitle\">{}</p>\n", escape(text)));
        }
        Node::Logo { src } => {
            output.push_str(&format!(
                "<img class=\"logo\" src=\"{}\" alt=\"Company Logo\">\n",
                escape(src)
            ));
        }
        Node::Image { src, alt } => {
            output.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" style=\"width: 100%; height: 100%; object-fit: cover\">\n",
                escape(src),
                escape(alt)
            ));
        }
        Node::Placeholder { label } => {
            output.push_str(&format!(
                "<div class=\"placeholder\">{}</div>\n",
                escape(label)
            ));
        }
        Node::Grid {
            narrow_columns,
            wide_columns,
            cells,
        } => {
            output.push_str(&format!(
                "<div class=\"grid\" data-narrow-columns=\"{}\" style=\"display: grid; grid-template-columns: repeat({}, 1fr); gap: 12px\">\n",
                narrow_columns, wide_columns
            ));
            for cell in cells {
                output.push_str(&format!(
                    "<figure><img src=\"{}\" alt=\"{1}\"><figcaption>{1}</figcaption></figure>\n",
                    escape(&cell.src),
                    escape(&cell.caption)
                ));
            }
            output.push_str("</div>\n");
        }
        Node::Cards { cards } => {
            output.push_str("<div class=\"cards\">\n");
            for card in cards {
                output.push_str(&format!(
                    "<div class=\"card\"><h3>{} {}</h3>",
                    card.icon,
                    escape(&card.heading)
                ));
                for line in &card.lines {
                    output.push_str(&format!("<p>{}</p>", escape(line)));
                }
                output.push_str("</div>\n");
            }
            output.push_str("</div>\n");
        }
        Node::Strip { items } => {
            let items: Vec<String> = items
                .iter()
                .map(|item| format!("<span>{}</span>", escape(item)))
                .collect();
            output.push_str(&format!("<div class=\"strip\">{}</div>\n", items.join(" ")));
        }
    }
}

/// Escape text for HTML content and attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
