//! Capture: rendered blocks to raster images.
//!
//! A [`Rasterizer`] paints one block into an RGB frame. The default
//! [`WireframeRasterizer`] draws the composition (panes, clips, placeholders,
//! grids and text bars) in the section colors without shaping real text.

use crate::error::Result;
use crate::model::Rgb;
use crate::render::{
    BlockHeight, DiagonalEdge, Node, Pane, PaneRole, PaneWidth, RenderedBlock,
};
use image::{imageops, RgbImage};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Padding of panes without a section style, in preview px.
const DEFAULT_PADDING: f32 = 32.0;
/// Font size of panes without a section style, in preview px.
const DEFAULT_FONT_SIZE: f32 = 16.0;

const MEDIA_FILL: Rgb = Rgb(0xe2, 0xe8, 0xf0);
const PLACEHOLDER_FILL: Rgb = Rgb(0xcb, 0xd5, 0xe1);
const IMAGE_FILL: Rgb = Rgb(0x94, 0xa3, 0xb8);
const BACKGROUND_TINT: Rgb = Rgb(0x64, 0x74, 0x8b);

/// Target frame of one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Raster pixels per preview pixel
    pub scale: f32,
}

/// Paints a rendered block into a raster.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, block: &RenderedBlock, frame: Frame) -> Result<RgbImage>;
}

/// Draws the block composition as flat shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireframeRasterizer;

impl Rasterizer for WireframeRasterizer {
    fn rasterize(&self, block: &RenderedBlock, frame: Frame) -> Result<RgbImage> {
        let mut canvas = Canvas::new(frame.width, frame.height);
        let preview_width = frame.width as f32 / frame.scale;
        let mut half_index = 0;

        for pane in &block.panes {
            let (x, width) = match pane.width {
                PaneWidth::Full => (0.0, preview_width),
                PaneWidth::Half => {
                    let x = half_index as f32 * preview_width / 2.0;
                    half_index += 1;
                    (x, preview_width / 2.0)
                }
                PaneWidth::Constrained(max) => {
                    let width = preview_width.min(max as f32);
                    ((preview_width - width) / 2.0, width)
                }
            };
            paint_pane(&mut canvas, pane, x * frame.scale, width * frame.scale, frame.scale);
        }

        Ok(canvas.image)
    }
}

/// Preview height of a block in px.
pub fn block_height(block: &RenderedBlock, page_width: u32) -> f32 {
    if let Some(px) = block.height.px() {
        if block.height != BlockHeight::Page {
            return px as f32;
        }
    }

    let content = block
        .panes
        .iter()
        .map(|pane| {
            let width = match pane.width {
                PaneWidth::Full => page_width as f32,
                PaneWidth::Half => page_width as f32 / 2.0,
                PaneWidth::Constrained(max) => (page_width as f32).min(max as f32),
            };
            pane_height(pane, width)
        })
        .fold(0.0_f32, f32::max);

    match block.height.px() {
        Some(min) => content.max(min as f32),
        None => content,
    }
}

/// Rasterize blocks at `width` pixels, one image per block.
pub fn capture_blocks(
    blocks: &[&RenderedBlock],
    page_width: u32,
    width: u32,
    rasterizer: &dyn Rasterizer,
) -> Result<Vec<RgbImage>> {
    let scale = width as f32 / page_width.max(1) as f32;
    let frame_of = |block: &RenderedBlock| Frame {
        width,
        height: ((block_height(block, page_width) * scale).round() as u32).max(1),
        scale,
    };

    #[cfg(feature = "parallel")]
    let images = blocks
        .par_iter()
        .map(|&block| rasterizer.rasterize(block, frame_of(block)))
        .collect::<Result<Vec<_>>>();

    #[cfg(not(feature = "parallel"))]
    let images = blocks
        .iter()
        .map(|&block| rasterizer.rasterize(block, frame_of(block)))
        .collect::<Result<Vec<_>>>();

    images
}

/// Stack images vertically, left-aligned on the widest image. Narrower
/// images leave white to their right.
pub fn stack(images: &[RgbImage]) -> RgbImage {
    let width = images.iter().map(|i| i.width()).max().unwrap_or(1);
    let height = images.iter().map(|i| i.height()).sum::<u32>().max(1);
    let mut out = RgbImage::from_pixel(width, height, image::Rgb([0xff, 0xff, 0xff]));

    let mut y = 0i64;
    for image in images {
        imageops::replace(&mut out, image, 0, y);
        y += image.height() as i64;
    }
    out
}

struct Canvas {
    image: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, image::Rgb([0xff, 0xff, 0xff])),
        }
    }

    /// Fill a rectangle, clipped to the canvas and to `right_edge(y)`.
    fn fill<F>(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, right_edge: F)
    where
        F: Fn(f32) -> f32,
    {
        let (cw, ch) = self.image.dimensions();
        let x0 = x.max(0.0) as u32;
        let y0 = y.max(0.0) as u32;
        let x1 = ((x + w).max(0.0) as u32).min(cw);
        let y1 = ((y + h).max(0.0) as u32).min(ch);
        let pixel = image::Rgb([color.0, color.1, color.2]);

        for py in y0..y1 {
            let limit = (right_edge(py as f32).max(0.0) as u32).min(x1);
            for px in x0..limit {
                self.image.put_pixel(px, py, pixel);
            }
        }
    }
}

fn paint_pane(canvas: &mut Canvas, pane: &Pane, x: f32, width: f32, scale: f32) {
    let height = canvas.image.height() as f32;
    let clip = pane.clip;
    let right_edge = move |y: f32| {
        let t = if height > 0.0 { y / height } else { 0.0 };
        match clip {
            Some(DiagonalEdge::Forward) => x + width * (1.0 - 0.15 * t),
            Some(DiagonalEdge::Reverse) => x + width * (0.85 + 0.15 * t),
            None => x + width,
        }
    };

    let (fill, ink, font_size, padding) = pane_colors(pane);
    canvas.fill(x, 0.0, width, height, fill, right_edge);

    let padding_px = padding * scale;
    let inner_x = x + padding_px;
    let inner_width = (width - 2.0 * padding_px).max(1.0);
    let mut cursor = padding_px;

    for node in &pane.nodes {
        match node {
            Node::Image { .. } => {
                canvas.fill(x, 0.0, width, height, IMAGE_FILL, right_edge);
            }
            Node::Placeholder { label } if pane.role == PaneRole::Media => {
                let inset = DEFAULT_PADDING * scale;
                canvas.fill(
                    x + inset,
                    inset,
                    width - 2.0 * inset,
                    height - 2.0 * inset,
                    PLACEHOLDER_FILL,
                    right_edge,
                );
                let bar = text_bar_width(label, font_size, scale).min(inner_width);
                canvas.fill(
                    x + (width - bar) / 2.0,
                    height / 2.0 - font_size * 0.3 * scale,
                    bar,
                    font_size * 0.6 * scale,
                    IMAGE_FILL,
                    right_edge,
                );
            }
            _ => {
                let node_height = node_height(node, font_size, inner_width / scale) * scale;
                paint_node(canvas, node, inner_x, cursor, inner_width, font_size, scale, ink, &right_edge);
                cursor += node_height;
            }
        }
        if cursor > height {
            break;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_node<F>(
    canvas: &mut Canvas,
    node: &Node,
    x: f32,
    y: f32,
    width: f32,
    font_size: f32,
    scale: f32,
    ink: Rgb,
    right_edge: &F,
) where
    F: Fn(f32) -> f32,
{
    let edge = |py: f32| right_edge(py);
    match node {
        Node::Heading { level, text } => {
            let size = heading_size(*level, font_size);
            text_lines(canvas, &[text.as_str()], x, y, width, size, scale, ink, &edge);
        }
        Node::Subtitle { text } => {
            text_lines(canvas, &[text.as_str()], x, y, width, font_size * 1.25, scale, ink, &edge);
        }
        Node::Text { lines } => {
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            text_lines(canvas, &lines, x, y, width, font_size, scale, ink, &edge);
        }
        Node::Placeholder { label } => {
            text_lines(canvas, &[label.as_str()], x, y, width, font_size * 1.125, scale, ink, &edge);
        }
        Node::Strip { items } => {
            let line = items.join("    ");
            text_lines(canvas, &[line.as_str()], x, y, width, font_size * 0.75, scale, ink, &edge);
        }
        Node::Logo { .. } => {
            let side = 80.0 * scale;
            canvas.fill(x + (width - side) / 2.0, y, side, side, IMAGE_FILL, &edge);
        }
        Node::Grid {
            wide_columns, cells, ..
        } => {
            let columns = (*wide_columns).max(1) as usize;
            let gap = 12.0 * scale;
            let cell_width = (width - gap * (columns as f32 - 1.0)) / columns as f32;
            let cell_height = 96.0 * scale;
            let top = y + 32.0 * scale;
            for (i, _) in cells.iter().enumerate() {
                let cx = x + (i % columns) as f32 * (cell_width + gap);
                let cy = top + (i / columns) as f32 * (cell_height + gap);
                canvas.fill(cx, cy, cell_width, cell_height, IMAGE_FILL, &edge);
            }
        }
        Node::Cards { cards } => {
            let gap = 24.0 * scale;
            let card_width = (width - gap) / 2.0;
            let shade = ink.over(Rgb::WHITE, 0.1);
            let mut column_y = [y + gap, y + gap];
            for (i, card) in cards.iter().enumerate() {
                let column = i % 2;
                let h = card_height(card.lines.len(), font_size) * scale;
                let cx = x + column as f32 * (card_width + gap);
                canvas.fill(cx, column_y[column], card_width, h, shade, &edge);
                column_y[column] += h + 12.0 * scale;
            }
        }
        Node::Image { .. } => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn text_lines<F>(
    canvas: &mut Canvas,
    lines: &[&str],
    x: f32,
    y: f32,
    width: f32,
    size: f32,
    scale: f32,
    ink: Rgb,
    right_edge: &F,
) where
    F: Fn(f32) -> f32,
{
    let line_height = size * 1.6 * scale;
    let mut top = y;
    for line in lines {
        let mut remaining = text_bar_width(line, size, scale);
        if remaining == 0.0 {
            top += line_height;
            continue;
        }
        while remaining > 0.0 {
            let bar = remaining.min(width);
            canvas.fill(x, top + line_height * 0.2, bar, size * 0.6 * scale, ink, right_edge);
            remaining -= bar;
            top += line_height;
        }
    }
}

fn pane_colors(pane: &Pane) -> (Rgb, Rgb, f32, f32) {
    let Some(ref style) = pane.style else {
        let fill = if pane.role == PaneRole::Media {
            MEDIA_FILL
        } else {
            Rgb::WHITE
        };
        return (fill, IMAGE_FILL, DEFAULT_FONT_SIZE, DEFAULT_PADDING);
    };

    let mut fill = Rgb::parse(&style.background_color).unwrap_or(Rgb::WHITE);
    let mut ink = Rgb::parse(&style.text_color).unwrap_or(Rgb::BLACK);

    if pane.background.is_some() {
        fill = BACKGROUND_TINT.over(fill, 0.25);
    }
    if style.backdrop.is_some() {
        fill = fill.over(Rgb::WHITE, 0.8);
    }
    if let Some(ref effects) = style.effects {
        let opacity = effects.opacity.clamp(0.0, 1.0);
        fill = fill.over(Rgb::WHITE, opacity);
        ink = ink.over(Rgb::WHITE, opacity);
    }

    (fill, ink, style.font_size, style.padding)
}

fn heading_size(level: u8, font_size: f32) -> f32 {
    match level {
        1 => font_size * 2.25,
        2 => font_size * 1.5,
        _ => font_size * 1.125,
    }
}

fn text_bar_width(text: &str, size: f32, scale: f32) -> f32 {
    text.trim().chars().count() as f32 * size * 0.5 * scale
}

fn card_height(lines: usize, font_size: f32) -> f32 {
    32.0 + font_size * 1.5 + lines as f32 * font_size * 1.25
}

/// Wrapped line count of a text line at `width` preview px.
fn wrapped(text: &str, size: f32, width: f32) -> f32 {
    let bar = text_bar_width(text, size, 1.0);
    (bar / width.max(1.0)).ceil().max(1.0)
}

/// Flow height of a node in preview px.
fn node_height(node: &Node, font_size: f32, width: f32) -> f32 {
    match node {
        Node::Heading { level, text } => {
            let size = heading_size(*level, font_size);
            wrapped(text, size, width) * size * 1.6 + 16.0
        }
        Node::Subtitle { text } => {
            let size = font_size * 1.25;
            wrapped(text, size, width) * size * 1.6 + 24.0
        }
        Node::Text { lines } => lines
            .iter()
            .map(|l| wrapped(l, font_size, width) * font_size * 1.6)
            .sum(),
        Node::Placeholder { label } => wrapped(label, font_size * 1.125, width) * font_size * 1.8,
        Node::Strip { .. } => font_size * 0.75 * 1.6 + 12.0,
        Node::Logo { .. } => 104.0,
        Node::Grid {
            wide_columns, cells, ..
        } => {
            let rows = cells.len().div_ceil((*wide_columns).max(1) as usize);
            32.0 + rows as f32 * 108.0
        }
        Node::Cards { cards } => {
            let mut columns = [24.0_f32, 24.0];
            for (i, card) in cards.iter().enumerate() {
                columns[i % 2] += card_height(card.lines.len(), font_size) + 12.0;
            }
            columns[0].max(columns[1])
        }
        Node::Image { .. } => 0.0,
    }
}

fn pane_height(pane: &Pane, width: f32) -> f32 {
    let (_, _, font_size, padding) = pane_colors(pane);
    let inner = (width - 2.0 * padding).max(1.0);
    let flow: f32 = pane
        .nodes
        .iter()
        .map(|node| node_height(node, font_size, inner))
        .sum();
    flow + 2.0 * padding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Layout, Section, StyleSpec};
    use crate::render::{project, BlockLayout};

    fn block(section: Section) -> RenderedBlock {
        let doc = Document::new("Acme", "Sub").with_section(section.clone());
        project(&section, 0, &doc).unwrap()
    }

    #[test]
    fn test_band_height_is_fixed() {
        let b = block(Section::new("1").with_layout(Layout::Split));
        assert_eq!(block_height(&b, 672), 384.0);
    }

    #[test]
    fn test_auto_height_grows_with_content() {
        let short = block(Section::new("1").with_content("one"));
        let long = block(Section::new("1").with_content("one\ntwo\nthree\nfour"));
        assert!(block_height(&long, 672) > block_height(&short, 672));
    }

    #[test]
    fn test_wireframe_paints_section_color() {
        let styles = StyleSpec::new("#1e40af", "#ffffff", 16.0, 32.0, 0.0);
        let b = block(Section::new("1").with_styles(styles));
        let frame = Frame {
            width: 200,
            height: 100,
            scale: 200.0 / 672.0,
        };
        let image = WireframeRasterizer.rasterize(&b, frame).unwrap();

        assert_eq!(image.dimensions(), (200, 100));
        assert_eq!(image.get_pixel(199, 99), &image::Rgb([0x1e, 0x40, 0xaf]));
    }

    #[test]
    fn test_diagonal_clip_leaves_corner() {
        let styles = StyleSpec::new("#000000", "#000000", 16.0, 32.0, 0.0);
        let b = block(
            Section::new("1")
                .with_layout(Layout::Diagonal)
                .with_styles(styles),
        );
        assert_eq!(b.layout, BlockLayout::Diagonal(DiagonalEdge::Forward));

        let frame = Frame {
            width: 400,
            height: 200,
            scale: 400.0 / 672.0,
        };
        let image = WireframeRasterizer.rasterize(&b, frame).unwrap();
        // bottom of the content half is cut at 85% of its width
        assert_eq!(image.get_pixel(195, 199), &image::Rgb([0xff, 0xff, 0xff]));
        assert_eq!(image.get_pixel(399, 0), &image::Rgb([0xe2, 0xe8, 0xf0]));
        assert_eq!(image.get_pixel(5, 199), &image::Rgb([0, 0, 0]));
    }

    #[test]
    fn test_capture_and_stack() {
        let a = block(Section::new("1").with_layout(Layout::Split));
        let b = block(Section::new("2").with_layout(Layout::Centered));
        let images = capture_blocks(&[&a, &b], 672, 336, &WireframeRasterizer).unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].dimensions(), (336, 192));
        let stacked = stack(&images);
        assert_eq!(stacked.height(), images[0].height() + images[1].height());
    }

    #[test]
    fn test_stack_uses_widest_image() {
        let narrow = RgbImage::from_pixel(2, 3, image::Rgb([0, 0, 0]));
        let wide = RgbImage::from_pixel(5, 1, image::Rgb([9, 9, 9]));
        let stacked = stack(&[narrow, wide]);

        assert_eq!(stacked.dimensions(), (5, 4));
        assert_eq!(stacked.get_pixel(1, 0), &image::Rgb([0, 0, 0]));
        assert_eq!(stacked.get_pixel(4, 0), &image::Rgb([0xff, 0xff, 0xff]));
        assert_eq!(stacked.get_pixel(4, 3), &image::Rgb([9, 9, 9]));
    }
}
