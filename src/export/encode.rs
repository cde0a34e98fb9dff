//! Encode: rasters to PDF, PNG or JPEG bytes.

use super::geometry::PageGeometry;
use super::ColorProfile;
use crate::error::{Error, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::borrow::Cow;
use std::io::Write;

/// Largest width or height a JPEG can hold.
pub const JPEG_MAX_DIMENSION: u32 = 65535;

/// One page of a PDF: a raster plus its searchable title.
pub struct PdfPage<'a> {
    pub image: &'a RgbImage,
    pub title: Option<&'a str>,
}

/// Encode a raster as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Downscale a raster to fit `max_width` x `max_height`, keeping its aspect.
/// Rasters that already fit are borrowed as is.
pub fn fit_within(image: &RgbImage, max_width: u32, max_height: u32) -> Cow<'_, RgbImage> {
    let (w, h) = image.dimensions();
    if w <= max_width && h <= max_height {
        return Cow::Borrowed(image);
    }

    let (w64, h64) = (u64::from(w), u64::from(h));
    let (width, height) = if h64 * u64::from(max_width) > w64 * u64::from(max_height) {
        ((w64 * u64::from(max_height) / h64) as u32, max_height)
    } else {
        (max_width, (h64 * u64::from(max_width) / w64) as u32)
    };
    let (width, height) = (width.max(1), height.max(1));
    log::debug!("downscaling {}x{} raster to {}x{}", w, h, width, height);
    Cow::Owned(imageops::resize(image, width, height, FilterType::Triangle))
}

/// Encode a raster as JPEG at `quality` (clamped to 1-100).
///
/// Rasters taller or wider than a JPEG allows are downscaled first.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let image = fit_within(image, JPEG_MAX_DIMENSION, JPEG_MAX_DIMENSION);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Write a PDF with one page per raster.
///
/// Each raster is embedded as a JPEG image, downscaled to the printable area
/// at the geometry's resolution and anchored at its top. Titles are written as invisible text so the
/// pages stay searchable.
pub fn encode_pdf(
    pages: &[PdfPage<'_>],
    geometry: &PageGeometry,
    quality: u8,
    title: &str,
    profile: ColorProfile,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let (media_w, media_h) = geometry.media_points();
    let (max_w, max_h) = geometry.printable_pixels();
    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        let name = format!("Im{}", index + 1);
        let raster = fit_within(page.image, max_w, max_h);
        let jpeg = encode_jpeg(&raster, quality)?;
        let image_id = doc.add_object(
            Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => raster.width() as i64,
                    "Height" => raster.height() as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                jpeg,
            )
            .with_compression(false),
        );

        let content = page_content(raster.dimensions(), page.title, geometry, &name);
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let content_id = doc.add_object(Stream::new(
            dictionary! {"Filter" => "FlateDecode"},
            encoder.finish()?,
        ));

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { name.as_str() => image_id },
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), media_w.into(), media_h.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(concat!("brochure ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        "BrochureColorProfile" => profile.pdf_name(),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::Encode(format!("PDF: {}", e)))?;
    Ok(bytes)
}

fn page_content(
    (img_w, img_h): (u32, u32),
    title: Option<&str>,
    geometry: &PageGeometry,
    name: &str,
) -> Content {
    let (area_w, area_h) = geometry.printable_points();
    let (origin_x, origin_y) = geometry.printable_origin_points();

    let fit = (area_w / img_w.max(1) as f32).min(area_h / img_h.max(1) as f32);
    let (draw_w, draw_h) = (img_w as f32 * fit, img_h as f32 * fit);
    let x = origin_x + (area_w - draw_w) / 2.0;
    let y = origin_y + area_h - draw_h;

    let mut operations = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                draw_w.into(),
                0.into(),
                0.into(),
                draw_h.into(),
                x.into(),
                y.into(),
            ],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ];

    if let Some(title) = title {
        let text = pdf_text(title);
        if text.len() < title.chars().count() {
            log::warn!("title '{}' has characters Helvetica cannot show", title);
        }
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tr", vec![Object::Integer(3)]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![x.into(), (origin_y + area_h - 12.0).into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    Content { operations }
}

/// Helvetica only covers Latin-1; drop what it cannot show.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{Orientation, PageSize};

    fn raster() -> RgbImage {
        RgbImage::from_pixel(40, 20, image::Rgb([10, 20, 30]))
    }

    #[test]
    fn test_png_signature() {
        let bytes = encode_png(&raster()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_jpeg_signature() {
        let bytes = encode_jpeg(&raster(), 0).unwrap();
        assert_eq!(&bytes[..3], &[0xff, 0xd8, 0xff]);
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let image = raster();
        assert!(matches!(fit_within(&image, 40, 20), Cow::Borrowed(_)));

        let fitted = fit_within(&image, 100, 5);
        assert_eq!(fitted.dimensions(), (10, 5));
    }

    #[test]
    fn test_jpeg_taller_than_limit_is_downscaled() {
        let tall = RgbImage::from_pixel(2, JPEG_MAX_DIMENSION + 4465, image::Rgb([200, 0, 0]));
        let bytes = encode_jpeg(&tall, 50).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.height(), JPEG_MAX_DIMENSION);
        assert_eq!(decoded.width(), 1);
    }

    #[test]
    fn test_pdf_image_fits_printable_pixels() {
        let tall = RgbImage::from_pixel(40, 2000, image::Rgb([10, 20, 30]));
        let page = PdfPage {
            image: &tall,
            title: None,
        };
        let geometry = PageGeometry::new(PageSize::Letter, Orientation::Portrait).with_margin(0.5);
        let bytes = encode_pdf(&[page], &geometry, 80, "Acme", ColorProfile::Rgb).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let heights: Vec<i64> = doc
            .objects
            .values()
            .filter_map(|object| match object {
                Object::Stream(stream) => stream.dict.get(b"Height").ok()?.as_i64().ok(),
                _ => None,
            })
            .collect();
        // Letter at 72 DPI minus half-inch margins is 540x720
        assert_eq!(heights, vec![720]);
    }

    #[test]
    fn test_pdf_pages_and_info() {
        let image = raster();
        let pages = [
            PdfPage {
                image: &image,
                title: Some("Caf\u{e9} \u{1f4de}"),
            },
            PdfPage {
                image: &image,
                title: None,
            },
        ];
        let geometry = PageGeometry::new(PageSize::A4, Orientation::Portrait).with_margin(0.5);
        let bytes = encode_pdf(&pages, &geometry, 80, "Acme", ColorProfile::Cmyk).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);

        let info = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info).unwrap();
        assert_eq!(
            info.get(b"BrochureColorProfile").unwrap().as_name().unwrap(),
            b"CMYK"
        );
    }

    #[test]
    fn test_pdf_text_is_latin1() {
        assert_eq!(pdf_text("Caf\u{e9}!\u{1f4de}"), b"Caf\xe9!".to_vec());
    }
}
