//! brochure CLI - Preview and export brochure documents

use brochure::export::{estimated_size_mb, export_with, ExportStage};
use brochure::render::{self, rendered_to_json};
use brochure::{
    catalog, find_template, ColorProfile, Document, Editor, ExportFormat, ExportOptions,
    JsonFormat, Orientation, PageSelection, PageSize, RenderOptions, WireframeRasterizer,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "brochure")]
#[command(author, version, about = "Preview and export brochure documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input brochure JSON (for default preview)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a brochure to HTML or to its block tree as JSON
    Render {
        /// Input brochure JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: RenderFormat,

        /// Use the wide preview page
        #[arg(long)]
        fullscreen: bool,

        /// Emit a complete HTML page
        #[arg(long)]
        standalone: bool,

        /// Render a single visible section (1-indexed)
        #[arg(short, long)]
        page: Option<u32>,

        /// Apply a built-in template before rendering
        #[arg(short, long)]
        template: Option<String>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Export a brochure to PDF, PNG or JPG
    Export {
        /// Input brochure JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: FormatArg,

        /// JPEG quality (0-100)
        #[arg(short, long, default_value = "95")]
        quality: u8,

        /// Paper size
        #[arg(long, value_enum, default_value = "letter")]
        page_size: PageSizeArg,

        /// Page orientation
        #[arg(long, value_enum, default_value = "portrait")]
        orientation: OrientationArg,

        /// Margins in inches
        #[arg(long, default_value = "0.5")]
        margins: f32,

        /// Add a 0.125" bleed on every edge
        #[arg(long)]
        bleed: bool,

        /// Resolution in DPI
        #[arg(short, long, default_value = "300")]
        resolution: u32,

        /// Color profile tag
        #[arg(long, value_enum, default_value = "rgb")]
        color_profile: ColorProfileArg,

        /// Pages to export (e.g., "1-3", "1,3,5")
        #[arg(short, long)]
        pages: Option<String>,
    },

    /// List built-in templates
    Templates,

    /// Write a new brochure document
    New {
        /// Output file
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Start from a built-in template
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Show brochure information
    Info {
        /// Input brochure JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderFormat {
    /// HTML preview
    Html,
    /// Rendered block tree
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Png,
    Jpg,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Png => ExportFormat::Png,
            FormatArg::Jpg => ExportFormat::Jpg,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    Letter,
    A4,
    Legal,
    Tabloid,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Legal => PageSize::Legal,
            PageSizeArg::Tabloid => PageSize::Tabloid,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorProfileArg {
    Rgb,
    Cmyk,
}

impl From<ColorProfileArg> for ColorProfile {
    fn from(arg: ColorProfileArg) -> Self {
        match arg {
            ColorProfileArg::Rgb => ColorProfile::Rgb,
            ColorProfileArg::Cmyk => ColorProfile::Cmyk,
        }
    }
}

struct RenderArgs {
    format: RenderFormat,
    fullscreen: bool,
    standalone: bool,
    page: Option<u32>,
    template: Option<String>,
    compact: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            format,
            fullscreen,
            standalone,
            page,
            template,
            compact,
        }) => cmd_render(
            &input,
            output.as_deref(),
            RenderArgs {
                format,
                fullscreen,
                standalone,
                page,
                template,
                compact,
            },
        ),
        Some(Commands::Export {
            input,
            output,
            format,
            quality,
            page_size,
            orientation,
            margins,
            bleed,
            resolution,
            color_profile,
            pages,
        }) => parse_pages(pages.as_deref()).and_then(|pages| {
            let options = ExportOptions::new()
                .with_format(format.into())
                .with_quality(quality)
                .with_page_size(page_size.into())
                .with_orientation(orientation.into())
                .with_margins(margins)
                .with_bleed(bleed)
                .with_resolution(resolution)
                .with_color_profile(color_profile.into())
                .with_pages(pages);
            cmd_export(&input, &output, &options)
        }),
        Some(Commands::Templates) => {
            cmd_templates();
            Ok(())
        }
        Some(Commands::New { output, template }) => cmd_new(&output, template.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: standalone preview next to the input
            if let Some(input) = cli.input {
                let output = input.with_extension("html");
                cmd_render(
                    &input,
                    Some(&output),
                    RenderArgs {
                        format: RenderFormat::Html,
                        fullscreen: false,
                        standalone: true,
                        page: None,
                        template: None,
                        compact: false,
                    },
                )
            } else {
                println!("{}", "Usage: brochure <FILE>".yellow());
                println!("       brochure --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
        None => Ok(PageSelection::All),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    args: RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = brochure::load_file(input)?;
    if let Some(id) = args.template.as_deref() {
        doc = Editor::new(doc)
            .apply_template(&find_template(id)?)
            .into_document();
    }

    let options = RenderOptions::new()
        .with_fullscreen(args.fullscreen)
        .with_standalone_html(args.standalone);

    let rendered = match args.page {
        Some(page) => render::Projector::new(&doc)
            .with_options(options.clone())
            .project_page(page)?,
        None => render::project_document(&doc, &options),
    };
    log::debug!(
        "projected {} blocks from {}",
        rendered.blocks.len(),
        input.display()
    );

    let content = match args.format {
        RenderFormat::Html => render::to_html(&rendered, &options),
        RenderFormat::Json => {
            let format = if args.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            rendered_to_json(&rendered, format)?
        }
    };

    write_output(output, &content)
}

fn cmd_export(
    input: &Path,
    output: &Path,
    options: &ExportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = brochure::load_file(input)?;
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Rendering...");
    let rendered = render::project_document(&doc, &RenderOptions::default());

    let artifact = export_with(Some(&rendered), options, &WireframeRasterizer, |stage| {
        if stage != ExportStage::Capture {
            pb.inc(1);
        }
        pb.set_message(format!("{}...", stage));
    })?;
    pb.inc(1);

    let path = artifact.save_in(output)?;
    pb.finish_with_message("Done!");
    log::debug!("wrote {} pages to {}", artifact.pages.len(), path.display());

    println!("\n{} {}", "Saved to".green().bold(), path.display());
    println!(
        "  {} {} ({} bytes)",
        "├─".dimmed(),
        artifact.mime_type,
        artifact.size()
    );
    let count = artifact.pages.len();
    for (i, page) in artifact.pages.iter().enumerate() {
        let branch = if i + 1 == count { "└─" } else { "├─" };
        println!(
            "  {} page {}: {}",
            branch.dimmed(),
            page.number,
            page.title.as_deref().unwrap_or("(untitled)")
        );
    }

    Ok(())
}

fn cmd_templates() {
    println!("{}", "Templates".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for template in catalog() {
        println!(
            "{} {} ({:?}, {} sections)",
            template.id.bold(),
            template.name,
            template.category,
            template.sections.len()
        );
        println!("  {}", template.description.dimmed());
    }
}

fn cmd_new(output: &Path, template: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = Editor::new(Document::sample());
    if let Some(id) = template {
        editor = editor.apply_template(&find_template(id)?);
    }

    let json = brochure::to_json(editor.document(), JsonFormat::Pretty)?;
    fs::write(output, &json)?;
    println!("{} {}", "Created".green(), output.display());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = brochure::load_file(input)?;

    println!("{}", "Brochure Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), doc.title);
    println!("{}: {}", "Subtitle".bold(), doc.subtitle);
    println!(
        "{}: {}",
        "Logo".bold(),
        if doc.logo.is_some() { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (index, section) in doc.sections.iter().enumerate() {
        let visibility = if section.visible {
            "visible".green()
        } else {
            "hidden".dimmed()
        };
        println!(
            "{:>2}. {} [{} / {}] {}",
            index + 1,
            section.title.bold(),
            section.section_type,
            section.layout,
            visibility
        );
    }

    let visible = doc.visible_count();
    println!();
    println!("{}: {}", "Sections".bold(), doc.section_count());
    println!("{}: {}", "Pages".bold(), visible);
    println!(
        "{}: {:.1} MB",
        "Estimated PDF size".bold(),
        estimated_size_mb(visible, &ExportOptions::default())
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "brochure".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Brochure preview and export tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/brochure".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use brochure::RenderedDocument;

    fn low_res(format: ExportFormat) -> ExportOptions {
        ExportOptions::new().with_format(format).with_resolution(36)
    }

    fn exported(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_new_writes_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brochure.json");

        cmd_new(&path, None).unwrap();
        let doc = brochure::load_file(&path).unwrap();
        let sample = Document::sample();
        assert_eq!(doc.title, sample.title);
        assert_eq!(doc.section_count(), sample.section_count());
    }

    #[test]
    fn test_new_applies_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minimal.json");

        cmd_new(&path, Some("minimal-clean")).unwrap();
        let doc = brochure::load_file(&path).unwrap();
        let template = find_template("minimal-clean").unwrap();
        assert_eq!(doc.section_count(), template.sections.len());

        assert!(cmd_new(&dir.path().join("bad.json"), Some("no-such-template")).is_err());
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("brochure.json");
        let output = dir.path().join("out");
        cmd_new(&input, None).unwrap();

        cmd_export(&input, &output, &low_res(ExportFormat::Pdf)).unwrap();

        let files = exported(&output);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension().unwrap(), "pdf");
        assert!(fs::read(&files[0]).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_selected_pages_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("brochure.json");
        cmd_new(&input, None).unwrap();

        let options = low_res(ExportFormat::Png).with_pages(parse_pages(Some("2-3")).unwrap());
        cmd_export(&input, dir.path(), &options).unwrap();

        let png = dir.path().join("brochure-anchorage-business-corp-pvt.-ltd..png");
        assert_eq!(&fs::read(png).unwrap()[..4], b"\x89PNG");
    }

    #[test]
    fn test_export_rejects_out_of_range_pages() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("brochure.json");
        let output = dir.path().join("out");
        cmd_new(&input, None).unwrap();

        let options = low_res(ExportFormat::Pdf).with_pages(PageSelection::Pages(vec![9]));
        assert!(cmd_export(&input, &output, &options).is_err());
        assert!(exported(&output).is_empty());
    }

    #[test]
    fn test_render_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("brochure.json");
        let output = dir.path().join("page.json");
        cmd_new(&input, None).unwrap();

        cmd_render(
            &input,
            Some(&output),
            RenderArgs {
                format: RenderFormat::Json,
                fullscreen: false,
                standalone: false,
                page: Some(2),
                template: None,
                compact: true,
            },
        )
        .unwrap();

        let json = fs::read_to_string(&output).unwrap();
        let rendered: RenderedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(rendered.blocks.len(), 1);
        assert_eq!(rendered.blocks[0].title(), Some("About Us & Why Choose Us"));
    }

    #[test]
    fn test_parse_pages() {
        assert_eq!(parse_pages(None).unwrap(), PageSelection::All);
        assert_eq!(
            parse_pages(Some("1,3")).unwrap(),
            PageSelection::Pages(vec![1, 3])
        );
        assert!(parse_pages(Some("1,1-60000")).is_err());
        assert!(parse_pages(Some("three")).is_err());
    }

    #[test]
    fn test_info_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("brochure.json");
        cmd_new(&input, None).unwrap();

        assert!(cmd_info(&input).is_ok());
        assert!(cmd_info(&dir.path().join("missing.json")).is_err());
    }
}
