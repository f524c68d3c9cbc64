//! Page text providers.
//!
//! The pipeline never looks at images itself: an [`OcrProvider`] turns a
//! document into page texts in reading order. [`TesseractOcr`] drives the
//! poppler `pdftoppm` renderer and the `tesseract` CLI; [`PlainTextSource`]
//! reads text that was already extracted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::config::{validate_dpi, validate_language, DEFAULT_DPI, DEFAULT_LANGUAGE};
use crate::error::{Result, SegmenterError};

/// Program used to rasterize PDF pages.
const RENDERER_PROGRAM: &str = "pdftoppm";

/// Program used to recognize page images.
const TESSERACT_PROGRAM: &str = "tesseract";

/// File name prefix for rendered pages; pdftoppm appends `-<n>.png`.
const PAGE_PREFIX: &str = "page";

/// Options for one recognition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrOptions {
    /// Rasterization resolution.
    pub dpi: u32,

    /// Tesseract language, e.g. `eng` or `eng+fra`.
    pub language: String,

    /// Directory holding the poppler binaries; `PATH` is searched when unset.
    pub renderer_path: Option<PathBuf>,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            language: DEFAULT_LANGUAGE.to_string(),
            renderer_path: None,
        }
    }
}

impl OcrOptions {
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_renderer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.renderer_path = Some(path.into());
        self
    }

    /// Check the resolution and language before any program is started.
    pub fn validate(&self) -> Result<()> {
        validate_dpi(self.dpi)?;
        validate_language(&self.language)
    }

    /// Path of the renderer program.
    #[must_use]
    pub fn renderer_program(&self) -> PathBuf {
        match &self.renderer_path {
            Some(dir) => dir.join(RENDERER_PROGRAM),
            None => PathBuf::from(RENDERER_PROGRAM),
        }
    }
}

/// Turns a document into page texts.
///
/// Implementations return pages in reading order. An empty page is a valid
/// page; failures to read the document at all are errors.
pub trait OcrProvider {
    fn recognize(&self, document: &Path, options: &OcrOptions) -> Result<Vec<String>>;
}

/// OCR through the `pdftoppm` and `tesseract` command-line tools.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    tesseract: PathBuf,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseractOcr {
    /// Create a provider that finds `tesseract` on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tesseract: PathBuf::from(TESSERACT_PROGRAM),
        }
    }

    /// Use a specific tesseract binary.
    #[must_use]
    pub fn with_tesseract_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.tesseract = program.into();
        self
    }

    /// Rasterize every page into `dir` and return the images in page order.
    fn render_pages(&self, document: &Path, options: &OcrOptions, dir: &Path) -> Result<Vec<PathBuf>> {
        let renderer = options.renderer_program();
        let output = Command::new(&renderer)
            .arg("-r")
            .arg(options.dpi.to_string())
            .arg("-png")
            .arg(document)
            .arg(dir.join(PAGE_PREFIX))
            .output()
            .map_err(|e| unavailable(&renderer, e))?;
        check_status(&output, document, &renderer)?;

        let images = page_images(dir)?;
        if images.is_empty() {
            return Err(SegmenterError::DocumentUnreadable {
                path: document.to_path_buf(),
                message: format!("{} produced no pages", renderer.display()),
            });
        }

        tracing::debug!(
            document = %document.display(),
            pages = images.len(),
            dpi = options.dpi,
            "Rendered pages"
        );
        Ok(images)
    }

    fn recognize_page(&self, image: &Path, document: &Path, options: &OcrOptions) -> Result<String> {
        let output = Command::new(&self.tesseract)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&options.language)
            .output()
            .map_err(|e| unavailable(&self.tesseract, e))?;
        check_status(&output, document, &self.tesseract)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrProvider for TesseractOcr {
    fn recognize(&self, document: &Path, options: &OcrOptions) -> Result<Vec<String>> {
        options.validate()?;
        ensure_file(document)?;

        let pages_dir = tempfile::tempdir()?;
        let images = self.render_pages(document, options, pages_dir.path())?;

        let mut pages = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let text = self.recognize_page(image, document, options)?;
            if text.trim().is_empty() {
                tracing::warn!(
                    document = %document.display(),
                    page = index + 1,
                    "OCR returned no text for page"
                );
            }
            pages.push(text);
        }

        Ok(pages)
    }
}

/// Reads a text file that was already extracted, as a single page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl OcrProvider for PlainTextSource {
    fn recognize(&self, document: &Path, _options: &OcrOptions) -> Result<Vec<String>> {
        let text = fs::read_to_string(document).map_err(|e| SegmenterError::DocumentUnreadable {
            path: document.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(vec![text])
    }
}

fn ensure_file(document: &Path) -> Result<()> {
    if document.is_file() {
        Ok(())
    } else {
        Err(SegmenterError::DocumentUnreadable {
            path: document.to_path_buf(),
            message: "file not found".to_string(),
        })
    }
}

fn unavailable(program: &Path, source: io::Error) -> SegmenterError {
    SegmenterError::RendererUnavailable {
        program: program.display().to_string(),
        source,
    }
}

fn check_status(output: &Output, document: &Path, program: &Path) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(SegmenterError::DocumentUnreadable {
        path: document.to_path_buf(),
        message: format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr.trim()
        ),
    })
}

/// Rendered page images in `dir`, ordered by page number.
///
/// pdftoppm pads page numbers to the width of the page count, so names are
/// sorted by their numeric suffix rather than lexically.
fn page_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images: Vec<(usize, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")))
        .map(|path| (page_number(&path), path))
        .collect();

    images.sort();
    Ok(images.into_iter().map(|(_, path)| path).collect())
}

fn page_number(path: &Path) -> usize {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit('-').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(usize::MAX)
}
