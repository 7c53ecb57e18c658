// PDF report renderer backed by printpdf
use crate::application::report_renderer::ReportRenderer;
use crate::domain::report::ReportLayout;
use anyhow::{anyhow, Context, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

// A4, millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LINE_HEIGHT: f32 = 10.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;

const PT_TO_MM: f32 = 0.3528;
const HELVETICA_AVG_EM: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct PdfReportRenderer {
    path: PathBuf,
    title: String,
}

impl PdfReportRenderer {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }

    fn lines_per_page() -> usize {
        ((PAGE_HEIGHT - 2.0 * MARGIN) / LINE_HEIGHT) as usize
    }

    /// Approximate horizontal centre for a Helvetica line
    fn centered_x(text: &str, size: f32) -> f32 {
        let width = text.chars().count() as f32 * size * HELVETICA_AVG_EM * PT_TO_MM;
        ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
    }

    fn write(&self, layout: &ReportLayout) -> Result<()> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&layout.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("Failed to load PDF font: {}", e))?;

        // The title and the gap below it take two lines of the first page.
        let per_page = Self::lines_per_page();
        let pages = layout.pages(per_page.saturating_sub(2), per_page);

        for (index, lines) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
                doc.get_page(page).get_layer(layer)
            };

            let mut y = PAGE_HEIGHT - MARGIN;
            if index == 0 {
                let x = Self::centered_x(&layout.title, TITLE_SIZE);
                layer.use_text(layout.title.clone(), TITLE_SIZE, Mm(x), Mm(y), &font);
                y -= 2.0 * LINE_HEIGHT;
            }

            for line in lines.iter() {
                layer.use_text(line.clone(), BODY_SIZE, Mm(MARGIN), Mm(y), &font);
                y -= LINE_HEIGHT;
            }
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| anyhow!("Failed to write PDF {}: {}", self.path.display(), e))
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, fields: &[(String, String)]) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        self.write(&ReportLayout::new(&self.title, fields))?;
        Ok(self.path.clone())
    }
}
