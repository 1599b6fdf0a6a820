//! Social preview cards.
//!
//! A [`PreviewCard`] is the layout-independent content of one card. Turning
//! it into bytes is the job of a [`CardRenderer`]; the bundled
//! [`SvgCardRenderer`] writes a self-contained SVG document.
//!
//! [`generate_cards`] renders every record in parallel. A failure for one
//! record is logged and recorded in the report; the rest of the batch still
//! runs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bomdroplib::output::card::{generate_cards, SvgCardRenderer};
//! use bomdroplib::{Dataset, Site, SiteConfig};
//!
//! let site = Site::new(SiteConfig::default(), Dataset::bundled()?)?;
//! let report = generate_cards(&site, &SvgCardRenderer::new(), "public/og")?;
//! println!("{} cards, {} failures", report.generated, report.failures.len());
//! # Ok::<(), bomdroplib::BomdropError>(())
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::data::ComparisonRecord;
use crate::error::BomdropError;
use crate::format;
use crate::output::sitemap::escape_xml;
use crate::site::Site;
use crate::Result;

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

/// Text content of one preview card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCard {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub banner: String,
    pub icon: String,
    pub name: String,
    /// Quantity with thousands separators
    pub quantity: String,
    pub caption: String,
    /// "$4.5 each"
    pub cost_line: String,
}

impl PreviewCard {
    pub fn new(site: &Site, record: &ComparisonRecord) -> Self {
        Self {
            id: record.id.clone(),
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            banner: site.config().site_name.clone(),
            icon: record.icon.clone(),
            name: record.name.clone(),
            quantity: format::thousands(site.quantity(record)),
            caption: site.spend_caption(),
            cost_line: format!("{} each", format::dollars(record.cost.get())),
        }
    }
}

/// Turns a card into file contents.
pub trait CardRenderer: Sync {
    /// File extension of the rendered output, without the dot.
    fn extension(&self) -> &str;

    /// Render one card.
    fn render(&self, card: &PreviewCard) -> Result<Vec<u8>>;
}

/// Renders cards as SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgCardRenderer {
    _private: (),
}

impl SvgCardRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardRenderer for SvgCardRenderer {
    fn extension(&self) -> &str {
        "svg"
    }

    fn render(&self, card: &PreviewCard) -> Result<Vec<u8>> {
        let cx = card.width / 2;
        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="#3b82f6"/>
      <stop offset="100%" stop-color="#1e3a8a"/>
    </linearGradient>
  </defs>
  <rect width="{w}" height="{h}" fill="url(#bg)"/>
  <g font-family="Arial, sans-serif" fill="#ffffff" text-anchor="middle">
    <text x="{cx}" y="70" font-size="28" font-weight="bold" opacity="0.95">{banner}</text>
    <text x="{cx}" y="220" font-size="110">{icon}</text>
    <text x="{cx}" y="310" font-size="46" font-weight="bold">{name}</text>
    <text x="{cx}" y="400" font-size="68" font-weight="bold" fill="#FFD700">{quantity}</text>
    <text x="{cx}" y="460" font-size="30" opacity="0.9">{caption}</text>
    <text x="{cx}" y="510" font-size="26" opacity="0.85">{cost}</text>
  </g>
</svg>
"##,
            w = card.width,
            h = card.height,
            cx = cx,
            banner = escape_xml(&card.banner),
            icon = escape_xml(&card.icon),
            name = escape_xml(&card.name),
            quantity = escape_xml(&card.quantity),
            caption = escape_xml(&card.caption),
            cost = escape_xml(&card.cost_line),
        );
        Ok(svg.into_bytes())
    }
}

/// A card that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFailure {
    pub id: String,
    pub error: String,
}

/// Outcome of a card batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardBatchReport {
    pub generated: usize,
    pub failures: Vec<CardFailure>,
    /// Files written, in dataset order
    pub written: Vec<PathBuf>,
}

impl CardBatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render and write a card for every record into `out_dir`.
///
/// Fails only if `out_dir` cannot be created. Per-record failures are
/// collected in the report.
pub fn generate_cards(
    site: &Site,
    renderer: &dyn CardRenderer,
    out_dir: impl AsRef<Path>,
) -> Result<CardBatchReport> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir).map_err(|source| BomdropError::FileWrite {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let results: Vec<(String, Result<PathBuf>)> = site
        .dataset()
        .get_all()
        .par_iter()
        .map(|record| {
            let outcome = write_card(site, renderer, record, out_dir);
            (record.id.clone(), outcome)
        })
        .collect();

    let mut report = CardBatchReport::default();
    for (id, outcome) in results {
        match outcome {
            Ok(path) => {
                report.generated += 1;
                report.written.push(path);
            }
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "failed to generate preview card");
                report.failures.push(CardFailure {
                    id,
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        generated = report.generated,
        failed = report.failures.len(),
        dir = %out_dir.display(),
        "preview cards generated"
    );
    Ok(report)
}

fn write_card(
    site: &Site,
    renderer: &dyn CardRenderer,
    record: &ComparisonRecord,
    out_dir: &Path,
) -> Result<PathBuf> {
    let card = PreviewCard::new(site, record);
    let bytes = renderer.render(&card)?;
    let path = out_dir.join(format!("{}.{}", record.id, renderer.extension()));
    std::fs::write(&path, bytes).map_err(|source| BomdropError::FileWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::data::Dataset;

    fn site() -> Site {
        Site::new(SiteConfig::default(), Dataset::bundled().unwrap()).unwrap()
    }

    /// Fails for one id, delegates to SVG otherwise.
    struct Flaky {
        fail_id: &'static str,
    }

    impl CardRenderer for Flaky {
        fn extension(&self) -> &str {
            "svg"
        }

        fn render(&self, card: &PreviewCard) -> Result<Vec<u8>> {
            if card.id == self.fail_id {
                return Err(BomdropError::CardRender {
                    id: card.id.clone(),
                    message: "font missing".to_string(),
                });
            }
            SvgCardRenderer::new().render(card)
        }
    }

    #[test]
    fn test_card_content() {
        let site = site();
        let record = site.dataset().get_by_id("tim-tam-packet").unwrap();
        let card = PreviewCard::new(&site, record);
        assert_eq!(card.quantity, "21,444,444");
        assert_eq!(card.caption, "Instead of $96.5M on BOM.gov.au");
        assert_eq!(card.cost_line, "$4.5 each");
        assert_eq!((card.width, card.height), (1200, 630));
    }

    #[test]
    fn test_svg_escapes_text() {
        let site = site();
        let mut card = PreviewCard::new(&site, &site.dataset().get_all()[0]);
        card.name = "Fish & <Chips>".to_string();
        let svg = String::from_utf8(SvgCardRenderer::new().render(&card).unwrap()).unwrap();
        assert!(svg.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(svg.contains("width=\"1200\""));
        assert!(svg.contains("#3b82f6"));
    }

    #[test]
    fn test_generate_all_cards() {
        let site = site();
        let dir = tempfile::tempdir().unwrap();
        let report = generate_cards(&site, &SvgCardRenderer::new(), dir.path()).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.generated, site.dataset().len());
        assert!(dir.path().join("ambulance.svg").is_file());
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let site = site();
        let dir = tempfile::tempdir().unwrap();
        let report = generate_cards(&site, &Flaky { fail_id: "sandbag" }, dir.path()).unwrap();
        assert_eq!(report.generated, site.dataset().len() - 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, "sandbag");
        assert!(report.failures[0].error.contains("font missing"));
        assert!(!dir.path().join("sandbag.svg").exists());
        assert!(dir.path().join("ambulance.svg").is_file());
    }
}
