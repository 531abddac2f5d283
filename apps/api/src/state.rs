use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::catalog::{load_catalog_file, SkillCatalog};
use crate::analysis::normalizer::LexicalNormalizer;
use crate::analysis::pipeline::SkillAnalyzer;
use crate::config::Config;
use crate::extraction::{PdfTextExtractor, TextExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Catalog, fallback list and normalizer. Built once, immutable afterwards.
    pub analyzer: Arc<SkillAnalyzer>,
    /// Pluggable document extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    /// Builds the production state: catalog from file or built-ins, lexical normalizer, PDF extractor.
    pub fn from_config(config: Config) -> Result<Self> {
        let (catalog, fallback) = match &config.skill_catalog_path {
            Some(path) => {
                let loaded = load_catalog_file(path)
                    .with_context(|| format!("Failed to load skill catalog from {}", path.display()))?;
                info!("Loaded skill catalog from {}", path.display());
                loaded
            }
            None => (SkillCatalog::default_catalog(), SkillCatalog::common_skills()),
        };
        info!(
            "Skill catalog: {} terms, fallback list: {} terms",
            catalog.len(),
            fallback.len()
        );

        let normalizer = LexicalNormalizer::for_catalogs(&[&catalog, &fallback]);
        let analyzer = SkillAnalyzer::new(Arc::new(normalizer), catalog, fallback)
            .with_preview_chars(config.resume_preview_chars);

        Ok(Self {
            config,
            analyzer: Arc::new(analyzer),
            extractor: Arc::new(PdfTextExtractor),
        })
    }
}
