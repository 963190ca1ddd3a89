use crate::constants::{A4_HALF_PAGE_MM, DEFAULT_EXTENSIONS};
use crate::layout::PageSlot;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet configuration
///
/// Every stage reads its geometry and limits from here instead of global
/// constants, so a different paper size only needs a different value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    // Page geometry
    pub paper_size: PaperSize,
    /// Distance from the top edge to the guide line, in mm
    pub half_page_mm: f32,
    pub margins: ContentMargins,

    // Cache
    pub target_resolution: TargetResolution,

    // Marks
    pub guide_line: GuideLine,

    // Discovery
    pub extensions: Vec<String>,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            half_page_mm: A4_HALF_PAGE_MM,
            margins: ContentMargins::default(),
            target_resolution: TargetResolution::default(),
            guide_line: GuideLine::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page (width, height) in mm
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        self.paper_size.dimensions_mm()
    }

    pub fn content_width_mm(&self) -> f32 {
        self.page_dimensions_mm().0 - self.margins.horizontal_mm
    }

    pub fn content_height_mm(&self) -> f32 {
        self.page_dimensions_mm().1 / 2.0 - self.margins.vertical_mm
    }

    pub fn content_ratio(&self) -> f32 {
        self.content_width_mm() / self.content_height_mm()
    }

    /// Center of a slot in page coordinates (mm, origin top-left)
    pub fn slot_center(&self, slot: PageSlot) -> (f32, f32) {
        let center_x = self.page_dimensions_mm().0 / 2.0;
        let half = self.half_page_mm;
        match slot {
            PageSlot::Top => (center_x, half / 2.0),
            PageSlot::Bottom => (center_x, half + half / 2.0),
        }
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (page_width, page_height) = self.page_dimensions_mm();
        if page_width <= 0.0 || page_height <= 0.0 {
            return Err(BookletError::Config(format!(
                "Paper size must be positive, got {}x{} mm",
                page_width, page_height
            )));
        }

        if self.content_width_mm() <= 0.0 || self.content_height_mm() <= 0.0 {
            return Err(BookletError::Config(format!(
                "Margins leave no content area ({}x{} mm)",
                self.content_width_mm(),
                self.content_height_mm()
            )));
        }

        if self.half_page_mm <= 0.0 || self.half_page_mm >= page_height {
            return Err(BookletError::Config(format!(
                "Half page position {} mm must lie inside the page height {} mm",
                self.half_page_mm, page_height
            )));
        }

        if self.target_resolution.width_px == 0 || self.target_resolution.height_px == 0 {
            return Err(BookletError::Config(
                "Target resolution must be non-zero".to_string(),
            ));
        }

        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(BookletError::Config(
                "At least one image extension is required".to_string(),
            ));
        }

        Ok(())
    }
}
