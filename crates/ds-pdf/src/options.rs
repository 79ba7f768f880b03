use crate::constants::OVERSCAN;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collage layout policy: output page size, overscan and placement offsets
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Size of every composed output page
    pub output: OutputPageSpec,
    /// Multiplier applied to the exact-fit scale
    pub overscan: f64,
    /// Offsets applied uniformly to every placement
    pub offsets: PlacementOffsets,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            output: OutputPageSpec::letter(),
            overscan: OVERSCAN,
            offsets: PlacementOffsets::default(),
        }
    }
}

impl LayoutConfig {
    /// Load a layout config from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| PdfError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the layout config as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PdfError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.output.width) || !is_positive(self.output.height) {
            return Err(PdfError::Config(format!(
                "Output page must have positive dimensions, got {} x {}",
                self.output.width, self.output.height
            )));
        }

        if !is_positive(self.overscan) {
            return Err(PdfError::Config(format!(
                "Overscan must be a positive number, got {}",
                self.overscan
            )));
        }

        if !self.offsets.horizontal_offset.is_finite() || !self.offsets.vertical_adjust.is_finite()
        {
            return Err(PdfError::Config(
                "Placement offsets must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
