/// Configuration types for ODT conversion.
///
/// This module defines the options used to customize how a Word document is
/// translated: the names given to generated master pages and page layouts,
/// the footer margin approximation and which optional records are written.
use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// Configuration options for ODT conversion.
///
/// # Examples
///
/// ```rust
/// use doc2odt::odt::OdtOptions;
///
/// // Create with defaults
/// let options = OdtOptions::default();
///
/// // Or customize
/// let options = OdtOptions::new()
///     .with_footer_margin_floor(10.0)
///     .with_line_numbering(false);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdtOptions {
    /// Smallest footer `fo:margin-top` (in points) used when the section has
    /// an exact bottom margin.
    ///
    /// This is an approximation: Word does not record how far the footer
    /// really sits from the body text.
    pub footer_margin_floor_pt: f64,
    /// Prefix of master page names after the first section ("MP2", "MP3", ...)
    pub master_page_prefix: String,
    /// Name of the first-page master page of the first section
    pub first_page_master_name: String,
    /// Prefix of generated page layout names ("Mpm1", "Mpm2", ...)
    pub page_layout_prefix: String,
    /// Whether to write `text:linenumbering-configuration`
    pub emit_line_numbering: bool,
    /// Whether picture bytes are stored in the package
    pub embed_pictures: bool,
}

impl Default for OdtOptions {
    fn default() -> Self {
        Self {
            footer_margin_floor_pt: 14.0,
            master_page_prefix: "MP".to_string(),
            first_page_master_name: "First_Page".to_string(),
            page_layout_prefix: "Mpm".to_string(),
            emit_line_numbering: true,
            embed_pictures: true,
        }
    }
}

impl OdtOptions {
    /// Create a new `OdtOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer margin floor in points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doc2odt::odt::OdtOptions;
    ///
    /// let options = OdtOptions::new().with_footer_margin_floor(0.0);
    /// assert_eq!(options.footer_margin_floor_pt, 0.0);
    /// ```
    #[inline]
    pub fn with_footer_margin_floor(mut self, points: f64) -> Self {
        self.footer_margin_floor_pt = points;
        self
    }

    #[inline]
    pub fn with_master_page_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.master_page_prefix = prefix.into();
        self
    }

    #[inline]
    pub fn with_first_page_master_name(mut self, name: impl Into<String>) -> Self {
        self.first_page_master_name = name.into();
        self
    }

    #[inline]
    pub fn with_page_layout_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.page_layout_prefix = prefix.into();
        self
    }

    /// Set whether line numbering settings are written.
    ///
    /// Only sections that turn line numbering on produce the record.
    #[inline]
    pub fn with_line_numbering(mut self, emit: bool) -> Self {
        self.emit_line_numbering = emit;
        self
    }

    /// Set whether pictures are stored in the package.
    ///
    /// Frames are written either way; without the bytes they point at a
    /// missing `Pictures/` entry.
    #[inline]
    pub fn with_embedded_pictures(mut self, embed: bool) -> Self {
        self.embed_pictures = embed;
        self
    }

    /// Read options from YAML. Missing keys keep their default value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use doc2odt::odt::OdtOptions;
    ///
    /// let options = OdtOptions::from_yaml_str("master_page_prefix: Page\n").unwrap();
    /// assert_eq!(options.master_page_prefix, "Page");
    /// assert_eq!(options.page_layout_prefix, "Mpm");
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse options: {}", e)))
    }

    /// Serialize options to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize options: {}", e)))
    }
}
