//! Master bible: canonical character and location appearance sheets.

use serde::{Deserialize, Serialize};

use crate::reference::ReferenceImage;
use crate::types::EntityId;

/// Canonical look of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterAppearanceSheet {
    pub id: EntityId,
    pub project_id: EntityId,
    pub character_name: String,
    /// Alternative names the character goes by in prompts.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub appearance_images: Vec<ReferenceImage>,
}

/// Canonical look of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAppearanceSheet {
    pub id: EntityId,
    pub project_id: EntityId,
    pub location_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub reference_images: Vec<ReferenceImage>,
}

/// Which kind of bible entry a sheet describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Character,
    Location,
}

impl SheetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Location => "location",
        }
    }
}

/// Either kind of appearance sheet, as inherited by a shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppearanceSheet {
    Character(CharacterAppearanceSheet),
    Location(LocationAppearanceSheet),
}

impl AppearanceSheet {
    pub fn kind(&self) -> SheetKind {
        match self {
            Self::Character(_) => SheetKind::Character,
            Self::Location(_) => SheetKind::Location,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Character(sheet) => &sheet.id,
            Self::Location(sheet) => &sheet.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Character(sheet) => &sheet.character_name,
            Self::Location(sheet) => &sheet.location_name,
        }
    }

    pub fn aliases(&self) -> &[String] {
        match self {
            Self::Character(sheet) => &sheet.aliases,
            Self::Location(sheet) => &sheet.aliases,
        }
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        match self {
            Self::Character(sheet) => sheet.thumbnail_url.as_deref(),
            Self::Location(sheet) => sheet.thumbnail_url.as_deref(),
        }
    }

    pub fn images(&self) -> &[ReferenceImage] {
        match self {
            Self::Character(sheet) => &sheet.appearance_images,
            Self::Location(sheet) => &sheet.reference_images,
        }
    }

    /// The name followed by every alias.
    pub fn match_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name()).chain(self.aliases().iter().map(String::as_str))
    }

    /// The image a shot should adopt from this sheet: the thumbnail when set,
    /// otherwise the first usable image.
    pub fn primary_image_url(&self) -> Option<&str> {
        self.thumbnail_url()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                self.images()
                    .iter()
                    .find(|img| img.is_usable())
                    .map(|img| img.url.as_str())
            })
    }

    /// Highest weight across the sheet's images, `None` if it has none.
    pub fn canonical_weight(&self) -> Option<f64> {
        self.images()
            .iter()
            .map(|img| img.weight)
            .reduce(f64::max)
    }
}

impl From<CharacterAppearanceSheet> for AppearanceSheet {
    fn from(sheet: CharacterAppearanceSheet) -> Self {
        Self::Character(sheet)
    }
}

impl From<LocationAppearanceSheet> for AppearanceSheet {
    fn from(sheet: LocationAppearanceSheet) -> Self {
        Self::Location(sheet)
    }
}
