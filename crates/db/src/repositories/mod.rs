//! Repository layer: zero-sized structs with async associated functions
//! taking a `&PgPool`.

pub mod character_sheet_repo;
pub mod location_sheet_repo;
pub mod project_repo;
pub mod sequence_repo;
pub mod sequence_style_repo;
pub mod shot_repo;

pub use character_sheet_repo::CharacterSheetRepo;
pub use location_sheet_repo::LocationSheetRepo;
pub use project_repo::ProjectRepo;
pub use sequence_repo::SequenceRepo;
pub use sequence_style_repo::SequenceStyleRepo;
pub use shot_repo::ShotRepo;
