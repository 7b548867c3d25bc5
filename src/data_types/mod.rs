
/// Contains the family map joining individuals to family identifiers
pub mod family;
/// Contains the consequence severity ranking used to break deduplication ties
pub mod severity;
/// Contains the DeNovoVariant type as well as supporting definitions
pub mod variants;
