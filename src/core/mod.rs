/// Default category loading and seeding
pub mod category;
/// Cached listing state for the console screens
pub mod directory;
/// Row aggregation into the supplier detail view
pub mod detail;
/// Document types, filing and expiration
pub mod document;
/// Supplier listing and registration
pub mod supplier;
/// Transaction recording
pub mod transaction;
