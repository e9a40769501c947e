// Library root: the data-shaping and derived-metric pipeline behind the
// División de Honor dashboard. Rendering lives elsewhere; everything here is a
// pure transform over the cached player table.

pub mod analytics;
pub mod dataset;
pub mod selection;
pub mod summary;
