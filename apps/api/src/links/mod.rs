// Social-Link Detector/Rewriter
// Finds profile URLs (LinkedIn, GitHub, ...) in free text and swaps them for short labels.
// Used by the export serializer and by the display-transform endpoints.

pub mod detector;
pub mod handlers;
pub mod rewrite;
