// Text layout
// Implements: glyph-width tables for the base fonts, greedy word wrap, vertical flow.
// Everything here is pure and synchronous; callers decide where it runs.

pub mod flow;
pub mod font_metrics;
pub mod wrap;
