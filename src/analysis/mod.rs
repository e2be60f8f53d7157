//! Keyword statistics over harvested articles.
//!
//! - [`counter`]: one [`ArticleRecord`](crate::models::ArticleRecord) per article
//! - [`aggregate`]: relatedness counts and percentages across the whole corpus

pub mod aggregate;
pub mod counter;
