// Skill analysis core: normalization, catalog matching, requirement derivation, scoring.
// Everything below `handlers` is synchronous and pure; extraction I/O happens before it.

pub mod catalog;
pub mod handlers;
pub mod lemmatizer;
pub mod matcher;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod requirements;
pub mod stopwords;
