#![doc = "bids2nf-docs-core: documentation synthesis engine for bids2nf suffix definitions."]

//! This crate turns the bids2nf suffix configuration into a reference
//! document: it classifies each definition, draws its structure as a
//! Mermaid diagram, synthesizes access-path examples (from real sample data
//! when available) and assembles cards into fixed-order sections.
//!
//! Reading files, fetching metadata over the network and writing output are
//! left to callers through the traits in [`contract`].
//!
//! # Usage
//! Parse with [`schema::Schema::from_yaml_str`], then call
//! [`generate::generate`] or, with a catalog already in hand,
//! [`document::render_document`].

pub mod card;
pub mod config;
pub mod contract;
pub mod diagram;
pub mod document;
pub mod error;
pub mod fallback;
pub mod generate;
pub mod metadata;
pub mod node_ids;
pub mod schema;
pub mod snippet;
pub mod variant;
