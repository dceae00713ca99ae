//! eva-sub-cli - submit VCF studies to the European Variation Archive
//!
//! Authenticates with ENA Webin or LS-RI, initiates a submission with the
//! EVA submission service and uploads the VCF and metadata files.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod submit;
