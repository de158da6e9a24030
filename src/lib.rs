//! Client-side orchestration for a knowledge-graph book recommender
//!
//! Builds a favorite-book set, aggregates its keywords, validates the chosen strategy and
//! relations into a recommendation request, and renders the ranked answer. The remote
//! service is reached through [`services::providers::BookService`].
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod routes;
pub mod services;
