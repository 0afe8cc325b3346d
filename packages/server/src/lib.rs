// Student Finance Assistant - API Core
//
// This crate provides the backend core for a personal-finance assistant for
// college students: at-rest encryption of sensitive profile fields, a
// document-store contract for user data, and AI-generated budgeting insights.
//
// HTTP routing and credential bootstrapping live outside this crate; the
// services here are what a route layer calls.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
