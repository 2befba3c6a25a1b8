//! Client-side controller for a language pack administration panel.
//!
//! Reconciles two independently fetched lists — packs installable from a
//! central catalog server and packs installed on a local content server —
//! into render records, and drives install/delete/set-default commands plus
//! download-job polling against the local server API.

pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod poller;
pub mod reconcile;
pub mod render;
pub mod state;
pub mod version;
