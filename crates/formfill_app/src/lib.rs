//! Formfill host: loads saved pages from disk, talks to the matcher service,
//! and drives the round trip from the command line.
pub mod app;
pub mod cli;
pub mod effects;
pub mod logging;
pub mod matcher;
pub mod pages;
pub mod settings;
