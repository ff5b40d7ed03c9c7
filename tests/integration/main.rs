//! Integration tests for shellcast

mod helpers;

mod cli_test;
mod loader_test;
mod playback_test;
