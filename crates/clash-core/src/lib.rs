//! Core types and definitions for the Cosmic Clash simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! entities and their per-step rules, commands, snapshots, events,
//! tuning and constants. It knows nothing about pixels, input devices
//! or threads.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod tuning;
pub mod types;
