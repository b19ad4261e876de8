//! Core library for the citation graph clustering & layout engine

pub mod config;
pub mod data;
pub mod graph;
pub mod cluster;
pub mod layout;
pub mod color;
pub mod pipeline;
pub mod storage;

pub use anyhow::{Result, anyhow};
