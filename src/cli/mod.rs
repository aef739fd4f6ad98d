//! CLI infrastructure for the oxo engine
//!
//! This module provides the command-line interface for solving positions,
//! playing interactive games, evaluating agents, and analyzing the game
//! tree.

pub mod commands;
pub mod config;
pub mod output;
