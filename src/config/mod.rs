// ABOUTME: Configuration management module for the exercise resolver
// ABOUTME: Environment-only configuration of storage location, catalog source, and fallback id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! Configuration comes exclusively from environment variables, with CLI
//! flags layered on top by the binary.

/// Environment-based resolver configuration
pub mod environment;

pub use environment::ResolverConfig;
