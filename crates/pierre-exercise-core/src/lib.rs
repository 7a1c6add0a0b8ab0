// ABOUTME: Core types and constants for the Pierre exercise-name resolver
// ABOUTME: Foundation crate with error handling, domain models, and matching constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Exercise Core
//!
//! Foundation crate providing shared types and constants for the exercise-name
//! resolver. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Confidence literals, fixed catalog ids, keyword tables
//! - **models**: Exercise records, learned mappings, statistics, resolution results

/// Unified error handling system with standard error codes
pub mod errors;

/// Matching constants and configuration keys organized by domain
pub mod constants;

/// Core data models (exercise records, mappings, resolution results)
pub mod models;
