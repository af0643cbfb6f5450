//! Signal preprocessing modules
//!
//! This module contains utilities for preparing raw sensor traces for
//! segmentation and feature extraction:
//! - Spectral denoising (mean-magnitude threshold filter)

pub mod denoise;
