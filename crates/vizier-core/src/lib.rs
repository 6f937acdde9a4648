//! Vizier Core Types and Definitions
//!
//! This crate provides the foundational types for the Vizier rendering
//! engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Text**: Font specs, measurement and wrapping ([`text`] module)
//! - **Scene**: The retained scene tree renderers emit into ([`scene`] module)
//! - **Description**: The typed diagram description model ([`description`] module)

pub mod color;
pub mod description;
pub mod geometry;
pub mod identifier;
pub mod scene;
pub mod text;
