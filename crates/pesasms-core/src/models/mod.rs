//! Data models for parsed notification messages.

pub mod message;
