//! Storage module for photo objects
//!
//! Provides a MinIO/S3-compatible client for presigned upload/download URLs,
//! existence checks, and object listing.

mod minio_client;

pub use minio_client::{MinIOClient, ObjectPage, StoredObject};
