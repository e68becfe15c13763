//! sigstash-s3: S3 SDK adapter for the sigstash CLI
//!
//! This crate provides the implementation of the ObjectStore trait using
//! aws-sdk-s3. It is the only crate that directly depends on the AWS SDK.

pub mod client;

pub use client::S3Client;
