//! Domain types and shared helpers.
//!
//! - **Records**: [`course`], [`student`], [`attendance`], [`user`], [`dashboard`]
//! - **Data-layer support**: [`error`], [`outcome`], [`student_id`], [`rate`]
//! - **Application**: [`config`], [`data_storage`], [`assets`], [`credentials`]
//! - **Presentation**: [`messages`], [`formatter`], [`view`], [`export`]

pub(crate) mod text_enum;

pub mod assets;
pub mod attendance;
pub mod config;
pub mod course;
pub mod credentials;
pub mod dashboard;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod outcome;
pub mod rate;
pub mod student;
pub mod student_id;
pub mod user;
pub mod view;
