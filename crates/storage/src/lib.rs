#![forbid(unsafe_code)]

pub mod bank;
pub mod repository;
pub mod seed;
pub mod sqlite;

pub use bank::{BankError, QuestionBank, StaticQuestionBank};
pub use repository::{Storage, StorageError};
