pub mod artwork;
pub mod commission;
pub mod contact;
pub mod settings;
pub mod storage;
