pub mod artwork;
pub mod commission;
pub mod contact;
pub mod settings;
pub mod shared;
pub mod storage;
