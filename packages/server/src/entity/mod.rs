pub mod artwork;
pub mod commission;
pub mod contact;
pub mod site_setting;
