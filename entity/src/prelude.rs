pub use super::admin_setting::Entity as AdminSetting;
pub use super::server_status::Entity as ServerStatus;
pub use super::static_instance::Entity as StaticInstance;
