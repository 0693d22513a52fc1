mod admin_setting;
mod directory;
mod server_status;
