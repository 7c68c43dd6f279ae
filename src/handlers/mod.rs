mod auth;
mod index;
mod sheets;

pub use auth::{
    serve_login_page, serve_register_page, handle_login, handle_register, handle_logout,
    LOGIN_FAILED,
};
pub use index::{serve_index, hello};
pub use sheets::{serve_new_sheet, create_sheet, view_sheet, confirm_delete, delete_sheet};
