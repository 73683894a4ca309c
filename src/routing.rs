use crate::settings::Settings;
use crate::types::{Role, User};

/// Decide where the browser goes after a login: admins get the admin page,
/// everyone else (including nobody at all) gets the catalog.
pub fn redirect_after_login<'a>(settings: &'a Settings, user: Option<&User>) -> &'a str {
    match user.map(|u| u.role) {
        Some(Role::Admin) => &settings.pages.admin_url,
        _ => &settings.pages.catalog_url,
    }
}
