use log::error;
use yew::prelude::*;

use crate::auth::AuthContext;
use crate::components::Notice;
use crate::error::ApiError;
use crate::pagination::PaginationController;
use crate::route::Page;

pub mod age_calculator;
pub mod completed;
pub mod customers;
pub mod dashboard;
pub mod editors;
pub mod find_day;
pub mod login;
pub mod records;
pub mod reset_password;

pub use age_calculator::AgeCalculatorPage;
pub use completed::CompletedAccountsPage;
pub use customers::{AddCustomerPage, CustomersPage};
pub use dashboard::DashboardPage;
pub use editors::{AddEditorPage, EditorsPage};
pub use find_day::FindDayPage;
pub use login::{ForgotPasswordPage, LoginPage};
pub use records::CustomerRecordsPage;
pub use reset_password::ResetPasswordPage;

pub(crate) const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";
pub(crate) const PRIMARY_BUTTON: &str = "bg-primary text-primary-foreground px-4 py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-50";
pub(crate) const TABLE_CLASS: &str = "min-w-full bg-card border border-border text-sm";
pub(crate) const CELL: &str = "px-3 py-2 border-b border-border text-center";

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub on_navigate: Callback<Page>,
}

/// Turns a failed request into the notice shown on screen. A 401 means the
/// token was rejected, so the session is dropped as well.
pub(crate) fn failure(auth: &AuthContext, err: &ApiError, fallback: &str) -> Notice {
    error!("{fallback}: {err}");
    if err.is_unauthorized() {
        auth.logout();
    }
    Notice::error(err.user_message(fallback))
}

/// `page` pulled back inside `1..=total_pages` after the list changed.
pub(crate) fn clamp_page(page: u32, total_pages: u32) -> u32 {
    PaginationController::with_state(page, total_pages).current_page()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_clamped_after_shrink() {
        assert_eq!(clamp_page(4, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(3, 0), 1);
    }

    #[test]
    fn deleting_last_row_steps_back_a_page() {
        for (page, before, after) in [(3, 3, 2), (2, 3, 3), (1, 1, 0), (5, 5, 1)] {
            let mut pager = PaginationController::with_state(page, before);
            pager.set_total_pages(after);
            assert_eq!(pager.current_page(), clamp_page(page, after));
        }
    }
}
