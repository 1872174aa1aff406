use crate::auth::Role;

/// Screens reachable once signed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Customers,
    AddCustomer,
    CustomerRecords(String),
    Editors,
    AddEditor,
    CompletedAccounts,
    FindDay,
    AgeCalculator,
}

/// Screens shown to signed-out visitors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicPage {
    Login,
    ForgotPassword,
    /// Reset through the emailed link (carries its token) or through an OTP.
    ResetPassword(ResetMode),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetMode {
    Link(String),
    Otp,
}

impl Page {
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Page::Dashboard => true,
            Page::Customers
            | Page::AddCustomer
            | Page::CustomerRecords(_)
            | Page::FindDay
            | Page::AgeCalculator => matches!(role, Role::Admin | Role::Editor),
            Page::Editors | Page::AddEditor | Page::CompletedAccounts => role == Role::Admin,
        }
    }

    /// `self` if `role` may open it, otherwise the dashboard.
    pub fn resolve(self, role: Role) -> Page {
        if self.allows(role) {
            self
        } else {
            Page::Dashboard
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Customers => "Customers",
            Page::AddCustomer => "Add Customer",
            Page::CustomerRecords(_) => "Customer Records",
            Page::Editors => "Editors",
            Page::AddEditor => "Add Editor",
            Page::CompletedAccounts => "Completed Accounts",
            Page::FindDay => "Find 100th Day",
            Page::AgeCalculator => "Find Age",
        }
    }

    /// Sidebar entries, in display order, that `role` may open.
    pub fn menu(role: Role) -> Vec<Page> {
        [
            Page::Dashboard,
            Page::AddEditor,
            Page::AddCustomer,
            Page::Editors,
            Page::Customers,
            Page::CompletedAccounts,
            Page::FindDay,
            Page::AgeCalculator,
        ]
        .into_iter()
        .filter(|page| page.allows(role))
        .collect()
    }
}

/// Maps a reset link (`/reset-password/<token>` or `/reset-password/otp`) to
/// the matching public screen.
pub fn public_page_from_path(path: &str) -> PublicPage {
    match path.trim_end_matches('/').strip_prefix("/reset-password/") {
        Some("otp") => PublicPage::ResetPassword(ResetMode::Otp),
        Some(token) if !token.is_empty() && !token.contains('/') => {
            PublicPage::ResetPassword(ResetMode::Link(token.to_string()))
        }
        _ => PublicPage::Login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_sees_everything() {
        assert_eq!(Page::menu(Role::Admin).len(), 8);
        assert!(Page::CompletedAccounts.allows(Role::Admin));
    }

    #[test]
    fn editor_menu_skips_admin_screens() {
        let menu = Page::menu(Role::Editor);
        assert_eq!(
            menu,
            vec![
                Page::Dashboard,
                Page::AddCustomer,
                Page::Customers,
                Page::FindDay,
                Page::AgeCalculator
            ]
        );
        assert!(Page::CustomerRecords("c1".into()).allows(Role::Editor));
    }

    #[test]
    fn unknown_role_only_gets_dashboard() {
        assert_eq!(Page::menu(Role::Unknown), vec![Page::Dashboard]);
        assert_eq!(Page::Customers.resolve(Role::Unknown), Page::Dashboard);
    }

    #[test]
    fn forbidden_page_falls_back_to_dashboard() {
        assert_eq!(Page::Editors.resolve(Role::Editor), Page::Dashboard);
        assert_eq!(Page::Editors.resolve(Role::Admin), Page::Editors);
    }

    #[test]
    fn reset_links() {
        assert_eq!(
            public_page_from_path("/reset-password/abc123"),
            PublicPage::ResetPassword(ResetMode::Link("abc123".into()))
        );
        assert_eq!(
            public_page_from_path("/reset-password/otp"),
            PublicPage::ResetPassword(ResetMode::Otp)
        );
        assert_eq!(public_page_from_path("/reset-password/"), PublicPage::Login);
        assert_eq!(public_page_from_path("/customers"), PublicPage::Login);
    }
}
