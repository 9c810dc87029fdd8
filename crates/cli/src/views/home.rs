//! Home screen: marketing copy and a sign-up form that never leaves the
//! client.

use tabled::{builder::Builder, settings::Style};

pub const HEADLINE: &str = "Welcome to BookStore";

pub const LEAD: &str = "Discover your next favorite book from our vast collection of titles \
spanning every genre. From bestsellers to rare finds, we have something for every reader.";

/// (title, description)
pub const FEATURES: [(&str, &str); 3] = [
    (
        "Free Shipping",
        "On orders over $50. Delivery within 2-5 business days.",
    ),
    (
        "Student Discount",
        "10% off with valid student ID. Perfect for textbooks and study materials.",
    ),
    (
        "Rewards Program",
        "Earn points with every purchase. Redeem for future books.",
    ),
];

/// (title, author, description)
pub const FEATURED_BOOKS: [(&str, &str, &str); 3] = [
    (
        "The Great Gatsby",
        "F. Scott Fitzgerald",
        "A timeless classic about the American Dream",
    ),
    (
        "To Kill a Mockingbird",
        "Harper Lee",
        "A powerful story of racial injustice and childhood innocence",
    ),
    (
        "1984",
        "George Orwell",
        "A dystopian masterpiece that remains relevant today",
    ),
];

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("Passwords don't match!")]
    PasswordMismatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Display-only record of who signed up in this session. Nothing is sent
/// to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUpUser {
    pub name: String,
}

#[derive(Debug, Default)]
pub struct HomeView {
    show_signup: bool,
    user: Option<SignedUpUser>,
    form: SignupForm,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&SignedUpUser> {
        self.user.as_ref()
    }

    pub fn is_signup_open(&self) -> bool {
        self.show_signup
    }

    pub fn open_signup(&mut self) {
        self.show_signup = true;
    }

    pub fn close_signup(&mut self) {
        self.show_signup = false;
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    /// Accept the sign-up form. Mismatched passwords leave every piece of
    /// state untouched.
    pub fn submit(&mut self) -> Result<&SignedUpUser, SignupError> {
        if self.form.password != self.form.confirm_password {
            return Err(SignupError::PasswordMismatch);
        }

        let form = std::mem::take(&mut self.form);
        self.show_signup = false;
        Ok(&*self.user.insert(SignedUpUser {
            name: form.full_name,
        }))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(user) = &self.user {
            out.push_str(&format!("Hello, {}!\n\n", user.name));
        }

        out.push_str(HEADLINE);
        out.push('\n');
        out.push_str(LEAD);
        out.push_str("\n\n  Browse Books: bookstore list\n");
        if self.user.is_none() {
            out.push_str("  Sign Up:      bookstore home --name <NAME> --email <EMAIL> ...\n");
        }

        let mut features = Builder::default();
        for (title, text) in FEATURES {
            features.push_record([title, text]);
        }
        let mut features = features.build();
        features.with(Style::blank());
        out.push('\n');
        out.push_str(&features.to_string());

        let mut featured = Builder::default();
        featured.push_record(["Title", "Author", "About"]);
        for (title, author, description) in FEATURED_BOOKS {
            featured.push_record([title, author, description]);
        }
        let mut featured = featured.build();
        featured.with(Style::modern_rounded());
        out.push_str("\n\nFeatured Books\n");
        out.push_str(&featured.to_string());
        out.push('\n');

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(password: &str, confirm: &str) -> HomeView {
        let mut view = HomeView::new();
        view.open_signup();
        *view.form_mut() = SignupForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        };
        view
    }

    #[test]
    fn matching_passwords_sign_up_locally() {
        let mut view = filled("s3cret", "s3cret");

        let user = view.submit().unwrap().clone();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(view.user(), Some(&user));
        assert!(!view.is_signup_open());
        assert_eq!(view.form(), &SignupForm::default());
    }

    #[test]
    fn mismatched_passwords_block_the_state_change() {
        let mut view = filled("s3cret", "secret");
        let form_before = view.form().clone();

        assert_eq!(view.submit(), Err(SignupError::PasswordMismatch));
        assert!(view.user().is_none());
        assert!(view.is_signup_open());
        assert_eq!(view.form(), &form_before);
    }

    #[test]
    fn render_greets_signed_up_user() {
        let mut view = filled("pw", "pw");
        assert!(!view.render().contains("Hello,"));
        assert!(view.render().contains("Sign Up:"));

        view.submit().unwrap();
        let text = view.render();
        assert!(text.contains("Hello, Ada Lovelace!"));
        assert!(text.contains(HEADLINE));
        assert!(text.contains("George Orwell"));
        assert!(!text.contains("Sign Up:"));
    }
}
