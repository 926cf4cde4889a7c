//! Read side of the host user model.

/// The accessors the host reads from any user, live or cached.
pub trait UserModel {
    /// Host-visible (composite) id.
    fn id(&self) -> &str;

    /// Login name.
    fn username(&self) -> &str;

    /// Email address.
    fn email(&self) -> Option<&str>;

    /// Whether the email has been verified.
    fn is_email_verified(&self) -> bool;

    /// First name.
    fn first_name(&self) -> Option<&str>;

    /// Last name.
    fn last_name(&self) -> Option<&str>;

    /// Creation time in epoch milliseconds.
    fn created_timestamp(&self) -> Option<i64>;
}
