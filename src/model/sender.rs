use teloxide::types::User;

/// The Telegram user a message came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: u64,
    pub display_name: String,
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            display_name: user.full_name(),
        }
    }
}
