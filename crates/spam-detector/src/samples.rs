//! Built-in example messages.

use clap::ValueEnum;

pub const SPAM_SAMPLE: &str =
    "Congratulations! You've won a $1000 Walmart gift card. Click here to claim now!";
pub const NORMAL_SAMPLE: &str =
    "Hey, just checking if we're still meeting for lunch tomorrow at 1pm?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleMessage {
    /// A prize-claim message.
    Spam,
    /// A lunch-plans message.
    Normal,
}

impl SampleMessage {
    pub fn text(self) -> &'static str {
        match self {
            SampleMessage::Spam => SPAM_SAMPLE,
            SampleMessage::Normal => NORMAL_SAMPLE,
        }
    }
}
