//! Scripts: ordered, compile-time chat turns.

use std::fmt;

/// Who speaks a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The companion; its turns show a typing indicator first.
    Agent,
    /// The visitor.
    User,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Agent => "agent",
            Self::User => "user",
        })
    }
}

/// One scripted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Speaker.
    pub sender: Sender,
    /// Display text; may contain emoji.
    pub content: &'static str,
}

impl Turn {
    /// An agent turn.
    pub const fn agent(content: &'static str) -> Self {
        Self {
            sender: Sender::Agent,
            content,
        }
    }

    /// A user turn.
    pub const fn user(content: &'static str) -> Self {
        Self {
            sender: Sender::User,
            content,
        }
    }
}

/// An immutable sequence of turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script(&'static [Turn]);

impl Script {
    /// Wrap a static slice of turns.
    pub const fn new(turns: &'static [Turn]) -> Self {
        Self(turns)
    }

    /// Number of turns.
    pub const fn len(self) -> usize {
        self.0.len()
    }

    /// Whether the script has no turns.
    pub const fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// Turn at `index`.
    pub fn get(self, index: usize) -> Option<&'static Turn> {
        self.0.get(index)
    }

    /// All turns in order.
    pub const fn turns(self) -> &'static [Turn] {
        self.0
    }
}

const LUNA_TURNS: &[Turn] = &[
    Turn::agent("Hey there! ✨ I'm Luna, your AI companion. How are you feeling today?"),
    Turn::user("Hi Luna! I've been feeling a bit stressed lately with work."),
    Turn::agent(
        "I hear you. Work stress can really weigh on us. 💜 Would you like to talk about \
         what's been on your mind, or would you prefer some relaxation techniques?",
    ),
    Turn::user("Maybe some tips to help me relax?"),
    Turn::agent(
        "Of course! Here's a quick breathing exercise: Breathe in for 4 counts, hold for 4, \
         and exhale for 6. Try it with me now... 🌙",
    ),
    Turn::user("That actually helped! Thanks Luna 💜"),
    Turn::agent(
        "I'm so glad! Remember, I'm always here whenever you need to talk or just want some \
         company. You're doing great! ✨",
    ),
];

/// The landing page conversation.
pub const LUNA_SCRIPT: Script = Script::new(LUNA_TURNS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luna_script_alternates() {
        assert_eq!(LUNA_SCRIPT.len(), 7);
        for (i, turn) in LUNA_SCRIPT.turns().iter().enumerate() {
            let expected = if i % 2 == 0 { Sender::Agent } else { Sender::User };
            assert_eq!(turn.sender, expected);
            assert!(!turn.content.is_empty());
        }
    }

    #[test]
    fn test_script_get_out_of_range() {
        const TURNS: &[Turn] = &[Turn::agent("hi"), Turn::user("hello")];
        const TWO: Script = Script::new(TURNS);
        assert_eq!(TWO.get(1), Some(&Turn::user("hello")));
        assert_eq!(TWO.get(2), None);
    }
}
