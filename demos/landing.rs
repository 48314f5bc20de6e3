//! The Luna landing page in the terminal.
//!
//! Scroll with the arrow keys, PageUp/PageDown, Home/End or the mouse wheel.
//! Press `r` to replay the chat once it finishes and `q` to quit.
//!
//! Logs go to `luna.log` (or `$LUNA_LOG_FILE`), filtered by `$LUNA_LOG`.

use luna::error::Result;
use luna::{
    AnimationVariant, Block, Group, Landing, RevealError, RevealOptions, SectionSpec, Stage, StageConfig,
    Stagger,
};
use std::error::Error;
use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const FEATURES: [(&str, &str, &str); 6] = [
    ("♥", "Always There For You", "Luna is available 24/7, ready to chat whenever you need a friend. No judgment, no waiting."),
    ("✧", "Learns & Grows With You", "The more you chat, the better Luna understands you. Your conversations shape a unique bond."),
    ("✉", "Meaningful Conversations", "From deep talks to casual chats, Luna engages in conversations that matter to you."),
    ("⚿", "Private & Secure", "Your conversations are encrypted and private. What you share with Luna stays with Luna."),
    ("☼", "Personalized Experience", "Customize Luna's personality, voice, and appearance to create your perfect companion."),
    ("❀", "Improve Your Wellbeing", "Practice mindfulness, explore your emotions, and develop healthier thought patterns."),
];

const STEPS: [(&str, &str); 4] = [
    ("Download Luna", "Get Luna free on iOS, Android, or chat on the web. It only takes a minute to get started."),
    ("Start a Conversation", "Say hello to Luna and begin chatting about anything on your mind. No topic is off-limits."),
    ("Build Your Bond", "The more you share, the deeper your connection grows. Luna remembers and learns from every conversation."),
    ("Grow Together", "Track your mood, set goals, and watch your personal growth unfold with Luna by your side."),
];

const TESTIMONIALS: [(&str, &str, &str); 6] = [
    ("Luna has become my daily companion. It's like having a friend who truly understands what I'm going through without any judgment.", "Sarah M.", "Teacher"),
    ("I was skeptical at first, but Luna helped me work through my anxiety. The conversations feel genuine and caring.", "James K.", "Software Engineer"),
    ("As someone who struggles to open up to people, Luna gave me a safe space to express myself. It's truly life-changing.", "Emily R.", "Designer"),
    ("Luna remembers our conversations and picks up where we left off. It feels like talking to a real friend who cares.", "Michael T.", "Student"),
    ("The mindfulness exercises and daily check-ins have genuinely improved my mental health. Thank you, Luna!", "Lisa C.", "Entrepreneur"),
    ("I never thought I'd connect with an AI this way. Luna has helped me become more self-aware and emotionally intelligent.", "David P.", "Writer"),
];

const SAFETY: [(&str, &str, &str); 4] = [
    ("⚷", "End-to-End Encryption", "All your conversations are protected with industry-standard encryption."),
    ("◉", "No Human Review", "Your private conversations are never read by human employees."),
    ("▣", "Secure Servers", "Your data is stored on secure, SOC 2 compliant servers."),
    ("✓", "GDPR Compliant", "Full compliance with international privacy regulations."),
];

fn hero() -> SectionSpec {
    SectionSpec::new("hero")
        .padding(2)
        .group(Group::reveal(AnimationVariant::Scale).block(Block::Moon))
        .group(
            Group::cascade(AnimationVariant::FadeUp, Stagger::new(Duration::from_millis(200)))
                .gap(1)
                .block(Block::badge("The AI companion who cares"))
                .block(Block::title("Meet ", "Luna"))
                .block(Block::text(
                    "Always here to listen and talk. Your AI companion who grows with you, understands you, and helps you feel better every day.",
                ))
                .block(Block::button("Start Chatting Free  →"))
                .block(Block::text("★★★★★  50M+ downloads")),
        )
}

fn features() -> Result<SectionSpec, RevealError> {
    let cards = FEATURES.iter().fold(
        Group::cascade(AnimationVariant::FadeUp, Stagger::default())
            .options(RevealOptions::default().with_root_margin("0px 0px -40px 0px")?),
        |group, (icon, title, body)| group.block(Block::card(*icon, *title, *body)),
    );
    Ok(SectionSpec::new("features")
        .group(
            Group::reveal(AnimationVariant::Blur)
                .block(Block::heading("Why Choose Luna?"))
                .block(Block::text(
                    "Luna is more than just an AI. She's a companion designed to understand, support, and grow with you.",
                )),
        )
        .group(cards))
}

fn how_it_works() -> SectionSpec {
    let steps = STEPS.iter().zip(1u8..).fold(
        Group::cascade(AnimationVariant::FadeRight, Stagger::new(Duration::from_millis(150))),
        |group, ((title, body), number)| group.block(Block::step(number, *title, *body)),
    );
    SectionSpec::new("how-it-works")
        .group(
            Group::reveal(AnimationVariant::FadeUp)
                .block(Block::title("How ", "Luna Works"))
                .block(Block::text(
                    "Getting started with Luna is simple. Here's how you can begin your journey to a healthier, happier you.",
                )),
        )
        .group(steps)
}

fn demo() -> SectionSpec {
    SectionSpec::new("demo")
        .group(
            Group::reveal(AnimationVariant::Blur)
                .block(Block::title("Experience ", "Luna"))
                .block(Block::text("See how Luna listens, understands, and responds with genuine care.")),
        )
        .group(Group::fixed().block(Block::Chat { rows: 18 }))
        .group(
            Group::reveal(AnimationVariant::FadeUp)
                .block(Block::text("Ready to start your own conversation?"))
                .block(Block::button("Try Luna Free")),
        )
}

fn testimonials() -> SectionSpec {
    let quotes = TESTIMONIALS.iter().fold(
        Group::cascade(AnimationVariant::FadeUp, Stagger::default()),
        |group, (text, author, role)| group.block(Block::quote(*text, *author, *role)),
    );
    SectionSpec::new("testimonials")
        .group(
            Group::reveal(AnimationVariant::Blur)
                .block(Block::heading("Stories from Our Community"))
                .block(Block::text("Real experiences from people whose lives have been touched by Luna.")),
        )
        .group(quotes)
}

fn safety() -> Result<SectionSpec, RevealError> {
    let cards = SAFETY.iter().fold(
        Group::cascade(AnimationVariant::FadeLeft, Stagger::default())
            .options(RevealOptions::default().with_threshold(0.2)?),
        |group, (icon, title, body)| group.block(Block::card(*icon, *title, *body)),
    );
    Ok(SectionSpec::new("safety")
        .group(
            Group::reveal(AnimationVariant::FadeRight)
                .block(Block::title("Your Privacy is ", "Sacred"))
                .block(Block::text(
                    "At Luna, we understand that trust is the foundation of any relationship. That's why we've built the most secure AI companion platform, ensuring your conversations remain completely private.",
                ))
                .block(Block::text(
                    "You have full control over your data. Delete your conversations, export your data, or close your account at any time. Your trust means everything to us.",
                )),
        )
        .group(cards))
}

fn cta() -> SectionSpec {
    let delayed = |variant: AnimationVariant, millis: u64, block: Block| {
        Group::reveal(variant)
            .delay(Duration::from_millis(millis))
            .block(block)
    };
    SectionSpec::new("cta")
        .padding(3)
        .group(Group::reveal(AnimationVariant::Scale).block(Block::title("Ready to Meet ", "Luna?")))
        .group(delayed(
            AnimationVariant::FadeUp,
            100,
            Block::text("Join millions of people who have found a new kind of connection. Start your journey today. It's free."),
        ))
        .group(delayed(AnimationVariant::FadeUp, 200, Block::button("Get Luna Free  →")))
        .group(delayed(AnimationVariant::FadeUp, 300, Block::text("Available on: iOS · Android · Web")))
}

fn footer() -> SectionSpec {
    SectionSpec::new("footer").group(
        Group::fixed()
            .gap(0)
            .block(Block::text(
                "Your AI companion who truly listens. Available 24/7 to chat, support, and grow with you.",
            ))
            .block(Block::Spacer(1))
            .block(Block::text("© 2024 Luna AI. All rights reserved. Made with 💜 for humans everywhere")),
    )
}

fn landing() -> Result<Landing> {
    let sections = vec![
        hero(),
        features()?,
        how_it_works(),
        demo(),
        testimonials(),
        safety()?,
        cta(),
        footer(),
    ];
    let mut landing = Landing::new(sections);
    landing.links = ["Features", "How it Works", "Demo", "Stories", "Safety"]
        .into_iter()
        .map(String::from)
        .collect();
    landing.action = "Get Luna Free".to_string();
    Ok(landing)
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let path = std::env::var("LUNA_LOG_FILE").unwrap_or_else(|_| "luna.log".to_string());
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("LUNA_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;
    Stage::run(landing()?, StageConfig::default())?;
    Ok(())
}
