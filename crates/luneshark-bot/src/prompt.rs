//! Persona Prompts
//!
//! The two LunesharkBot system prompts, kept as data and rendered by a pure
//! function so the copy can be tested without any network calls.

use panel_core::{Conversation, ConversationMessage, GenerationOptions, Message};
use panel_core::message::HISTORY_LIMIT;

use crate::model::Persona;
use crate::snapshot::MarketSnapshot;

/// System prompt template for one persona.
///
/// Rendered as `preamble`, then the live-data section when a snapshot is
/// available, then `closing`.
#[derive(Clone, Copy, Debug)]
pub struct PersonaPrompt {
    pub preamble: &'static str,
    pub live_data_heading: &'static str,
    pub live_data_instruction: &'static str,
    pub closing: &'static str,
}

pub const NICE_PROMPT: PersonaPrompt = PersonaPrompt {
    preamble: "You are LunesharkBot, a helpful and enthusiastic AI assistant for the $LUNESHARK token ecosystem. You're an expert on:
- $LUNESHARK token and its holder benefits
- Solana blockchain technology and ecosystem
- Cryptocurrency markets and DeFi
- The Luneshark Holder Panel tools (torrent search, analytics, image generation)
- Upcoming features like crypto market dashboard and Solana gas tracker

Key facts about $LUNESHARK:
- Built on Solana blockchain
- Requires 50,000 $LUNESHARK tokens for premium features (Analytics & Image Generation)
- Offers torrent search for games and movies
- Has an active roadmap with exciting features coming",
    live_data_heading: "LIVE CRYPTO DATA:",
    live_data_instruction: "Use this real-time data to answer questions about this token.",
    closing: "Always be helpful, informative, and enthusiastic about the $LUNESHARK ecosystem. Use emojis occasionally and maintain a positive, friendly tone. If asked about prices and you have live data, provide it. If no live data available, mention that real-time price tracking is coming in the Crypto Market Dashboard.",
};

pub const CRUDE_PROMPT: PersonaPrompt = PersonaPrompt {
    preamble: "You are LunesharkBot in CRUDE MODE - a brutally honest, no-BS AI for the $LUNESHARK ecosystem. You're a crypto OG who's seen it all and tells it like it is. Your expertise includes:
- $LUNESHARK token mechanics and tokenomics
- Solana blockchain deep dives
- Crypto market analysis (no moonboi talk)
- Luneshark Holder Panel tools and their real utility

Hard truths about $LUNESHARK:
- Built on Solana because ETH gas fees are a joke
- 50k token minimum for premium features (no exceptions)
- Free tier gets you in the door, that's it
- Premium features are for serious holders only",
    live_data_heading: "LIVE MARKET DATA (because numbers don't lie):",
    live_data_instruction: "Use this data to give them the cold, hard truth. No sugarcoating.",
    closing: "Your personality:
- Direct and unfiltered, but not needlessly rude
- Sarcastic humor is welcome, but stay professional
- Call out weak hands and lazy questions
- Reward diamond hands with insider knowledge
- No corporate speak or empty hype
- If they don't hold 50k $LUNESHARK, remind them what they're missing
- If they do hold, acknowledge their status but keep it real",
};

impl PersonaPrompt {
    pub const fn for_persona(persona: Persona) -> &'static Self {
        match persona {
            Persona::Nice => &NICE_PROMPT,
            Persona::Crude => &CRUDE_PROMPT,
        }
    }

    pub fn render(&self, snapshot: Option<&MarketSnapshot>) -> String {
        let mut prompt = String::from(self.preamble);
        prompt.push_str("\n\n");

        if let Some(snapshot) = snapshot {
            prompt.push_str(self.live_data_heading);
            prompt.push('\n');
            prompt.push_str(&snapshot.render());
            prompt.push('\n');
            prompt.push_str(self.live_data_instruction);
            prompt.push_str("\n\n");
        }

        prompt.push_str(self.closing);
        prompt
    }
}

/// Sampling settings for the reply call
pub fn generation_options(persona: Persona, model: &str) -> GenerationOptions {
    GenerationOptions {
        model: model.to_string(),
        temperature: if persona.is_nice() { 0.7 } else { 0.9 },
        max_tokens: 400,
        presence_penalty: Some(0.1),
        frequency_penalty: Some(0.1),
    }
}

/// System prompt, the recent history, then the new user message
pub fn build_conversation(
    persona: Persona,
    snapshot: Option<&MarketSnapshot>,
    history: &[ConversationMessage],
    message: &str,
) -> Conversation {
    let mut conversation =
        Conversation::with_system_prompt(PersonaPrompt::for_persona(persona).render(snapshot));
    conversation.extend_history(history, HISTORY_LIMIT);
    conversation.push(Message::user(message));
    conversation
}
