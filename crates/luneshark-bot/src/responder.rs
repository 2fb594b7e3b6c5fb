//! Static Responder
//!
//! Canned LunesharkBot replies used when no model is configured or when the
//! model call fails. A message is sorted into the first matching topic, the
//! persona picks the tone, and a few extra keywords add bonus lines to the
//! pool before one line is drawn at random.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::Persona;

/// Keyword category of a message, in match priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Token,
    Chain,
    Price,
    Tools,
    General,
}

/// Extra lines unlocked when the text contains every word in `all_of` and,
/// if `any_of` is non-empty, at least one word from it
struct Bonus {
    all_of: &'static [&'static str],
    any_of: &'static [&'static str],
    lines: &'static [&'static str],
}

impl Bonus {
    fn applies(&self, text: &str) -> bool {
        self.all_of.iter().all(|w| text.contains(w))
            && (self.any_of.is_empty() || self.any_of.iter().any(|w| text.contains(w)))
    }
}

struct TopicReplies {
    topic: Topic,
    triggers: &'static [&'static str],
    nice: &'static [&'static str],
    crude: &'static [&'static str],
    bonuses: &'static [Bonus],
}

impl TopicReplies {
    const fn lines(&self, persona: Persona) -> &'static [&'static str] {
        match persona {
            Persona::Nice => self.nice,
            Persona::Crude => self.crude,
        }
    }
}

static TOPICS: &[TopicReplies] = &[
    TopicReplies {
        topic: Topic::Token,
        triggers: &["luneshark", "$luneshark", "token"],
        nice: &[
            "$LUNESHARK is an amazing token on the Solana blockchain! 🚀 It powers our exclusive holder panel with tools for games, movies, and more. The current requirement for premium features is 50,000 $LUNESHARK tokens.",
            "Great question about $LUNESHARK! 😊 It's the utility token that unlocks all the cool features in our holder panel. From torrent searches to analytics tools, $LUNESHARK holders get exclusive access!",
        ],
        crude: &[
            "$LUNESHARK - the only token that matters here. 50k gets you in the club. Anything less and you're just window shopping.",
            "Ah, $LUNESHARK. The golden ticket. 50k tokens = all-access pass. No tokens? Enjoy the free tour, I guess.",
            "Let me break it down: No 50k $LUNESHARK = No premium features. It's not rocket science.",
            "$LUNESHARK: Because in a world of shitcoins, we actually offer utility. 50k tokens to prove you're serious.",
        ],
        bonuses: &[Bonus {
            all_of: &["my"],
            any_of: &["balance", "holdings"],
            lines: &[
                "Check your wallet, genius. Or better yet, check the dashboard. I'm not your accountant.",
                "Your balance? Probably not enough. The magic number is 50k. How close are you?",
                "If you have to ask, you probably don't have enough. But sure, check your wallet.",
            ],
        }],
    },
    TopicReplies {
        topic: Topic::Chain,
        triggers: &["solana", "sol"],
        nice: &[
            "Solana is a fast and scalable blockchain! ⚡ It's a great network for projects like $LUNESHARK! 😊 With low fees and high throughput, it's perfect for our ecosystem.",
            "Solana is known for its speed and low transaction fees, while Ethereum has a larger ecosystem and is more decentralized. Both are great, but Solana is perfect for fast-paced projects like $LUNESHARK! 🚀",
        ],
        crude: &[
            "Solana: 50k TPS, sub-second finality, and gas fees that won't make you cry. Unlike some chains we know *cough* ETH *cough*.",
            "We chose Solana because we like our transactions fast and our fees low. If you enjoy waiting and paying through the nose, maybe check out Ethereum.",
            "Solana's secret sauce? Proof of History. It's like a blockchain on Adderall. And we love it.",
            "Solana vs the world: Faster than ETH, cheaper than MATIC, and doesn't go down for days like SOL used to. Progress, people.",
        ],
        bonuses: &[Bonus {
            all_of: &["how", "work"],
            any_of: &[],
            lines: &[
                "How does Solana work? Magic. Just kidding. It's a combo of Proof of History and Proof of Stake. But you probably don't care about the tech, just that it's fast and cheap, right?",
                "Solana's tech stack in 5 words: Fast, cheap, and actually works. Need the 50-page whitepaper or is that enough?",
            ],
        }],
    },
    TopicReplies {
        topic: Topic::Price,
        triggers: &["price", "cost", "value"],
        nice: &[
            "I can't give you real-time prices with the current tools, but the Crypto Market Tracker is coming soon! 😊 I'll let you know as soon as it's live.",
            "Price tracking is on our roadmap! 📈 The upcoming Crypto Market Dashboard will show live prices for SOL, BTC, ETH, and of course $LUNESHARK!",
        ],
        crude: &[
            "Price? The market tracker isn't live yet. Check DexScreener or Raydium like everyone else. We'll ping you when we've got something better.",
            "Value is what someone's willing to pay. Right now, I can't tell you what that is. Check a damn chart.",
            "If you're asking about price, you're either day trading (bad idea) or checking if you can afford the 50k tokens (good start). Which is it?",
            "Price? Depends. Are you buying or selling? Actually, doesn't matter - just HODL either way.",
        ],
        bonuses: &[Bonus {
            all_of: &[],
            any_of: &["luneshark", "token"],
            lines: &[
                "$LUNESHARK price? Check the charts. But remember, we care about utility here, not just price action.",
                "If you're worried about price, you don't have enough tokens. The real ones know 50k is just the beginning.",
            ],
        }],
    },
    TopicReplies {
        topic: Topic::Tools,
        triggers: &["tools", "features", "what can you do"],
        nice: &[
            "Our holder panel has some awesome tools! 🎮 You can search for game and movie torrents, check out our roadmap, and chat with me! Premium features like Analytics and Image Generation require 50,000 $LUNESHARK tokens.",
            "We've got torrent search for games and movies, a detailed project roadmap, and this chat feature! 😊 More tools are coming soon, including crypto market tracking and Solana network stats!",
        ],
        crude: &[
            "Free tier: Basic chat, basic searches. Premium (50k $LUNESHARK): The good stuff - analytics, image gen, all the goodies. Your move.",
            "What's behind door #1? Basic features for the tokenless masses. Door #2 (50k $LUNESHARK and up)? The VIP lounge. Choose wisely.",
            "Features scale with your bag size. No tokens = kiddie pool. 50k+ = deep end. Simple as that.",
            "We've got tools for days. The question is, how many $LUNESHARK do you have? That determines what you get to play with.",
        ],
        bonuses: &[Bonus {
            all_of: &[],
            any_of: &["premium", "vip"],
            lines: &[
                "Premium means 50k $LUNESHARK minimum. No discounts, no exceptions. Either you're in the club or you're not.",
                "VIP isn't bought with fiat here. 50k tokens = all access. Anything less = enjoy the free show.",
            ],
        }],
    },
];

static GENERAL: TopicReplies = TopicReplies {
    topic: Topic::General,
    triggers: &[],
    nice: &[
        "I'm here to help with anything related to $LUNESHARK, Solana, or our tools! 😊 What would you like to know?",
        "Feel free to ask me about $LUNESHARK tokens, Solana blockchain, or any of the features in our holder panel! 🚀",
        "I'm your friendly LunesharkBot assistant! Ask me about crypto, our tools, or anything else you're curious about! ✨",
    ],
    crude: &[
        "$LUNESHARK, Solana, or tools. Pick a topic. I don't do horoscopes or weather reports.",
        "Time is money. Ask something useful about crypto or move along.",
        "I'm here to talk $LUNESHARK, Solana, or making you money. Choose wisely.",
        "Let's cut to the chase. What do you really want to know about $LUNESHARK?",
        "I've got two modes: helpful and sarcastic. Your question determines which one you get.",
        "Pro tip: Ask about $LUNESHARK tokenomics or Solana tech if you want my good side.",
        "I was built for crypto talk, not your existential crisis. What's your question?",
    ],
    bonuses: &[
        Bonus {
            all_of: &["wen", "moon"],
            any_of: &[],
            lines: &["Wen moon? When you stop asking wen moon and start stacking $LUNESHARK."],
        },
        Bonus {
            all_of: &["lambo"],
            any_of: &[],
            lines: &["Lambo? Focus on hitting 50k $LUNESHARK first. Then we'll talk cars."],
        },
        Bonus {
            all_of: &[],
            any_of: &["fud", "scam"],
            lines: &["FUD detected. Come back when you've done your research."],
        },
    ],
};

fn replies_for(text: &str) -> &'static TopicReplies {
    TOPICS
        .iter()
        .find(|t| t.triggers.iter().any(|w| text.contains(w)))
        .unwrap_or(&GENERAL)
}

/// Topic a message falls under (case-insensitive substring match)
pub fn topic(message: &str) -> Topic {
    replies_for(&message.to_lowercase()).topic
}

/// Base lines for a topic and persona, before any bonus lines
pub fn base_pool(topic: Topic, persona: Persona) -> &'static [&'static str] {
    TOPICS
        .iter()
        .find(|t| t.topic == topic)
        .unwrap_or(&GENERAL)
        .lines(persona)
}

/// Every line the responder could pick for this message
pub fn candidates(message: &str, persona: Persona) -> Vec<&'static str> {
    let text = message.to_lowercase();
    let replies = replies_for(&text);

    let mut pool = replies.lines(persona).to_vec();
    for bonus in replies.bonuses.iter().filter(|b| b.applies(&text)) {
        pool.extend_from_slice(bonus.lines);
    }
    pool
}

/// Pick a reply using the given random source
pub fn reply_with<R: Rng + ?Sized>(message: &str, persona: Persona, rng: &mut R) -> String {
    candidates(message, persona)
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_string()
}

/// Pick a reply using the thread-local random source
pub fn reply(message: &str, persona: Persona) -> String {
    reply_with(message, persona, &mut rand::thread_rng())
}
