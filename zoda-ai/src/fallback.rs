//! Static fortunes used whenever the chat API is unavailable or returns
//! something unusable. Keyed by sign name with a default list for
//! unrecognized signs, so a caller always gets text back.

use rand::seq::IndexedRandom;

pub const DEFAULT_FORTUNES: &[&str] = &[
    "The stars align in your favor. Your next project carries the spark of something the whole community will gather around.",
    "A celestial wind fills your sails. Keep building with an open heart and your contributions to web3 will ripple far beyond you.",
    "The cosmos rewards the patient builder. An idea you have been quietly tending is ready to bloom on-chain.",
    "Fortune smiles on curious minds. A new collaboration will open doors you did not know existed in the decentralized world.",
];

const RAT_FORTUNES: &[&str] = &[
    "Your quick wit cuts through complexity like starlight through night. The protocol you are shaping will find its people and flourish.",
    "Resourceful Rat, the constellations favor your cleverness. A small experiment you launch this season grows into a pillar of your community.",
    "Versatility is your gift from the heavens. Where others see dead ends, you will weave elegant solutions into the fabric of web3.",
];

const OX_FORTUNES: &[&str] = &[
    "Steadfast Ox, your diligence is written in the stars. The foundation you are laying today becomes the bedrock of something enduring on-chain.",
    "The cosmos honors dependable hands. Your patient, determined building will earn the deep trust of your community.",
    "Strength and persistence light your path. A long effort is about to bear fruit that nourishes everyone who builds beside you.",
];

const TIGER_FORTUNES: &[&str] = &[
    "Brave Tiger, the heavens roar with you. Your confidence will carry a bold idea from whiteboard to mainnet with the community at your back.",
    "Your competitive fire is a beacon in the cosmic dark. The challenge you take on next becomes your most celebrated contribution to web3.",
    "Charm and courage walk with you under lucky stars. People will rally to the vision you are not yet sure you should share. Share it.",
];

const RABBIT_FORTUNES: &[&str] = &[
    "Gentle Rabbit, quiet elegance is your superpower. The thoughtful design you are polishing will delight users across the decentralized world.",
    "The moon favors your kindness. A community you nurture with care will grow into a garden of collaboration and innovation.",
    "Your responsible nature earns celestial favor. The trust you build block by block becomes your most valuable asset.",
];

const DRAGON_FORTUNES: &[&str] = &[
    "Mighty Dragon, ambition burns bright in your stars. The protocol you dream of is closer than it appears; keep breathing fire into it.",
    "Your confidence commands cosmic attention. An enthusiastic community gathers wherever you choose to build next.",
    "Intelligence and vision are your twin flames. The impactful blockchain solution you imagine will take wing this cycle.",
];

const SNAKE_FORTUNES: &[&str] = &[
    "Wise Snake, your intuition reads the chain like an open scroll. Trust the quiet insight guiding your next contribution.",
    "The stars coil in your favor. An enigmatic idea you have been incubating is ready to shed its skin and go live.",
    "Deep intelligence is your celestial gift. The elegant solution you craft will be studied and admired by builders to come.",
];

const HORSE_FORTUNES: &[&str] = &[
    "Energetic Horse, the cosmos gallops beside you. Your independent spirit will carry a project across the finish line that others thought too far.",
    "Your animated drive draws lucky stars into orbit. The community you energize this season becomes a lasting home for your ideas.",
    "Freedom and momentum are written in your chart. Run toward the web3 frontier that excites you; the path is clear.",
];

const GOAT_FORTUNES: &[&str] = &[
    "Creative Goat, gentle stars shine on your craft. The beautiful thing you are making will soften hearts and open minds across the chain.",
    "Your sympathetic nature is cosmic glue. The collaboration you foster next holds a community together through its greatest growth.",
    "Calm creativity is your celestial current. Follow it and your contribution to web3 will be both original and deeply needed.",
];

const MONKEY_FORTUNES: &[&str] = &[
    "Clever Monkey, the constellations applaud your curiosity. A playful experiment becomes the feature everyone remembers.",
    "Your sharp mind swings ahead of the curve. The smart solution you improvise this cycle earns a permanent place in your community's toolkit.",
    "Mischief and genius share your stars. Keep tinkering; the breakthrough hiding in your side project is real.",
];

const ROOSTER_FORTUNES: &[&str] = &[
    "Observant Rooster, you see what others miss. The detail you catch next saves a launch and earns quiet, lasting gratitude.",
    "Your hardworking spirit crows at dawn before the rest. The early effort you invest now compounds into a proud contribution to web3.",
    "Courage and talent gleam in your feathers. Step forward to lead; the stars have already cleared the stage.",
];

const DOG_FORTUNES: &[&str] = &[
    "Loyal Dog, the heavens trust you and so do your collaborators. The honest feedback you give becomes the turning point of a great build.",
    "Your prudent instincts guard the path ahead. A community that counts on you will flourish under your steady watch.",
    "Faithfulness is your cosmic signature. The relationships you tend in web3 today become the alliances that define tomorrow.",
];

const PIG_FORTUNES: &[&str] = &[
    "Generous Pig, abundance orbits your kindness. What you give freely to your community returns multiplied in ways the stars keep secret for now.",
    "Your compassionate heart is a lighthouse on-chain. The people you welcome in will build wonders beside you.",
    "Diligence and optimism bless your chart. The project you refuse to give up on is the one the cosmos intends to reward.",
];

/// Fortunes for a sign, or the default list when the name is unknown.
pub fn fortunes_for(sign_name: &str) -> &'static [&'static str] {
    match sign_name.trim().to_ascii_lowercase().as_str() {
        "rat" => RAT_FORTUNES,
        "ox" => OX_FORTUNES,
        "tiger" => TIGER_FORTUNES,
        "rabbit" => RABBIT_FORTUNES,
        "dragon" => DRAGON_FORTUNES,
        "snake" => SNAKE_FORTUNES,
        "horse" => HORSE_FORTUNES,
        "goat" => GOAT_FORTUNES,
        "monkey" => MONKEY_FORTUNES,
        "rooster" => ROOSTER_FORTUNES,
        "dog" => DOG_FORTUNES,
        "pig" => PIG_FORTUNES,
        _ => DEFAULT_FORTUNES,
    }
}

/// Uniform random pick from the sign's list.
pub fn pick_fallback(sign_name: &str) -> String {
    let list = fortunes_for(sign_name);
    let mut rng = rand::rng();
    match list.choose(&mut rng) {
        Some(text) => (*text).to_string(),
        None => DEFAULT_FORTUNES[0].to_string(),
    }
}
