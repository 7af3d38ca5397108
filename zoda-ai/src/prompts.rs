//! Prompt templates for the fortune and character-image calls.

/// System role for the chat-completion call.
pub const FORTUNE_SYSTEM_PROMPT: &str = "You are a mystical fortune teller specializing in \
    crypto fortunes based on Chinese zodiac signs. Your responses are always positive and \
    encouraging.";

/// Token cap requested from the chat API.
pub const FORTUNE_MAX_TOKENS: u32 = 150;

/// User prompt for a fortune. The sign and birth year steer the content;
/// the username travels with the request for validation and metadata but
/// is deliberately kept out of the prompt.
pub fn fortune_prompt(sign_name: &str, birth_year: i32) -> String {
    format!(
        "Generate a positive, optimistic crypto fortune for a person born in the Year of the {sign} ({year}).\n\
        The fortune should be maximum 2 sentences long but needs to be less than 200 words in total, and include:\n\
        1. A reference to their zodiac sign's traits ({sign})\n\
        2. A positive prediction about their crypto projects' development, innovations, or community building\n\
        3. Mention their potential for creating impactful blockchain solutions or contributing to web3\n\
        4. A bit of mystical/celestial language\n\
        5. Keep it upbeat and encouraging, focusing on growth and development (not market conditions)\n\
        \n\
        Format it as a direct message to the user without any additional text. Avoid any mentions of prices, bear markets, or market conditions.",
        sign = sign_name,
        year = birth_year,
    )
}

/// Prompt for the character image.
pub fn image_prompt(sign_name: &str) -> String {
    format!(
        "This digital artwork blends anime and cosmic art to depict a mystical character embodying \
        the {sign} from the Chinese zodiac, intertwined with cryptocurrency themes. The character \
        boasts flowing blue and turquoise hair, large {sign} characteristics adorned with starry \
        constellations, and a glowing blockchain symbol floating beside the character, while the \
        character holds a radiant crypto symbol that illuminates the character's robe, all set \
        against an enchanting starry backdrop.",
        sign = sign_name,
    )
}
