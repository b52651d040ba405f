//! Interface strings for the supported locales
//!
//! Lookup falls back to the key itself when a translation is missing, so
//! an untranslated key shows up verbatim instead of crashing.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ru,
    En,
    Fr,
    Es,
}

impl Locale {
    /// Parse a locale tag, defaulting to Russian for unknown tags
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "en" => Locale::En,
            "fr" => Locale::Fr,
            "es" => Locale::Es,
            _ => Locale::Ru,
        }
    }
}

/// Look up a UI string; the key itself is the fallback
pub fn t(locale: Locale, key: &str) -> String {
    lookup(locale, key).unwrap_or(key).to_string()
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    use Locale::*;
    Some(match (locale, key) {
        (Ru, "chat.greeting") => "Привет! Я Taylor, AI ассистент Aetherium. Чем могу помочь?",
        (Ru, "chat.prompt") => "> ",
        (Ru, "error.rate_limited") => "Превышен лимит запросов. Пожалуйста, попробуйте позже.",
        (Ru, "error.quota") => "Требуется пополнение баланса.",
        (Ru, "error.generic") => "Не удалось отправить сообщение",

        (En, "chat.greeting") => "Hi! I'm Taylor, the Aetherium AI assistant. How can I help?",
        (En, "chat.prompt") => "> ",
        (En, "error.rate_limited") => "Too many requests. Please try again later.",
        (En, "error.quota") => "Your balance needs topping up.",
        (En, "error.generic") => "Could not send the message",

        (Fr, "chat.greeting") => "Bonjour ! Je suis Taylor, l'assistant IA d'Aetherium. Comment puis-je aider ?",
        (Fr, "chat.prompt") => "> ",
        (Fr, "error.rate_limited") => "Trop de requêtes. Veuillez réessayer plus tard.",
        (Fr, "error.quota") => "Votre solde doit être rechargé.",
        (Fr, "error.generic") => "Impossible d'envoyer le message",

        (Es, "chat.greeting") => "¡Hola! Soy Taylor, el asistente IA de Aetherium. ¿En qué puedo ayudar?",
        (Es, "chat.prompt") => "> ",
        (Es, "error.rate_limited") => "Demasiadas solicitudes. Inténtalo de nuevo más tarde.",
        (Es, "error.quota") => "Es necesario recargar tu saldo.",
        (Es, "error.generic") => "No se pudo enviar el mensaje",

        _ => return None,
    })
}
