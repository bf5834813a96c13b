
use strum_macros::{Display, EnumIter, EnumString};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    GenericFailure,
    CooldownActive,
    PermissionDenied,
    TargetNotFound,
    TargetNotInGuild,
    InvalidUsage,
    TicketsDisabled,
    DuplicateTicket,
    NotATicket,
    AlreadyClosing,
    TicketCreated,
    TicketClosing,
    TicketClaimed,
    TicketsConfigured,
    LanguageUpdated,
    LanguageCurrent,
}

impl Language {

    pub fn from_code(code: &str) -> Option<Language> {
        code.trim().to_lowercase().parse().ok()
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Es => "Español",
            Language::En => "English",
        }
    }

    pub fn text(self, key: Text) -> &'static str {
        match (self, key) {
            (Language::Es, Text::GenericFailure)   => "¡Hubo un error al ejecutar este comando!",
            (Language::En, Text::GenericFailure)   => "There was an error while executing this command!",
            (Language::Es, Text::CooldownActive)   => "Espera {seconds} segundo(s) antes de volver a usar `{command}`.",
            (Language::En, Text::CooldownActive)   => "Please wait {seconds} more second(s) before reusing `{command}`.",
            (Language::Es, Text::PermissionDenied) => "❌ No hay permisos suficientes para esta acción.",
            (Language::En, Text::PermissionDenied) => "❌ Missing permissions for this action.",
            (Language::Es, Text::TargetNotFound)   => "❌ No se encontró a ese usuario.",
            (Language::En, Text::TargetNotFound)   => "❌ That user could not be found.",
            (Language::Es, Text::TargetNotInGuild) => "❌ Ese usuario no está en el servidor.",
            (Language::En, Text::TargetNotInGuild) => "❌ This user isn't in the server.",
            (Language::Es, Text::InvalidUsage)     => "❌ Uso inválido: {detail}",
            (Language::En, Text::InvalidUsage)     => "❌ Invalid usage: {detail}",
            (Language::Es, Text::TicketsDisabled)  => "❌ El sistema de tickets no está configurado en este servidor.",
            (Language::En, Text::TicketsDisabled)  => "❌ The ticket system is not set up in this server.",
            (Language::Es, Text::DuplicateTicket)  => "Ya tienes un ticket abierto: {channel}",
            (Language::En, Text::DuplicateTicket)  => "You already have an open ticket: {channel}",
            (Language::Es, Text::NotATicket)       => "¡Este no es un canal de ticket!",
            (Language::En, Text::NotATicket)       => "This is not a ticket channel!",
            (Language::Es, Text::AlreadyClosing)   => "Este ticket ya se está cerrando.",
            (Language::En, Text::AlreadyClosing)   => "This ticket is already closing.",
            (Language::Es, Text::TicketCreated)    => "Tu ticket ha sido creado: {channel}",
            (Language::En, Text::TicketCreated)    => "Your ticket has been created: {channel}",
            (Language::Es, Text::TicketClosing)    => "El ticket se eliminará en {seconds} segundo(s).",
            (Language::En, Text::TicketClosing)    => "The ticket will be deleted in {seconds} second(s).",
            (Language::Es, Text::TicketClaimed)    => "Has tomado el ticket #{number}.",
            (Language::En, Text::TicketClaimed)    => "You claimed ticket #{number}.",
            (Language::Es, Text::TicketsConfigured) => "✅ Sistema de tickets configurado en {channel}.",
            (Language::En, Text::TicketsConfigured) => "✅ Ticket system set up in {channel}.",
            (Language::Es, Text::LanguageUpdated)  => "Idioma actualizado a {language}.",
            (Language::En, Text::LanguageUpdated)  => "Language updated to {language}.",
            (Language::Es, Text::LanguageCurrent)  => "Tu idioma actual es {language}. Usa `/language` para cambiarlo.",
            (Language::En, Text::LanguageCurrent)  => "Your current language is {language}. Use `/language` to change it.",
        }
    }

    pub fn render(self, key: Text, vars: &[(&str, &str)]) -> String {
        vars.iter().fold(self.text(key).to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("es"), Some(Language::Es));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn placeholders_are_filled() {
        let text = Language::En.render(Text::CooldownActive, &[("seconds", "2"), ("command", "warn")]);
        assert_eq!(text, "Please wait 2 more second(s) before reusing `warn`.");
    }
}
