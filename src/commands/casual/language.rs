
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;


fn language_choices() -> ParameterKind {
    ParameterKind::Choice(vec![("Español", "es"), ("English", "en")])
}

pub struct LanguageCommand;

impl Command for LanguageCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Utility,
            nonempty!["language".to_string()]
        )
            .description("Change the bot language / Cambiar el idioma del bot")
            .add_required("lang", language_choices(), "Select language / Seleccionar idioma")
            .example("en")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let raw = params.args.require_text("lang")?;
                let language = Language::from_code(raw)
                    .ok_or_else(|| CommandError::InvalidUsage(format!("unsupported language '{}'", raw)))?;

                let user = params.author.to_string();
                params.state.store.mutate(|data| {
                    data.user_languages.insert(user, language.to_string());
                }).await?;

                let title = match language {
                    Language::Es => "Idioma actualizado",
                    Language::En => "Language updated",
                };
                Ok(LogBuilder::new(title)
                    .description(&language.render(Text::LanguageUpdated, &[("language", language.name())]))
                    .color(0x5865f2)
                    .to_message()
                    .ephemeral())
            }
        )
    }

}

pub struct MyLanguageCommand;

impl Command for MyLanguageCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Utility,
            nonempty!["mylanguage".to_string()]
        )
            .description("Check your current language / Ver tu idioma actual")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {
                let language = params.state.language_of(params.author).await;
                let (title, label) = match language {
                    Language::Es => ("Tu idioma", "Idioma"),
                    Language::En => ("Your language", "Language"),
                };
                Ok(LogBuilder::new(title)
                    .description(&language.render(Text::LanguageCurrent, &[("language", language.name())]))
                    .color(0x5865f2)
                    .inline(label, language.name())
                    .inline("Code", &language.to_string())
                    .to_message()
                    .ephemeral())
            }
        )
    }

}
