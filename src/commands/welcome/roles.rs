
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::welcome::update_config;
use crate::utility::*;


pub struct WelcomeRolesCommand;

impl Command for WelcomeRolesCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Welcome,
            nonempty!["welcome-roles".to_string()]
        )
            .description("Establecer roles para asignar a nuevos miembros")
            .add_required("role1", ParameterKind::Role, "Primer rol para asignar")
            .add_optional("role2", ParameterKind::Role, "Segundo rol para asignar")
            .add_optional("role3", ParameterKind::Role, "Tercer rol para asignar")
            .permission(Permissions::MANAGE_GUILD)
            .example("@Miembro @Novato")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let roles: Vec<_> = ["role1", "role2", "role3"].iter()
                    .filter_map(|name| params.args.role(name))
                    .collect();
                let stored = roles.iter().map(|role| role.to_string()).collect();
                update_config(&params, |config| config.roles = stored).await?;

                let mentions = match roles.is_empty() {
                    true  => "No se asignarán roles".to_string(),
                    false => roles.iter().map(|role| mention_role(*role)).collect::<Vec<_>>().join(", "),
                };
                Ok(LogBuilder::new("Roles de Bienvenida Actualizados")
                    .description("¡Los roles de bienvenida han sido actualizados correctamente!")
                    .color(0x00ff00)
                    .arbitrary("Roles asignados", &mentions)
                    .timestamp()
                    .to_message())
            }
        )
    }

}
