
use serenity::all::CommandOptionType;
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::permissions::Permissions;
use strum_macros::{Display, EnumIter, EnumString};
use nonempty::NonEmpty;

use std::time::Duration;


pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CommandType {
    Moderation,
    Tickets,
    Welcome,
    Utility,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    User,
    Text,
    Integer { min: u32, max: u32 },
    Channel,
    Role,
    Boolean,
    Choice(Vec<(&'static str, &'static str)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterType {
    Required,
    Optional,
}

#[derive(Debug, Clone)]
struct Parameter {
    name: String,
    description: String,
    kind: ParameterKind,
    param_type: ParameterType,
}

/// Describes a command once; the same description feeds the help text,
/// the slash-command registration and the dispatcher (cooldown, permission).
pub struct UsageBuilder {
    pub command_type: CommandType,
    pub triggers: NonEmpty<String>,
    description: String,
    parameters: Vec<Parameter>,
    examples: Vec<String>,
    cooldown: Duration,
    permission: Option<Permissions>,
    component_only: bool,
}

impl UsageBuilder {

    pub fn new(command_type: CommandType, triggers: NonEmpty<String>) -> UsageBuilder {
        UsageBuilder {
            command_type,
            triggers,
            description: String::new(),
            parameters: Vec::new(),
            examples: Vec::new(),
            cooldown: DEFAULT_COOLDOWN,
            permission: None,
            component_only: false,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn add_parameter(mut self, name: &str, kind: ParameterKind, description: &str, param_type: ParameterType) -> Self {
        self.parameters.push(Parameter {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            param_type,
        });
        self
    }

    pub fn add_required(self, name: &str, kind: ParameterKind, description: &str) -> Self {
        self.add_parameter(name, kind, description, ParameterType::Required)
    }

    pub fn add_optional(self, name: &str, kind: ParameterKind, description: &str) -> Self {
        self.add_parameter(name, kind, description, ParameterType::Optional)
    }

    pub fn example(mut self, example: &str) -> Self {
        self.examples.push(example.to_string());
        self
    }

    pub fn cooldown(mut self, seconds: u64) -> Self {
        self.cooldown = Duration::from_secs(seconds);
        self
    }

    pub fn permission(mut self, permission: Permissions) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Only reachable through a button, never registered as a slash command.
    pub fn component_only(mut self) -> Self {
        self.component_only = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.triggers.head
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn get_permission(&self) -> Option<Permissions> {
        self.permission
    }

    pub fn is_component_only(&self) -> bool {
        self.component_only
    }

    pub fn build(&self, prefix: &str) -> String {

        let mut usage_string = format!("{}{}", prefix, self.triggers.head);
        for parameter in self.parameters.iter() {
            match parameter.param_type {
                ParameterType::Required => usage_string.push_str(&format!(" <{}>", parameter.name)),
                ParameterType::Optional => usage_string.push_str(&format!(" [{}]", parameter.name)),
            }
        }

        for example in self.examples.iter() {
            usage_string.push_str(&format!("\nExample: {}{} {}", prefix, self.triggers.head, example));
        }

        // add alternative command names
        if !self.triggers.tail.is_empty() {
            usage_string.push_str(&format!("\nAlternative names: {:?}", self.triggers.tail));
        }

        usage_string
    }

    pub fn register(&self) -> Option<CreateCommand> {

        if self.component_only {
            return None;
        }

        let mut command = CreateCommand::new(self.triggers.head.as_str())
            .description(&self.description);
        if let Some(permission) = self.permission {
            command = command.default_member_permissions(permission);
        }

        for parameter in self.parameters.iter() {
            let option_type = match parameter.kind {
                ParameterKind::User        => CommandOptionType::User,
                ParameterKind::Text        => CommandOptionType::String,
                ParameterKind::Integer{..} => CommandOptionType::Integer,
                ParameterKind::Channel     => CommandOptionType::Channel,
                ParameterKind::Role        => CommandOptionType::Role,
                ParameterKind::Boolean     => CommandOptionType::Boolean,
                ParameterKind::Choice(_)   => CommandOptionType::String,
            };
            let mut option = CreateCommandOption::new(option_type, &parameter.name, &parameter.description)
                .required(parameter.param_type == ParameterType::Required);
            match &parameter.kind {
                ParameterKind::Integer { min, max } => {
                    option = option.min_int_value(u64::from(*min)).max_int_value(u64::from(*max));
                },
                ParameterKind::Choice(choices) => {
                    for (name, value) in choices.iter() {
                        option = option.add_string_choice(*name, *value);
                    }
                },
                _ => {},
            }
            command = command.add_option(option);
        }

        Some(command)
    }

}
