use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, addon::addon, generate::generate, import::import, init::init,
        schema::schema, xliff::xliff,
    },
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Import(cmd)) => import(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Xliff(cmd)) => xliff(cmd),
        Some(Command::Addon(cmd)) => addon(cmd),
        Some(Command::Schema(cmd)) => schema(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
