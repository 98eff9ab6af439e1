mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;


use std::process;

use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use serde::Serialize;

use cli::{parse_args, print_completion, render_list, render_recipe, Config, ParseOutcome};
use domain::{OutputFormat, RecipeCommand, RecipePatch};
use ports::inbound::UseCaseRunner;
use usecase::RecipeApp;
use wiring::{wire_recipe, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let command_name = config.command.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let mut recipe_app = self.app.app()?;
        let result = dispatch(&mut recipe_app, config.command, config.format);
        if result.is_err() {
            if let Some(message) = &recipe_app.state().error {
                eprintln!("{}", message);
            }
        }

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn not_found(id: &domain::RecipeId) -> i32 {
    eprintln!("recipe: not found: {}", id);
    1
}

fn dispatch(app: &mut RecipeApp, command: RecipeCommand, format: OutputFormat) -> Result<i32, Error> {
    match command {
        RecipeCommand::Generate { request, save } => {
            let generated = app.generate(&request)?;
            let recipe = if save { app.save_generated()? } else { generated };
            match format {
                OutputFormat::Json => print_json(&recipe)?,
                OutputFormat::Text => print!("{}", render_recipe(&recipe)),
            }
            Ok(0)
        }
        RecipeCommand::List { query } => {
            app.show_saved();
            if let Some(reason) = &app.state().storage_warning {
                eprintln!("recipe: saved recipes could not be read ({}); treating as empty", reason);
            }
            let recipes = app.displayed(&query)?;
            match format {
                OutputFormat::Json => print_json(&recipes)?,
                OutputFormat::Text => print!("{}", render_list(&recipes)),
            }
            Ok(0)
        }
        RecipeCommand::Show { id } => {
            let Some(recipe) = app.select(&id)? else {
                return Ok(not_found(&id));
            };
            match format {
                OutputFormat::Json => print_json(recipe)?,
                OutputFormat::Text => print!("{}", render_recipe(recipe)),
            }
            Ok(0)
        }
        RecipeCommand::Note { id, text } => {
            if !app.update(&id, &RecipePatch::notes(text))? {
                return Ok(not_found(&id));
            }
            Ok(0)
        }
        RecipeCommand::Delete { id } => {
            let removed = app.delete(&id)?;
            if removed == 0 {
                return Ok(not_found(&id));
            }
            Ok(0)
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("recipe: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
        ParseOutcome::Help(text) => {
            print!("{}", text);
            return Ok(0);
        }
        ParseOutcome::Rejected(text) => {
            // clap のメッセージは使い方を含むので print_usage は重ねない
            eprint!("{}", text);
            return Ok(Error::invalid_argument(text).exit_code());
        }
    };
    let app = wire_recipe(config.verbose)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: recipe [-v] [--json] <generate|list|show|note|delete|completion> ...");
}
