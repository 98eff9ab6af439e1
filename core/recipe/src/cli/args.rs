use crate::domain::{
    DifficultyFilter, OutputFormat, RecipeCommand, RecipeGenerationRequest, RecipeId, RecipeQuery,
};
use clap::builder::ArgAction;
use clap::error::ErrorKind;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;

/// 解析済みの実行設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// -v / --verbose: ログを stderr にも出す
    pub verbose: bool,
    /// --json: 結果を JSON で出力する
    pub format: OutputFormat,
    pub command: RecipeCommand,
}

/// 解析結果: 通常の Config / 補完スクリプト生成 / ヘルプ表示 / clap による拒否
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
    /// clap が整形したヘルプ・バージョン表示（main が出力して 0 で終わる）
    Help(String),
    /// clap が弾いた引数。メッセージは使い方を含めて整形済み
    Rejected(String),
}

fn id_arg() -> clap::Arg {
    clap::Arg::new("id")
        .index(1)
        .required(true)
        .value_name("id")
        .help("Recipe id (see `recipe list`)")
}

/// clap の Command 定義（補完スクリプト生成にも使う）
pub fn build_clap_command() -> clap::Command {
    clap::Command::new("recipe")
        .about("Generate recipes from ingredients and keep them locally")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also write log records to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            clap::Command::new("generate")
                .about("Ask the generation service for a recipe")
                .arg(
                    clap::Arg::new("ingredients")
                        .short('i')
                        .long("ingredients")
                        .value_name("text")
                        .help("Ingredients to use, e.g. \"鶏肉, 玉ねぎ, 卵\"")
                        .required(true)
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("cuisine")
                        .short('c')
                        .long("cuisine")
                        .value_name("cuisine")
                        .help("Cuisine, e.g. 和食")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("difficulty")
                        .short('d')
                        .long("difficulty")
                        .value_name("text")
                        .help("Desired difficulty (free text)")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("time")
                        .short('t')
                        .long("time")
                        .value_name("minutes")
                        .help("Upper bound of cooking time in minutes")
                        .value_parser(value_parser!(u32))
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("save")
                        .short('s')
                        .long("save")
                        .help("Save the generated recipe")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("list")
                .about("List saved recipes")
                .arg(
                    clap::Arg::new("search")
                        .short('q')
                        .long("search")
                        .value_name("keyword")
                        .help("Match name, cuisine or ingredient names (case-insensitive)")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("difficulty")
                        .short('d')
                        .long("difficulty")
                        .value_name("level")
                        .help("all, beginner, intermediate or advanced")
                        .value_parser(["all", "beginner", "intermediate", "advanced"])
                        .default_value("all"),
                )
                .arg(
                    clap::Arg::new("max-time")
                        .short('t')
                        .long("max-time")
                        .value_name("minutes")
                        .help("Only recipes that take at most this many minutes")
                        .value_parser(value_parser!(u32))
                        .default_value("180"),
                ),
        )
        .subcommand(
            clap::Command::new("show")
                .about("Show one saved recipe")
                .arg(id_arg()),
        )
        .subcommand(
            clap::Command::new("note")
                .about("Set the note of a saved recipe")
                .arg(id_arg())
                .arg(
                    clap::Arg::new("text")
                        .index(2)
                        .required(true)
                        .value_name("text")
                        .help("Note text (replaces the previous note)"),
                ),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a saved recipe")
                .arg(id_arg()),
        )
        .subcommand(
            clap::Command::new("completion")
                .about("Generate shell completion script")
                .arg(
                    clap::Arg::new("shell")
                        .index(1)
                        .required(true)
                        .value_parser(value_parser!(Shell)),
                ),
        )
}

fn string_of(matches: &clap::ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn required_string(matches: &clap::ArgMatches, name: &str) -> Result<String, Error> {
    string_of(matches, name).ok_or_else(|| Error::invalid_argument(format!("<{}> is required", name)))
}

fn matches_to_command(name: &str, sub: &clap::ArgMatches) -> Result<RecipeCommand, Error> {
    match name {
        "generate" => {
            let ingredients = required_string(sub, "ingredients")?;
            let request = RecipeGenerationRequest::new(
                &ingredients,
                sub.get_one::<String>("cuisine").map(String::as_str),
                sub.get_one::<String>("difficulty").map(String::as_str),
                sub.get_one::<u32>("time").copied(),
            )?;
            Ok(RecipeCommand::Generate {
                request,
                save: sub.get_flag("save"),
            })
        }
        "list" => {
            let difficulty = sub
                .get_one::<String>("difficulty")
                .map(|s| s.parse::<DifficultyFilter>())
                .transpose()
                .map_err(Error::invalid_argument)?
                .unwrap_or_default();
            let mut query = RecipeQuery {
                keyword: string_of(sub, "search"),
                difficulty,
                ..RecipeQuery::default()
            };
            if let Some(&max) = sub.get_one::<u32>("max-time") {
                query.max_cooking_time = max;
            }
            Ok(RecipeCommand::List { query })
        }
        "show" => Ok(RecipeCommand::Show {
            id: RecipeId::new(required_string(sub, "id")?),
        }),
        "note" => Ok(RecipeCommand::Note {
            id: RecipeId::new(required_string(sub, "id")?),
            text: required_string(sub, "text")?,
        }),
        "delete" => Ok(RecipeCommand::Delete {
            id: RecipeId::new(required_string(sub, "id")?),
        }),
        other => Err(Error::invalid_argument(format!("unknown command: {}", other))),
    }
}

fn matches_to_outcome(matches: &clap::ArgMatches) -> Result<ParseOutcome, Error> {
    let Some((name, sub)) = matches.subcommand() else {
        return Err(Error::invalid_argument("no command given"));
    };
    if name == "completion" {
        let shell = sub
            .get_one::<Shell>("shell")
            .copied()
            .ok_or_else(|| Error::invalid_argument("<shell> is required"))?;
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    let format = if matches.get_flag("json") {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    Ok(ParseOutcome::Config(Config {
        verbose: matches.get_flag("verbose"),
        format,
        command: matches_to_command(name, sub)?,
    }))
}

fn parse_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match build_clap_command().try_get_matches_from(args) {
        Ok(matches) => matches_to_outcome(&matches),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Ok(ParseOutcome::Help(e.render().to_string()))
        }
        Err(e) => Ok(ParseOutcome::Rejected(e.render().to_string())),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_from(std::env::args_os())
}

/// 補完スクリプトを stdout に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "recipe", &mut std::io::stdout());
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    parse_from(args.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    fn config(args: &[&str]) -> Config {
        match parse_args_from(args).unwrap() {
            ParseOutcome::Config(c) => c,
            other => panic!("expected Config, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_minimal() {
        let c = config(&["recipe", "generate", "-i", "鶏肉, 卵"]);
        assert!(!c.verbose);
        assert_eq!(c.format, OutputFormat::Text);
        match c.command {
            RecipeCommand::Generate { request, save } => {
                assert_eq!(request.ingredients, "鶏肉, 卵");
                assert_eq!(request.cuisine, None);
                assert_eq!(request.difficulty, None);
                assert_eq!(request.cooking_time, None);
                assert!(!save);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_generate_full() {
        let c = config(&[
            "recipe", "-v", "generate", "--ingredients", "豆腐", "-c", "中華", "-d", "かんたん",
            "-t", "20", "--save", "--json",
        ]);
        assert!(c.verbose);
        assert_eq!(c.format, OutputFormat::Json);
        match c.command {
            RecipeCommand::Generate { request, save } => {
                assert_eq!(request.cuisine.as_deref(), Some("中華"));
                assert_eq!(request.difficulty.as_deref(), Some("かんたん"));
                assert_eq!(request.cooking_time, Some(20));
                assert!(save);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_generate_blank_ingredients_is_usage_error() {
        let err = parse_args_from(&["recipe", "generate", "-i", "  "]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    fn rejected(args: &[&str]) -> String {
        match parse_args_from(args).unwrap() {
            ParseOutcome::Rejected(text) => text,
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_missing_ingredients() {
        let text = rejected(&["recipe", "generate"]);
        assert!(text.contains("--ingredients"), "{}", text);
        // clap の整形済みメッセージに使い方が 1 回だけ入る
        assert_eq!(text.matches("Usage:").count(), 1, "{}", text);
    }

    #[test]
    fn test_list_defaults() {
        let c = config(&["recipe", "list"]);
        assert_eq!(
            c.command,
            RecipeCommand::List {
                query: RecipeQuery::default()
            }
        );
    }

    #[test]
    fn test_list_with_filters() {
        let c = config(&["recipe", "list", "-q", "tomato", "-d", "beginner", "-t", "30"]);
        match c.command {
            RecipeCommand::List { query } => {
                assert_eq!(query.keyword.as_deref(), Some("tomato"));
                assert_eq!(query.difficulty, DifficultyFilter::Only(Difficulty::Beginner));
                assert_eq!(query.max_cooking_time, 30);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_list_rejects_unknown_difficulty() {
        let text = rejected(&["recipe", "list", "-d", "expert"]);
        assert!(text.contains("expert"), "{}", text);
    }

    #[test]
    fn test_show_note_delete() {
        assert_eq!(
            config(&["recipe", "show", "r1"]).command,
            RecipeCommand::Show { id: RecipeId::new("r1") }
        );
        assert_eq!(
            config(&["recipe", "note", "r1", "もう少し甘く"]).command,
            RecipeCommand::Note {
                id: RecipeId::new("r1"),
                text: "もう少し甘く".to_string()
            }
        );
        assert_eq!(
            config(&["recipe", "delete", "r1"]).command,
            RecipeCommand::Delete { id: RecipeId::new("r1") }
        );
    }

    #[test]
    fn test_completion() {
        match parse_args_from(&["recipe", "completion", "bash"]).unwrap() {
            ParseOutcome::GenerateCompletion(shell) => assert_eq!(shell, Shell::Bash),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_help_is_not_an_error() {
        match parse_args_from(&["recipe", "--help"]).unwrap() {
            ParseOutcome::Help(text) => assert!(text.contains("generate")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_is_usage_error() {
        let text = rejected(&["recipe"]);
        assert!(text.contains("Usage:"), "{}", text);
    }
}
