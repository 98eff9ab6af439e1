//! CLI 層: 引数解析と表示整形

mod args;
mod render;

pub use args::{parse_args, print_completion, Config, ParseOutcome};
pub use render::{render_list, render_recipe};
