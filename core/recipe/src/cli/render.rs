//! テキスト出力の整形

use crate::domain::Recipe;
use std::fmt::Write;

/// 1 件の詳細
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out, "  id: {}", recipe.id);
    let _ = writeln!(
        out,
        "  {} / {} / {}分",
        recipe.cuisine,
        recipe.difficulty.label(),
        recipe.cooking_time
    );
    out.push_str("\n材料:\n");
    for ing in &recipe.ingredients {
        let _ = writeln!(out, "  - {} {}{}", ing.name, ing.quantity, ing.unit);
    }
    out.push_str("\n手順:\n");
    for ins in &recipe.instructions {
        let _ = writeln!(out, "  {}. {}", ins.step, ins.description);
    }
    out.push('\n');
    if !recipe.is_saved() {
        out.push_str("(未保存)\n");
    } else if let Some(at) = &recipe.saved_at {
        let _ = writeln!(out, "保存日時: {}", at);
    }
    if let Some(notes) = recipe.user_notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "メモ: {}", notes);
    }
    out
}

/// 一覧（1 行 1 件）
pub fn render_list(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "保存されたレシピはありません\n".to_string();
    }
    let mut out = String::new();
    for r in recipes {
        let mark = if r.user_notes.is_some() { " *" } else { "" };
        let _ = writeln!(
            out,
            "{}  {}  [{} / {} / {}分]{}",
            r.id,
            r.name,
            r.cuisine,
            r.difficulty.label(),
            r.cooking_time,
            mark
        );
    }
    out
}
