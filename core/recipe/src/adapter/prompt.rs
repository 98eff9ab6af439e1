//! レシピ生成のプロンプト組み立て
//!
//! 材料と、指定された任意条件だけを列挙し、最後に JSON 形式の指示を付ける。

use crate::domain::RecipeGenerationRequest;
use std::fmt::Write;

/// システム指示（料理のプロとしての人格と JSON 回答の指示）
pub const SYSTEM_INSTRUCTION: &str = "あなたは経験豊富な料理のプロフェッショナルです。\
ユーザーの要望に基づいて、詳細で実用的なレシピを提案してください。JSON形式で回答してください。";

/// 回答してほしい JSON の形（id は含めない）
const RESPONSE_FORMAT: &str = r#"{
  "name": "レシピ名",
  "ingredients": [
    {
      "name": "材料名",
      "quantity": "量",
      "unit": "単位"
    }
  ],
  "instructions": [
    {
      "step": 1,
      "description": "手順の説明"
    }
  ],
  "cookingTime": 調理時間(分、整数),
  "difficulty": "beginner" | "intermediate" | "advanced",
  "cuisine": "料理の種類"
}"#;

/// ユーザーメッセージを組み立てる
pub fn build_prompt(request: &RecipeGenerationRequest) -> String {
    let mut prompt = String::from("以下の条件でレシピを作成してください:\n\n");
    // String への write! は失敗しない
    let _ = writeln!(prompt, "材料: {}", request.ingredients);
    if let Some(cuisine) = &request.cuisine {
        let _ = writeln!(prompt, "料理の種類: {}", cuisine);
    }
    if let Some(difficulty) = &request.difficulty {
        let _ = writeln!(prompt, "難易度: {}", difficulty);
    }
    if let Some(minutes) = request.cooking_time {
        let _ = writeln!(prompt, "調理時間: {}分以内", minutes);
    }
    prompt.push_str("\n以下のJSON形式で回答してください:\n");
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

/// 応答が ```json ... ``` で囲まれていれば中身だけを取り出す
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // 開きフェンスの行（言語名）を飛ばす
    match body.find('\n') {
        Some(pos) => body[pos + 1..].trim(),
        None => body.trim(),
    }
}
