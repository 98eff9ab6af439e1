//! Chat Completions でレシピを生成する RecipeGenerator 実装
//!
//! プロンプト組み立て → 1 回の POST → 最初の choice の本文を RecipeDraft として解析 → id 付与。

use super::prompt::{build_prompt, strip_code_fence, SYSTEM_INSTRUCTION};
use crate::domain::{Recipe, RecipeDraft, RecipeGenerationRequest};
use crate::ports::outbound::{RecipeGenerator, RecipeIdGenerator};
use common::error::Error;
use common::llm::LlmProvider;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct ChatRecipeGenerator {
    provider: Arc<dyn LlmProvider>,
    id_gen: Arc<dyn RecipeIdGenerator>,
    log: Arc<dyn Log>,
}

impl ChatRecipeGenerator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        id_gen: Arc<dyn RecipeIdGenerator>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            provider,
            id_gen,
            log,
        }
    }

    fn request_and_parse(&self, request: &RecipeGenerationRequest) -> Result<RecipeDraft, Error> {
        let prompt = build_prompt(request);
        let content = self
            .provider
            .complete(&prompt, Some(SYSTEM_INSTRUCTION))?
            .ok_or_else(|| Error::json("Response has no message content"))?;
        serde_json::from_str::<RecipeDraft>(strip_code_fence(&content))
            .map_err(|e| Error::json(format!("Failed to parse recipe JSON: {}", e)))
    }
}

impl RecipeGenerator for ChatRecipeGenerator {
    fn generate(&self, request: &RecipeGenerationRequest) -> Result<Recipe, Error> {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "recipe generation requested")
                .layer("adapter")
                .kind("llm")
                .field("provider", self.provider.name())
                .field("has_cuisine", request.cuisine.is_some())
                .field("has_difficulty", request.difficulty.is_some())
                .field("cooking_time", request.cooking_time),
        );

        match self.request_and_parse(request) {
            Ok(draft) => {
                let recipe = draft.into_recipe(self.id_gen.next_id());
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "recipe generated")
                        .layer("adapter")
                        .kind("llm")
                        .field("recipe_id", recipe.id.to_string())
                        .field("ingredients", recipe.ingredients.len())
                        .field("steps", recipe.instructions.len()),
                );
                Ok(recipe)
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, "recipe generation failed")
                        .layer("adapter")
                        .kind("llm")
                        .field("error", e.to_string()),
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, RecipeId};
    use common::adapter::NoopLog;
    use common::llm::{OpenAiCompatProvider, ProviderProfile};
    use common::ports::outbound::{HttpClient, HttpRequest, HttpResponse};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct StubHttp {
        status: u16,
        reason: &'static str,
        body: String,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl StubHttp {
        fn ok_with_content(content: &str) -> Self {
            let body = json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            });
            Self {
                status: 200,
                reason: "OK",
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpClient for StubHttp {
        fn post(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                reason: self.reason.to_string(),
                body: self.body.clone(),
            })
        }
    }

    struct FixedId;

    impl RecipeIdGenerator for FixedId {
        fn next_id(&self) -> RecipeId {
            RecipeId::new("recipe-1-fixed")
        }
    }

    fn generator(http: Arc<StubHttp>) -> ChatRecipeGenerator {
        let provider = OpenAiCompatProvider::new(&ProviderProfile::default(), Some("k".to_string()), http);
        ChatRecipeGenerator::new(Arc::new(provider), Arc::new(FixedId), Arc::new(NoopLog))
    }

    fn request() -> RecipeGenerationRequest {
        RecipeGenerationRequest::new("トマト, 卵", Some("中華"), None, Some(15)).unwrap()
    }

    const DRAFT: &str = r#"{
        "name": "トマトと卵の炒め物",
        "ingredients": [{"name": "トマト", "quantity": "2", "unit": "個"}],
        "instructions": [{"step": 1, "description": "炒める"}],
        "cookingTime": 10,
        "difficulty": "beginner",
        "cuisine": "中華"
    }"#;

    #[test]
    fn test_generate_success() {
        let http = Arc::new(StubHttp::ok_with_content(DRAFT));
        let recipe = generator(http.clone()).generate(&request()).unwrap();
        assert_eq!(&*recipe.id, "recipe-1-fixed");
        assert_eq!(recipe.name, "トマトと卵の炒め物");
        assert_eq!(recipe.difficulty, Difficulty::Beginner);
        assert_eq!(recipe.cooking_time, 10);
        assert!(recipe.saved_at.is_none());
        assert!(recipe.user_notes.is_none());

        let seen = http.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://api.openai.com/v1/chat/completions");
        let body: Value = serde_json::from_str(&seen[0].body).unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_INSTRUCTION);
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.contains("材料: トマト, 卵"));
        assert!(user.contains("料理の種類: 中華"));
        assert!(user.contains("調理時間: 15分以内"));
    }

    #[test]
    fn test_generate_ignores_id_in_response() {
        let content = DRAFT.replacen('{', r#"{"id": "from-model", "savedAt": "x","#, 1);
        let http = Arc::new(StubHttp::ok_with_content(&content));
        let recipe = generator(http).generate(&request()).unwrap();
        assert_eq!(&*recipe.id, "recipe-1-fixed");
        assert!(recipe.saved_at.is_none());
    }

    #[test]
    fn test_generate_accepts_fenced_json() {
        let content = format!("```json\n{}\n```", DRAFT);
        let http = Arc::new(StubHttp::ok_with_content(&content));
        assert!(generator(http).generate(&request()).is_ok());
    }

    #[test]
    fn test_generate_http_500() {
        let http = Arc::new(StubHttp {
            status: 500,
            reason: "Internal Server Error",
            body: "{}".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let err = generator(http.clone()).generate(&request()).unwrap_err();
        assert!(matches!(err, Error::Http { status: Some(500), .. }), "{:?}", err);
        assert_eq!(http.seen.lock().unwrap().len(), 1, "no retry");
    }

    #[test]
    fn test_generate_non_json_content() {
        let http = Arc::new(StubHttp::ok_with_content("すみません、レシピを作れません。"));
        let err = generator(http).generate(&request()).unwrap_err();
        assert!(matches!(err, Error::Json(_)), "{:?}", err);
    }

    #[test]
    fn test_generate_wrong_shape() {
        let http = Arc::new(StubHttp::ok_with_content(r#"{"name": "only a name"}"#));
        let err = generator(http).generate(&request()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_generate_missing_content() {
        let http = Arc::new(StubHttp {
            status: 200,
            reason: "OK",
            body: r#"{"choices": []}"#.to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let err = generator(http).generate(&request()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_generate_body_not_json() {
        let http = Arc::new(StubHttp {
            status: 200,
            reason: "OK",
            body: "<html>gateway</html>".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let err = generator(http).generate(&request()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
