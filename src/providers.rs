//! Model and inference-provider routing tables shown in the prompt bar.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Provider {
    pub id: &'static str,
    pub name: &'static str,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub value: &'static str,
    pub label: &'static str,
    pub providers: &'static [&'static str],
    pub auto_provider: &'static str,
    pub is_thinker: bool,
    pub is_new: bool,
}

pub const PROVIDERS: &[Provider] = &[
    Provider { id: "fireworks-ai", name: "Landing Page Specialist", max_tokens: 131_000 },
    Provider { id: "nebius", name: "Blog Website Expert", max_tokens: 131_000 },
    Provider { id: "sambanova", name: "Portfolio Creator", max_tokens: 32_000 },
    Provider { id: "novita", name: "Business Site Builder", max_tokens: 16_000 },
    Provider { id: "hyperbolic", name: "E-commerce Developer", max_tokens: 131_000 },
    Provider { id: "together", name: "Personal Brand Designer", max_tokens: 128_000 },
    Provider { id: "groq", name: "Restaurant Web Expert", max_tokens: 16_384 },
];

pub const MODELS: &[Model] = &[
    Model {
        value: "deepseek-ai/DeepSeek-V3-0324",
        label: "Bond Media Studio Pro Model",
        providers: &["fireworks-ai", "nebius", "sambanova", "novita", "hyperbolic"],
        auto_provider: "novita",
        is_thinker: false,
        is_new: false,
    },
    Model {
        value: "deepseek-ai/DeepSeek-R1-0528",
        label: "Bond Media Creative Designer",
        providers: &["fireworks-ai", "novita", "hyperbolic", "nebius", "together", "sambanova"],
        auto_provider: "novita",
        is_thinker: true,
        is_new: false,
    },
    Model {
        value: "Qwen/Qwen3-Coder-480B-A35B-Instruct",
        label: "Bond Media E-commerce Specialist",
        providers: &["novita", "hyperbolic"],
        auto_provider: "novita",
        is_thinker: false,
        is_new: true,
    },
    Model {
        value: "moonshotai/Kimi-K2-Instruct",
        label: "Bond Media Portfolio Expert",
        providers: &["together", "novita", "groq"],
        auto_provider: "groq",
        is_thinker: false,
        is_new: false,
    },
];

pub fn find_provider(id: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|p| p.id == id)
}

pub fn find_model(value: &str) -> Option<&'static Model> {
    MODELS.iter().find(|m| m.value == value)
}

/// A model resolved to the provider that will serve it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub model: &'static str,
    pub provider: &'static str,
    pub max_tokens: u32,
}

/// `"auto"` resolves to the model's preferred provider; providers the model
/// doesn't list are rejected.
pub fn route(model: &str, provider: &str) -> Option<Route> {
    let model = find_model(model)?;
    let provider_id = if provider == "auto" {
        model.auto_provider
    } else {
        provider
    };
    if !model.providers.contains(&provider_id) {
        return None;
    }
    let provider = find_provider(provider_id)?;
    Some(Route {
        model: model.value,
        provider: provider.id,
        max_tokens: provider.max_tokens,
    })
}

/// Token budget for a model routed through `provider`.
pub fn max_tokens_for(model: &str, provider: &str) -> Option<u32> {
    route(model, provider).map(|route| route.max_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_model_routes_to_known_providers() {
        for model in MODELS {
            assert!(find_provider(model.auto_provider).is_some(), "{}", model.value);
            assert!(model.providers.contains(&model.auto_provider), "{}", model.value);
            for provider in model.providers {
                assert!(find_provider(provider).is_some(), "{}", provider);
            }
        }
    }

    #[test]
    fn test_max_tokens_auto_provider() {
        assert_eq!(max_tokens_for("moonshotai/Kimi-K2-Instruct", "auto"), Some(16_384));
        assert_eq!(max_tokens_for("deepseek-ai/DeepSeek-V3-0324", "nebius"), Some(131_000));
    }

    #[test]
    fn test_max_tokens_rejects_unlisted_provider() {
        assert_eq!(max_tokens_for("Qwen/Qwen3-Coder-480B-A35B-Instruct", "groq"), None);
        assert_eq!(max_tokens_for("unknown/model", "auto"), None);
    }

    #[test]
    fn test_route_names_resolved_provider() {
        let resolved = route("deepseek-ai/DeepSeek-R1-0528", "auto").unwrap();
        assert_eq!(resolved.provider, "novita");
        assert_eq!(resolved.max_tokens, 16_000);
        let json = serde_json::to_value(resolved).unwrap();
        assert_eq!(json["maxTokens"], 16_000);
    }

    #[test]
    fn test_models_serialize_camel_case() {
        let json = serde_json::to_value(MODELS[1]).unwrap();
        assert_eq!(json["autoProvider"], "novita");
        assert_eq!(json["isThinker"], true);
    }
}
