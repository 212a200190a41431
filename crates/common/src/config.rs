use std::env;
use std::str::FromStr;
use anyhow::{Result, Context};

pub const DEFAULT_MOBILE_BASE_URL: &str = "https://m.blog.naver.com";

#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub blog_id: String,
    pub user_id: String,
    pub category_no: u32,
    pub item_count: u32,
    pub page: u32,
    pub mobile_base_url: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            blog_id: "ranto28".to_string(),
            user_id: "gomting".to_string(),
            category_no: 0,
            item_count: 24,
            page: 1,
            mobile_base_url: DEFAULT_MOBILE_BASE_URL.to_string(),
        }
    }
}

impl BlogConfig {
    pub fn post_list_url(&self) -> String {
        format!("{}/api/blogs/{}/post-list", self.mobile_base_url, self.blog_id)
    }

    pub fn referer(&self) -> String {
        format!("{}/{}?categoryNo={}&tab=1", self.mobile_base_url, self.blog_id, self.category_no)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackendKind {
    OpenAi,
    Gemini,
}

impl LlmBackendKind {
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackendKind::OpenAi => "gpt-4o-mini",
            LlmBackendKind::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmBackendKind::OpenAi => "https://api.openai.com/v1",
            LlmBackendKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmBackendKind::OpenAi => "OPENAI_API_KEY",
            LlmBackendKind::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl FromStr for LlmBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmBackendKind::OpenAi),
            "gemini" => Ok(LlmBackendKind::Gemini),
            other => anyhow::bail!("Unknown LLM_BACKEND '{}', expected 'openai' or 'gemini'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackendKind,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl LlmConfig {
    pub fn new(backend: LlmBackendKind, api_key: &str) -> Self {
        Self {
            backend,
            api_key: Some(api_key.to_string()),
            model: backend.default_model().to_string(),
            base_url: backend.default_base_url().to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn require_api_key(&self) -> Result<&String> {
        self.api_key
            .as_ref()
            .with_context(|| format!("{} must be set", self.backend.api_key_var()))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub blog: BlogConfig,
    pub llm: LlmConfig,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = BlogConfig::default();
        let blog = BlogConfig {
            blog_id: env::var("NAVER_BLOG_ID").unwrap_or(defaults.blog_id),
            user_id: env::var("NAVER_USER_ID").unwrap_or(defaults.user_id),
            category_no: env_or("NAVER_CATEGORY_NO", defaults.category_no),
            item_count: env_or("NAVER_ITEM_COUNT", defaults.item_count),
            page: env_or("NAVER_PAGE", defaults.page),
            mobile_base_url: env::var("NAVER_MOBILE_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.mobile_base_url),
        };

        let backend = match env::var("LLM_BACKEND") {
            Ok(s) => s.parse().context("LLM_BACKEND is invalid")?,
            Err(_) => LlmBackendKind::Gemini,
        };

        let llm = LlmConfig {
            backend,
            api_key: env::var(backend.api_key_var()).ok().filter(|k| !k.trim().is_empty()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| backend.default_model().to_string()),
            base_url: env::var("LLM_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| backend.default_base_url().to_string()),
        };

        Ok(Config { blog, llm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_urls() {
        let blog = BlogConfig::default();
        assert_eq!(
            blog.post_list_url(),
            "https://m.blog.naver.com/api/blogs/ranto28/post-list"
        );
        assert_eq!(
            blog.referer(),
            "https://m.blog.naver.com/ranto28?categoryNo=0&tab=1"
        );
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("OpenAI".parse::<LlmBackendKind>().unwrap(), LlmBackendKind::OpenAi);
        assert_eq!(" gemini ".parse::<LlmBackendKind>().unwrap(), LlmBackendKind::Gemini);
        assert!("claude".parse::<LlmBackendKind>().is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let mut llm = LlmConfig::new(LlmBackendKind::OpenAi, "k");
        assert_eq!(llm.require_api_key().unwrap(), "k");
        llm.api_key = None;
        let err = llm.require_api_key().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
